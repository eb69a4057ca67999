//! Per-release decoding strategy table
//!
//! Each historical release gets one [`FormatProfile`] describing its header
//! layout and, for releases with a registered body schema, how to decode the
//! object stream. Dispatch everywhere else in the crate is a single lookup
//! into this table. The table is built once and shared read-only across all
//! decodes.

use crate::object::tag;
use crate::version::{PythonVersion, MAGIC_VERSIONS};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Field layout of the variable part of the container header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLayout {
    /// source_mtime only (releases before 3.3)
    Mtime,
    /// source_mtime then source_size (3.3 up to 3.7)
    MtimeSize,
    /// flags word, then hash or mtime/size depending on the flags (3.7+)
    Flagged,
}

/// Field order of a code-object record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSchema {
    /// The 2.x-era baseline
    Legacy,
    /// The 3.x family: adds the keyword-only argument count
    Py3,
}

/// How to decode the object stream for one release
#[derive(Debug)]
pub struct BodyProfile {
    /// Code-record field order
    pub schema: CodeSchema,
    /// Boundary opcode: opcodes at or above it carry a 2-byte operand
    pub have_argument: u8,
    /// Object tag bytes this release's format understands
    pub tags: &'static [u8],
}

/// Decoding strategy for one release bucket
#[derive(Debug)]
pub struct FormatProfile {
    /// The release this profile describes
    pub version: PythonVersion,
    /// Header field layout
    pub header: HeaderLayout,
    /// Body decoding strategy; `None` means the object stream for this
    /// release is not supported and body decoding fails loudly
    pub body: Option<BodyProfile>,
}

/// Tag bytes understood by the 2.x marshal family
const LEGACY_TAGS: &[u8] = &[
    tag::TUPLE,
    tag::FALSE,
    tag::NONE,
    tag::STRING_REF,
    tag::TRUE,
    tag::CODE,
    tag::INT,
    tag::STRING,
    tag::INTERNED,
    tag::UNICODE,
];

/// Tag bytes understood by the 3.x family; the interned/string-ref pair
/// left the format after 2.x
const PY3_TAGS: &[u8] = &[
    tag::TUPLE,
    tag::FALSE,
    tag::NONE,
    tag::TRUE,
    tag::CODE,
    tag::INT,
    tag::STRING,
    tag::UNICODE,
];

// Opcode numbering is not stable across releases, so the boundary opcode is
// carried per profile even where the value coincides.
const HAVE_ARGUMENT_27: u8 = 90;
const HAVE_ARGUMENT_35: u8 = 90;
const HAVE_ARGUMENT_37: u8 = 90;

static PROFILES: Lazy<HashMap<(u16, u16), FormatProfile>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for &(_, version) in MAGIC_VERSIONS {
        let header = if version >= PythonVersion::new(3, 7) {
            HeaderLayout::Flagged
        } else if version >= PythonVersion::new(3, 3) {
            HeaderLayout::MtimeSize
        } else {
            HeaderLayout::Mtime
        };
        let body = match (version.major, version.minor) {
            (2, 7) => Some(BodyProfile {
                schema: CodeSchema::Legacy,
                have_argument: HAVE_ARGUMENT_27,
                tags: LEGACY_TAGS,
            }),
            (3, 5) => Some(BodyProfile {
                schema: CodeSchema::Py3,
                have_argument: HAVE_ARGUMENT_35,
                tags: PY3_TAGS,
            }),
            (3, 7) => Some(BodyProfile {
                schema: CodeSchema::Py3,
                have_argument: HAVE_ARGUMENT_37,
                tags: PY3_TAGS,
            }),
            _ => None,
        };
        table.insert(
            (version.major, version.minor),
            FormatProfile {
                version,
                header,
                body,
            },
        );
    }
    table
});

/// Look up the profile for a resolved release
///
/// Every release in the magic table has a profile; `None` only for versions
/// that no magic number resolves to.
pub fn profile_for(version: &PythonVersion) -> Option<&'static FormatProfile> {
    PROFILES.get(&(version.major, version.minor))
}
