//! Container header decoding
//!
//! Header layout by release:
//! - >= 4.0: unsupported
//! - >= 3.7: magic u16, CRLF, flags u32, then source hash (8 bytes) or
//!   source mtime/size (u32 each) depending on the hash-based flag bit
//! - >= 3.3: magic u16, CRLF, source mtime u32, source size u32
//! - older:  magic u16, CRLF, source mtime u32

use crate::cursor::ByteCursor;
use crate::error::DecodeError;
use crate::profile::{profile_for, HeaderLayout};
use crate::version::{resolve_magic, PythonVersion};
use serde::Serialize;

/// Source validation info carried by the header
///
/// Which variant appears is fully determined by the release and, for 3.7+,
/// the hash-based flag bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceInfo {
    /// Hash-based validation (3.7+ with flag bit 0 set)
    Hash {
        /// Whether the hash must be checked against the source at import
        check_source: bool,
        /// Content hash of the source file
        hash: [u8; 8],
    },
    /// Timestamp and size validation (3.3 up to 3.7, or 3.7+ without the
    /// hash-based bit)
    MtimeSize {
        /// Source modification time
        mtime: u32,
        /// Source file size
        size: u32,
    },
    /// Timestamp-only validation (releases before 3.3)
    Mtime {
        /// Source modification time
        mtime: u32,
    },
}

const FLAG_MASK: u32 = 0b11;
const FLAG_HASH_BASED: u32 = 0b01;
const FLAG_CHECK_SOURCE: u32 = 0b10;

/// Decoded container header
///
/// Built once per file and read-only afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Raw magic number
    pub magic: u16,
    /// Release resolved from the magic
    pub version: PythonVersion,
    /// Header flags word; present exactly for releases >= 3.7
    pub flags: Option<u32>,
    /// Source validation fields
    pub source: SourceInfo,
    /// Byte offset where the object stream begins
    pub header_length: usize,
}

impl Header {
    /// Decode the header from the start of the cursor
    pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let magic = cursor.read_u16()?;
        let terminator = cursor.read(2)?;
        if terminator != b"\r\n" {
            return Err(DecodeError::BadHeaderTerminator([
                terminator[0],
                terminator[1],
            ]));
        }

        let version = resolve_magic(magic)?;
        if version >= PythonVersion::new(4, 0) {
            return Err(DecodeError::UnsupportedVersion(version));
        }
        let profile =
            profile_for(&version).ok_or(DecodeError::UnsupportedVersion(version))?;

        let (flags, source) = match profile.header {
            HeaderLayout::Flagged => {
                let flags = cursor.read_u32()?;
                if flags & !FLAG_MASK != 0 {
                    return Err(DecodeError::InvalidFlags(flags));
                }
                let source = if flags & FLAG_HASH_BASED != 0 {
                    let check_source = flags & FLAG_CHECK_SOURCE != 0;
                    let hash: [u8; 8] = cursor.read(8)?.try_into().unwrap();
                    SourceInfo::Hash { check_source, hash }
                } else {
                    let mtime = cursor.read_u32()?;
                    let size = cursor.read_u32()?;
                    SourceInfo::MtimeSize { mtime, size }
                };
                (Some(flags), source)
            }
            HeaderLayout::MtimeSize => {
                let mtime = cursor.read_u32()?;
                let size = cursor.read_u32()?;
                (None, SourceInfo::MtimeSize { mtime, size })
            }
            HeaderLayout::Mtime => {
                let mtime = cursor.read_u32()?;
                (None, SourceInfo::Mtime { mtime })
            }
        };

        Ok(Self {
            magic,
            version,
            flags,
            source,
            header_length: cursor.tell(),
        })
    }

    /// True when the header identifies its source by content hash
    pub fn hash_based(&self) -> bool {
        matches!(self.source, SourceInfo::Hash { .. })
    }
}
