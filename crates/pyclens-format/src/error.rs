//! Decoding errors

use crate::version::PythonVersion;
use thiserror::Error;

/// Errors that can occur while decoding a bytecode container
///
/// Every variant is terminal for the current decode: the input buffer is
/// immutable, so a failed decode is reproducible and there is no retry or
/// partial-result path.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Unexpected end of input
    #[error("Unexpected end of input at offset {0}")]
    UnexpectedEof(usize),

    /// Magic number below the oldest known release breakpoint
    #[error("Bad magic number: {0}")]
    BadMagic(u16),

    /// The two bytes after the magic were not the CRLF marker
    #[error("Bad header terminator: expected \\r\\n, got {0:?}")]
    BadHeaderTerminator([u8; 2]),

    /// Release too new, or no body schema registered for this release
    #[error("Unsupported Python version {0}")]
    UnsupportedVersion(PythonVersion),

    /// Reserved header flag bits set
    #[error("Invalid header flags {0:#010b}")]
    InvalidFlags(u32),

    /// Unrecognized object tag byte
    #[error("Unknown object tag {0:#04x}")]
    UnknownObjectType(u8),

    /// Invalid UTF-8 in a text field
    #[error("Invalid UTF-8 in string at offset {0}")]
    InvalidUtf8(usize),

    /// Code record did not start with the string-record marker
    #[error("Bad instruction stream marker {0:#04x}, expected 's'")]
    BadCodeMarker(u8),

    /// Instruction operand would cross the declared end of the stream
    #[error("Instruction operand overruns code block at offset {0}")]
    InstructionOverrun(usize),

    /// String back-reference to an intern index that was never registered
    #[error("Unknown string reference index {0}")]
    UnknownStringRef(u32),

    /// Bytes left over after the root object was decoded
    #[error("{0} trailing bytes after object stream")]
    TrailingBytes(usize),

    /// Object nesting deeper than the decoder allows
    #[error("Object nesting exceeds depth limit {0}")]
    DepthLimit(usize),
}
