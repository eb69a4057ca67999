//! Top-level container decoding passes
//!
//! A decode is two forward passes over one immutable buffer: the header,
//! then the object stream starting at `header_length`. The stream must
//! consume the buffer exactly to its end.

use crate::cursor::ByteCursor;
use crate::error::DecodeError;
use crate::header::Header;
use crate::object::{ObjectDecoder, ObjectNode};
use crate::profile::profile_for;
use serde::Serialize;

/// Decode the container header from the start of `bytes`
pub fn decode_header(bytes: &[u8]) -> Result<Header, DecodeError> {
    let mut cursor = ByteCursor::new(bytes);
    Header::decode(&mut cursor)
}

/// Decode the object stream of `bytes` according to a decoded header
///
/// Fails with [`DecodeError::UnsupportedVersion`] when the header's release
/// has no registered body schema, and with [`DecodeError::TrailingBytes`]
/// when the stream does not land exactly on the end of the buffer.
pub fn decode_body(bytes: &[u8], header: &Header) -> Result<ObjectNode, DecodeError> {
    let profile = profile_for(&header.version)
        .ok_or(DecodeError::UnsupportedVersion(header.version))?;
    let body = profile
        .body
        .as_ref()
        .ok_or(DecodeError::UnsupportedVersion(header.version))?;

    let mut cursor = ByteCursor::new(bytes);
    cursor.seek(header.header_length);
    let mut decoder = ObjectDecoder::new(&mut cursor, body);
    let root = decoder.decode_object()?;
    if !cursor.at_end() {
        return Err(DecodeError::TrailingBytes(cursor.remaining()));
    }
    Ok(root)
}

/// A fully decoded container: header plus the root of the object graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PycFile {
    /// Decoded header
    pub header: Header,
    /// Root of the object graph, typically a code record
    pub body: ObjectNode,
}

impl PycFile {
    /// Decode a complete container from an in-memory buffer
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let header = decode_header(bytes)?;
        let body = decode_body(bytes, &header)?;
        Ok(Self { header, body })
    }
}
