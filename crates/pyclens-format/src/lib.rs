//! Compiled Python Container Decoding
//!
//! This crate decodes compiled bytecode container (.pyc) files into an
//! in-memory object graph without executing anything: the versioned header,
//! the recursive tagged-object ("marshal") stream, and the instruction
//! streams embedded in code records. Decoding is strictly read-only; the
//! crate contains no encoder.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod code;
pub mod cursor;
pub mod error;
pub mod header;
pub mod instr;
pub mod object;
pub mod profile;
pub mod pyc;
pub mod version;

pub use code::CodeRecord;
pub use cursor::ByteCursor;
pub use error::DecodeError;
pub use header::{Header, SourceInfo};
pub use instr::{Instruction, InstructionStream};
pub use object::{InternTable, ObjectDecoder, ObjectNode, MAX_DEPTH};
pub use profile::{profile_for, BodyProfile, CodeSchema, FormatProfile, HeaderLayout};
pub use pyc::{decode_body, decode_header, PycFile};
pub use version::{resolve_magic, PythonVersion, MAGIC_VERSIONS};
