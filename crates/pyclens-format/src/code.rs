//! Code-object record decoding
//!
//! Each supported release family has an exact field order; the active
//! [`CodeSchema`](crate::profile::CodeSchema) is looked up through the
//! profile rather than branched on inline.

use crate::error::DecodeError;
use crate::instr::InstructionStream;
use crate::object::{ObjectDecoder, ObjectNode};
use crate::profile::CodeSchema;
use serde::Serialize;

/// A decoded code-object record
///
/// Scalar counts, the instruction stream, and the nested object fields of
/// one executable unit. `kwonly_argument_count` is populated only by the
/// 3.x schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeRecord {
    /// Number of positional arguments
    pub argument_count: u32,
    /// Number of keyword-only arguments (3.x schemas)
    pub kwonly_argument_count: Option<u32>,
    /// Number of local variables
    pub local_count: u32,
    /// Evaluation stack size
    pub stack_size: u32,
    /// Code flags word
    pub flags: u32,
    /// Decoded instruction stream
    pub code: InstructionStream,
    /// Constants used by the code, typically a tuple
    pub constants: ObjectNode,
    /// Names referenced by the code
    pub names: ObjectNode,
    /// Local variable names
    pub varnames: ObjectNode,
    /// Free variable names
    pub freevars: ObjectNode,
    /// Cell variable names
    pub cellvars: ObjectNode,
    /// Source file name, typically a string
    pub filename: ObjectNode,
    /// Name of the executable unit
    pub name: ObjectNode,
    /// First source line number
    pub first_line_number: u32,
    /// Line-number table, opaque encoded bytes
    pub line_number_table: ObjectNode,
}

impl CodeRecord {
    /// Decode one code record under the decoder's active schema
    pub(crate) fn decode(dec: &mut ObjectDecoder<'_, '_>) -> Result<Self, DecodeError> {
        match dec.profile.schema {
            CodeSchema::Legacy => Self::decode_legacy(dec),
            CodeSchema::Py3 => Self::decode_py3(dec),
        }
    }

    /// The 2.x-era baseline field order
    fn decode_legacy(dec: &mut ObjectDecoder<'_, '_>) -> Result<Self, DecodeError> {
        let argument_count = dec.cursor.read_u32()?;
        let local_count = dec.cursor.read_u32()?;
        let stack_size = dec.cursor.read_u32()?;
        let flags = dec.cursor.read_u32()?;
        let code = InstructionStream::decode(dec.cursor, dec.profile.have_argument)?;
        let constants = dec.decode_object()?;
        let names = dec.decode_object()?;
        let varnames = dec.decode_object()?;
        let freevars = dec.decode_object()?;
        let cellvars = dec.decode_object()?;
        let filename = dec.decode_object()?;
        let name = dec.decode_object()?;
        let first_line_number = dec.cursor.read_u32()?;
        let line_number_table = dec.decode_object()?;

        Ok(Self {
            argument_count,
            kwonly_argument_count: None,
            local_count,
            stack_size,
            flags,
            code,
            constants,
            names,
            varnames,
            freevars,
            cellvars,
            filename,
            name,
            first_line_number,
            line_number_table,
        })
    }

    /// The 3.x field order: keyword-only argument count after the
    /// positional count, same tail as the baseline
    fn decode_py3(dec: &mut ObjectDecoder<'_, '_>) -> Result<Self, DecodeError> {
        let argument_count = dec.cursor.read_u32()?;
        let kwonly_argument_count = dec.cursor.read_u32()?;
        let local_count = dec.cursor.read_u32()?;
        let stack_size = dec.cursor.read_u32()?;
        let flags = dec.cursor.read_u32()?;
        let code = InstructionStream::decode(dec.cursor, dec.profile.have_argument)?;
        let constants = dec.decode_object()?;
        let names = dec.decode_object()?;
        let varnames = dec.decode_object()?;
        let freevars = dec.decode_object()?;
        let cellvars = dec.decode_object()?;
        let filename = dec.decode_object()?;
        let name = dec.decode_object()?;
        let first_line_number = dec.cursor.read_u32()?;
        let line_number_table = dec.decode_object()?;

        Ok(Self {
            argument_count,
            kwonly_argument_count: Some(kwonly_argument_count),
            local_count,
            stack_size,
            flags,
            code,
            constants,
            names,
            varnames,
            freevars,
            cellvars,
            filename,
            name,
            first_line_number,
            line_number_table,
        })
    }
}
