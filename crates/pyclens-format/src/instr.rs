//! Instruction-stream decoding inside code records
//!
//! The stream is framed as a string record: the `b's'` marker, a u32 byte
//! length, then exactly that many bytes of opcode/operand pairs.

use crate::cursor::ByteCursor;
use crate::error::DecodeError;
use crate::object::tag;
use serde::Serialize;

/// One decoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// Raw opcode byte
    pub opcode: u8,
    /// 16-bit operand; present iff the opcode is at or above the release's
    /// boundary opcode
    pub operand: Option<u16>,
}

/// A decoded instruction stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionStream {
    /// Declared byte length of the encoded stream
    pub length: u32,
    /// Instructions in stream order
    pub instructions: Vec<Instruction>,
}

impl InstructionStream {
    /// Decode a framed instruction stream at the cursor
    ///
    /// `have_argument` is the boundary opcode for the targeted release.
    /// Decoding must land exactly on the declared length; an operand that
    /// would cross it is a framing error.
    pub(crate) fn decode(
        cursor: &mut ByteCursor<'_>,
        have_argument: u8,
    ) -> Result<Self, DecodeError> {
        let marker = cursor.read_u8()?;
        if marker != tag::STRING {
            return Err(DecodeError::BadCodeMarker(marker));
        }
        let length = cursor.read_u32()?;
        let end = cursor.tell() + length as usize;

        let mut instructions = Vec::new();
        while cursor.tell() < end {
            let opcode = cursor.read_u8()?;
            if opcode >= have_argument {
                if cursor.tell() + 2 > end {
                    return Err(DecodeError::InstructionOverrun(cursor.tell()));
                }
                let operand = cursor.read_u16()?;
                instructions.push(Instruction {
                    opcode,
                    operand: Some(operand),
                });
            } else {
                instructions.push(Instruction {
                    opcode,
                    operand: None,
                });
            }
        }

        Ok(Self {
            length,
            instructions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HAVE_ARGUMENT: u8 = 90;

    fn framed(code: &[u8]) -> Vec<u8> {
        let mut bytes = vec![b's'];
        bytes.extend_from_slice(&(code.len() as u32).to_le_bytes());
        bytes.extend_from_slice(code);
        bytes
    }

    fn decode(bytes: &[u8]) -> (Result<InstructionStream, DecodeError>, usize) {
        let mut cursor = ByteCursor::new(bytes);
        let stream = InstructionStream::decode(&mut cursor, HAVE_ARGUMENT);
        (stream, cursor.tell())
    }

    #[test]
    fn test_single_no_operand_opcode() {
        let bytes = framed(&[23]); // below the boundary
        let (stream, consumed) = decode(&bytes);
        let stream = stream.unwrap();

        assert_eq!(stream.length, 1);
        assert_eq!(
            stream.instructions,
            vec![Instruction {
                opcode: 23,
                operand: None,
            }]
        );
        // marker + length + one opcode byte
        assert_eq!(consumed, 1 + 4 + 1);
    }

    #[test]
    fn test_operand_opcode() {
        let bytes = framed(&[90, 0x34, 0x12]);
        let (stream, _) = decode(&bytes);

        assert_eq!(
            stream.unwrap().instructions,
            vec![Instruction {
                opcode: 90,
                operand: Some(0x1234),
            }]
        );
    }

    #[test]
    fn test_mixed_stream() {
        // no-operand, operand, no-operand
        let bytes = framed(&[1, 100, 0x05, 0x00, 4]);
        let (stream, _) = decode(&bytes);
        let stream = stream.unwrap();

        assert_eq!(stream.length, 5);
        assert_eq!(stream.instructions.len(), 3);
        assert_eq!(stream.instructions[1].operand, Some(5));
        assert_eq!(stream.instructions[2].operand, None);
    }

    #[test]
    fn test_bad_marker() {
        let bytes = [b'x', 0, 0, 0, 0];
        assert!(matches!(
            decode(&bytes).0,
            Err(DecodeError::BadCodeMarker(b'x'))
        ));
    }

    #[test]
    fn test_operand_overruns_declared_length() {
        // Opcode 200 wants an operand but the declared span ends after it
        let bytes = framed(&[200]);
        assert!(matches!(
            decode(&bytes).0,
            Err(DecodeError::InstructionOverrun(_))
        ));
    }

    #[test]
    fn test_operand_split_across_end() {
        // One operand byte inside the span, one outside
        let bytes = framed(&[200, 0x01]);
        assert!(matches!(
            decode(&bytes).0,
            Err(DecodeError::InstructionOverrun(_))
        ));
    }

    #[test]
    fn test_declared_length_past_buffer() {
        let mut bytes = vec![b's'];
        bytes.extend_from_slice(&10u32.to_le_bytes());
        bytes.push(1); // only one byte follows

        assert!(matches!(
            decode(&bytes).0,
            Err(DecodeError::UnexpectedEof(_))
        ));
    }

    #[test]
    fn test_empty_stream() {
        let bytes = framed(&[]);
        let (stream, consumed) = decode(&bytes);

        assert!(stream.unwrap().instructions.is_empty());
        assert_eq!(consumed, 5);
    }
}
