//! Program bytes and the instruction decoder

use crate::error::{BytecodeError, EvmResult, HaltReason};
use crate::opcode::Opcode;
use bytes::Bytes;
use std::fmt;
use std::str::FromStr;
use tinyevm_primitives::word::bytes_to_hex;
use tinyevm_primitives::{decode_hex_bytes, word_from_be_slice, Word};

/// Immutable program bytes
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Bytecode(Bytes);

impl Bytecode {
    /// Wrap raw program bytes
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Bytecode(bytes.into())
    }

    /// Parse `0x`-optional, case-insensitive hex
    pub fn from_hex(s: &str) -> Result<Self, BytecodeError> {
        Ok(Bytecode(Bytes::from(decode_hex_bytes(s)?)))
    }

    /// Program length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the program is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Cheap clone of the underlying buffer
    pub fn bytes(&self) -> Bytes {
        self.0.clone()
    }

    /// Decoder positioned at the first byte
    pub fn decoder(&self) -> Decoder<'_> {
        Decoder::new(&self.0)
    }

    /// Human readable listing, one instruction per line.
    ///
    /// Unknown bytes are listed rather than rejected; a truncated push ends
    /// the listing.
    pub fn disassemble(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut cursor = 0;
        let decoder = self.decoder();

        while cursor < self.len() {
            match decoder.decode_at(cursor) {
                Ok(Some(insn)) => {
                    let line = match (insn.opcode, insn.immediate) {
                        (Some(op), Some(_)) => format!(
                            "{:04x}: {} {}",
                            cursor,
                            op,
                            bytes_to_hex(&self.0[cursor + 1..insn.next])
                        ),
                        (Some(op), None) => format!("{:04x}: {}", cursor, op),
                        (None, _) => format!("{:04x}: UNKNOWN(0x{:02x})", cursor, insn.opcode_byte),
                    };
                    lines.push(line);
                    cursor = insn.next;
                }
                Ok(None) => break,
                Err(_) => {
                    let name = Opcode::from_byte(self.0[cursor])
                        .map(|op| op.name())
                        .unwrap_or_default();
                    lines.push(format!("{:04x}: {} <truncated>", cursor, name));
                    break;
                }
            }
        }
        lines
    }
}

impl fmt::Debug for Bytecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytecode({})", bytes_to_hex(&self.0))
    }
}

impl fmt::Display for Bytecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bytes_to_hex(&self.0))
    }
}

impl FromStr for Bytecode {
    type Err = BytecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<Vec<u8>> for Bytecode {
    fn from(bytes: Vec<u8>) -> Self {
        Bytecode(Bytes::from(bytes))
    }
}

impl From<&[u8]> for Bytecode {
    fn from(bytes: &[u8]) -> Self {
        Bytecode(Bytes::copy_from_slice(bytes))
    }
}

impl<const N: usize> From<[u8; N]> for Bytecode {
    fn from(bytes: [u8; N]) -> Self {
        Bytecode(Bytes::copy_from_slice(&bytes))
    }
}

impl From<Bytes> for Bytecode {
    fn from(bytes: Bytes) -> Self {
        Bytecode(bytes)
    }
}

impl AsRef<[u8]> for Bytecode {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// One decoded instruction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Raw byte at the cursor
    pub opcode_byte: u8,
    /// Recognized opcode, `None` for bytes outside the instruction set
    pub opcode: Option<Opcode>,
    /// Big-endian immediate of PUSH1..PUSH32
    pub immediate: Option<Word>,
    /// Cursor of the following instruction
    pub next: usize,
}

/// Left-to-right instruction decoder over a byte program
#[derive(Clone, Copy, Debug)]
pub struct Decoder<'a> {
    code: &'a [u8],
}

impl<'a> Decoder<'a> {
    /// Decoder over `code`
    pub fn new(code: &'a [u8]) -> Self {
        Self { code }
    }

    /// Decode the instruction at `cursor`.
    ///
    /// Returns `Ok(None)` once the cursor is past the end of the program.
    pub fn decode_at(&self, cursor: usize) -> EvmResult<Option<Instruction>> {
        let Some(&byte) = self.code.get(cursor) else {
            return Ok(None);
        };
        let opcode = Opcode::from_byte(byte);

        // PUSH1..PUSH32 occupy 0x60..=0x7F
        let push_len = if (0x60..=0x7F).contains(&byte) {
            match opcode.map(Opcode::push_size) {
                Some(len) if len > 0 => len,
                _ => return Err(HaltReason::InvalidPush),
            }
        } else {
            0
        };

        let start = cursor + 1;
        let next = start + push_len;
        if next > self.code.len() {
            return Err(HaltReason::BytecodeTruncated);
        }
        let immediate = (push_len > 0).then(|| word_from_be_slice(&self.code[start..next]));

        Ok(Some(Instruction {
            opcode_byte: byte,
            opcode,
            immediate,
            next,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytecode_from_hex() {
        let code = Bytecode::from_hex("0x60016002F3").unwrap();
        assert_eq!(code.as_bytes(), &[0x60, 0x01, 0x60, 0x02, 0xF3]);
        assert_eq!(Bytecode::from_hex("60aa80f3").unwrap().len(), 4);
        assert_eq!(" 0X5f ".parse::<Bytecode>().unwrap().as_bytes(), &[0x5F]);
        assert!(Bytecode::from_hex("0x").unwrap().is_empty());
    }

    #[test]
    fn test_bytecode_from_hex_errors() {
        assert!(Bytecode::from_hex("0x600").is_err());
        assert!(Bytecode::from_hex("0xzz").is_err());
    }

    #[test]
    fn test_bytecode_display() {
        let code = Bytecode::from(vec![0x60, 0xAA]);
        assert_eq!(code.to_string(), "0x60aa");
        assert_eq!(format!("{:?}", code), "Bytecode(0x60aa)");
    }

    #[test]
    fn test_decode_simple() {
        let code = [0x01u8, 0x60, 0x2A];
        let decoder = Decoder::new(&code);

        let add = decoder.decode_at(0).unwrap().unwrap();
        assert_eq!(add.opcode, Some(Opcode::ADD));
        assert_eq!(add.immediate, None);
        assert_eq!(add.next, 1);

        let push = decoder.decode_at(1).unwrap().unwrap();
        assert_eq!(push.opcode, Some(Opcode::PUSH1));
        assert_eq!(push.immediate, Some(Word::from(0x2Au64)));
        assert_eq!(push.next, 3);

        assert_eq!(decoder.decode_at(3), Ok(None));
    }

    #[test]
    fn test_decode_push_is_big_endian() {
        let code = [0x61u8, 0x01, 0x00];
        let insn = Decoder::new(&code).decode_at(0).unwrap().unwrap();
        assert_eq!(insn.immediate, Some(Word::from(0x0100u64)));
    }

    #[test]
    fn test_decode_push32() {
        let mut code = vec![0x7Fu8];
        code.extend([0xFF; 32]);
        let insn = Decoder::new(&code).decode_at(0).unwrap().unwrap();
        assert_eq!(insn.immediate, Some(Word::MAX));
        assert_eq!(insn.next, 33);
    }

    #[test]
    fn test_decode_truncated_push() {
        let code = [0x61u8, 0xF3];
        assert_eq!(Decoder::new(&code).decode_at(0), Err(HaltReason::BytecodeTruncated));
        let code = [0x7Fu8];
        assert_eq!(Decoder::new(&code).decode_at(0), Err(HaltReason::BytecodeTruncated));
    }

    #[test]
    fn test_decode_unknown_byte() {
        let code = [0x56u8];
        let insn = Decoder::new(&code).decode_at(0).unwrap().unwrap();
        assert_eq!(insn.opcode, None);
        assert_eq!(insn.opcode_byte, 0x56);
        assert_eq!(insn.next, 1);
    }

    #[test]
    fn test_disassemble() {
        let code = Bytecode::from_hex("0x6001610100015680F3").unwrap();
        assert_eq!(
            code.disassemble(),
            vec![
                "0000: PUSH1 0x01",
                "0002: PUSH2 0x0100",
                "0005: ADD",
                "0006: UNKNOWN(0x56)",
                "0007: DUP1",
                "0008: RETURN",
            ]
        );
    }

    #[test]
    fn test_disassemble_truncated() {
        let code = Bytecode::from_hex("0x5F61F3").unwrap();
        assert_eq!(code.disassemble(), vec!["0000: PUSH0", "0001: PUSH2 <truncated>"]);
    }
}
