use super::{Address, Cursor, RAM};
use crate::lang::Error;

const BYTES_PER_DATA_LINE: usize = 8;

/// Decodes instructions from the start of `bytes`. Decoding stops at the
/// first instruction that would fault on load and everything from there
/// on is listed as `DB` data.
pub fn disassemble(bytes: &[u8]) -> Vec<(Address, String)> {
    let bytes = &bytes[..bytes.len().min(RAM)];
    let mut lines = vec![];
    let mut cursor = Cursor::new(bytes.len());
    let mut start = 0;
    while !cursor.finished() {
        start = cursor.position();
        match instruction(&mut cursor, bytes) {
            Ok(text) => lines.push((start as Address, text)),
            Err(_) => break,
        }
        start = cursor.position();
    }
    for (index, chunk) in bytes[start..].chunks(BYTES_PER_DATA_LINE).enumerate() {
        let addr = start + index * BYTES_PER_DATA_LINE;
        let data: Vec<String> = chunk.iter().map(|b| format!("0x{:02X}", b)).collect();
        lines.push((addr as Address, format!("DB {}", data.join(", "))));
    }
    lines
}

fn instruction(cursor: &mut Cursor, bytes: &[u8]) -> Result<String, Error> {
    let opcode = cursor.opcode(bytes)?;
    let mut operands = vec![];
    for _ in 0..opcode.operand_count() {
        let word: Address = cursor.next(bytes)?;
        operands.push(format!("0x{:04X}", word));
    }
    if operands.is_empty() {
        Ok(opcode.to_string())
    } else {
        Ok(format!("{} {}", opcode, operands.join(", ")))
    }
}
