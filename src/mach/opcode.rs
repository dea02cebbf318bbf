/// ## Virtual machine instruction set
///
/// The machine has no registers. Every operation works directly on memory
/// and "registers" are just addresses a program agrees to use as such.
///
/// Each instruction is a 16-bit tag followed by its operands, one 16-bit
/// word each, packed without padding.
///
/// For example: `MOVE16 0x0100, 0x0200` assembles to
/// `[05 00, 00 01, 00 02]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Opcode {
    /// No operation.
    Nop = 0,
    /// Stop the program.
    Exit = 1,
    /// Continue decoding at an absolute offset. `JUMP dest`
    Jump = 2,
    /// Copy a run of bytes. `MOVE dest, src, count`
    Move = 3,
    /// Copy one byte. `MOVE8 dest, src`
    Move8 = 4,
    /// Copy a 16-bit value. `MOVE16 dest, src`
    Move16 = 5,
    /// Copy a 32-bit value. `MOVE32 dest, src`
    Move32 = 6,
    /// Copy a 64-bit value. `MOVE64 dest, src`
    Move64 = 7,
}

impl Opcode {
    pub fn from_tag(tag: u16) -> Option<Opcode> {
        use Opcode::*;
        Some(match tag {
            0 => Nop,
            1 => Exit,
            2 => Jump,
            3 => Move,
            4 => Move8,
            5 => Move16,
            6 => Move32,
            7 => Move64,
            _ => return None,
        })
    }

    pub fn tag(self) -> u16 {
        self as u16
    }

    pub fn operand_count(self) -> usize {
        use Opcode::*;
        match self {
            Nop | Exit => 0,
            Jump => 1,
            Move => 3,
            Move8 | Move16 | Move32 | Move64 => 2,
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match self {
            Nop => write!(f, "NOP"),
            Exit => write!(f, "EXIT"),
            Jump => write!(f, "JUMP"),
            Move => write!(f, "MOVE"),
            Move8 => write!(f, "MOVE8"),
            Move16 => write!(f, "MOVE16"),
            Move32 => write!(f, "MOVE32"),
            Move64 => write!(f, "MOVE64"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_dense() {
        for tag in 0..8 {
            assert_eq!(Opcode::from_tag(tag).map(Opcode::tag), Some(tag));
        }
        assert_eq!(Opcode::from_tag(8), None);
        assert_eq!(Opcode::from_tag(0x00FF), None);
    }
}
