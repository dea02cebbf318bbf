use super::{Address, Opcode};
use crate::error;
use crate::lang::Error;
use byteorder::{ByteOrder, LittleEndian};

type Result<T> = std::result::Result<T, Error>;

/// ## Fixed-width values in the instruction stream
///
/// Everything wider than a byte is little-endian.
pub trait Scalar: Sized + Copy {
    const SIZE: usize;
    fn read(bytes: &[u8]) -> Self;
    fn write(self, bytes: &mut [u8]);
}

impl Scalar for u8 {
    const SIZE: usize = 1;
    fn read(bytes: &[u8]) -> Self {
        bytes[0]
    }
    fn write(self, bytes: &mut [u8]) {
        bytes[0] = self
    }
}

impl Scalar for u16 {
    const SIZE: usize = 2;
    fn read(bytes: &[u8]) -> Self {
        LittleEndian::read_u16(bytes)
    }
    fn write(self, bytes: &mut [u8]) {
        LittleEndian::write_u16(bytes, self)
    }
}

impl Scalar for u32 {
    const SIZE: usize = 4;
    fn read(bytes: &[u8]) -> Self {
        LittleEndian::read_u32(bytes)
    }
    fn write(self, bytes: &mut [u8]) {
        LittleEndian::write_u32(bytes, self)
    }
}

impl Scalar for u64 {
    const SIZE: usize = 8;
    fn read(bytes: &[u8]) -> Self {
        LittleEndian::read_u64(bytes)
    }
    fn write(self, bytes: &mut [u8]) {
        LittleEndian::write_u64(bytes, self)
    }
}

/// ## Bounds checked program reader
///
/// A cursor only knows where it is and where the loaded program ends.
/// The memory it decodes from is handed in on every read, so the machine
/// is free to write to memory between reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    pos: usize,
    end: usize,
}

impl Cursor {
    pub fn new(program_size: usize) -> Cursor {
        Cursor {
            pos: 0,
            end: program_size,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn limit(&self) -> usize {
        self.end
    }

    pub fn finished(&self) -> bool {
        self.pos >= self.end
    }

    /// Reads the next value and advances past it. Fails without moving
    /// if the value would cross the end of the program.
    pub fn next<T: Scalar>(&mut self, mem: &[u8]) -> Result<T> {
        let next = self.pos + T::SIZE;
        if next > self.end {
            return Err(error!(ReadPastEnd));
        }
        match mem.get(self.pos..next) {
            Some(bytes) => {
                self.pos = next;
                Ok(T::read(bytes))
            }
            None => Err(error!(ReadPastEnd)),
        }
    }

    pub fn opcode(&mut self, mem: &[u8]) -> Result<Opcode> {
        let tag: u16 = self.next(mem)?;
        match Opcode::from_tag(tag) {
            Some(opcode) => Ok(opcode),
            None => Err(error!(IllegalOpcode; &format!("{:04X}", tag))),
        }
    }

    /// Targets are absolute offsets into the program.
    pub fn jump(&mut self, dest: Address) -> Result<()> {
        if (dest as usize) < self.end {
            self.pos = dest as usize;
            Ok(())
        } else {
            Err(error!(IllegalJump; &format!("{:04X}", dest)))
        }
    }
}
