use super::{Address, Cursor, Opcode, Scalar, RAM};
use crate::error;
use crate::lang::Error;
use log::{debug, trace, warn};

type Result<T> = std::result::Result<T, Error>;

/// ## Host byte view
///
/// A view of host memory as a run of equally sized elements. Only
/// byte-granular views can be loaded as programs.
#[derive(Debug, Clone, Copy)]
pub struct Slice<'a> {
    data: &'a [u8],
    stride: usize,
}

impl<'a> Slice<'a> {
    pub fn new(data: &'a [u8], stride: usize) -> Slice<'a> {
        Slice { data, stride }
    }

    pub fn bytes(data: &'a [u8]) -> Slice<'a> {
        Slice::new(data, 1)
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self.stride {
            0 => 0,
            stride => self.data.len() / stride,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }
}

/// What the machine should do after an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
    Finished,
}

/// ## The virtual machine
///
/// 64K of memory and the length of the program loaded at its start.
/// Programs may read and write anywhere in memory, including themselves.
#[derive(Clone)]
pub struct Vm {
    program_size: usize,
    mem: [u8; RAM],
}

impl Default for Vm {
    fn default() -> Self {
        Vm::new()
    }
}

impl std::fmt::Debug for Vm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vm")
            .field("program_size", &self.program_size)
            .finish()
    }
}

impl Vm {
    pub fn new() -> Vm {
        Vm {
            program_size: 0,
            mem: [0; RAM],
        }
    }

    pub fn program_size(&self) -> usize {
        self.program_size
    }

    pub fn memory(&self) -> &[u8] {
        &self.mem
    }

    pub fn program(&self) -> &[u8] {
        &self.mem[..self.program_size]
    }

    /// Copies `program` to the start of memory. A program larger than
    /// memory is ignored and the machine is left as it was.
    pub fn load(&mut self, program: &[u8]) {
        self.load_slice(Some(&Slice::bytes(program)))
    }

    /// Loads from a host view. A missing view unloads the current program
    /// without touching memory. Views that are not bytes, or that don't
    /// fit in memory, are ignored.
    pub fn load_slice(&mut self, program: Option<&Slice<'_>>) {
        let program = match program {
            Some(program) => program,
            None => {
                debug!("unloading program of {} bytes", self.program_size);
                self.program_size = 0;
                return;
            }
        };
        if program.stride() != 1 {
            warn!("ignoring program with stride {}", program.stride());
            return;
        }
        let len = program.len();
        if len > RAM {
            warn!("ignoring program of {} bytes, memory is {}", len, RAM);
            return;
        }
        self.mem[..len].copy_from_slice(program.as_bytes());
        self.program_size = len;
        debug!("loaded program of {} bytes", len);
    }

    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.program_size)
    }

    /// Runs the loaded program until it exits, runs off the end, or faults.
    /// Nothing executes after a fault.
    pub fn run(&mut self) -> Result<()> {
        debug!("running {} bytes", self.program_size);
        let mut cursor = self.cursor();
        loop {
            match self.step(&mut cursor) {
                Ok(Flow::Continue) => continue,
                Ok(flow) => {
                    debug!("{:?} at {:04X}", flow, cursor.position());
                    return Ok(());
                }
                Err(error) => {
                    debug!("{}", error);
                    return Err(error);
                }
            }
        }
    }

    /// Executes one instruction. Errors carry the address of the instruction.
    pub fn step(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        if cursor.finished() {
            return Ok(Flow::Finished);
        }
        let start = cursor.position() as Address;
        self.execute(cursor).map_err(|e| e.at_address(start))
    }

    fn execute(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let opcode = cursor.opcode(&self.mem)?;
        trace!("{:04X} {}", cursor.position() - 2, opcode);
        match opcode {
            Opcode::Nop => {}
            Opcode::Exit => return Ok(Flow::Exit),
            Opcode::Jump => {
                let dest: Address = cursor.next(&self.mem)?;
                cursor.jump(dest)?;
            }
            Opcode::Move => {
                let dest: Address = cursor.next(&self.mem)?;
                let src: Address = cursor.next(&self.mem)?;
                let count: Address = cursor.next(&self.mem)?;
                self.copy(dest as usize, src as usize, count as usize)?;
            }
            Opcode::Move8 => self.move_scalar::<u8>(cursor)?,
            Opcode::Move16 => self.move_scalar::<u16>(cursor)?,
            Opcode::Move32 => self.move_scalar::<u32>(cursor)?,
            Opcode::Move64 => self.move_scalar::<u64>(cursor)?,
        }
        Ok(Flow::Continue)
    }

    /// Overlapping ranges copy as if through a temporary buffer.
    fn copy(&mut self, dest: usize, src: usize, count: usize) -> Result<()> {
        check_range(dest, count)?;
        check_range(src, count)?;
        self.mem.copy_within(src..src + count, dest);
        Ok(())
    }

    fn move_scalar<T: Scalar>(&mut self, cursor: &mut Cursor) -> Result<()> {
        let dest = cursor.next::<Address>(&self.mem)? as usize;
        let src = cursor.next::<Address>(&self.mem)? as usize;
        check_range(dest, T::SIZE)?;
        check_range(src, T::SIZE)?;
        let value = T::read(&self.mem[src..src + T::SIZE]);
        value.write(&mut self.mem[dest..dest + T::SIZE]);
        Ok(())
    }
}

fn check_range(start: usize, len: usize) -> Result<()> {
    if start + len > RAM {
        Err(error!(AddressOutOfRange; &format!("{:04X}+{}", start, len)))
    } else {
        Ok(())
    }
}
