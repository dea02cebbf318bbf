/*!
## Rust Machine Module

This Rust module is an assembler and virtual machine for 64K programs.

*/

/// The machine word. Operands, jump targets and move counts are all this wide.
pub type Address = u16;

/// Bytes of memory in every machine.
pub const RAM: usize = 1024 * 64;

mod cursor;
mod disasm;
mod link;
mod listing;
mod opcode;
mod program;
mod runtime;
mod vm;

pub use cursor::Cursor;
pub use cursor::Scalar;
pub use disasm::disassemble;
pub use link::Link;
pub use listing::Listing;
pub use opcode::Opcode;
pub use program::Program;
pub use runtime::Event;
pub use runtime::Runtime;
pub use vm::Flow;
pub use vm::Slice;
pub use vm::Vm;
