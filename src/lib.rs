//! # 64K VM
//!
//! A tiny bytecode machine to run alongside your app.
//!
//! The machine is 64K of memory and a loaded program. It has eight
//! instructions: enough to shuffle bytes around and jump, nothing more.
//! Hosts build a program, hand the bytes to [`mach::Vm::load`] and
//! call [`mach::Vm::run`]. Everything a program does shows up in memory.
//!
//! ```
//! use vm64k::mach::{Opcode, Vm};
//!
//! let mut vm = Vm::new();
//! // MOVE8 0x0100, 0x0008; EXIT; then the byte to copy.
//! let (move8, exit) = (Opcode::Move8.tag() as u8, Opcode::Exit.tag() as u8);
//! vm.load(&[move8, 0, 0x00, 0x01, 0x08, 0x00, exit, 0, 0x2A]);
//! assert!(vm.run().is_ok());
//! assert_eq!(vm.memory()[0x100], 0x2A);
//! ```
//!
//! Running the `vm64k` executable opens a terminal where programs can be
//! typed in as assembly and run. Stop a running program with CTRL-C.

#[path = "doc/instruction_set.rs"]
#[allow(non_snake_case)]
pub mod _Instruction_Set;

pub mod lang;
pub mod mach;
pub mod term;
