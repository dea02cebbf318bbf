mod common;
use common::*;
use vm64k::lang::ErrorCode;
use vm64k::mach::{Opcode, Vm, RAM};

const NOP: u16 = Opcode::Nop as u16;
const EXIT: u16 = Opcode::Exit as u16;
const JUMP: u16 = Opcode::Jump as u16;
const MOVE: u16 = Opcode::Move as u16;
const MOVE8: u16 = Opcode::Move8 as u16;
const MOVE16: u16 = Opcode::Move16 as u16;
const MOVE32: u16 = Opcode::Move32 as u16;
const MOVE64: u16 = Opcode::Move64 as u16;

#[test]
fn test_exit_only() {
    let mut vm = vm_with(&words(&[EXIT]));
    let before = vm.clone();
    assert_eq!(vm.run(), Ok(()));
    assert_eq!(vm.memory(), before.memory());
}

#[test]
fn test_empty_program() {
    let mut vm = Vm::new();
    assert_eq!(vm.run(), Ok(()));
    vm.load(&[]);
    assert_eq!(vm.program_size(), 0);
    assert_eq!(vm.run(), Ok(()));
}

#[test]
fn test_stale_bytes_unreachable() {
    let mut vm = vm_with(&words(&[NOP, 0x00FF]));
    vm.load(&words(&[NOP]));
    assert_eq!(vm.run(), Ok(()));
}

#[test]
fn test_jump_skips_nop() {
    let mut vm = vm_with(&words(&[JUMP, 0x0006, NOP, EXIT, 0x00FF]));
    assert_eq!(vm.run(), Ok(()));
}

#[test]
fn test_jump_to_exit_at_offset_4() {
    let mut vm = vm_with(&[2, 0, 4, 0, 1, 0]);
    assert_eq!(vm.run(), Ok(()));
}

#[test]
fn test_jump_past_end() {
    let program = words(&[NOP, JUMP, 6]);
    let mut vm = vm_with(&program);
    let e = vm.run().unwrap_err();
    assert_eq!(e.code(), ErrorCode::IllegalJump);
    assert_eq!(e.address(), Some(2));

    let mut vm = vm_with(&words(&[JUMP, 4, NOP]));
    assert_eq!(vm.run(), Ok(()));
}

#[test]
fn test_jump_into_operand() {
    // The operand decodes as another JUMP whose own operand is missing.
    let mut vm = vm_with(&words(&[JUMP, 2]));
    let e = vm.run().unwrap_err();
    assert_eq!(e.code(), ErrorCode::ReadPastEnd);
    assert_eq!(e.address(), Some(2));
}

#[test]
fn test_truncated_opcode() {
    let mut vm = vm_with(&[0, 0, 1]);
    let e = vm.run().unwrap_err();
    assert_eq!(e.code(), ErrorCode::ReadPastEnd);
    assert_eq!(e.address(), Some(2));
}

#[test]
fn test_truncated_operand() {
    let mut program = words(&[MOVE, 0x100, 0x200]);
    program.push(1);
    let mut vm = vm_with(&program);
    let e = vm.run().unwrap_err();
    assert_eq!(e.code(), ErrorCode::ReadPastEnd);
    assert_eq!(e.address(), Some(0));
}

#[test]
fn test_unknown_opcode() {
    let mut vm = vm_with(&words(&[NOP, 0x00FF, EXIT]));
    let e = vm.run().unwrap_err();
    assert_eq!(e.code(), ErrorCode::IllegalOpcode);
    assert_eq!(e.to_string(), "ILLEGAL OPCODE AT 0002; 00FF");
}

#[test]
fn test_nothing_runs_after_fault() {
    let program = words(&[MOVE8, 0x100, 8, 0x00FF, 0x0055, MOVE8, 0x101, 8]);
    let mut vm = vm_with(&program);
    assert!(vm.run().is_err());
    assert_eq!(vm.memory()[0x100], 0x55);
    assert_eq!(vm.memory()[0x101], 0);
}

#[test]
fn test_fixed_width_moves() {
    let src = 0x200;
    let pattern: [u8; 8] = [0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x23, 0x45, 0x67];
    for (opcode, width) in &[(MOVE8, 1), (MOVE16, 2), (MOVE32, 4), (MOVE64, 8)] {
        let mut program = words(&[MOVE, src, 16, 8, *opcode, 0x300, src, EXIT]);
        program.extend_from_slice(&pattern);
        let mut vm = vm_with(&program);
        assert_eq!(vm.run(), Ok(()));
        assert_eq!(&vm.memory()[0x300..0x300 + width], &pattern[..*width]);
        assert!(vm.memory()[0x300 + width..0x308].iter().all(|b| *b == 0));
    }
}

#[test]
fn test_move8_same_address() {
    let mut program = words(&[MOVE8, 8, 8, EXIT]);
    program.push(9);
    let mut vm = vm_with(&program);
    assert_eq!(vm.run(), Ok(()));
    assert_eq!(vm.memory()[8], 9);
}

#[test]
fn test_overlapping_moves() {
    let mut program = words(&[MOVE, 0x100, 16, 4, MOVE16, 0x101, 0x100, EXIT]);
    program.extend_from_slice(&[0xA, 0xB, 0xC, 0xD]);
    let mut vm = vm_with(&program);
    assert_eq!(vm.run(), Ok(()));
    assert_eq!(&vm.memory()[0x100..0x104], &[0xA, 0xA, 0xB, 0xD]);

    let mut program = words(&[MOVE, 0x100, 18, 4, MOVE, 0x100, 0x102, 2, EXIT]);
    program.extend_from_slice(&[1, 2, 3, 4]);
    let mut vm = vm_with(&program);
    assert_eq!(vm.run(), Ok(()));
    assert_eq!(&vm.memory()[0x100..0x104], &[3, 4, 3, 4]);
}

#[test]
fn test_move_zero_count() {
    let mut vm = vm_with(&words(&[MOVE, 0xFFFF, 0, 0, EXIT]));
    assert_eq!(vm.run(), Ok(()));
}

#[test]
fn test_move_to_last_byte() {
    let mut program = words(&[MOVE, 0xFFFF, 10, 1, EXIT]);
    program.push(0x77);
    let mut vm = vm_with(&program);
    assert_eq!(vm.run(), Ok(()));
    assert_eq!(vm.memory()[RAM - 1], 0x77);
}

#[test]
fn test_move_source_out_of_range() {
    let mut vm = vm_with(&words(&[MOVE, 0x100, 0xFFF0, 0x20]));
    let e = vm.run().unwrap_err();
    assert_eq!(e.code(), ErrorCode::AddressOutOfRange);
    assert!(vm.memory()[0x100..0x120].iter().all(|b| *b == 0));
}

#[test]
fn test_self_modifying() {
    // The first move turns the bad opcode at 10 into an EXIT before it is reached.
    let program = words(&[MOVE16, 10, 12, NOP, NOP, 0x00FF, EXIT]);
    let mut vm = vm_with(&program);
    assert_eq!(vm.run(), Ok(()));
}

#[test]
fn test_full_memory_program() {
    let mut program = vec![0u8; RAM];
    program[RAM - 2] = EXIT as u8;
    let mut vm = vm_with(&program);
    assert_eq!(vm.program_size(), RAM);
    assert_eq!(vm.run(), Ok(()));
}

#[test]
fn test_instances_independent() {
    let program = assemble("MOVE8 0x100, byte\nEXIT\nbyte: DB 5");
    let mut one = vm_with(&program);
    let two = one.clone();
    one.run().unwrap();
    assert_eq!(one.memory()[0x100], 5);
    assert_eq!(two.memory()[0x100], 0);
}
