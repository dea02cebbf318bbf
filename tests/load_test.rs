mod common;
use common::*;
use proptest::collection::vec;
use proptest::prelude::*;
use vm64k::mach::{Opcode, Slice, Vm, RAM};

proptest! {
    #[test]
    fn load_copies_program(first in vec(any::<u8>(), 0..512), second in vec(any::<u8>(), 0..512)) {
        let mut vm = Vm::new();
        vm.load(&first);
        vm.load(&second);
        prop_assert_eq!(vm.program_size(), second.len());
        prop_assert_eq!(&vm.memory()[..second.len()], &second[..]);
        if first.len() > second.len() {
            prop_assert_eq!(&vm.memory()[second.len()..first.len()], &first[second.len()..]);
        }
    }

    #[test]
    fn load_ignores_other_strides(program in vec(any::<u8>(), 0..256), stride in 2usize..8) {
        let mut vm = vm_with(&[1, 2, 3]);
        vm.load_slice(Some(&Slice::new(&program, stride)));
        prop_assert_eq!(vm.program_size(), 3);
        prop_assert_eq!(&vm.memory()[..3], &[1u8, 2, 3][..]);
    }

    #[test]
    fn fixed_width_moves_copy_pattern(
        dest in 0x100u16..0xFFF8,
        src in 0x100u16..0xFFF8,
        pattern in any::<u64>(),
        width in 0usize..4,
    ) {
        let opcode = [Opcode::Move8, Opcode::Move16, Opcode::Move32, Opcode::Move64][width];
        let size = 1 << width;
        let mut program = words(&[Opcode::Move.tag(), src, 16, 8, opcode.tag(), dest, src, Opcode::Exit.tag()]);
        program.extend_from_slice(&pattern.to_le_bytes());
        let mut vm = vm_with(&program);
        prop_assert_eq!(vm.run(), Ok(()));
        let expected = pattern.to_le_bytes();
        let dest = dest as usize;
        prop_assert_eq!(&vm.memory()[dest..dest + size], &expected[..size]);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn load_rejects_oversized(extra in 1usize..64, fill in any::<u8>()) {
        let mut vm = vm_with(&[9, 9]);
        vm.load(&vec![fill; RAM + extra]);
        prop_assert_eq!(vm.program_size(), 2);
        prop_assert_eq!(&vm.memory()[..3], &[9u8, 9, 0][..]);
    }
}
