/*!
# The Instruction Set

A 64K VM is 65,536 bytes of memory. A program is loaded at address 0 and
the machine decodes it from there, one instruction after another, until
it reaches an `EXIT` or runs off the end of the program. There are no
registers. When a program wants a register it picks an address and uses
that.

## Encoding

Every instruction starts with a 16-bit opcode. Operands follow right
behind it, each one a 16-bit word. Nothing is aligned or padded. All
words are little-endian.

| Opcode | Tag | Operands | Effect |
|--------|-----|----------|--------|
| `NOP` | 0 | | Nothing. |
| `EXIT` | 1 | | Stop the program. |
| `JUMP` | 2 | dest | Continue decoding at `dest`. |
| `MOVE` | 3 | dest, src, count | Copy `count` bytes from `src` to `dest`. |
| `MOVE8` | 4 | dest, src | Copy 1 byte. |
| `MOVE16` | 5 | dest, src | Copy 2 bytes. |
| `MOVE32` | 6 | dest, src | Copy 4 bytes. |
| `MOVE64` | 7 | dest, src | Copy 8 bytes. |

Jump targets are offsets from the start of the program and must land
inside it. Moves may read and write anywhere in memory, including the
program itself. `MOVE` with overlapping ranges copies as if the source
was read completely before anything was written.

## Faults

A program that breaks a rule stops immediately. Nothing after the
faulting instruction runs. The error names the address of the
instruction.

```text
READ PAST END AT 0004          an opcode or operand is cut off by the end of the program
ILLEGAL JUMP AT 0000; 0010     jump target outside the program
ILLEGAL OPCODE AT 0002; 00FF   not one of the eight opcodes
ADDRESS OUT OF RANGE AT 0006   a move would touch memory past FFFF
```

## Assembly

The terminal and [`Program::assemble`](crate::mach::Program::assemble)
read one instruction per line. A line may begin with a label and may end
with a comment. Numbers are decimal, `0x` hexadecimal, or `0b` binary.
Labels can stand in for any operand.

```text
; swap two words through a scratch word
        MOVE16  scratch, a
        MOVE16  a, b
        MOVE16  b, scratch
        JUMP    done
a:       DW 0x1111
b:       DW 0x2222
scratch: DW 0
done:   EXIT
```

`DB` places bytes and `DW` places words directly into the program.

## Terminal commands

```text
RUN              assemble the listing, load it, and run it
CONT             continue after CTRL-C
LIST             show the listing
NEW              erase the listing
DUMP addr [len]  show memory in hex
DISASM           disassemble the loaded program
LOAD "file"      replace the listing with a file
SAVE "file"      write the listing to a file
```

Set `RUST_LOG=debug` to see what the machine is doing, or
`RUST_LOG=trace` to see every instruction.
*/
