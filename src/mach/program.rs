use super::{Address, Link, Scalar, RAM};
use crate::error;
use crate::lang::{ast::*, Error, Line, LineNumber};
use log::debug;

type Result<T> = std::result::Result<T, Error>;

/// ## Assembled program
///
/// The bytes a host hands to [`Vm::load`](super::Vm::load) plus the
/// addresses of its labels.
#[derive(Debug, Default)]
pub struct Program {
    bytes: Vec<u8>,
    link: Link,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    pub fn assemble<'a, T: IntoIterator<Item = &'a Line>>(
        lines: T,
    ) -> std::result::Result<Program, Vec<Error>> {
        let mut program = Program::new();
        let mut errors: Vec<Error> = vec![];
        for (index, line) in lines.into_iter().enumerate() {
            let line_number = Some(index + 1);
            let statements = match line.ast() {
                Ok(statements) => statements,
                Err(error) => {
                    errors.push(error.in_line_number(line_number));
                    continue;
                }
            };
            for statement in statements {
                if let Err(error) = program.statement(line_number, &statement) {
                    errors.push(error.in_line_number(line_number));
                }
            }
        }
        if program.bytes.len() > RAM {
            errors.push(error!(OutOfMemory));
        }
        let mut link_errors = program.link.link(&mut program.bytes);
        errors.append(&mut link_errors);
        if errors.is_empty() {
            debug!("assembled {} bytes", program.bytes.len());
            Ok(program)
        } else {
            Err(errors)
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn symbol(&self, name: &str) -> Option<Address> {
        self.link.get(name)
    }

    fn statement(&mut self, line_number: LineNumber, statement: &Statement) -> Result<()> {
        match statement {
            Statement::Label(col, name) => self
                .link
                .insert(name.clone(), self.bytes.len())
                .map_err(|e| e.in_column(col)),
            Statement::Instruction(_, opcode, operands) => {
                self.push_word(opcode.tag());
                for operand in operands {
                    self.operand(line_number, operand);
                }
                Ok(())
            }
            Statement::Bytes(_, operands) => {
                for operand in operands {
                    match operand {
                        Operand::Number(_, n) if *n <= u8::MAX as u16 => self.bytes.push(*n as u8),
                        _ => return Err(error!(InternalError, ..&operand.column(); "BYTE")),
                    }
                }
                Ok(())
            }
            Statement::Words(_, operands) => {
                for operand in operands {
                    self.operand(line_number, operand);
                }
                Ok(())
            }
            _ => Err(error!(IllegalFunctionCall; "COMMAND IN PROGRAM")),
        }
    }

    fn operand(&mut self, line_number: LineNumber, operand: &Operand) {
        match operand {
            Operand::Number(_, n) => self.push_word(*n),
            Operand::Label(col, name) => {
                self.link
                    .link_addr_to_symbol(self.bytes.len(), line_number, col, name.clone());
                self.push_word(0);
            }
        }
    }

    fn push_word(&mut self, word: Address) {
        let mut buf = [0u8; 2];
        word.write(&mut buf);
        self.bytes.extend_from_slice(&buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn assemble(source: &[&str]) -> std::result::Result<Program, Vec<Error>> {
        let lines: Vec<Line> = source.iter().map(|s| Line::new(s)).collect();
        Program::assemble(&lines)
    }

    #[test]
    fn test_forward_label() {
        let p = assemble(&["jump done", "nop", "done: exit"]).unwrap();
        assert_eq!(p.bytes(), &[2, 0, 6, 0, 0, 0, 1, 0]);
        assert_eq!(p.symbol("done"), Some(6));
    }

    #[test]
    fn test_data() {
        let p = assemble(&["db 1, 0xff", "dw 0x1234, here", "here:"]).unwrap();
        assert_eq!(p.bytes(), &[1, 0xFF, 0x34, 0x12, 6, 0]);
    }

    #[test]
    fn test_errors_collected() {
        let errors = assemble(&["jump nowhere", "move8 1", "a: nop", "a: nop"]).unwrap_err();
        let codes: Vec<ErrorCode> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(
            codes,
            vec![
                ErrorCode::SyntaxError,
                ErrorCode::DuplicateLabel,
                ErrorCode::UndefinedLabel
            ]
        );
        assert_eq!(errors[0].line_number(), Some(2));
        assert_eq!(errors[1].line_number(), Some(4));
        assert_eq!(errors[2].line_number(), Some(1));
    }

    #[test]
    fn test_commands_rejected() {
        let errors = assemble(&["nop", "list"]).unwrap_err();
        assert_eq!(errors[0].code(), ErrorCode::IllegalFunctionCall);
    }
}
