use super::Column;
use crate::mach::Opcode;
use std::rc::Rc;

#[derive(Debug, PartialEq)]
pub enum Statement {
    Label(Column, Rc<str>),
    Instruction(Column, Opcode, Vec<Operand>),
    Bytes(Column, Vec<Operand>),
    Words(Column, Vec<Operand>),
    Cont(Column),
    Disasm(Column),
    Dump(Column, Operand, Option<Operand>),
    List(Column),
    Load(Column, Rc<str>),
    New(Column),
    Run(Column),
    Save(Column, Rc<str>),
}

impl Statement {
    pub fn is_command(&self) -> bool {
        use Statement::*;
        !matches!(self, Label(..) | Instruction(..) | Bytes(..) | Words(..))
    }
}

/// An operand word. Labels are resolved to addresses when a program is
/// assembled.
#[derive(Debug, PartialEq, Clone)]
pub enum Operand {
    Number(Column, u16),
    Label(Column, Rc<str>),
}

impl Operand {
    pub fn column(&self) -> Column {
        match self {
            Operand::Number(col, _) | Operand::Label(col, _) => col.clone(),
        }
    }
}
