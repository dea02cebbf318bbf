use super::{ast::*, token::*, Column, Error};
use crate::error;
use crate::mach::Opcode;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

pub fn parse(tokens: &[Token]) -> Result<Vec<Statement>> {
    Parser::parse(tokens)
}

struct Parser<'a> {
    token_stream: std::slice::Iter<'a, Token>,
    peeked: Option<&'a Token>,
    col: Column,
}

impl<'a> Parser<'a> {
    fn parse(tokens: &'a [Token]) -> Result<Vec<Statement>> {
        let mut parse = Parser {
            token_stream: tokens.iter(),
            peeked: None,
            col: 0..0,
        };
        match parse.line() {
            Ok(r) => Ok(r),
            Err(e) => Err(e.in_column(&parse.col)),
        }
    }

    fn next(&mut self) -> Option<&'a Token> {
        if self.peeked.is_some() {
            return self.peeked.take();
        }
        loop {
            self.col.start = self.col.end;
            let t = self.token_stream.next()?;
            self.col.end += t.to_string().chars().count();
            if t.is_whitespace() {
                continue;
            }
            return Some(t);
        }
    }

    fn peek(&mut self) -> Option<&&'a Token> {
        if self.peeked.is_none() {
            self.peeked = self.next();
        }
        self.peeked.as_ref()
    }

    fn line(&mut self) -> Result<Vec<Statement>> {
        let mut r: Vec<Statement> = vec![];
        if let Some(Token::Ident(_)) = self.peek() {
            let label_col = self.col.clone();
            if let Some(Token::Ident(name)) = self.next() {
                match self.next() {
                    Some(Token::Colon) => r.push(Statement::Label(label_col, Rc::from(name.as_str()))),
                    _ => {
                        self.col = label_col;
                        return Err(error!(SyntaxError; "UNKNOWN INSTRUCTION"));
                    }
                }
            }
        }
        if let Some(statement) = self.statement()? {
            r.push(statement);
        }
        match self.next() {
            None => Ok(r),
            Some(_) => Err(error!(SyntaxError; "EXPECTED END OF LINE")),
        }
    }

    fn statement(&mut self) -> Result<Option<Statement>> {
        let word = match self.peek() {
            None => return Ok(None),
            Some(Token::Word(word)) => *word,
            Some(_) => {
                self.next();
                return Err(error!(SyntaxError; "EXPECTED INSTRUCTION"));
            }
        };
        self.next();
        let col = self.col.clone();
        if let Some(opcode) = word.opcode() {
            let operands = self.expect_operands(opcode.operand_count())?;
            return Ok(Some(Statement::Instruction(col, opcode, operands)));
        }
        use Word::*;
        Ok(Some(match word {
            Db => {
                let operands = self.expect_operand_list()?;
                for operand in &operands {
                    match operand {
                        Operand::Number(col, n) if *n > u8::MAX as u16 => {
                            self.col = col.clone();
                            return Err(error!(Overflow; "BYTE VALUE"));
                        }
                        Operand::Label(col, _) => {
                            self.col = col.clone();
                            return Err(error!(SyntaxError; "EXPECTED NUMBER"));
                        }
                        _ => {}
                    }
                }
                Statement::Bytes(col, operands)
            }
            Dw => Statement::Words(col, self.expect_operand_list()?),
            Cont => Statement::Cont(col),
            Disasm => Statement::Disasm(col),
            Dump => {
                let addr = self.expect_operand()?;
                if let Some(Token::Comma) = self.peek() {
                    self.next();
                }
                let len = match self.peek() {
                    None => None,
                    Some(_) => Some(self.expect_operand()?),
                };
                Statement::Dump(col, addr, len)
            }
            List => Statement::List(col),
            Load => Statement::Load(col, self.expect_string()?),
            New => Statement::New(col),
            Run => Statement::Run(col),
            Save => Statement::Save(col, self.expect_string()?),
            Nop | Exit | Jump | Move | Move8 | Move16 | Move32 | Move64 => {
                return Err(error!(InternalError; "OPCODE WORD"))
            }
        }))
    }

    fn expect_operands(&mut self, count: usize) -> Result<Vec<Operand>> {
        let mut operands = Vec::with_capacity(count);
        for index in 0..count {
            if index > 0 {
                self.expect_comma()?;
            }
            operands.push(self.expect_operand()?);
        }
        Ok(operands)
    }

    fn expect_operand_list(&mut self) -> Result<Vec<Operand>> {
        let mut operands = vec![self.expect_operand()?];
        while let Some(Token::Comma) = self.peek() {
            self.next();
            operands.push(self.expect_operand()?);
        }
        Ok(operands)
    }

    fn expect_operand(&mut self) -> Result<Operand> {
        match self.next() {
            Some(Token::Number(s)) => {
                let col = self.col.clone();
                match parse_number(s) {
                    None => Err(error!(SyntaxError; "INVALID NUMBER")),
                    Some(n) if n > u16::MAX as u64 => Err(error!(Overflow)),
                    Some(n) => Ok(Operand::Number(col, n as u16)),
                }
            }
            Some(Token::Ident(s)) => Ok(Operand::Label(self.col.clone(), Rc::from(s.as_str()))),
            _ => Err(error!(SyntaxError; "EXPECTED OPERAND")),
        }
    }

    fn expect_comma(&mut self) -> Result<()> {
        match self.next() {
            Some(Token::Comma) => Ok(()),
            _ => Err(error!(SyntaxError; "EXPECTED COMMA")),
        }
    }

    fn expect_string(&mut self) -> Result<Rc<str>> {
        match self.next() {
            Some(Token::String(s)) => Ok(Rc::from(s.as_str())),
            _ => Err(error!(SyntaxError; "EXPECTED FILE NAME")),
        }
    }
}

fn parse_number(s: &str) -> Option<u64> {
    let lower = s.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        u64::from_str_radix(bin, 2).ok()
    } else {
        lower.parse::<u64>().ok()
    }
}
