use crate::mach::Opcode;
use std::collections::HashMap;

thread_local!(
    static STRING_TO_WORD: HashMap<std::string::String, Word> = Word::all()
        .iter()
        .map(|w| (w.to_string(), *w))
        .collect();
);

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Unknown(String),
    Whitespace(usize),
    Number(String),
    String(String),
    Ident(String),
    Word(Word),
    Comment(String),
    Colon,
    Comma,
}

impl Token {
    pub fn from_ident(s: &str) -> Token {
        match Word::from_string(s) {
            Some(w) => Token::Word(w),
            None => Token::Ident(s.to_string()),
        }
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Whitespace(_) | Token::Comment(_))
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Unknown(s) => write!(f, "{}", s),
            Whitespace(u) => write!(f, "{s:>w$}", s = "", w = u),
            Number(s) => write!(f, "{}", s),
            String(s) => write!(f, "\"{}\"", s),
            Ident(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Comment(s) => write!(f, ";{}", s),
            Colon => write!(f, ":"),
            Comma => write!(f, ","),
        }
    }
}

/// Reserved words: mnemonics, data directives and terminal commands.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Word {
    Nop,
    Exit,
    Jump,
    Move,
    Move8,
    Move16,
    Move32,
    Move64,
    Db,
    Dw,
    Cont,
    Disasm,
    Dump,
    List,
    Load,
    New,
    Run,
    Save,
}

impl Word {
    pub fn all() -> &'static [Word] {
        use Word::*;
        &[
            Nop, Exit, Jump, Move, Move8, Move16, Move32, Move64, Db, Dw, Cont, Disasm, Dump,
            List, Load, New, Run, Save,
        ]
    }

    /// Reserved words are matched without regard to case.
    pub fn from_string(s: &str) -> Option<Word> {
        let s = s.to_ascii_uppercase();
        STRING_TO_WORD.with(|stw| stw.get(&s).copied())
    }

    pub fn opcode(self) -> Option<Opcode> {
        use Word::*;
        Some(match self {
            Nop => Opcode::Nop,
            Exit => Opcode::Exit,
            Jump => Opcode::Jump,
            Move => Opcode::Move,
            Move8 => Opcode::Move8,
            Move16 => Opcode::Move16,
            Move32 => Opcode::Move32,
            Move64 => Opcode::Move64,
            _ => return None,
        })
    }

    pub fn is_command(self) -> bool {
        use Word::*;
        matches!(self, Cont | Disasm | Dump | List | Load | New | Run | Save)
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Word::*;
        match self {
            Nop => write!(f, "NOP"),
            Exit => write!(f, "EXIT"),
            Jump => write!(f, "JUMP"),
            Move => write!(f, "MOVE"),
            Move8 => write!(f, "MOVE8"),
            Move16 => write!(f, "MOVE16"),
            Move32 => write!(f, "MOVE32"),
            Move64 => write!(f, "MOVE64"),
            Db => write!(f, "DB"),
            Dw => write!(f, "DW"),
            Cont => write!(f, "CONT"),
            Disasm => write!(f, "DISASM"),
            Dump => write!(f, "DUMP"),
            List => write!(f, "LIST"),
            Load => write!(f, "LOAD"),
            New => write!(f, "NEW"),
            Run => write!(f, "RUN"),
            Save => write!(f, "SAVE"),
        }
    }
}
