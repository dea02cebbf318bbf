use super::ast::*;
use super::error::*;
use super::lex::*;
use super::parse::*;
use super::token::*;

/// One line of assembly source, kept as tokens so that it lists back
/// exactly as it was typed.
#[derive(Debug, PartialEq, Clone)]
pub struct Line {
    tokens: Vec<Token>,
}

impl Line {
    pub fn new(s: &str) -> Line {
        Line { tokens: lex(s) }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.iter().all(|t| t.is_whitespace())
    }

    /// A line starting with a command word is not part of the program.
    pub fn is_command(&self) -> bool {
        match self.tokens.iter().find(|t| !t.is_whitespace()) {
            Some(Token::Word(word)) => word.is_command(),
            _ => false,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn ast(&self) -> Result<Vec<Statement>, Error> {
        parse(&self.tokens)
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s: String = self.tokens.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_normalizes_words() {
        let line = Line::new("loop:  jump loop   ");
        assert_eq!(line.to_string(), "loop:  JUMP loop");
        assert!(!line.is_command());
    }

    #[test]
    fn test_command() {
        assert!(Line::new("  run").is_command());
        assert!(Line::new("").is_empty());
        assert!(Line::new("; remark").is_empty());
    }
}
