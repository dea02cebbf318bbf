use super::token::*;

pub fn lex(s: &str) -> Vec<Token> {
    AsmLexer::lex(s)
}

fn is_asm_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_asm_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_asm_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '.'
}

trait Tokenizers<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>>;

    fn whitespace(&mut self) -> Option<Token> {
        let mut len = 0;
        loop {
            self.chars().next();
            len += 1;
            if let Some(pk) = self.chars().peek() {
                if is_asm_whitespace(*pk) {
                    continue;
                }
            }
            return Some(Token::Whitespace(len));
        }
    }

    /// Radix prefixes stay in the token and are decoded by the parser.
    fn number(&mut self) -> Option<Token> {
        let mut s = String::new();
        while let Some(pk) = self.chars().peek() {
            if !pk.is_ascii_alphanumeric() {
                break;
            }
            s.push(*pk);
            self.chars().next();
        }
        Some(Token::Number(s))
    }

    fn string(&mut self) -> Option<Token> {
        let mut s = String::new();
        self.chars().next();
        loop {
            if let Some(ch) = self.chars().next() {
                if ch != '"' {
                    s.push(ch);
                    continue;
                }
            }
            return Some(Token::String(s));
        }
    }

    fn alphabetic(&mut self) -> Option<Token> {
        let mut s = String::new();
        while let Some(pk) = self.chars().peek() {
            if !is_asm_alphabetic(*pk) && !is_asm_digit(*pk) {
                break;
            }
            s.push(*pk);
            self.chars().next();
        }
        Some(Token::from_ident(&s))
    }

    fn comment(&mut self) -> Option<Token> {
        self.chars().next();
        Some(Token::Comment(self.chars().collect()))
    }

    fn minutia(&mut self) -> Option<Token> {
        let ch = self.chars().next()?;
        match ch {
            ':' => Some(Token::Colon),
            ',' => Some(Token::Comma),
            _ => {
                let mut s = ch.to_string();
                while let Some(pk) = self.chars().peek() {
                    if is_asm_alphabetic(*pk)
                        || is_asm_digit(*pk)
                        || is_asm_whitespace(*pk)
                        || *pk == ':'
                        || *pk == ','
                        || *pk == ';'
                        || *pk == '"'
                    {
                        break;
                    }
                    s.push(*pk);
                    self.chars().next();
                }
                Some(Token::Unknown(s))
            }
        }
    }
}

struct AsmLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Tokenizers<'a> for AsmLexer<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>> {
        &mut self.chars
    }
}

impl<'a> Iterator for AsmLexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let pk = *self.chars.peek()?;
        if is_asm_whitespace(pk) {
            return self.whitespace();
        }
        if is_asm_digit(pk) {
            return self.number();
        }
        if is_asm_alphabetic(pk) {
            return self.alphabetic();
        }
        if pk == '"' {
            return self.string();
        }
        if pk == ';' {
            return self.comment();
        }
        self.minutia()
    }
}

impl<'a> AsmLexer<'a> {
    fn lex(s: &str) -> Vec<Token> {
        let mut tokens = AsmLexer {
            chars: s.trim_end_matches(&['\r', '\n'][..]).chars().peekable(),
        }
        .collect();
        AsmLexer::trim_end(&mut tokens);
        tokens
    }

    fn trim_end(tokens: &mut Vec<Token>) {
        if let Some(Token::Whitespace(_)) = tokens.last() {
            tokens.pop();
        }
    }
}
