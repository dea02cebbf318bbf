use crate::error;
use crate::lang::{Error, Line};

/// ## Source lines entered at the terminal or loaded from a file

#[derive(Debug, Clone, Default)]
pub struct Listing {
    source: Vec<Line>,
}

impl Listing {
    pub fn clear(&mut self) {
        self.source.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn push(&mut self, line: Line) {
        self.source.push(line)
    }

    pub fn lines(&self) -> std::slice::Iter<'_, Line> {
        self.source.iter()
    }

    /// Used for loading a new Listing from a file.
    pub fn load_str(&mut self, s: &str) -> Result<(), Error> {
        let line = Line::new(s);
        if line.is_command() {
            return Err(error!(IllegalFunctionCall; "COMMAND IN FILE"));
        }
        self.push(line);
        Ok(())
    }
}

impl std::fmt::Display for Listing {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (index, line) in self.source.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{:>5} {}", index + 1, line)?;
        }
        Ok(())
    }
}
