use super::{Address, Scalar};
use crate::error;
use crate::lang::{Column, Error, LineNumber};
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Label resolution

#[derive(Debug, Default)]
pub struct Link {
    symbols: HashMap<Rc<str>, Address>,
    unlinked: Vec<(usize, LineNumber, Column, Rc<str>)>,
}

impl Link {
    pub fn new() -> Link {
        Link::default()
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
        self.unlinked.clear();
    }

    pub fn get(&self, symbol: &str) -> Option<Address> {
        self.symbols.get(symbol).copied()
    }

    pub fn insert(&mut self, symbol: Rc<str>, addr: usize) -> Result<()> {
        if self.symbols.contains_key(&symbol) {
            return Err(error!(DuplicateLabel));
        }
        if addr > Address::max_value() as usize {
            return Err(error!(Overflow; "LABEL PAST END OF MEMORY"));
        }
        self.symbols.insert(symbol, addr as Address);
        Ok(())
    }

    /// Remembers that the word at `offset` is the address of `symbol`.
    pub fn link_addr_to_symbol(
        &mut self,
        offset: usize,
        line_number: LineNumber,
        col: &Column,
        symbol: Rc<str>,
    ) {
        self.unlinked.push((offset, line_number, col.clone(), symbol));
    }

    pub fn link(&mut self, bytes: &mut [u8]) -> Vec<Error> {
        let mut errors: Vec<Error> = vec![];
        for (offset, line_number, col, symbol) in std::mem::take(&mut self.unlinked) {
            let dest = match self.symbols.get(&symbol) {
                Some(dest) => *dest,
                None => {
                    errors.push(error!(UndefinedLabel, line_number, ..&col));
                    continue;
                }
            };
            match bytes.get_mut(offset..offset + 2) {
                Some(word) => dest.write(word),
                None => errors.push(error!(InternalError, line_number, ..&col; "LINK FAILURE")),
            }
        }
        errors
    }
}
