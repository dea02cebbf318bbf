use super::{disassemble, Address, Cursor, Flow, Listing, Program, Vm, RAM};
use crate::error;
use crate::lang::{ast::*, Error, Line};
use log::debug;
use std::collections::VecDeque;

const DUMP_LEN: usize = 64;
const DUMP_ROW: usize = 16;

/// ## Events for the user interface
///
/// The host calls [`Runtime::execute`] in a loop and reacts to these.

#[derive(Debug, PartialEq)]
pub enum Event {
    Errors(Vec<Error>),
    Load(String),
    Print(String),
    Running,
    Save(String),
    Stopped,
}

/// ## Interactive session
///
/// Source lines accumulate in a listing. `RUN` assembles and loads them
/// and then `execute` runs the machine a bounded number of instructions
/// at a time so the host can stay responsive.
#[derive(Debug)]
pub struct Runtime {
    vm: Box<Vm>,
    listing: Listing,
    program: Program,
    cursor: Option<Cursor>,
    stopped: Option<Cursor>,
    pending: VecDeque<Event>,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime {
            vm: Box::new(Vm::new()),
            listing: Listing::default(),
            program: Program::new(),
            cursor: None,
            stopped: None,
            pending: VecDeque::new(),
        }
    }
}

impl Runtime {
    pub fn new() -> Runtime {
        Runtime::default()
    }

    pub fn vm(&self) -> &Vm {
        &self.vm
    }

    pub fn is_running(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn get_listing(&self) -> Listing {
        self.listing.clone()
    }

    pub fn set_listing(&mut self, listing: Listing) {
        self.listing = listing;
        self.cursor = None;
        self.stopped = None;
    }

    /// Enters one line from the user. Returns false if the line
    /// isn't worth keeping in history.
    pub fn enter(&mut self, s: &str) -> bool {
        let line = Line::new(s);
        if line.is_empty() {
            return false;
        }
        let statements = match line.ast() {
            Ok(statements) => statements,
            Err(error) => {
                self.pending.push_back(Event::Errors(vec![error]));
                return true;
            }
        };
        if line.is_command() {
            for statement in statements {
                self.command(statement);
            }
        } else {
            self.listing.push(line);
        }
        true
    }

    /// Stops a running program. `CONT` picks up where it left off.
    pub fn interrupt(&mut self) {
        if let Some(cursor) = self.cursor.take() {
            if cursor.finished() {
                return;
            }
            let addr = cursor.position() as Address;
            debug!("break at {:04X}", addr);
            self.pending
                .push_back(Event::Errors(vec![error!(Break @ addr)]));
            self.stopped = Some(cursor);
        }
    }

    /// Runs at most `cycles` instructions.
    pub fn execute(&mut self, cycles: usize) -> Event {
        if let Some(event) = self.pending.pop_front() {
            return event;
        }
        let mut cursor = match self.cursor.take() {
            Some(cursor) => cursor,
            None => return Event::Stopped,
        };
        for _ in 0..cycles {
            match self.vm.step(&mut cursor) {
                Ok(Flow::Continue) => {}
                Ok(_) => return Event::Stopped,
                Err(error) => return Event::Errors(vec![error]),
            }
        }
        self.cursor = Some(cursor);
        Event::Running
    }

    fn command(&mut self, statement: Statement) {
        let event = match statement {
            Statement::Run(_) => self.start(),
            Statement::Cont(_) => self.cont(),
            Statement::List(_) => Some(Event::Print(self.listing.to_string())),
            Statement::New(_) => {
                self.listing.clear();
                self.program = Program::new();
                self.cursor = None;
                self.stopped = None;
                None
            }
            Statement::Disasm(_) => Some(Event::Print(self.disasm())),
            Statement::Dump(_, addr, len) => Some(self.dump(&addr, len.as_ref())),
            Statement::Load(_, name) => Some(Event::Load(name.to_string())),
            Statement::Save(_, name) => Some(Event::Save(name.to_string())),
            _ => Some(Event::Errors(vec![error!(InternalError; "NOT A COMMAND")])),
        };
        if let Some(event) = event {
            self.pending.push_back(event);
        }
    }

    fn start(&mut self) -> Option<Event> {
        self.cursor = None;
        self.stopped = None;
        match Program::assemble(self.listing.lines()) {
            Ok(program) => {
                self.vm.load(program.bytes());
                self.program = program;
                self.cursor = Some(self.vm.cursor());
                None
            }
            Err(errors) => Some(Event::Errors(errors)),
        }
    }

    fn cont(&mut self) -> Option<Event> {
        match self.stopped.take() {
            Some(cursor) => {
                self.cursor = Some(cursor);
                None
            }
            None => Some(Event::Errors(vec![error!(CantContinue)])),
        }
    }

    fn disasm(&self) -> String {
        disassemble(self.vm.program())
            .iter()
            .map(|(addr, text)| format!("{:04X}  {}", addr, text))
            .collect::<Vec<String>>()
            .join("\n")
    }

    fn dump(&self, addr: &Operand, len: Option<&Operand>) -> Event {
        let start = match self.value(addr) {
            Ok(start) => start as usize,
            Err(error) => return Event::Errors(vec![error]),
        };
        let len = match len.map(|len| self.value(len)) {
            None => DUMP_LEN,
            Some(Ok(len)) => len as usize,
            Some(Err(error)) => return Event::Errors(vec![error]),
        };
        let end = (start + len).min(RAM);
        let rows: Vec<String> = self.vm.memory()[start..end]
            .chunks(DUMP_ROW)
            .enumerate()
            .map(|(index, row)| {
                let hex: Vec<String> = row.iter().map(|b| format!("{:02X}", b)).collect();
                format!("{:04X}: {}", start + index * DUMP_ROW, hex.join(" "))
            })
            .collect();
        Event::Print(rows.join("\n"))
    }

    /// Labels refer to the last program that was run.
    fn value(&self, operand: &Operand) -> Result<Address, Error> {
        match operand {
            Operand::Number(_, n) => Ok(*n),
            Operand::Label(col, name) => match self.program.symbol(name) {
                Some(addr) => Ok(addr),
                None => Err(error!(UndefinedLabel, ..col)),
            },
        }
    }
}
