use super::{Column, LineNumber};
use crate::mach::Address;

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: LineNumber,
    address: Option<Address>,
    column: Column,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident @ $addr:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).at_address($addr)
    };
    ($err:ident @ $addr:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .at_address($addr)
            .message($msg)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr;  $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr;  $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            address: None,
            column: 0..0,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn address(&self) -> Option<Address> {
        self.address
    }

    pub fn column(&self) -> Column {
        self.column.clone()
    }

    pub fn in_line_number(&self, line: LineNumber) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            line_number: line,
            ..self.clone()
        }
    }

    pub fn at_address(&self, address: Address) -> Error {
        debug_assert!(self.address.is_none());
        Error {
            address: Some(address),
            ..self.clone()
        }
    }

    pub fn in_column(&self, column: &Column) -> Error {
        debug_assert_eq!(self.column, 0..0);
        Error {
            column: column.clone(),
            ..self.clone()
        }
    }

    pub fn message(&self, message: &str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            message: message.to_string(),
            ..self.clone()
        }
    }
}

/// ## Error codes
///
/// The first group is raised while reading source text, the second group
/// is raised by the machine while running a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    SyntaxError = 2,
    IllegalFunctionCall = 5,
    Overflow = 6,
    OutOfMemory = 7,
    UndefinedLabel = 8,
    DuplicateLabel = 10,
    CantContinue = 17,
    Break = 20,
    ReadPastEnd = 31,
    IllegalJump = 32,
    IllegalOpcode = 33,
    AddressOutOfRange = 34,
    InternalError = 51,
    FileNotFound = 53,
}

impl ErrorCode {
    /// Fatal violations raised by a running program.
    pub fn is_fault(self) -> bool {
        use ErrorCode::*;
        matches!(
            self,
            ReadPastEnd | IllegalJump | IllegalOpcode | AddressOutOfRange
        )
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let code_str = match self.code {
            SyntaxError => "SYNTAX ERROR",
            IllegalFunctionCall => "ILLEGAL FUNCTION CALL",
            Overflow => "OVERFLOW",
            OutOfMemory => "OUT OF MEMORY",
            UndefinedLabel => "UNDEFINED LABEL",
            DuplicateLabel => "DUPLICATE LABEL",
            CantContinue => "CAN'T CONTINUE",
            Break => "BREAK",
            ReadPastEnd => "READ PAST END",
            IllegalJump => "ILLEGAL JUMP",
            IllegalOpcode => "ILLEGAL OPCODE",
            AddressOutOfRange => "ADDRESS OUT OF RANGE",
            InternalError => "INTERNAL ERROR",
            FileNotFound => "FILE NOT FOUND",
        };
        let mut suffix = String::new();
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" IN {}", line_number));
        }
        if let Some(address) = self.address {
            suffix.push_str(&format!(" AT {:04X}", address));
        }
        if (0..0) != self.column {
            suffix.push_str(&format!(" ({}..{})", self.column.start, self.column.end));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        write!(f, "{}{}", code_str, suffix)
    }
}
