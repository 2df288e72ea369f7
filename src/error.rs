use crate::{escape_common, percent, radix, text};
use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidBase,
    InvalidDigit,
    MalformedEscape,
    AbsentInput,
    InvalidUtf8,
    MissingComponent,
    UnbalancedBrace,
    EmptyPath,
    Configuration,
    Request,
    Server,
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::InvalidBase => "InvalidBase",
            ErrorKind::InvalidDigit => "InvalidDigit",
            ErrorKind::MalformedEscape => "MalformedEscape",
            ErrorKind::AbsentInput => "AbsentInput",
            ErrorKind::InvalidUtf8 => "InvalidUtf8",
            ErrorKind::MissingComponent => "MissingComponent",
            ErrorKind::UnbalancedBrace => "UnbalancedBrace",
            ErrorKind::EmptyPath => "EmptyPath",
            ErrorKind::Configuration => "Configuration",
            ErrorKind::Request => "Request",
            ErrorKind::Server => "Server",
        }
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", &self.message)
    }
}

impl error::Error for Error {}

impl From<radix::Error> for Error {
    fn from(error: radix::Error) -> Self {
        let kind = match error {
            radix::Error::InvalidBase { .. } => ErrorKind::InvalidBase,
            radix::Error::InvalidDigit { .. } => ErrorKind::InvalidDigit,
        };
        Self::new(kind, error.to_string())
    }
}

impl From<escape_common::Error> for Error {
    fn from(error: escape_common::Error) -> Self {
        let kind = match error {
            escape_common::Error::MalformedEscape { .. } => ErrorKind::MalformedEscape,
            escape_common::Error::AbsentInput => ErrorKind::AbsentInput,
            escape_common::Error::InvalidUtf8 { .. } => ErrorKind::InvalidUtf8,
        };
        Self::new(kind, error.to_string())
    }
}

impl From<percent::FormatError> for Error {
    fn from(error: percent::FormatError) -> Self {
        let kind = match error {
            percent::FormatError::MissingComponent { .. } => ErrorKind::MissingComponent,
            percent::FormatError::UnbalancedBrace { .. } => ErrorKind::UnbalancedBrace,
        };
        Self::new(kind, error.to_string())
    }
}

impl From<text::Error> for Error {
    fn from(error: text::Error) -> Self {
        Self::new(ErrorKind::EmptyPath, error.to_string())
    }
}
