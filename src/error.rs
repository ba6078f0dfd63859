//! Error management.

use derive_more::Display;

#[derive(Debug, Display)]
pub enum Err {
    #[display(fmt = "malformed input: {}", _0)]
    MalformedInput(String),
    #[display(fmt = "truncated stream: {}", _0)]
    TruncatedStream(String),
    #[display(fmt = "io failure: {}", _0)]
    IoFailure(std::io::Error),
    #[display(fmt = "invalid arguments: {}", _0)]
    InvalidArguments(String),
}

impl Err {
    pub(crate) fn malformed<S: AsRef<str>>(line: usize, reason: S) -> Self {
        Err::MalformedInput(format!("line {}: {}", line, reason.as_ref()))
    }
}

impl std::error::Error for Err {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Err::IoFailure(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Err {
    fn from(e: std::io::Error) -> Self {
        Err::IoFailure(e)
    }
}

pub type Result<T> = std::result::Result<T, Err>;
