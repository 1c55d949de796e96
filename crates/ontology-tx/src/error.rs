use thiserror::Error;

/// Unified error type for the Ontology transaction library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("format error: {0}")]
    Format(#[from] FormatError),

    #[error("config error: {0}")]
    Config(String),

    #[error("render error: {0}")]
    Render(String),
}

/// Errors while decoding a raw transaction buffer.
///
/// Every variant is terminal for the current decode attempt. Unknown contracts or
/// methods are not errors: they surface as [`crate::Decoded::Blind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("transaction too long: {actual} bytes exceeds maximum of {max}")]
    TooLong { max: usize, actual: usize },

    #[error("declared length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("malformed bytecode: {0}")]
    Bytecode(&'static str),

    #[error("precondition violated: {0}")]
    Precondition(&'static str),
}

impl DecodeError {
    /// Status code reported to the signing flow for this failure.
    pub fn status(&self) -> ParserStatus {
        match self {
            DecodeError::TooLong { .. } | DecodeError::LengthMismatch { .. } => {
                ParserStatus::LengthWrong
            }
            DecodeError::Bytecode(_) | DecodeError::Precondition(_) => ParserStatus::BytecodeWrong,
        }
    }
}

/// Errors while turning decoded values into display text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("value of {len} bytes cannot be converted to an integer")]
    Unconvertible { len: usize },

    #[error("too many decimals: {0} (at most 39)")]
    TooManyDecimals(u8),

    #[error("invalid parameter for display: {0}")]
    InvalidParam(&'static str),

    #[error("output sink rejected the formatted value")]
    Sink,
}

impl From<core::fmt::Error> for FormatError {
    fn from(_: core::fmt::Error) -> Self {
        FormatError::Sink
    }
}

/// Closed set of parse outcomes handed to the signing flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum ParserStatus {
    Ok = 1,
    /// Contract or method is missing from the registry; requires blind signing.
    TxNotDefined = -2,
    LengthWrong = -3,
    BytecodeWrong = -4,
}

impl ParserStatus {
    pub fn code(self) -> i8 {
        self as i8
    }
}
