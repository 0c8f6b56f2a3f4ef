use thiserror::Error;

/// Reasons a single line of a calibration or profile file is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expected `level:white_balance,tint`, missing ':'")]
    MissingLevelSeparator,
    #[error("expected `white_balance,tint`, found {0:?}")]
    MalformedPair(String),
    #[error("unknown luminance level {0:?}")]
    UnknownLevel(String),
    #[error("expected 4 '|' separated fields, found {0}")]
    TooFewFields(usize),
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
}
