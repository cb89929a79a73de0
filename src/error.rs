use thiserror::Error;

/// Errors raised while reading an element set from text.
#[derive(Error, Debug)]
pub enum TleError {
    #[error("Element set must have 3 lines, got {0}")]
    WrongLineCount(usize),

    #[error("Line {0} of the element set is empty")]
    EmptyLine(usize),

    #[error("Line {line} is too short: need at least {needed} characters, got {got}")]
    LineTooShort {
        line: usize,
        needed: usize,
        got: usize,
    },

    #[error("Line {line} must start with '{expected}'")]
    BadLineNumber { line: usize, expected: char },

    #[error("Failed to parse field '{field}': {source}")]
    ParseField {
        field: &'static str,
        source: std::num::ParseFloatError,
    },

    #[error("Failed to parse integer field '{field}': {source}")]
    ParseIntField {
        field: &'static str,
        source: std::num::ParseIntError,
    },
}

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Invalid element set: {0}")]
    InvalidTle(#[from] TleError),

    #[error("Satellite {0} can never be seen from this ground station")]
    SatelliteNotVisible(String),

    #[error("Horizon mask must have 36 sectors, got {0}")]
    InvalidHorizonMask(usize),

    #[error("Horizon mask entry '{0}' is not a whole number of degrees")]
    BadHorizonValue(String),

    #[error("Propagator does not match the orbit: deep space is {deep_space}")]
    PropagatorMismatch { deep_space: bool },

    #[error("No pass found before {0}")]
    NoPassFound(chrono::DateTime<chrono::Utc>),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
