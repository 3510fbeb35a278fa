use thiserror::Error;

/// Why a single conversion request failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// A token of either expression is not a unit from the table.
    #[error("Unknown measure: {0}")]
    UnknownMeasure(String),

    /// Both sides are well formed but reduce to different canonical units.
    #[error("Can't convert {from} to {to}")]
    CantConvert { from: String, to: String },

    /// More than one `/` in an expression.
    #[error("Malformed expression: {0}")]
    MalformedExpression(String),
}

impl ConvertError {
    /// Process exit status for a failed one-shot conversion.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::UnknownMeasure(_) | ConvertError::MalformedExpression(_) => 2,
            ConvertError::CantConvert { .. } => 3,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EdgeError {
    #[error("Invalid ratio: {0:?}")]
    InvalidRatio(String),

    #[error("Zero ratio between {from} and {to}")]
    ZeroRatio { from: String, to: String },
}

/// Errors while reading a ratio table. Any of these aborts the whole load.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row}: expected 3 fields, found {found}")]
    MalformedRow { row: usize, found: usize },

    #[error("Row {row}: {source}")]
    Edge {
        row: usize,
        #[source]
        source: EdgeError,
    },
}

#[test]
fn exit_codes() {
    assert_eq!(ConvertError::UnknownMeasure("x".to_owned()).exit_code(), 2);
    assert_eq!(ConvertError::MalformedExpression("a/b/c".to_owned()).exit_code(), 2);
    let incompatible = ConvertError::CantConvert { from: "s".to_owned(), to: "m".to_owned() };
    assert_eq!(incompatible.exit_code(), 3);
}
