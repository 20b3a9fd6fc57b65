use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum UiError {
    #[error("No visual cell at ({x}, {y})")]
    MissingCell { x: i32, y: i32 },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Unsupported symbol {0:?}")]
    UnsupportedSymbol(char),
    #[error("Rule pattern must be square and match its solution shape")]
    RuleShape,
    #[error("Unsupported outcome")]
    UnsupportedOutcome,
}

impl UiError {
    pub fn missing_cell(x: impl Into<i32>, y: impl Into<i32>) -> Self {
        Self::MissingCell {
            x: x.into(),
            y: y.into(),
        }
    }
}

pub type Result<T> = core::result::Result<T, UiError>;
