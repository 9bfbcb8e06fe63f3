use thiserror::Error;

/// Reasons a puzzle's text representation can be rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("puzzle text is empty")]
    Empty,
    #[error("missing {0} section")]
    MissingSection(&'static str),
    #[error("`{0}` is not a valid volume")]
    InvalidNumber(String),
    #[error("`{0}` is not a pitcher, expected contents/capacity")]
    InvalidPitcher(String),
    #[error("pitcher {index} has zero capacity")]
    ZeroCapacity { index: usize },
    #[error("pitcher {index} holds {contents} but only fits {capacity}")]
    Overfilled {
        index: usize,
        contents: u32,
        capacity: u32,
    },
    #[error("goal lists {goal} volumes for {pitchers} pitchers")]
    GoalLengthMismatch { goal: usize, pitchers: usize },
    #[error("goal {goal} for pitcher {index} exceeds its capacity {capacity}")]
    GoalExceedsCapacity {
        index: usize,
        goal: u32,
        capacity: u32,
    },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
