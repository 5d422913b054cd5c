//! Error taxonomy shared by the map, its views and its cursors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeMapError {
    /// The key cannot take part in natural ordering (it does not even compare
    /// equal to itself, e.g. `f64::NAN`).
    #[error("key is not usable under natural ordering")]
    InvalidKey,
    /// Two keys could not be ordered against each other.
    #[error("keys cannot be ordered")]
    Comparison,
    /// A key or a requested sub-range falls outside a view's window.
    #[error("{0}")]
    Range(&'static str),
    /// The map was structurally modified behind a live cursor.
    #[error("map was structurally modified during traversal")]
    Concurrency,
    #[error("map is empty")]
    EmptyStructure,
    /// `Cursor::remove` called before `next`, or twice for the same entry.
    #[error("cursor has no current entry")]
    NoCurrentEntry,
    #[error("bulk load source is not strictly ascending")]
    UnsortedInput,
    #[error("bulk load source yielded {actual} entries, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, TreeMapError>;
