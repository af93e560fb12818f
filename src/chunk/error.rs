use thiserror::Error;

/// An index or chunk count fell outside the fixed capacity of a flag set.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("value {value} out of range (max {max})")]
pub struct OutOfRangeError {
    /// The rejected index or chunk count.
    pub value: usize,
    /// The largest value that would have been accepted.
    pub max: usize,
}
