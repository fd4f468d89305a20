//! Error types for hotcache

use std::fmt;

/// Result type alias for hotcache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache construction
///
/// Operations on a built cache are total: `get` signals absence with `None`
/// and `put` always succeeds, so construction is the only fallible surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Capacity must be a positive number of entries
    InvalidCapacity,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity => write!(f, "Invalid capacity: must be greater than 0"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let msg = Error::InvalidCapacity.to_string();
        assert!(msg.contains("capacity"));
    }
}
