//! Error types for set cover solving.

use thiserror::Error;

/// Main error type for instance loading and solving.
#[derive(Debug, Error)]
pub enum SetCoverError {
    /// Malformed instance text.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number where the problem was detected.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// Some universe elements are not contained in any subset.
    #[error(
        "instance is infeasible: {} element(s) covered by no subset (first: {})",
        .uncovered.len(),
        .uncovered.first().copied().unwrap_or(0)
    )]
    InfeasibleInstance {
        /// 1-based element ids that no subset contains, ascending.
        uncovered: Vec<usize>,
    },

    /// An instance built programmatically violates the data model.
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// A solution does not match the instance it claims to solve.
    #[error("invalid solution: {0}")]
    InvalidSolution(String),

    /// Solver configuration rejected by `validate()`.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Algorithm identifier not recognised by the dispatcher.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Underlying I/O failure while reading or writing files.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SetCoverError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        SetCoverError::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for set cover operations.
pub type Result<T> = std::result::Result<T, SetCoverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = SetCoverError::parse(3, "expected integer, got \"x\"");
        assert_eq!(
            err.to_string(),
            "parse error at line 3: expected integer, got \"x\""
        );
    }

    #[test]
    fn test_infeasible_display_names_first_element() {
        let err = SetCoverError::InfeasibleInstance {
            uncovered: vec![3, 7],
        };
        let msg = err.to_string();
        assert!(msg.contains("2 element(s)"), "{msg}");
        assert!(msg.contains("first: 3"), "{msg}");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SetCoverError = io.into();
        assert!(matches!(err, SetCoverError::Io(_)));
    }
}
