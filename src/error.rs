//! Error types for parsing, book mutation, and the run as a whole.

use std::path::PathBuf;

use crate::OrderId;

/// Structural book errors. These indicate feed corruption: the book
/// validates before mutating, so a failed operation leaves no partial
/// state behind.
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    #[error("duplicate order id {0} on add")]
    DuplicateOrder(OrderId),

    #[error("order {0} changed side on modify")]
    SideChange(OrderId),

    #[error("order {0} has no side")]
    MissingSide(OrderId),
}

/// All errors that can end a reconstruction run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("line {line}: {msg}")]
    Parse { line: u64, msg: String },

    #[error(transparent)]
    Book(#[from] BookError),

    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            format!("{}", BookError::DuplicateOrder(OrderId(7))),
            "duplicate order id 7 on add"
        );
        assert_eq!(
            format!("{}", BookError::SideChange(OrderId(3))),
            "order 3 changed side on modify"
        );
        let err = Error::Parse {
            line: 12,
            msg: "bad size: `x`".into(),
        };
        assert_eq!(format!("{err}"), "line 12: bad size: `x`");
    }
}
