use crate::DocId;
use thiserror::Error;

/// Errors raised while building or transforming an index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("malformed document id: {0:?} is not an unsigned integer")]
    MalformedDocId(String),

    #[error("document {current} arrived after document {previous}; single-pass construction needs non-decreasing ids")]
    OutOfOrderDocument { previous: DocId, current: DocId },

    #[error("unknown compression strategy: {0}")]
    UnknownStrategy(String),

    #[error("unknown construction strategy: {0}")]
    UnknownConstruction(String),
}

pub type Result<T> = std::result::Result<T, IndexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = IndexError::MalformedDocId("12a".into());
        assert_eq!(err.to_string(), "malformed document id: \"12a\" is not an unsigned integer");

        let err = IndexError::OutOfOrderDocument { previous: 7, current: 3 };
        assert!(err.to_string().contains("document 3 arrived after document 7"));
    }
}
