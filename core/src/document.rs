use crate::{DocId, IndexError, Result};
use serde::{Deserialize, Serialize};

/// A normalized record handed over by the ingestion layer. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub content: String,
}

impl Document {
    pub fn new(id: DocId, content: impl Into<String>) -> Self {
        Self { id, content: content.into() }
    }

    /// Build a document from an opaque string identifier, which must be a decimal integer.
    pub fn parse(raw_id: &str, content: impl Into<String>) -> Result<Self> {
        let id = parse_doc_id(raw_id)?;
        Ok(Self::new(id, content))
    }
}

pub fn parse_doc_id(raw: &str) -> Result<DocId> {
    raw.trim()
        .parse::<DocId>()
        .map_err(|_| IndexError::MalformedDocId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_ids() {
        let doc = Document::parse(" 42 ", "text").unwrap();
        assert_eq!(doc.id, 42);
        assert_eq!(doc.content, "text");
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert_eq!(Document::parse("doc-1", ""), Err(IndexError::MalformedDocId("doc-1".into())));
        assert!(Document::parse("-3", "").is_err());
        assert!(Document::parse("", "").is_err());
    }
}
