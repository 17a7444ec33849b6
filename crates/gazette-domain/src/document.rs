//! Gazette documents as fetched from the search index

use std::collections::BTreeMap;

/// Metadata fields the pipeline forwards to the oracle
///
/// The index stores many more keys; only these four are part of the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    /// Numeric post identifier in the publishing system
    IdPost,
    /// Publication date of the gazette edition
    PostDate,
    /// Title of the gazette post
    PostTitle,
    /// URL of the published PDF
    SourceUrl,
}

impl MetadataKey {
    /// All keys, in prompt order
    pub const ALL: [MetadataKey; 4] = [
        MetadataKey::IdPost,
        MetadataKey::PostDate,
        MetadataKey::PostTitle,
        MetadataKey::SourceUrl,
    ];

    /// Key under which the search index stores this field
    pub fn index_key(&self) -> &'static str {
        match self {
            MetadataKey::IdPost => "idPost",
            MetadataKey::PostDate => "postDate",
            MetadataKey::PostTitle => "postTitle",
            MetadataKey::SourceUrl => "urlPdfDoe",
        }
    }

    /// Label used when the field is rendered into a prompt
    pub fn label(&self) -> &'static str {
        match self {
            MetadataKey::IdPost => "idPost",
            MetadataKey::PostDate => "PostDate",
            MetadataKey::PostTitle => "PostTitle",
            MetadataKey::SourceUrl => "URL",
        }
    }
}

/// One gazette document
///
/// Immutable once fetched. The batch driver owns it for the duration of a
/// single processing pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// Identifier, unique within the source index
    pub id: String,

    /// Full text body
    pub text: String,

    /// Document-level metadata, values rendered as text
    pub metadata: BTreeMap<String, String>,
}

impl Document {
    /// Create a document without metadata
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach one metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Look up one of the forwarded metadata fields
    ///
    /// Blank values count as absent.
    pub fn metadata_value(&self, key: MetadataKey) -> Option<&str> {
        self.metadata
            .get(key.index_key())
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_lookup_uses_index_keys() {
        let doc = Document::new("doc-1", "text")
            .with_metadata("idPost", "4411")
            .with_metadata("urlPdfDoe", "https://example.org/doe.pdf");

        assert_eq!(doc.metadata_value(MetadataKey::IdPost), Some("4411"));
        assert_eq!(
            doc.metadata_value(MetadataKey::SourceUrl),
            Some("https://example.org/doe.pdf")
        );
        assert_eq!(doc.metadata_value(MetadataKey::PostDate), None);
    }

    #[test]
    fn test_blank_metadata_is_absent() {
        let doc = Document::new("doc-1", "text").with_metadata("postTitle", "   ");
        assert_eq!(doc.metadata_value(MetadataKey::PostTitle), None);
    }

    #[test]
    fn test_labels_follow_prompt_order() {
        let labels: Vec<_> = MetadataKey::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels, vec!["idPost", "PostDate", "PostTitle", "URL"]);
    }
}
