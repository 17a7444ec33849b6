//! Enriching acts with document metadata before extraction

use gazette_domain::{Act, Document, MetadataKey};

/// Placeholder for metadata the document does not carry
pub const NOT_AVAILABLE: &str = "Não disponível";

/// Builds the prompt sent to the extraction oracle for one act
pub struct PromptBuilder<'a> {
    act: &'a Act,
    document: &'a Document,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(act: &'a Act, document: &'a Document) -> Self {
        Self { act, document }
    }

    /// Build the enriched prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(&format!("Ato: {}\n", self.act.text));
        prompt.push_str(&format!("Código: {}\n", self.act.code));
        prompt.push_str("Metadados:\n");
        for key in MetadataKey::ALL {
            let value = self.document.metadata_value(key).unwrap_or(NOT_AVAILABLE);
            prompt.push_str(&format!("    {}: {}\n", key.label(), value));
        }

        prompt.trim().to_string()
    }
}
