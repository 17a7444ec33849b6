//! Selecting the acts that are contract excerpts

/// Decides whether an act is in scope for extraction
///
/// An act is in scope when its text contains both the excerpt token and the
/// contract keyword, compared case-insensitively.
#[derive(Debug, Clone)]
pub struct ActClassifier {
    excerpt_token: String,
    contract_token: String,
}

impl ActClassifier {
    /// Create a classifier for the given tokens
    pub fn new(excerpt_token: &str, contract_token: &str) -> Self {
        Self {
            excerpt_token: excerpt_token.to_lowercase(),
            contract_token: contract_token.to_lowercase(),
        }
    }

    /// Whether the act text is a contract excerpt
    pub fn is_in_scope(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        lower.contains(&self.excerpt_token) && lower.contains(&self.contract_token)
    }
}

impl Default for ActClassifier {
    fn default() -> Self {
        Self::new("extrato", "contrato")
    }
}
