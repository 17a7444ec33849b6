//! Acts - the individual notices segmented out of a document

use std::fmt;

/// Length of every identifier code
pub const ACT_CODE_LEN: usize = 9;

/// Identifier code tagging one act in the publishing system
///
/// Always exactly 9 characters from `A-Z` and `0-9`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActCode(String);

impl ActCode {
    /// Parse a code, rejecting anything outside the 9-character pattern
    ///
    /// # Examples
    ///
    /// ```
    /// use gazette_domain::ActCode;
    ///
    /// assert!(ActCode::parse("ABC123XYZ").is_ok());
    /// assert!(ActCode::parse("abc123xyz").is_err());
    /// assert!(ActCode::parse("ABC123").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self, String> {
        if Self::is_valid(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(format!("Invalid identifier code: '{}'", value))
        }
    }

    /// Check a candidate code against the pattern
    pub fn is_valid(value: &str) -> bool {
        value.len() == ACT_CODE_LEN
            && value
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    }

    /// Borrow the code as text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One act segmented from a document
///
/// Transient: it only lives inside one document-processing invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Act {
    /// Full act text, ending with its identifier marker line
    pub text: String,

    /// Identifier code extracted from the marker
    pub code: ActCode,
}

impl Act {
    /// Create a new act
    pub fn new(text: impl Into<String>, code: ActCode) -> Self {
        Self {
            text: text.into(),
            code,
        }
    }
}
