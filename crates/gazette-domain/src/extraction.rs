//! Raw oracle output

/// Status code reported for a successful oracle call
pub const SUCCESS_CODE: u16 = 100;

/// Status code reported for a failed oracle call
pub const FAILURE_CODE: u16 = 1;

/// Outcome of one oracle round trip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStatus {
    /// The oracle answered; the text is its reply
    Success,
    /// The call failed; the text describes the error
    Failure(u16),
}

impl ExtractionStatus {
    /// Raw status code
    pub fn code(&self) -> u16 {
        match self {
            ExtractionStatus::Success => SUCCESS_CODE,
            ExtractionStatus::Failure(code) => *code,
        }
    }

    /// Whether this status is the reserved success code
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionStatus::Success)
    }
}

/// Raw text returned by the oracle plus its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Oracle reply on success, error description on failure
    pub text: String,

    /// Status of the call
    pub status: ExtractionStatus,
}

impl ExtractionResult {
    /// Successful reply
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status: ExtractionStatus::Success,
        }
    }

    /// Failed call with the conventional failure code
    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            text: reason.into(),
            status: ExtractionStatus::Failure(FAILURE_CODE),
        }
    }
}
