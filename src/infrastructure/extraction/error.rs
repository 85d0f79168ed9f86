//! Extraction error types
//!
//! Missing or malformed page content is never an error — every field has a
//! fallback value. These variants cover the genuinely fatal conditions:
//! unusable configuration and a page source that cannot be queried at all.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ExtractionError {
    #[error("Invalid CSS selector for {field}: '{selector}' - {reason}")]
    InvalidSelector {
        field: String,
        selector: String,
        reason: String,
    },

    #[error("No usable selector for {field} ({attempted} candidates failed to compile)")]
    CascadeUnusable { field: String, attempted: usize },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Page source failed: {target} - {reason}")]
    PageSourceFailed { target: String, reason: String },
}

impl ExtractionError {
    pub fn invalid_selector(field: &str, selector: &str, reason: &str) -> Self {
        Self::InvalidSelector {
            field: field.to_string(),
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn cascade_unusable(field: &str, attempted: usize) -> Self {
        Self::CascadeUnusable {
            field: field.to_string(),
            attempted,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn page_source_failed(target: &str, reason: &str) -> Self {
        Self::PageSourceFailed {
            target: target.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;
