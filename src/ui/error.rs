//! Browser-side error types

use chromiumoxide::error::CdpError;
use thiserror::Error;

/// Errors raised while driving the browser
#[derive(Error, Debug)]
pub enum UiError {
    #[error("Timed out after {secs}s waiting for {condition}")]
    Timeout { condition: String, secs: u64 },

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("Script returned an unexpected value: {0}")]
    Script(String),

    #[error("DevTools protocol error: {0}")]
    Cdp(#[from] CdpError),
}

impl UiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, UiError::Timeout { .. })
    }

    /// Errors an explicit wait keeps polling through
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            UiError::ElementNotFound(_) | UiError::Script(_) | UiError::Cdp(_)
        )
    }
}
