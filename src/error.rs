//! Error types for uiproof
//!
//! This module provides a comprehensive error type hierarchy using `thiserror`
//! for proper error handling across all components.

use thiserror::Error;

/// The main error type for uiproof operations
#[derive(Error, Debug)]
pub enum Error {
    /// Browser lifecycle errors
    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    /// Navigation errors
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Element lookup errors
    #[error("Locate error: {0}")]
    Locate(#[from] LocateError),

    /// Assertion failures
    #[error("Assertion failed: {0}")]
    Assertion(#[from] AssertionError),

    /// Evidence capture errors
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ChromiumOxide errors
    #[error("CDP error: {0}")]
    Cdp(String),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Browser lifecycle and control errors
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Failed to launch browser
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Browser configuration error
    #[error("Invalid browser configuration: {0}")]
    ConfigError(String),

    /// Failed to create new page/tab
    #[error("Failed to create page: {0}")]
    PageCreationFailed(String),

    /// Browser already closed
    #[error("Browser already closed")]
    AlreadyClosed,

    /// Timeout waiting for browser
    #[error("Browser operation timed out after {0}ms")]
    Timeout(u64),
}

/// Navigation errors
#[derive(Error, Debug)]
pub enum NavigationError {
    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Navigation timeout
    #[error("Navigation timed out after {0}ms")]
    Timeout(u64),

    /// Page load failed
    #[error("Page load failed: {0}")]
    LoadFailed(String),

    /// Target application not reachable
    #[error("Target not reachable at {url}: {reason}")]
    Unreachable {
        /// The URL that was probed
        url: String,
        /// The underlying connection error
        reason: String,
    },
}

/// Element lookup errors
#[derive(Error, Debug)]
pub enum LocateError {
    /// No element matched the locator
    #[error("No element matched {0}")]
    NotFound(String),

    /// An element matched but is not visible
    #[error("Element matched {0} but is not visible")]
    NotVisible(String),

    /// The locator did not become visible within its timeout
    #[error("Timed out after {timeout_ms}ms waiting for {locator} to become visible")]
    Timeout {
        /// Description of the locator that never resolved
        locator: String,
        /// The timeout that expired
        timeout_ms: u64,
    },
}

/// Assertion failures over visible UI state
#[derive(Error, Debug)]
pub enum AssertionError {
    /// Expected an element to be visible
    #[error("Expected {0} to be visible")]
    NotVisible(String),

    /// Expected an element to hold input focus
    #[error("Expected {0} to be focused")]
    NotFocused(String),
}

/// Evidence capture errors
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Screenshot failed
    #[error("Screenshot capture failed: {0}")]
    ScreenshotFailed(String),

    /// Evidence file could not be written
    #[error("Failed to write evidence to {path}: {reason}")]
    WriteFailed {
        /// Destination path
        path: String,
        /// The underlying I/O error
        reason: String,
    },
}

/// Result type alias for uiproof operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a generic error from a string
    pub fn generic<S: Into<String>>(msg: S) -> Self {
        Error::Generic(msg.into())
    }

    /// Create a CDP error from a string
    pub fn cdp<S: Into<String>>(msg: S) -> Self {
        Error::Cdp(msg.into())
    }
}

/// Convert chromiumoxide errors
impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Browser(BrowserError::LaunchFailed("no chrome".to_string()));
        assert!(err.to_string().contains("Failed to launch browser"));
        assert!(err.to_string().contains("no chrome"));
    }

    #[test]
    fn test_locate_timeout_names_locator() {
        let err = LocateError::Timeout {
            locator: "role=grid name~\"Minesweeper game board\"".to_string(),
            timeout_ms: 10000,
        };
        assert!(err.to_string().contains("10000ms"));
        assert!(err.to_string().contains("Minesweeper game board"));
    }

    #[test]
    fn test_assertion_error() {
        let err = AssertionError::NotFocused("role=button name~\"Row 1, Column 2\"".to_string());
        assert!(err.to_string().contains("to be focused"));
    }

    #[test]
    fn test_unreachable_carries_connection_error() {
        let err = NavigationError::Unreachable {
            url: "http://localhost:5173/".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("localhost:5173"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_capture_write_failed() {
        let err = CaptureError::WriteFailed {
            path: "verification/snake_game.png".to_string(),
            reason: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("snake_game.png"));
    }

    #[test]
    fn test_generic_error() {
        let err = Error::generic("something went wrong");
        assert_eq!(err.to_string(), "something went wrong");
    }
}
