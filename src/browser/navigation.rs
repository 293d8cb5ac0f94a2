//! Page navigation
//!
//! A navigation is a single bounded attempt: if the target does not load
//! within the timeout the scenario is over. There are no retries and no
//! backoff anywhere in the harness.

use crate::browser::PageHandle;
use crate::error::{Error, NavigationError, Result};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Options for page navigation
#[derive(Debug, Clone)]
pub struct NavigationOptions {
    /// Timeout in milliseconds (default: 30000)
    pub timeout_ms: u64,
    /// Readiness condition to wait for (default: network idle)
    pub wait_until: WaitUntil,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 30000,
            wait_until: WaitUntil::NetworkIdle,
        }
    }
}

/// Condition to wait for after navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    /// Wait until the load event fires
    Load,
    /// Wait until DOMContentLoaded fires
    DomContentLoaded,
    /// Wait until load plus a short idle grace period
    NetworkIdle,
}

/// Result of a navigation operation
#[derive(Debug)]
pub struct NavigationResult {
    /// Final URL after any redirects
    pub final_url: String,
    /// Page title
    pub title: Option<String>,
    /// Navigation duration in milliseconds
    pub duration_ms: u64,
}

/// URL validation utilities
pub struct UrlValidator;

impl UrlValidator {
    /// Validate a URL for navigation
    pub fn validate(url: &str) -> std::result::Result<(), String> {
        if url.is_empty() {
            return Err("URL cannot be empty".to_string());
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(format!("URL must start with http:// or https://: {}", url));
        }

        if url.len() > 2048 {
            return Err("URL exceeds maximum length of 2048 characters".to_string());
        }

        Ok(())
    }

    /// Check if URL points to localhost
    pub fn is_localhost(url: &str) -> bool {
        let lower = url.to_lowercase();
        lower.contains("://localhost")
            || lower.contains("://127.0.0.1")
            || lower.contains("://[::1]")
            || lower.contains("://0.0.0.0")
    }
}

/// Page navigator
pub struct PageNavigator;

impl PageNavigator {
    /// Navigate to a URL and wait for the readiness condition.
    ///
    /// A failure here is terminal for the scenario; the caller does not
    /// retry.
    #[instrument(skip(page))]
    pub async fn goto(
        page: &PageHandle,
        url: &str,
        options: Option<NavigationOptions>,
    ) -> Result<NavigationResult> {
        let opts = options.unwrap_or_default();
        let start = std::time::Instant::now();

        UrlValidator::validate(url).map_err(NavigationError::InvalidUrl)?;

        info!("Navigating to: {}", url);

        let timeout = Duration::from_millis(opts.timeout_ms);
        let nav_future = page.page.goto(url);
        tokio::time::timeout(timeout, nav_future)
            .await
            .map_err(|_| NavigationError::Timeout(opts.timeout_ms))?
            .map_err(|e| NavigationError::LoadFailed(e.to_string()))?;

        Self::wait_for_ready(&page.page, &opts).await?;

        let final_url = page
            .page
            .url()
            .await
            .map_err(|e| Error::cdp(e.to_string()))?
            .unwrap_or_else(|| url.to_string());

        let title = page
            .page
            .evaluate("document.title")
            .await
            .ok()
            .and_then(|v| v.into_value::<String>().ok());

        let duration_ms = start.elapsed().as_millis() as u64;
        debug!("Navigation complete: {} -> {}", url, final_url);

        Ok(NavigationResult {
            final_url,
            title,
            duration_ms,
        })
    }

    /// Wait for the page to satisfy the readiness condition
    async fn wait_for_ready(page: &chromiumoxide::Page, opts: &NavigationOptions) -> Result<()> {
        let script = match opts.wait_until {
            WaitUntil::Load => {
                r#"
                    new Promise(resolve => {
                        if (document.readyState === 'complete') {
                            resolve(true);
                        } else {
                            window.addEventListener('load', () => resolve(true));
                        }
                    })
                "#
            }
            WaitUntil::DomContentLoaded => {
                r#"
                    new Promise(resolve => {
                        if (document.readyState !== 'loading') {
                            resolve(true);
                        } else {
                            document.addEventListener('DOMContentLoaded', () => resolve(true));
                        }
                    })
                "#
            }
            WaitUntil::NetworkIdle => {
                // Load event plus a 500ms grace period for in-flight fetches
                r#"
                    new Promise(resolve => {
                        if (document.readyState === 'complete') {
                            setTimeout(() => resolve(true), 500);
                        } else {
                            window.addEventListener('load', () => {
                                setTimeout(() => resolve(true), 500);
                            });
                        }
                    })
                "#
            }
        };

        let timeout = Duration::from_millis(opts.timeout_ms);
        tokio::time::timeout(timeout, page.evaluate(script))
            .await
            .map_err(|_| NavigationError::Timeout(opts.timeout_ms))?
            .map_err(|e| Error::cdp(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_options_default() {
        let opts = NavigationOptions::default();
        assert_eq!(opts.timeout_ms, 30000);
        assert_eq!(opts.wait_until, WaitUntil::NetworkIdle);
    }

    #[test]
    fn test_wait_until_variants() {
        assert_ne!(WaitUntil::Load, WaitUntil::DomContentLoaded);
        assert_eq!(WaitUntil::NetworkIdle, WaitUntil::NetworkIdle);
    }

    #[test]
    fn test_url_validation_valid_http() {
        assert!(UrlValidator::validate("http://localhost:5173/games").is_ok());
        assert!(UrlValidator::validate("https://example.com").is_ok());
    }

    #[test]
    fn test_url_validation_empty() {
        let result = UrlValidator::validate("");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("empty"));
    }

    #[test]
    fn test_url_validation_no_protocol() {
        let result = UrlValidator::validate("localhost:5173");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("must start with"));
    }

    #[test]
    fn test_url_validation_too_long() {
        let long_url = format!("https://example.com/{}", "a".repeat(3000));
        assert!(UrlValidator::validate(&long_url).is_err());
    }

    #[test]
    fn test_localhost_check() {
        assert!(UrlValidator::is_localhost("http://localhost:5173"));
        assert!(UrlValidator::is_localhost("http://127.0.0.1:8080"));
        assert!(UrlValidator::is_localhost("http://[::1]:8080"));
        assert!(UrlValidator::is_localhost("http://LOCALHOST:5173"));
        assert!(!UrlValidator::is_localhost("https://example.com"));
        assert!(!UrlValidator::is_localhost("https://example.com/localhost/x"));
    }

    #[test]
    fn test_navigation_result_structure() {
        let result = NavigationResult {
            final_url: "http://localhost:5173/games".to_string(),
            title: Some("Games".to_string()),
            duration_ms: 150,
        };

        assert_eq!(result.final_url, "http://localhost:5173/games");
        assert_eq!(result.title, Some("Games".to_string()));
        assert_eq!(result.duration_ms, 150);
    }
}
