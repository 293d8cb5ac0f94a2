//! Target reachability pre-flight
//!
//! The harness never starts or orchestrates the application under test; it
//! only checks, before paying for a browser launch, that something is
//! answering at the base URL. Any HTTP response counts as reachable.

use crate::error::{Error, NavigationError, Result};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Bound on the pre-flight request
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Check that the target application answers at `base_url`.
#[instrument]
pub async fn check_reachable(base_url: &Url, timeout: Duration) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::generic(format!("Failed to build HTTP client: {}", e)))?;

    match client.get(base_url.as_str()).send().await {
        Ok(response) => {
            debug!("Target answered with HTTP {}", response.status());
            Ok(())
        }
        Err(e) => Err(NavigationError::Unreachable {
            url: base_url.to_string(),
            reason: e.to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_target_is_reported() {
        // A port from the dynamic range with nothing listening on it.
        let url = Url::parse("http://127.0.0.1:59999/").unwrap();
        let err = check_reachable(&url, Duration::from_millis(500))
            .await
            .unwrap_err();
        match err {
            Error::Navigation(NavigationError::Unreachable { url, .. }) => {
                assert!(url.contains("127.0.0.1:59999"));
            }
            other => panic!("expected Unreachable, got {}", other),
        }
    }
}
