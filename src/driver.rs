//! Driver capability interface and CDP implementation
//!
//! The scenario runner talks to a [`Driver`], not to a browser library. The
//! trait is the full capability surface a scenario needs: navigate, wait,
//! interact, assert, capture, release. [`CdpDriver`] implements it over
//! ChromiumOxide; tests implement it with doubles to account for session
//! lifecycle without a real browser.

use crate::browser::{
    BrowserConfig, BrowserController, CaptureOptions, NavigationOptions, PageCapture, PageHandle,
    PageNavigator,
};
use crate::error::{BrowserError, Error, LocateError, Result};
use crate::locator::Locator;
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType,
};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// How often the DOM is re-polled while waiting for a locator.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Private attribute used to hand a JS-resolved element over to CDP.
const HIT_ATTR: &str = "data-uiproof-hit";

/// Capability surface a scenario run depends on.
///
/// Implementations must make `close` idempotent: the runner releases the
/// session on every exit path, and a second release must be a no-op.
#[allow(async_fn_in_trait)]
pub trait Driver {
    /// Navigate to an absolute URL and wait for readiness
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Block until the locator resolves to a visible element, or fail with
    /// [`LocateError::Timeout`] once the deadline passes
    async fn wait_visible(&mut self, locator: &Locator, timeout: Duration) -> Result<()>;

    /// Resolve the locator and click the element
    async fn click(&mut self, locator: &Locator) -> Result<()>;

    /// Send a keyboard event to the currently focused element
    async fn press_key(&mut self, key: &str) -> Result<()>;

    /// Single-shot visibility check
    async fn is_visible(&mut self, locator: &Locator) -> Result<bool>;

    /// Single-shot focus check
    async fn is_focused(&mut self, locator: &Locator) -> Result<bool>;

    /// Capture a PNG screenshot and write it to `path`, overwriting
    async fn screenshot(&mut self, path: &Path) -> Result<()>;

    /// Wait a fixed real-time duration for asynchronous UI to progress
    async fn pause(&mut self, duration: Duration) -> Result<()>;

    /// Release the browser session; must be idempotent
    async fn close(&mut self) -> Result<()>;
}

/// ChromiumOxide-backed [`Driver`]
pub struct CdpDriver {
    controller: Option<BrowserController>,
    page: Option<PageHandle>,
    nav_options: NavigationOptions,
}

impl CdpDriver {
    /// Launch a browser and open the session's single page
    #[instrument(skip(config))]
    pub async fn launch(config: BrowserConfig) -> Result<Self> {
        let nav_options = NavigationOptions {
            timeout_ms: config.timeout_ms,
            ..Default::default()
        };
        let controller = BrowserController::with_config(config).await?;
        let page = controller.new_page().await?;

        Ok(Self {
            controller: Some(controller),
            page: Some(page),
            nav_options,
        })
    }

    /// Override navigation options for this session
    pub fn with_nav_options(mut self, options: NavigationOptions) -> Self {
        self.nav_options = options;
        self
    }

    fn page(&self) -> Result<&PageHandle> {
        self.page
            .as_ref()
            .ok_or_else(|| BrowserError::AlreadyClosed.into())
    }

    async fn eval_bool(&self, expr: &str) -> Result<bool> {
        let page = self.page()?;
        let value = page
            .inner()
            .evaluate(expr)
            .await
            .map_err(|e| Error::cdp(e.to_string()))?
            .into_value::<bool>()
            .map_err(|e| Error::cdp(e.to_string()))?;
        Ok(value)
    }

    async fn dispatch_key(&self, kind: DispatchKeyEventType, key: &str) -> Result<()> {
        let page = self.page()?;
        let code = key_code(key);
        let params = DispatchKeyEventParams::builder()
            .r#type(kind)
            .key(key)
            .code(key)
            .windows_virtual_key_code(code)
            .native_virtual_key_code(code)
            .build()
            .map_err(Error::cdp)?;

        page.inner()
            .execute(params)
            .await
            .map_err(|e| Error::cdp(e.to_string()))?;
        Ok(())
    }
}

impl Driver for CdpDriver {
    async fn goto(&mut self, url: &str) -> Result<()> {
        let page = self.page()?;
        let result = PageNavigator::goto(page, url, Some(self.nav_options.clone())).await?;
        debug!("Arrived at {}", result.final_url);
        Ok(())
    }

    #[instrument(skip(self, locator), fields(locator = %locator))]
    async fn wait_visible(&mut self, locator: &Locator, timeout: Duration) -> Result<()> {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            if self.is_visible(locator).await? {
                debug!("Locator became visible");
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(LocateError::Timeout {
                    locator: locator.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                }
                .into());
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    #[instrument(skip(self, locator), fields(locator = %locator))]
    async fn click(&mut self, locator: &Locator) -> Result<()> {
        info!("Clicking element");

        // Tag the JS-resolved element so CDP can acquire it and perform a
        // trusted click (scroll into view + real input events).
        let tag_expr = format!(
            r#"(() => {{
                for (const el of document.querySelectorAll('[{attr}]')) {{
                    el.removeAttribute('{attr}');
                }}
                const el = {find};
                if (!el) return false;
                el.setAttribute('{attr}', '1');
                return true;
            }})()"#,
            attr = HIT_ATTR,
            find = locator.find_expr(),
        );

        if !self.eval_bool(&tag_expr).await? {
            return Err(LocateError::NotFound(locator.to_string()).into());
        }

        let page = self.page()?;
        let element = page
            .inner()
            .find_element(format!("[{}]", HIT_ATTR))
            .await
            .map_err(|e| LocateError::NotFound(format!("{} ({})", locator, e)))?;

        element
            .click()
            .await
            .map_err(|e| Error::cdp(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn press_key(&mut self, key: &str) -> Result<()> {
        info!("Pressing key: {}", key);
        self.dispatch_key(DispatchKeyEventType::KeyDown, key).await?;
        self.dispatch_key(DispatchKeyEventType::KeyUp, key).await?;
        Ok(())
    }

    async fn is_visible(&mut self, locator: &Locator) -> Result<bool> {
        let expr = format!(
            r#"(() => {{
                const el = {find};
                if (!el) return false;
                return !!(el.offsetWidth || el.offsetHeight || el.getClientRects().length);
            }})()"#,
            find = locator.find_expr(),
        );
        self.eval_bool(&expr).await
    }

    async fn is_focused(&mut self, locator: &Locator) -> Result<bool> {
        let expr = format!(
            r#"(() => {{
                const el = {find};
                return !!el && document.activeElement === el;
            }})()"#,
            find = locator.find_expr(),
        );
        self.eval_bool(&expr).await
    }

    #[instrument(skip(self))]
    async fn screenshot(&mut self, path: &Path) -> Result<()> {
        let page = self.page()?;
        let capture = PageCapture::screenshot(page, &CaptureOptions::png()).await?;
        capture.save_to(path).await
    }

    async fn pause(&mut self, duration: Duration) -> Result<()> {
        debug!("Pausing for {:?}", duration);
        tokio::time::sleep(duration).await;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn close(&mut self) -> Result<()> {
        self.page = None;
        if let Some(controller) = self.controller.take() {
            controller.close().await?;
        }
        Ok(())
    }
}

/// Windows virtual key code for the keys the harness sends.
fn key_code(key: &str) -> i64 {
    match key {
        "ArrowLeft" => 37,
        "ArrowUp" => 38,
        "ArrowRight" => 39,
        "ArrowDown" => 40,
        "Enter" => 13,
        "Tab" => 9,
        "Escape" => 27,
        " " => 32,
        k if k.len() == 1 && k.as_bytes()[0].is_ascii_alphabetic() => {
            k.as_bytes()[0].to_ascii_uppercase() as i64
        }
        _ => 0,
    }
}
