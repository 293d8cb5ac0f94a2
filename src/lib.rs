//! uiproof - Headless-Browser UI Verification Harness
//!
//! This crate drives scripted verification scenarios against a
//! browser-rendered web application, asserts on visible UI state (text,
//! roles, focus), and captures screenshots as evidence.
//!
//! # Features
//!
//! - **Scenario runner**: fixed, ordered step sequences with an explicit
//!   pass/fail outcome and guaranteed session teardown
//! - **Browser Automation**: headless browser control via ChromiumOxide (CDP)
//! - **Declarative locators**: role + accessible name, visible text, or
//!   attribute-substring queries resolved against the live DOM
//! - **Evidence capture**: deterministic, overwriting screenshot paths plus
//!   a JSON run report
//!
//! # Architecture
//!
//! ```text
//! CLI ──▶ Harness ──▶ Driver (capability trait)
//!            │             │
//!            ▼             ▼
//!      ┌──────────┐   ┌─────────────────┐
//!      │ Scenario │   │ CdpDriver (CDP) │
//!      │  steps   │   └────────┬────────┘
//!      └────┬─────┘            │
//!           ▼                  ▼
//!       Outcomes         Browser process
//!       report.json      Screenshots
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use uiproof::browser::BrowserConfig;
//! use uiproof::driver::CdpDriver;
//! use uiproof::harness::{Harness, HarnessConfig};
//! use uiproof::scenario::games;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let driver = CdpDriver::launch(BrowserConfig::default()).await?;
//!     let config = HarnessConfig::new(
//!         url::Url::parse("http://localhost:5173")?,
//!         "verification",
//!     );
//!
//!     let outcome = Harness::new(driver, config).run(&games::snake()).await;
//!     println!("{}: {:?}", outcome.scenario, outcome.verdict);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod browser;
pub mod driver;
pub mod error;
pub mod harness;
pub mod locator;
pub mod probe;
pub mod report;
pub mod scenario;

// Re-exports for convenience
pub use browser::{BrowserConfig, BrowserController};
pub use driver::{CdpDriver, Driver};
pub use error::{Error, Result};
pub use harness::{Harness, HarnessConfig};
pub use locator::Locator;
pub use report::RunReport;
pub use scenario::{Scenario, ScenarioOutcome, Step, Verdict};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
