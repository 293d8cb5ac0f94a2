//! The scenario runner
//!
//! [`Harness::run`] executes a scenario's steps strictly in order against a
//! [`Driver`], captures a best-effort diagnostic screenshot when a step
//! fails, and releases the session on every exit path. It returns an
//! explicit [`ScenarioOutcome`]; faults never escape the runner, and only
//! the binary entry point turns verdicts into a process exit code.

use crate::driver::Driver;
use crate::error::{AssertionError, Error, NavigationError, Result};
use crate::scenario::{Scenario, ScenarioOutcome, Step, Verdict};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, instrument, warn};
use url::Url;

/// Configuration for a scenario run
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Base URL of the application under test
    pub base_url: Url,
    /// Directory evidence files are written into
    pub output_dir: PathBuf,
}

impl HarnessConfig {
    /// Create a harness configuration
    pub fn new(base_url: Url, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url,
            output_dir: output_dir.into(),
        }
    }
}

/// Runs one scenario over one owned driver session
pub struct Harness<D: Driver> {
    driver: D,
    config: HarnessConfig,
}

impl<D: Driver> Harness<D> {
    /// Create a harness owning `driver` for exactly one scenario run
    pub fn new(driver: D, config: HarnessConfig) -> Self {
        Self { driver, config }
    }

    /// Run the scenario to completion or first failure.
    ///
    /// The session is released exactly once before this returns, whatever
    /// happened; evidence writes never occur after teardown.
    #[instrument(skip(self, scenario), fields(scenario = scenario.name()))]
    pub async fn run(mut self, scenario: &Scenario) -> ScenarioOutcome {
        info!("Running scenario: {}", scenario.name());
        let start = Instant::now();
        let mut evidence = Vec::new();

        let verdict = match self.execute(scenario, &mut evidence).await {
            Ok(()) => {
                info!("Scenario passed: {}", scenario.name());
                Verdict::Passed
            }
            Err((step, err)) => {
                warn!("Scenario failed at {}: {}", step, err);
                self.capture_diagnostic(scenario.name(), &mut evidence).await;
                Verdict::Failed {
                    step,
                    reason: err.to_string(),
                }
            }
        };

        if let Err(e) = self.driver.close().await {
            warn!("Session teardown error: {}", e);
        }

        ScenarioOutcome {
            scenario: scenario.name().to_string(),
            verdict,
            evidence,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }

    async fn execute(
        &mut self,
        scenario: &Scenario,
        evidence: &mut Vec<String>,
    ) -> std::result::Result<(), (String, Error)> {
        let total = scenario.steps().len();
        for (idx, step) in scenario.steps().iter().enumerate() {
            info!("Step {}/{}: {}", idx + 1, total, step);
            self.apply(step, evidence)
                .await
                .map_err(|e| (format!("step {}/{} ({})", idx + 1, total, step), e))?;
        }
        Ok(())
    }

    async fn apply(&mut self, step: &Step, evidence: &mut Vec<String>) -> Result<()> {
        match step {
            Step::Navigate { route } => {
                let url = self
                    .config
                    .base_url
                    .join(route)
                    .map_err(|e| NavigationError::InvalidUrl(format!("{}: {}", route, e)))?;
                self.driver.goto(url.as_str()).await
            }
            Step::WaitVisible { locator, timeout } => {
                self.driver.wait_visible(locator, *timeout).await
            }
            Step::Click { locator } => self.driver.click(locator).await,
            Step::PressKey { key } => self.driver.press_key(key).await,
            Step::AssertVisible { locator } => {
                if self.driver.is_visible(locator).await? {
                    Ok(())
                } else {
                    Err(AssertionError::NotVisible(locator.to_string()).into())
                }
            }
            Step::AssertFocused { locator } => {
                if self.driver.is_focused(locator).await? {
                    Ok(())
                } else {
                    Err(AssertionError::NotFocused(locator.to_string()).into())
                }
            }
            Step::Pause { duration } => self.driver.pause(*duration).await,
            Step::Screenshot { file } => {
                let path = self.config.output_dir.join(file);
                self.driver.screenshot(&path).await?;
                evidence.push(path.display().to_string());
                Ok(())
            }
        }
    }

    /// Best-effort screenshot of the DOM state at the moment of failure,
    /// taken while the session is still live.
    async fn capture_diagnostic(&mut self, scenario_name: &str, evidence: &mut Vec<String>) {
        let path = self
            .config
            .output_dir
            .join(format!("{}_error.png", scenario_name));
        match self.driver.screenshot(&path).await {
            Ok(()) => {
                info!("Diagnostic screenshot written: {}", path.display());
                evidence.push(path.display().to_string());
            }
            Err(e) => warn!("Diagnostic screenshot failed: {}", e),
        }
    }
}
