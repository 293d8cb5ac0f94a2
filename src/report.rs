//! Machine-readable run summary
//!
//! Evidence screenshots are for humans; the report is the programmatic
//! record of a run. It is written to a fixed file in the output directory
//! and overwritten each run.

use crate::error::Result;
use crate::scenario::ScenarioOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;
use url::Url;

/// File name of the run summary within the output directory
pub const REPORT_FILE: &str = "report.json";

/// Summary of one harness invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Base URL of the application under test
    pub base_url: String,
    /// Number of scenarios that passed
    pub passed: usize,
    /// Number of scenarios that failed
    pub failed: usize,
    /// Per-scenario outcomes in execution order
    pub outcomes: Vec<ScenarioOutcome>,
}

impl RunReport {
    /// Start an empty report for a run against `base_url`
    pub fn new(base_url: &Url) -> Self {
        Self {
            started_at: Utc::now(),
            base_url: base_url.to_string(),
            passed: 0,
            failed: 0,
            outcomes: Vec::new(),
        }
    }

    /// Record a scenario outcome
    pub fn record(&mut self, outcome: ScenarioOutcome) {
        if outcome.verdict.is_pass() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.outcomes.push(outcome);
    }

    /// Whether every recorded scenario passed
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Write the report as pretty-printed JSON, overwriting any previous run
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(self)?;
        tokio::fs::write(path, json).await?;
        info!("Report written: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Verdict;

    fn outcome(name: &str, verdict: Verdict) -> ScenarioOutcome {
        ScenarioOutcome {
            scenario: name.to_string(),
            verdict,
            evidence: vec![format!("verification/{}.png", name)],
            duration_ms: 1200,
        }
    }

    #[test]
    fn test_record_tallies_verdicts() {
        let mut report = RunReport::new(&Url::parse("http://localhost:5173").unwrap());
        report.record(outcome("minesweeper", Verdict::Passed));
        report.record(outcome(
            "snake",
            Verdict::Failed {
                step: "step 4/7 (click role=button name~\"Start Game\")".to_string(),
                reason: "No element matched".to_string(),
            },
        ));

        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert!(!report.all_passed());
    }

    #[test]
    fn test_report_serializes_outcomes() {
        let mut report = RunReport::new(&Url::parse("http://localhost:5173").unwrap());
        report.record(outcome("minesweeper", Verdict::Passed));

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"base_url\":\"http://localhost:5173/\""));
        assert!(json.contains("\"scenario\":\"minesweeper\""));
        assert!(json.contains("\"status\":\"passed\""));
    }
}
