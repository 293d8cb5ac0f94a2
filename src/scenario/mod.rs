//! Scenarios: ordered verification steps and their outcomes
//!
//! A [`Scenario`] is one complete user-facing flow expressed as data: an
//! ordered list of [`Step`]s consumed strictly in authored order. The
//! outcome of a run is an explicit [`Verdict`], never an escaped fault.

use crate::locator::Locator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub mod games;

/// A single scripted action within a scenario
#[derive(Debug, Clone)]
pub enum Step {
    /// Navigate to a route under the target base URL
    Navigate {
        /// Route relative to the base URL, e.g. `/games`
        route: String,
    },
    /// Block until the locator is visible, bounded by a timeout
    WaitVisible {
        /// The element to wait for
        locator: Locator,
        /// How long to wait before failing the run
        timeout: Duration,
    },
    /// Click the located element
    Click {
        /// The element to click
        locator: Locator,
    },
    /// Send a keyboard event to the focused element
    PressKey {
        /// Key name, e.g. `ArrowRight`
        key: String,
    },
    /// Assert the locator currently resolves to a visible element
    AssertVisible {
        /// The element expected to be visible
        locator: Locator,
    },
    /// Assert the located element holds input focus
    AssertFocused {
        /// The element expected to be focused
        locator: Locator,
    },
    /// Wait a fixed real-time duration for asynchronous UI to progress
    Pause {
        /// How long to pause
        duration: Duration,
    },
    /// Capture evidence to a file (relative to the output directory)
    Screenshot {
        /// Evidence file name, e.g. `snake_game.png`
        file: String,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Navigate { route } => write!(f, "navigate {}", route),
            Step::WaitVisible { locator, timeout } => {
                write!(f, "wait {:?} for {}", timeout, locator)
            }
            Step::Click { locator } => write!(f, "click {}", locator),
            Step::PressKey { key } => write!(f, "press {}", key),
            Step::AssertVisible { locator } => write!(f, "assert visible {}", locator),
            Step::AssertFocused { locator } => write!(f, "assert focused {}", locator),
            Step::Pause { duration } => write!(f, "pause {:?}", duration),
            Step::Screenshot { file } => write!(f, "screenshot {}", file),
        }
    }
}

/// One complete, ordered sequence of steps verifying a user-facing flow
#[derive(Debug, Clone)]
pub struct Scenario {
    name: String,
    steps: Vec<Step>,
}

impl Scenario {
    /// Create an empty scenario
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Scenario name, used for logging, reporting, and evidence paths
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The steps in authored order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Append an arbitrary step
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Append a navigation step
    pub fn navigate<S: Into<String>>(self, route: S) -> Self {
        self.step(Step::Navigate {
            route: route.into(),
        })
    }

    /// Append a bounded visibility wait
    pub fn wait_visible(self, locator: Locator, timeout: Duration) -> Self {
        self.step(Step::WaitVisible { locator, timeout })
    }

    /// Append a click
    pub fn click(self, locator: Locator) -> Self {
        self.step(Step::Click { locator })
    }

    /// Append a key press
    pub fn press_key<S: Into<String>>(self, key: S) -> Self {
        self.step(Step::PressKey { key: key.into() })
    }

    /// Append a visibility assertion
    pub fn assert_visible(self, locator: Locator) -> Self {
        self.step(Step::AssertVisible { locator })
    }

    /// Append a focus assertion
    pub fn assert_focused(self, locator: Locator) -> Self {
        self.step(Step::AssertFocused { locator })
    }

    /// Append a fixed pause
    pub fn pause(self, duration: Duration) -> Self {
        self.step(Step::Pause { duration })
    }

    /// Append an evidence capture
    pub fn screenshot<S: Into<String>>(self, file: S) -> Self {
        self.step(Step::Screenshot { file: file.into() })
    }
}

/// Pass/fail result of a scenario run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    /// Every step completed
    Passed,
    /// A step failed; the scenario was terminated there
    Failed {
        /// Human-readable description of the failing step
        step: String,
        /// Why it failed
        reason: String,
    },
}

impl Verdict {
    /// Whether the scenario passed
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Passed)
    }
}

/// The outcome of one scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Scenario name
    pub scenario: String,
    /// Pass/fail verdict
    pub verdict: Verdict,
    /// Evidence files written during the run, in capture order
    pub evidence: Vec<String>,
    /// Wall-clock duration of the run in milliseconds
    pub duration_ms: u64,
}
