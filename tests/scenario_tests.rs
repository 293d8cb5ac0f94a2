//! Public API tests over scenarios, locators, and configuration types
//!
//! Full browser integration requires a running Chrome/Chromium instance and
//! a live target application; these tests cover everything below that line.

use pretty_assertions::assert_eq;
use std::time::Duration;

use uiproof::browser::{BrowserConfig, CaptureFormat, CaptureOptions, NavigationOptions, WaitUntil};
use uiproof::locator::Locator;
use uiproof::report::RunReport;
use uiproof::scenario::{games, ScenarioOutcome, Step, Verdict};

#[test]
fn browser_config_defaults_to_headless() {
    let config = BrowserConfig::default();
    assert!(config.headless);
    assert_eq!(config.width, 1280);
    assert_eq!(config.height, 800);
    assert!(config.sandbox);
}

#[test]
fn browser_config_builder_round_trip() {
    let config = BrowserConfig::builder()
        .headless(false)
        .viewport(1920, 1080)
        .sandbox(false)
        .timeout_ms(60000)
        .arg("--disable-gpu")
        .build();

    assert!(!config.headless);
    assert_eq!((config.width, config.height), (1920, 1080));
    assert_eq!(config.timeout_ms, 60000);
    assert_eq!(config.extra_args, vec!["--disable-gpu"]);
}

#[test]
fn navigation_defaults_wait_for_network_idle() {
    let opts = NavigationOptions::default();
    assert_eq!(opts.wait_until, WaitUntil::NetworkIdle);
    assert_eq!(opts.timeout_ms, 30000);
}

#[test]
fn capture_defaults_to_png() {
    let opts = CaptureOptions::default();
    assert_eq!(opts.format, CaptureFormat::Png);
}

#[test]
fn minesweeper_scenario_matches_the_verified_flow() {
    let scenario = games::minesweeper();
    let rendered: Vec<String> = scenario.steps().iter().map(|s| s.to_string()).collect();

    assert_eq!(rendered[0], "navigate /games");
    assert_eq!(rendered[1], "click role=tab name~\"Mines\"");
    assert!(rendered[2].contains("Minesweeper ready"));
    assert_eq!(rendered[3], "screenshot minesweeper_initial.png");
    assert!(rendered
        .iter()
        .any(|s| s == "click button[aria-label*=\"Row 5, Column 5\"]"));
    assert!(rendered
        .iter()
        .any(|s| s == "assert visible text~\"Playing Minesweeper\""));
    assert_eq!(rendered.last().unwrap(), "screenshot minesweeper_playing.png");
}

#[test]
fn snake_scenario_asserts_the_labeled_board() {
    let scenario = games::snake();
    let rendered: Vec<String> = scenario.steps().iter().map(|s| s.to_string()).collect();

    assert!(rendered.contains(&"click role=button name~\"Start Game\"".to_string()));
    assert!(rendered.contains(&"assert visible role=img name~\"Snake game board\"".to_string()));
}

#[test]
fn focus_scenario_uses_the_explicit_grid_timeout() {
    let scenario = games::minesweeper_focus();
    let grid_wait = scenario
        .steps()
        .iter()
        .find_map(|s| match s {
            Step::WaitVisible { locator, timeout }
                if locator.to_string().contains("game board") =>
            {
                Some(*timeout)
            }
            _ => None,
        })
        .expect("focus scenario waits for the grid");

    assert_eq!(grid_wait, games::GRID_LOAD_TIMEOUT);
    assert_eq!(grid_wait, Duration::from_secs(10));
}

#[test]
fn locators_render_for_error_messages() {
    assert_eq!(
        Locator::role("grid", "Minesweeper game board").to_string(),
        "role=grid name~\"Minesweeper game board\""
    );
    assert_eq!(
        Locator::text("Snake Game").exact().to_string(),
        "text=\"Snake Game\""
    );
}

#[test]
fn report_accumulates_and_serializes() {
    let base = url::Url::parse("http://localhost:5173").unwrap();
    let mut report = RunReport::new(&base);

    report.record(ScenarioOutcome {
        scenario: "minesweeper".to_string(),
        verdict: Verdict::Passed,
        evidence: vec!["verification/minesweeper_playing.png".to_string()],
        duration_ms: 4200,
    });

    assert!(report.all_passed());

    let dir = std::env::temp_dir().join("uiproof-report-test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("report.json");

    tokio_test::block_on(report.save_to(&path)).unwrap();

    let round_trip: RunReport =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(round_trip.passed, 1);
    assert_eq!(round_trip.outcomes.len(), 1);
    assert_eq!(round_trip.outcomes[0].scenario, "minesweeper");

    let _ = std::fs::remove_dir_all(&dir);
}
