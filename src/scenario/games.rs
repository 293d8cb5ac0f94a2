//! The shipped verification scenarios for the Games page
//!
//! Three flows against a front-end hosting a Minesweeper game and a Snake
//! game behind a tabbed "Games" page. Every wait is an explicit named
//! constant; every evidence path is deterministic so re-runs overwrite
//! rather than accumulate.

use crate::locator::Locator;
use crate::scenario::Scenario;
use std::time::Duration;

/// Route of the games listing page under the target base URL
pub const GAMES_ROUTE: &str = "/games";

/// Default bound for visibility waits
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Bound for the lazily-loaded game grid to appear
pub const GRID_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Settle time for the Minesweeper timer to visibly advance
pub const TIMER_SETTLE: Duration = Duration::from_secs(2);

/// Settle time for the Snake game loop to render its first frames
pub const GAME_LOOP_SETTLE: Duration = Duration::from_secs(1);

/// Minesweeper start flow: select the game, click a cell, and verify the
/// announced state moves from ready to playing.
pub fn minesweeper() -> Scenario {
    Scenario::new("minesweeper")
        .navigate(GAMES_ROUTE)
        .click(Locator::role("tab", "Mines"))
        .wait_visible(Locator::text("Minesweeper ready"), DEFAULT_WAIT_TIMEOUT)
        .screenshot("minesweeper_initial.png")
        .wait_visible(
            Locator::role("grid", "Minesweeper game board"),
            DEFAULT_WAIT_TIMEOUT,
        )
        // Cell labels change as the game progresses ("Row 5, Column 5,
        // hidden. Press F to flag."), so match on the stable prefix only.
        .click(Locator::attr_contains(
            "button",
            "aria-label",
            "Row 5, Column 5",
        ))
        .assert_visible(Locator::text("Playing Minesweeper"))
        .pause(TIMER_SETTLE)
        .screenshot("minesweeper_playing.png")
}

/// Minesweeper keyboard flow: focus a cell and verify an arrow key moves
/// focus to the adjacent cell. A pure focus-transition check, independent of
/// game logic.
pub fn minesweeper_focus() -> Scenario {
    Scenario::new("minesweeper-focus")
        .navigate(GAMES_ROUTE)
        .wait_visible(Locator::role("tab", "Mines"), DEFAULT_WAIT_TIMEOUT)
        .click(Locator::role("tab", "Mines"))
        .wait_visible(
            Locator::role("grid", "Minesweeper game board"),
            GRID_LOAD_TIMEOUT,
        )
        .click(Locator::role("button", "Row 1, Column 1"))
        .assert_focused(Locator::role("button", "Row 1, Column 1"))
        .press_key("ArrowRight")
        .assert_focused(Locator::role("button", "Row 1, Column 2"))
        .screenshot("minesweeper_focus.png")
}

/// Snake start flow: start the game and verify the labeled board region
/// renders.
pub fn snake() -> Scenario {
    Scenario::new("snake")
        .navigate(GAMES_ROUTE)
        .click(Locator::role("tab", "Snake"))
        // The Snake module is lazy loaded; its title overlay is the
        // readiness signal.
        .wait_visible(Locator::text("Snake Game"), DEFAULT_WAIT_TIMEOUT)
        .click(Locator::role("button", "Start Game"))
        .pause(GAME_LOOP_SETTLE)
        .assert_visible(Locator::role("img", "Snake game board"))
        .screenshot("snake_game.png")
}

/// All shipped scenarios, in the order they run under `--scenario all`
pub fn all() -> Vec<Scenario> {
    vec![minesweeper(), minesweeper_focus(), snake()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Step;

    #[test]
    fn test_all_contains_three_scenarios() {
        let scenarios = all();
        let names: Vec<&str> = scenarios.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["minesweeper", "minesweeper-focus", "snake"]);
    }

    #[test]
    fn test_every_scenario_starts_at_games_route() {
        for scenario in all() {
            match &scenario.steps()[0] {
                Step::Navigate { route } => assert_eq!(route, GAMES_ROUTE),
                other => panic!("{} starts with {}, not a navigation", scenario.name(), other),
            }
        }
    }

    #[test]
    fn test_every_wait_is_bounded() {
        for scenario in all() {
            for step in scenario.steps() {
                if let Step::WaitVisible { timeout, .. } = step {
                    assert!(
                        *timeout > Duration::ZERO && *timeout <= GRID_LOAD_TIMEOUT,
                        "{} has an unbounded or oversized wait",
                        scenario.name()
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_scenario_captures_evidence() {
        for scenario in all() {
            let captures = scenario
                .steps()
                .iter()
                .filter(|s| matches!(s, Step::Screenshot { .. }))
                .count();
            assert!(captures >= 1, "{} captures no evidence", scenario.name());
        }
    }

    #[test]
    fn test_evidence_paths_are_distinct_across_scenarios() {
        let mut seen = std::collections::HashSet::new();
        for scenario in all() {
            for step in scenario.steps() {
                if let Step::Screenshot { file } = step {
                    assert!(seen.insert(file.clone()), "duplicate evidence path {}", file);
                }
            }
        }
    }

    #[test]
    fn test_focus_scenario_moves_right_by_one_column() {
        let scenario = minesweeper_focus();
        let mut saw_press = false;
        for step in scenario.steps() {
            match step {
                Step::PressKey { key } => {
                    assert_eq!(key, "ArrowRight");
                    saw_press = true;
                }
                Step::AssertFocused { locator } if saw_press => {
                    assert!(locator.to_string().contains("Row 1, Column 2"));
                }
                _ => {}
            }
        }
        assert!(saw_press);
    }
}
