//! uiproof CLI
//!
//! Runs the shipped verification scenarios against a running instance of the
//! Games front-end and exits nonzero unless every scenario passed.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use url::Url;

use uiproof::browser::BrowserConfig;
use uiproof::driver::CdpDriver;
use uiproof::harness::{Harness, HarnessConfig};
use uiproof::probe;
use uiproof::report::{RunReport, REPORT_FILE};
use uiproof::scenario::{games, Scenario, Verdict};

/// UI verification harness
#[derive(Parser, Debug)]
#[command(name = "uiproof")]
#[command(version)]
#[command(about = "Drive scripted UI verification scenarios against a running web application")]
struct Args {
    /// Base URL of the application under test
    #[arg(long, default_value = "http://localhost:5173")]
    base_url: Url,

    /// Directory screenshots and the run report are written into
    #[arg(short, long, default_value = "verification")]
    output_dir: PathBuf,

    /// Which scenario(s) to run
    #[arg(short, long, value_enum, default_value = "all")]
    scenario: ScenarioChoice,

    /// Show the browser window instead of running headless
    #[arg(long)]
    headful: bool,

    /// Path to Chrome/Chromium executable
    #[arg(long)]
    chrome_path: Option<String>,

    /// Skip the pre-flight reachability check of the target
    #[arg(long)]
    no_probe: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScenarioChoice {
    /// All shipped scenarios, in order
    All,
    /// Minesweeper start flow
    Minesweeper,
    /// Minesweeper keyboard-focus flow
    MinesweeperFocus,
    /// Snake start flow
    Snake,
}

impl ScenarioChoice {
    fn scenarios(self) -> Vec<Scenario> {
        match self {
            ScenarioChoice::All => games::all(),
            ScenarioChoice::Minesweeper => vec![games::minesweeper()],
            ScenarioChoice::MinesweeperFocus => vec![games::minesweeper_focus()],
            ScenarioChoice::Snake => vec![games::snake()],
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            tracing::error!("One or more scenarios failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<bool> {
    tokio::fs::create_dir_all(&args.output_dir)
        .await
        .with_context(|| format!("creating output directory {}", args.output_dir.display()))?;

    if !args.no_probe {
        probe::check_reachable(&args.base_url, probe::PROBE_TIMEOUT)
            .await
            .context("target application must already be running; start it or pass --no-probe")?;
    }

    let scenarios = args.scenario.scenarios();
    let mut report = RunReport::new(&args.base_url);

    // Scenarios run strictly sequentially, each over its own fresh session.
    for scenario in &scenarios {
        let mut config = BrowserConfig::builder().headless(!args.headful);
        if let Some(ref path) = args.chrome_path {
            config = config.chrome_path(path.clone());
        }

        let driver = CdpDriver::launch(config.build())
            .await
            .context("launching browser")?;

        let harness = Harness::new(
            driver,
            HarnessConfig::new(args.base_url.clone(), args.output_dir.clone()),
        );
        let outcome = harness.run(scenario).await;

        match &outcome.verdict {
            Verdict::Passed => tracing::info!("PASS {} ({}ms)", outcome.scenario, outcome.duration_ms),
            Verdict::Failed { step, reason } => {
                tracing::error!("FAIL {} at {}: {}", outcome.scenario, step, reason)
            }
        }

        report.record(outcome);
    }

    report.save_to(&args.output_dir.join(REPORT_FILE)).await?;

    tracing::info!(
        "{} passed, {} failed out of {}",
        report.passed,
        report.failed,
        scenarios.len()
    );

    Ok(report.all_passed())
}
