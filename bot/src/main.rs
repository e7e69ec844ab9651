//! Operator-gated prompt automation loop.
//!
//! Runs every unfinished prompt in `prompts.txt` against the configured
//! chat-completion model, saving each reply under
//! `<output_root>/<project_name>/<YYYY-MM-DD>/` and pausing for `.` between
//! prompts. Progress lives in `state.json`, so an interrupted run resumes at
//! the first unfinished prompt.

use std::path::PathBuf;

use agent_bot::cycle::{CycleEnv, CycleEvent, run_cycle};
use agent_bot::io::clock::SystemClock;
use agent_bot::io::completion::ChatCompletionClient;
use agent_bot::io::config::load_config;
use agent_bot::io::confirm::{CONFIRM_TOKEN, LineGate};
use agent_bot::io::paths::BotPaths;
use agent_bot::logging;
use anyhow::{Context, Result};
use clap::Parser;

const BANNER: &str = "agent-bot started: prompts in, artifacts out.";

#[derive(Parser)]
#[command(
    name = "agent-bot",
    version,
    about = "Operator-gated prompt automation loop"
)]
struct Cli {
    /// Working directory holding `config.toml`, `prompts.txt` and `state.json`.
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = BotPaths::new(cli.root);
    println!("{BANNER}");

    let config = load_config(&paths.config_path)?;
    let completion =
        ChatCompletionClient::from_config(&config).context("build completion client")?;
    let clock = SystemClock;
    let env = CycleEnv {
        paths: &paths,
        config: &config,
        completion: &completion,
        clock: &clock,
    };

    let mut gate = LineGate::stdio();
    let outcome = run_cycle(&env, &mut gate, print_event)?;
    println!(
        "\nAll {} prompt(s) done; {} artifact(s) produced this run.",
        outcome.total_prompts, outcome.steps_executed
    );
    Ok(())
}

fn print_event(event: &CycleEvent) {
    match event {
        CycleEvent::Running { prompt, .. } => println!("\nRunning prompt: {prompt}"),
        CycleEvent::Saved { path, .. } => println!("Saved: {}", path.display()),
        CycleEvent::AwaitingConfirmation => {
            println!("Waiting for the next cycle (enter `{CONFIRM_TOKEN}` to continue)");
        }
    }
}
