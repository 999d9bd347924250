// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Switchboard - routes support-chat agent replies.
//!
//! This is the binary entry point: fragment inspection tools and a
//! transcript replayer for the conversation state machine.

mod inspect;
mod replay;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use switchboard_config::SwitchboardConfig;
use switchboard_core::SwitchboardError;

/// Switchboard - routes support-chat agent replies.
#[derive(Parser, Debug)]
#[command(name = "switchboard", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Split a raw reply into fragments (reads stdin when FILE is omitted).
    Split { file: Option<PathBuf> },
    /// Split and classify a raw reply, one JSON object per fragment.
    Classify { file: Option<PathBuf> },
    /// Replay a JSONL transcript of conversation events.
    Replay {
        file: PathBuf,
        /// Chatbot session id the conversation starts in.
        #[arg(long)]
        session: Option<String>,
        /// Print every state change while replaying.
        #[arg(long)]
        changes: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => switchboard_config::load_and_validate_path(path),
        None => switchboard_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            switchboard_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    let Some(command) = cli.command else {
        println!("switchboard: use --help for available commands");
        return;
    };

    if let Err(e) = run(command, &config) {
        eprintln!("switchboard: {e}");
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &SwitchboardConfig) -> Result<(), SwitchboardError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Split { file } => {
            let input = inspect::read_input(file.as_deref())?;
            inspect::split(&input, &mut out)
        }
        Commands::Classify { file } => {
            let input = inspect::read_input(file.as_deref())?;
            inspect::classify(&input, &mut out)
        }
        Commands::Replay {
            file,
            session,
            changes,
        } => {
            let input = std::fs::read_to_string(&file)?;
            let options = replay::ReplayOptions {
                session,
                print_changes: changes,
            };
            let state = replay::replay(&input, config, &options, &mut out)?;
            writeln!(out, "{}", replay::render_state(&state)?)?;
            Ok(())
        }
        Commands::Config => {
            let rendered = config
                .to_toml()
                .map_err(|e| SwitchboardError::Config(e.to_string()))?;
            write!(out, "{rendered}")?;
            Ok(())
        }
    }
}

/// Logs go to stderr so JSON output on stdout stays clean.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("switchboard={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
