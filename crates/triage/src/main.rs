// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Triage - rule-based routing for IT service management tickets.
//!
//! This is the binary entry point for the `triage` command.

mod commands;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use triage_core::TicketInput;
use triage_router::TicketRouter;

/// Triage - rule-based routing for IT service management tickets.
#[derive(Parser, Debug)]
#[command(name = "triage", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Route a single ticket and print the decision as JSON.
    Route {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Category label, e.g. "Network".
        #[arg(long)]
        category: Option<String>,
        /// Priority label, e.g. "Critical".
        #[arg(long)]
        priority: Option<String>,
    },
    /// Route every ticket in a JSON array file and print aggregate statistics.
    Stats {
        file: PathBuf,
    },
    /// Draft a ticket from free-form support chat text, then route it.
    Draft {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Print the effective rule table.
    Rules,
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => triage_config::load_and_validate_path(path),
        None => triage_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            triage_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);
    tracing::debug!(
        rules = config.routing.rules.len(),
        fallback = %config.routing.fallback,
        "configuration loaded"
    );

    let router = match TicketRouter::from_config(&config.routing) {
        Ok(router) => router,
        Err(e) => fail(&e),
    };

    let output = match cli.command {
        Commands::Route {
            title,
            description,
            category,
            priority,
        } => {
            let ticket = TicketInput {
                title,
                description,
                category,
                priority,
            };
            commands::route(&router, &ticket)
        }
        Commands::Stats { file } => commands::stats(&router, &file),
        Commands::Draft { text } => commands::draft(&router, &text.join(" ")),
        Commands::Rules => {
            let sources = match &cli.config {
                Some(path) => vec![path.clone()],
                None => triage_config::config_search_paths(),
            };
            Ok(commands::rules(&router, &config.routing, &sources))
        }
    };

    match output {
        Ok(text) => println!("{}", text.trim_end()),
        Err(e) => fail(&e),
    }
}

/// Print the error with its source chain and exit non-zero.
fn fail(err: &dyn Error) -> ! {
    eprintln!("triage: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
    std::process::exit(1);
}

/// Initialize the tracing subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "triage={log_level},triage_router={log_level},triage_config={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
