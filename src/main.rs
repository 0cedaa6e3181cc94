//
//  gitlab-scm
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gitlab_scm::api::{AuthError, OperationError, ProbeError, ProviderError};
use gitlab_scm::cli::{Cli, Commands};
use gitlab_scm::exit_codes;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("GITLAB_SCM_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

/// Maps a command failure to an exit code
fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<ProviderError>() {
        return match err {
            ProviderError::Auth(_) => exit_codes::AUTH_ERROR,
            ProviderError::Probe(ProbeError::Unreachable { .. }) => exit_codes::UNREACHABLE,
            _ => exit_codes::ERROR,
        };
    }
    if err.downcast_ref::<AuthError>().is_some() {
        return exit_codes::AUTH_ERROR;
    }
    if let Some(err) = err.downcast_ref::<OperationError>() {
        return match err.status().map(|s| s.as_u16()) {
            Some(401) | Some(403) => exit_codes::AUTH_ERROR,
            Some(404) => exit_codes::NOT_FOUND,
            _ if matches!(err, OperationError::Transport(_)) => exit_codes::UNREACHABLE,
            _ => exit_codes::ERROR,
        };
    }
    exit_codes::ERROR
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Probe(cmd) => cmd.run(&cli.global).await,
        Commands::Languages(cmd) => cmd.run(&cli.global).await,
        Commands::Tree(cmd) => cmd.run(&cli.global).await,
        Commands::Status(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("gitlab-scm version {}", gitlab_scm::VERSION);
            Ok(())
        }
    }
}
