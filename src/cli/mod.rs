//
//  gitlab-scm
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod completion;
mod probe;
mod repo;
mod status;

pub use completion::CompletionCommand;
pub use probe::ProbeCommand;
pub use repo::{LanguagesCommand, TreeCommand};
pub use status::StatusCommand;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::api::common::ApiGeneration;
use crate::api::provider::ScmProvider;
use crate::config::{Config, ConnectionConfig, ServerProfile};
use crate::output::{OutputFormat, OutputWriter};
use crate::{ProviderFactory, VersionCache};

/// GitLab SCM adapter - talk to GitLab v3 and v4 servers from the command line
#[derive(Parser, Debug)]
#[command(
    name = "gitlab-scm",
    version,
    about = "Talk to GitLab v3 and v4 servers from the command line",
    long_about = "gitlab-scm detects which GitLab API generation a server speaks,\n\
                  obtains the right kind of token, and runs pipeline operations against it.",
    propagate_version = true,
    after_help = "Use 'gitlab-scm <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection and output options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// GitLab server URL, e.g. https://gitlab.example.com
    #[arg(long, global = true, env = "GITLAB_SCM_SERVER")]
    pub server: Option<String>,

    /// Username; selects OAuth authentication
    #[arg(long, short = 'u', global = true, env = "GITLAB_SCM_USERNAME")]
    pub username: Option<String>,

    /// Password for the OAuth password grant
    #[arg(long, global = true, env = "GITLAB_SCM_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Private token, or OAuth token when a username is given
    #[arg(long, global = true, env = "GITLAB_SCM_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Named server profile from the config file
    #[arg(long, short = 'p', global = true)]
    pub profile: Option<String>,

    /// Skip detection and use this API version (v3 or v4)
    #[arg(long, global = true)]
    pub api_version: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Merges the selected profile with command-line flags; flags win.
    pub fn connection(&self) -> Result<(ConnectionConfig, Option<ApiGeneration>)> {
        let mut profile = match &self.profile {
            Some(name) => Config::load()?
                .profile(name)
                .cloned()
                .with_context(|| format!("No server profile named '{}'", name))?,
            None => ServerProfile::default(),
        };

        if let Some(server) = &self.server {
            profile.server = server.clone();
        }
        if self.username.is_some() {
            profile.username = self.username.clone();
        }
        if self.password.is_some() {
            profile.password = self.password.clone();
        }
        if self.token.is_some() {
            profile.token = self.token.clone();
        }
        if self.api_version.is_some() {
            profile.api_version = self.api_version.clone();
        }

        if profile.server.is_empty() {
            anyhow::bail!("No GitLab server given. Use --server, GITLAB_SCM_SERVER or --profile");
        }

        let pinned = profile
            .api_version
            .as_deref()
            .map(str::parse::<ApiGeneration>)
            .transpose()?;

        Ok((profile.to_connection()?, pinned))
    }

    /// Builds a factory with a fresh cache and the requested timeout.
    pub fn factory(&self) -> Result<ProviderFactory> {
        let timeout = self.timeout.map(Duration::from_secs);
        Ok(ProviderFactory::with_timeout(VersionCache::new(), timeout)?)
    }

    /// Resolves the connection and returns a ready adapter.
    pub async fn provider(&self) -> Result<Box<dyn ScmProvider>> {
        let (mut config, pinned) = self.connection()?;
        let factory = self.factory()?;
        if let Some(generation) = pinned {
            factory.pin_generation(&config, generation);
        }
        debug!(config = ?config, "Connecting to GitLab");
        Ok(factory.new_provider(&mut config).await?)
    }

    pub fn output(&self) -> OutputWriter {
        OutputWriter::new(if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        })
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect which GitLab API version a server speaks
    Probe(ProbeCommand),

    /// Show the language breakdown of a project
    Languages(LanguagesCommand),

    /// List the repository tree of a project
    Tree(TreeCommand),

    /// Report a build status on a commit
    Status(StatusCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Show version information
    Version,
}
