//
//  gitlab-scm
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # GitLab SCM Library
//!
//! A client facade for GitLab servers that speak either the legacy v3 API
//! or the current v4 API.
//!
//! ## Overview
//!
//! Callers hand a [`ConnectionConfig`] to a [`ProviderFactory`] and get back
//! an [`ScmProvider`] bound to the right API generation. The factory detects
//! the generation once per server, remembers it in a shared [`VersionCache`],
//! and exchanges username and password for an OAuth token when no token is
//! configured.
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`api`]: HTTP client, generation adapters and project operations
//! - [`auth`]: Token resolution and request credentials
//! - [`config`]: Connection settings, server identities and profiles
//! - [`discovery`]: API version probing and caching
//! - [`factory`]: Adapter construction
//! - [`output`]: Output formatting (Table, JSON)
//! - [`status`]: Build status vocabulary
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gitlab_scm::{ConnectionConfig, ProviderFactory, VersionCache};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let factory = ProviderFactory::new(VersionCache::new())?;
//! let mut config = ConnectionConfig::new("https://gitlab.example.com")?
//!     .with_login("ci-bot", "secret");
//!
//! let provider = factory.new_provider(&mut config).await?;
//! println!("Top language: {}", provider.top_language("group/app").await?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Generation Differences
//!
//! | Feature | v3 | v4 |
//! |---------|----|----|
//! | Base path | `/api/v3` | `/api/v4` |
//! | `/api/v4/version` | 404 | 200 |
//! | GitLab releases | before 9.0 | 9.0 and later |

/// Command-line interface definitions.
pub mod cli;

/// GitLab API client and generation adapters.
///
/// Both generations share one HTTP client type and one set of project
/// operations; the adapters differ only in the base path they target.
pub mod api;

/// Token resolution and request credentials.
pub mod auth;

/// Connection configuration and server profiles.
///
/// Profiles are stored in platform-specific locations:
/// - Linux: `~/.config/gitlab-scm/config.toml`
/// - macOS: `~/Library/Application Support/gitlab-scm/config.toml`
/// - Windows: `%APPDATA%\gitlab-scm\config.toml`
pub mod config;

/// API version detection.
pub mod discovery;

pub mod factory;

/// Output formatting for table and JSON modes.
pub mod output;

pub mod status;

pub use api::common::ApiGeneration;
pub use api::provider::ScmProvider;
pub use cli::Cli;
pub use config::ConnectionConfig;
pub use discovery::VersionCache;
pub use factory::ProviderFactory;

/// Application name constant.
///
/// Used for the binary name, the config directory and the `User-Agent`.
pub const APP_NAME: &str = "gitlab-scm";

/// Application version, from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `User-Agent` sent with every request.
pub fn user_agent() -> String {
    format!("{}/{}", APP_NAME, VERSION)
}

/// Exit codes for the CLI.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// No credentials were configured, or the token exchange failed.
    pub const AUTH_ERROR: i32 = 4;

    /// The project or commit does not exist, or is not visible to the token.
    pub const NOT_FOUND: i32 = 8;

    /// The GitLab server could not be reached.
    pub const UNREACHABLE: i32 = 32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent() {
        assert_eq!(user_agent(), format!("gitlab-scm/{}", VERSION));
    }
}
