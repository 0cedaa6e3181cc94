//
//  gitlab-scm
//  auth/oauth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # OAuth 2.0 Password Grant
//!
//! GitLab exposes the resource-owner password grant at `/oauth/token`. The
//! pipeline service uses it when an installation is configured with a
//! username and password instead of a pre-issued token.
//!
//! ## Flow
//!
//! 1. If the config already carries a token, return it unchanged
//! 2. Require both username and password
//! 3. Rewrite `http://gitlab.com` to `https://gitlab.com` (see
//!    [`enforce_public_https`])
//! 4. `POST {server}/oauth/token` with
//!    `{"grant_type":"password","username":...,"password":...}`
//! 5. Store the returned `access_token` in the config
//!
//! ## Example
//!
//! ```rust,no_run
//! use gitlab_scm::auth::CredentialResolver;
//! use gitlab_scm::config::ConnectionConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let resolver = CredentialResolver::new(reqwest::Client::new());
//! let mut config = ConnectionConfig::new("https://gitlab.example.com")?
//!     .with_login("ci-bot", "secret");
//!
//! let token = resolver.resolve_token(&mut config).await?;
//! assert_eq!(config.token(), Some(token.as_str()));
//! # Ok(())
//! # }
//! ```

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::api::common::AuthError;
use crate::config::{enforce_public_https, ConnectionConfig};

/// Path of the GitLab OAuth token endpoint, relative to the server URL.
pub const TOKEN_PATH: &str = "/oauth/token";

#[derive(Serialize)]
struct PasswordGrantRequest<'a> {
    grant_type: &'static str,
    username: &'a str,
    password: &'a str,
}

/// Internal struct for deserializing token responses from GitLab.
#[derive(Deserialize)]
struct TokenResponseRaw {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

/// Turns connection configs into usable access tokens.
///
/// Cloning is cheap; the inner [`Client`] is reference counted.
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    http: Client,
}

impl CredentialResolver {
    /// Creates a resolver that sends token exchanges through `http`.
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Returns the config's token, exchanging username and password for one if needed.
    ///
    /// # Parameters
    ///
    /// * `config` - The connection config. On success `config.token` holds the
    ///   returned token. `config.server` is rewritten when the public GitLab
    ///   policy applies.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingCredentials`] - No token and no complete username/password pair
    /// - [`AuthError::TokenExchangeFailed`] - The exchange failed, answered non-2xx, or
    ///   returned a body without an access token
    ///
    /// # Notes
    ///
    /// - Idempotent: once a token is set no request is made
    /// - No retries are attempted
    pub async fn resolve_token(&self, config: &mut ConnectionConfig) -> Result<String, AuthError> {
        if let Some(token) = config.token() {
            return Ok(token.to_string());
        }

        let (username, password) = match (config.username(), config.password()) {
            (Some(username), Some(password)) => (username.to_string(), password.to_string()),
            _ => return Err(AuthError::MissingCredentials),
        };

        if let Some(secure) = enforce_public_https(&config.server) {
            info!(
                from = %config.server,
                to = %secure,
                "Using HTTPS for public GitLab token exchange"
            );
            config.server = secure;
        }

        let url = format!("{}{}", config.server_base(), TOKEN_PATH);
        debug!(url = %url, username = %username, "Requesting OAuth token via password grant");

        let body = PasswordGrantRequest {
            grant_type: "password",
            username: &username,
            password: &password,
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "Failed to request token");
                AuthError::TokenExchangeFailed {
                    status: None,
                    body: e.to_string(),
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::TokenExchangeFailed {
                status: Some(status),
                body: e.to_string(),
            })?;

        if !status.is_success() {
            error!(status = %status, "Token request rejected");
            return Err(AuthError::TokenExchangeFailed {
                status: Some(status),
                body: text,
            });
        }

        let token = match serde_json::from_str::<TokenResponseRaw>(&text) {
            Ok(raw) if !raw.access_token.is_empty() => raw,
            _ => {
                return Err(AuthError::TokenExchangeFailed {
                    status: Some(status),
                    body: text,
                })
            }
        };

        debug!(
            token_type = token.token_type.as_deref().unwrap_or("bearer"),
            "Obtained OAuth token"
        );
        config.token = Some(token.access_token.clone());
        Ok(token.access_token)
    }
}
