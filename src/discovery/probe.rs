//
//  gitlab-scm
//  discovery/probe.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Generation Probe
//!
//! Detects whether a GitLab installation serves the v4 API by requesting
//! `GET {server}/api/v4/version` with redirects disabled.
//!
//! ## Classification
//!
//! | Response | Generation |
//! |----------|------------|
//! | 200 with a `{version, revision}` body | `v4` |
//! | 404 | `v3` (path does not exist) |
//! | 302 | `v3` (older servers redirect unknown API paths to sign-in) |
//! | any other status | `v3`, logged as a fallback |
//! | no response | [`ProbeError::Unreachable`] |
//!
//! Unexpected statuses default to `v3` so a slightly nonstandard server is
//! still usable. Those fallbacks are logged at `warn` with `fallback = true`
//! so they can be told apart from a clean 404/302 classification.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Client, StatusCode};
use tracing::{debug, info, warn};

use crate::api::common::{ApiGeneration, AuthError, ProbeError, VersionInfo};
use crate::auth::{AuthCredential, CredentialResolver};
use crate::config::ConnectionConfig;

/// Path of the capability probe, relative to the server URL.
pub const VERSION_PATH: &str = "/api/v4/version";

/// Issues capability probes against GitLab servers.
#[derive(Debug, Clone)]
pub struct VersionProber {
    http: Client,
}

impl VersionProber {
    /// Creates a prober with its own redirect-free HTTP client.
    ///
    /// # Parameters
    ///
    /// * `timeout` - Optional total request timeout; `None` keeps the transport default
    pub fn new(timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = Client::builder()
            .user_agent(crate::user_agent())
            .redirect(redirect::Policy::none());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }

    /// Detects the API generation of `config.server`.
    ///
    /// A token is resolved first through `credentials` if the config has none,
    /// which may write the token and a rewritten server back into `config`.
    ///
    /// # Errors
    ///
    /// - [`ProbeError::Auth`] - No token could be obtained
    /// - [`ProbeError::Unreachable`] - The request got no response
    /// - [`ProbeError::InvalidVersion`] - 200 with a body that is not a version object
    pub async fn probe(
        &self,
        config: &mut ConnectionConfig,
        credentials: &CredentialResolver,
    ) -> Result<ApiGeneration, ProbeError> {
        credentials.resolve_token(config).await?;
        let credential =
            AuthCredential::from_config(config).ok_or(AuthError::MissingCredentials)?;

        let server = config.server_base().to_string();
        let url = format!("{}{}", server, VERSION_PATH);
        debug!(url = %url, auth = credential.kind(), "Probing GitLab API version");

        let request = self.http.get(&url).header(CONTENT_TYPE, "application/json");
        let response = credential
            .apply_to_request(request)
            .send()
            .await
            .map_err(|source| ProbeError::Unreachable {
                server: server.clone(),
                source,
            })?;

        match response.status() {
            StatusCode::OK => {
                let body = response
                    .text()
                    .await
                    .map_err(|source| ProbeError::Unreachable {
                        server: server.clone(),
                        source,
                    })?;
                let info: VersionInfo = serde_json::from_str(&body)
                    .map_err(|_| ProbeError::InvalidVersion {
                        server: server.clone(),
                        body,
                    })?;
                info!(
                    server = %server,
                    version = %info.version,
                    "GitLab server supports the v4 API"
                );
                Ok(ApiGeneration::V4)
            }
            status @ (StatusCode::NOT_FOUND | StatusCode::FOUND) => {
                info!(
                    server = %server,
                    status = %status,
                    "GitLab server does not serve the v4 API, using v3"
                );
                Ok(ApiGeneration::V3)
            }
            status => {
                warn!(
                    server = %server,
                    status = %status,
                    fallback = true,
                    "Unexpected status from GitLab version probe, falling back to v3"
                );
                Ok(ApiGeneration::V3)
            }
        }
    }
}
