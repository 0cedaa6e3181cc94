//
//  gitlab-scm
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the GitLab API
//!
//! [`GitlabClient`] pins one server, one API generation and one credential.
//! Both generation adapters and the free-standing operation helpers issue
//! their requests through it.
//!
//! ## Features
//!
//! - Base URL `{server}/api/{v3|v4}` validated at construction
//! - `PRIVATE-TOKEN` or bearer authentication per request
//! - `Content-Type: application/json` on every request
//! - Non-2xx responses surfaced with status and raw body

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::{form_urlencoded, Url};

use crate::api::common::{ApiGeneration, AuthError, OperationError, ProviderError};
use crate::auth::AuthCredential;
use crate::config::ConnectionConfig;

/// Percent-encodes a project identifier for use as one path segment.
///
/// GitLab accepts `namespace/project` in place of a numeric id as long as the
/// slash is escaped. Encoding follows `application/x-www-form-urlencoded`
/// rules, so spaces become `+`.
///
/// # Example
///
/// ```rust
/// use gitlab_scm::api::client::encode_project;
///
/// assert_eq!(encode_project("group/sub group/app"), "group%2Fsub+group%2Fapp");
/// assert_eq!(encode_project("42"), "42");
/// ```
pub fn encode_project(project: &str) -> String {
    form_urlencoded::byte_serialize(project.as_bytes()).collect()
}

/// Returns `/projects/{encoded-project}/{suffix}`.
pub fn project_path(project: &str, suffix: &str) -> String {
    format!("/projects/{}/{}", encode_project(project), suffix)
}

/// Builds `{server}/api/{generation}` and checks that it is a usable HTTP base.
fn api_base(server: &Url, generation: ApiGeneration) -> Result<String, String> {
    if !matches!(server.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}' in {}", server.scheme(), server));
    }
    let base = format!(
        "{}/api/{}",
        server.as_str().trim_end_matches('/'),
        generation.as_str()
    );
    Url::parse(&base).map_err(|e| format!("invalid base URL {}: {}", base, e))?;
    Ok(base)
}

/// An authenticated client for one GitLab server and API generation.
///
/// # Example
///
/// ```rust,no_run
/// use gitlab_scm::api::client::GitlabClient;
/// use gitlab_scm::api::common::ApiGeneration;
/// use gitlab_scm::config::ConnectionConfig;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = ConnectionConfig::new("https://gitlab.example.com")?.with_token("glpat-1");
/// let client = GitlabClient::from_config(reqwest::Client::new(), &config, ApiGeneration::V4)?;
/// assert_eq!(client.base_url(), "https://gitlab.example.com/api/v4");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GitlabClient {
    /// The underlying HTTP client
    http: Client,
    /// `{server}/api/{generation}` without a trailing slash
    base_url: String,
    generation: ApiGeneration,
    auth: AuthCredential,
}

impl GitlabClient {
    /// Creates a client for `server` speaking `generation`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::ClientConstructionFailed`] if the server URL
    /// cannot serve as an HTTP base URL.
    pub fn new(
        http: Client,
        server: &Url,
        generation: ApiGeneration,
        auth: AuthCredential,
    ) -> Result<Self, ProviderError> {
        let base_url =
            api_base(server, generation).map_err(ProviderError::ClientConstructionFailed)?;
        Ok(Self {
            http,
            base_url,
            generation,
            auth,
        })
    }

    /// Creates a client from a connection config whose token is already resolved.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Auth`] - The config has no token
    /// - [`ProviderError::ClientConstructionFailed`] - The server URL is unusable
    pub fn from_config(
        http: Client,
        config: &ConnectionConfig,
        generation: ApiGeneration,
    ) -> Result<Self, ProviderError> {
        let auth = AuthCredential::from_config(config).ok_or(AuthError::MissingCredentials)?;
        Self::new(http, &config.server, generation, auth)
    }

    /// Same as [`from_config`](Self::from_config) but reports failures as operation errors.
    pub(crate) fn for_operation(
        http: Client,
        config: &ConnectionConfig,
        generation: ApiGeneration,
    ) -> Result<Self, OperationError> {
        let auth = AuthCredential::from_config(config)
            .ok_or_else(|| OperationError::MissingToken(config.server_base().to_string()))?;
        let base_url = api_base(&config.server, generation).map_err(OperationError::InvalidUrl)?;
        Ok(Self {
            http,
            base_url,
            generation,
            auth,
        })
    }

    /// Returns `{server}/api/{generation}`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn generation(&self) -> ApiGeneration {
        self.generation
    }

    pub fn auth(&self) -> &AuthCredential {
        &self.auth
    }

    /// Makes an HTTP GET request to `path` under the base URL.
    ///
    /// # Errors
    ///
    /// - [`OperationError::Transport`] - The request failed to send or the body could not be read
    /// - [`OperationError::HttpFailure`] - Non-2xx status; carries the raw body
    /// - [`OperationError::Decode`] - The body does not deserialize into `T`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, OperationError> {
        let url = format!("{}{}", self.base_url, path);
        self.send(self.http.get(&url), &url).await
    }

    /// Makes an HTTP POST request to `path` with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, OperationError> {
        let url = format!("{}{}", self.base_url, path);
        self.send(self.http.post(&url).json(body), &url).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<T, OperationError> {
        let request = self
            .auth
            .apply_to_request(request.header(CONTENT_TYPE, "application/json"));

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(url = %url, status = %status, "GitLab API response");

        if !status.is_success() {
            return Err(OperationError::HttpFailure { status, body });
        }

        serde_json::from_str(&body).map_err(|source| OperationError::Decode { source, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn token_config(server: &str) -> ConnectionConfig {
        ConnectionConfig::new(server).unwrap().with_token("glpat-1")
    }

    #[test]
    fn test_encode_project_escapes_slash() {
        let encoded = encode_project("group/project");
        assert_eq!(encoded, "group%2Fproject");
        assert!(!encoded.contains('/'));
        assert_eq!(
            project_path("a/b", "languages"),
            "/projects/a%2Fb/languages"
        );
    }

    #[test]
    fn test_base_url_per_generation() {
        let config = token_config("https://gitlab.example.com/");
        let v3 = GitlabClient::from_config(Client::new(), &config, ApiGeneration::V3).unwrap();
        let v4 = GitlabClient::from_config(Client::new(), &config, ApiGeneration::V4).unwrap();
        assert_eq!(v3.base_url(), "https://gitlab.example.com/api/v3");
        assert_eq!(v4.base_url(), "https://gitlab.example.com/api/v4");
    }

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let config = token_config("https://example.com/gitlab");
        let client = GitlabClient::from_config(Client::new(), &config, ApiGeneration::V4).unwrap();
        assert_eq!(client.base_url(), "https://example.com/gitlab/api/v4");
    }

    #[test]
    fn test_non_http_scheme_fails_construction() {
        let config = token_config("ftp://gitlab.example.com");
        let err = GitlabClient::from_config(Client::new(), &config, ApiGeneration::V4).unwrap_err();
        assert!(matches!(err, ProviderError::ClientConstructionFailed(_)));
    }

    #[test]
    fn test_missing_token_fails_construction() {
        let config = ConnectionConfig::new("https://gitlab.example.com").unwrap();
        let err = GitlabClient::from_config(Client::new(), &config, ApiGeneration::V4).unwrap_err();
        assert!(matches!(err, ProviderError::Auth(AuthError::MissingCredentials)));
    }

    #[tokio::test]
    async fn test_get_http_failure_keeps_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v4/projects/1/languages")
            .with_status(403)
            .with_body(r#"{"message":"403 Forbidden"}"#)
            .create_async()
            .await;

        let config = token_config(&server.url());
        let client = GitlabClient::from_config(Client::new(), &config, ApiGeneration::V4).unwrap();
        let err = client
            .get::<serde_json::Value>(&project_path("1", "languages"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert!(err.to_string().contains("403 Forbidden"));
    }

    #[tokio::test]
    async fn test_get_decode_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v3/projects/1/repository/tree")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let config = token_config(&server.url());
        let client = GitlabClient::from_config(Client::new(), &config, ApiGeneration::V3).unwrap();
        let err = client
            .get::<Vec<serde_json::Value>>(&project_path("1", "repository/tree"))
            .await
            .unwrap_err();

        match err {
            OperationError::Decode { body, .. } => assert_eq!(body, "not json"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
