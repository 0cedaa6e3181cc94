//
//  gitlab-scm
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for GitLab v3 and v4
//!
//! This module holds the types shared by both API generations and the error
//! taxonomy returned by every layer of the crate.
//!
//! # Overview
//!
//! - [`ApiGeneration`] - Which wire API an installation speaks
//! - [`AuthError`] - Credential resolution failures
//! - [`ProbeError`] - Version detection failures
//! - [`ProviderError`] - Client construction failures returned by the factory
//! - [`OperationError`] - Failures of individual API calls
//!
//! # Example
//!
//! ```rust
//! use gitlab_scm::api::common::{ApiGeneration, ProviderError};
//!
//! let generation: ApiGeneration = "v4".parse().unwrap();
//! assert_eq!(generation.as_str(), "v4");
//!
//! match "v5".parse::<ApiGeneration>() {
//!     Err(ProviderError::UnsupportedGeneration(v)) => assert_eq!(v, "v5"),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A major revision of the GitLab REST API.
///
/// GitLab 9.0 introduced `v4` and older installations only serve `v3`. Both
/// can be deployed side by side across a fleet, so the generation is detected
/// per installation and never assumed.
///
/// | Variant | Path segment | Detected when `/api/v4/version` returns |
/// |---------|--------------|------------------------------------------|
/// | `V3` | `v3` | 404, 302, or anything unexpected |
/// | `V4` | `v4` | 200 with a version body |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiGeneration {
    /// The older API, served under `/api/v3`.
    V3,
    /// The newer API, served under `/api/v4`.
    V4,
}

impl ApiGeneration {
    /// Returns the path segment used in `/api/<segment>/...` URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V3 => "v3",
            Self::V4 => "v4",
        }
    }
}

impl fmt::Display for ApiGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiGeneration {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v3" => Ok(Self::V3),
            "v4" => Ok(Self::V4),
            _ => Err(ProviderError::UnsupportedGeneration(s.to_string())),
        }
    }
}

/// Body of `GET /api/v4/version`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Server release, e.g. `"16.11.2-ee"`.
    pub version: String,
    #[serde(default)]
    pub revision: String,
}

/// Failures while obtaining an access token.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No token was configured and the username or password is empty.
    #[error("GitLab username or password is missing")]
    MissingCredentials,

    /// The password-grant exchange did not produce a token.
    ///
    /// `status` is `None` when the request never got a response. `body`
    /// holds the raw response body (or transport error) for diagnostics.
    #[error("Failed to request token from GitLab: {body}")]
    TokenExchangeFailed {
        status: Option<StatusCode>,
        body: String,
    },
}

/// Failures while detecting the API generation of a server.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// A token was needed for the probe and could not be obtained.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The version endpoint could not be reached at all.
    #[error("GitLab server {server} is unreachable: {source}")]
    Unreachable {
        server: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered 200 but the body is not a version object.
    #[error("GitLab server {server} returned an invalid version response: {body}")]
    InvalidVersion { server: String, body: String },
}

/// Failures while constructing a provider adapter.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error(transparent)]
    Auth(AuthError),

    #[error(transparent)]
    Probe(ProbeError),

    /// A pinned or parsed API version is neither `v3` nor `v4`.
    #[error("GitLab API version {0} is not supported, only v3 and v4 are supported")]
    UnsupportedGeneration(String),

    /// The HTTP client or base URL could not be configured.
    #[error("Failed to create GitLab client: {0}")]
    ClientConstructionFailed(String),
}

impl From<AuthError> for ProviderError {
    fn from(err: AuthError) -> Self {
        Self::Auth(err)
    }
}

impl From<ProbeError> for ProviderError {
    /// Credential failures surface as [`ProviderError::Auth`] whether they
    /// happened before or during the probe.
    fn from(err: ProbeError) -> Self {
        match err {
            ProbeError::Auth(auth) => Self::Auth(auth),
            other => Self::Probe(other),
        }
    }
}

/// Failures of an individual API operation.
#[derive(Error, Debug)]
pub enum OperationError {
    /// The server answered with a non-2xx status.
    #[error("GitLab API error ({status}): {body}")]
    HttpFailure { status: StatusCode, body: String },

    /// The request could not be sent or the response could not be read.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("Failed to decode GitLab response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// The connection config has no token to authenticate with.
    #[error("No access token available for {0}")]
    MissingToken(String),

    /// The request URL could not be built from the server address.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl OperationError {
    /// Returns the HTTP status for [`OperationError::HttpFailure`].
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::HttpFailure { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_parse() {
        assert_eq!("v3".parse::<ApiGeneration>().unwrap(), ApiGeneration::V3);
        assert_eq!(" V4 ".parse::<ApiGeneration>().unwrap(), ApiGeneration::V4);
        assert!(matches!(
            "v2".parse::<ApiGeneration>(),
            Err(ProviderError::UnsupportedGeneration(_))
        ));
    }

    #[test]
    fn test_probe_auth_error_flattens() {
        let err: ProviderError = ProbeError::Auth(AuthError::MissingCredentials).into();
        assert!(matches!(err, ProviderError::Auth(AuthError::MissingCredentials)));
    }

    #[test]
    fn test_version_info_without_revision() {
        let info: VersionInfo = serde_json::from_str(r#"{"version":"9.0.0"}"#).unwrap();
        assert_eq!(info.version, "9.0.0");
        assert!(info.revision.is_empty());
    }
}
