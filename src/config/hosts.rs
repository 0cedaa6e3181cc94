//
//  gitlab-scm
//  config/hosts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Host Normalization and Public GitLab Policy
//!
//! This module turns user-supplied server URLs into stable identities and
//! owns the one hard-coded rule about the public GitLab installation.
//!
//! ## Server Identity
//!
//! Two connection configs that point at the same installation must share a
//! version cache entry even when they spell the URL differently:
//!
//! ```rust
//! use gitlab_scm::config::normalize_server;
//!
//! assert_eq!(normalize_server("https://GitLab.Example.com/"), "gitlab.example.com");
//! assert_eq!(normalize_server("http://gitlab.example.com"), "gitlab.example.com");
//! assert_eq!(normalize_server("https://example.com/gitlab/"), "example.com/gitlab");
//! ```
//!
//! ## Public GitLab
//!
//! `gitlab.com` only accepts password-grant token exchanges over HTTPS. When a
//! config names it with `http://`, [`enforce_public_https`] returns the
//! canonical secure endpoint instead.

use std::fmt;

use url::Url;

/// Hostname of the public GitLab installation.
pub const GITLAB_COM: &str = "gitlab.com";

/// Canonical secure endpoint for the public GitLab installation.
pub const GITLAB_COM_URL: &str = "https://gitlab.com";

/// Normalized form of a server URL, used as the version cache key.
///
/// Built with [`ServerIdentity::from_url`] or [`ServerIdentity::new`]; the
/// inner string is the output of [`normalize_server`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServerIdentity(String);

impl ServerIdentity {
    /// Normalizes an arbitrary server string into an identity.
    pub fn new(server: &str) -> Self {
        Self(normalize_server(server))
    }

    /// Normalizes a parsed server URL into an identity.
    pub fn from_url(server: &Url) -> Self {
        Self::new(server.as_str())
    }

    /// Returns the normalized identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalizes a server URL to a scheme-less, lowercase identity string.
///
/// # Parameters
///
/// * `server` - The server string (may include scheme, port, path and trailing slashes)
///
/// # Returns
///
/// A normalized string with:
/// - Leading/trailing whitespace trimmed
/// - `https://` or `http://` prefix removed
/// - Trailing slashes removed
/// - Converted to lowercase
///
/// # Notes
///
/// - Ports and path prefixes are kept, so `host:8080` and `host` are different
///   installations
/// - The scheme is dropped on purpose: the same installation reached over
///   `http` and `https` speaks the same API generation
pub fn normalize_server(server: &str) -> String {
    let server = server.trim();
    let lower = server.to_lowercase();
    let server = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    server.trim_end_matches('/').to_string()
}

/// Checks whether a URL points at the public GitLab installation.
pub fn is_public_gitlab(server: &Url) -> bool {
    server
        .host_str()
        .map(|host| host.eq_ignore_ascii_case(GITLAB_COM))
        .unwrap_or(false)
}

/// Returns the secure public endpoint when `server` is public GitLab over plain HTTP.
///
/// This is the single place the public-host rewrite lives. The credential
/// resolver applies it before a password-grant exchange and writes the result
/// back into the connection config.
///
/// # Returns
///
/// - `Some(url)` - `server` is `http://gitlab.com...`; `url` is `https://gitlab.com/`
/// - `None` - No rewrite applies
///
/// # Example
///
/// ```rust
/// use gitlab_scm::config::enforce_public_https;
/// use url::Url;
///
/// let insecure = Url::parse("http://gitlab.com").unwrap();
/// assert_eq!(enforce_public_https(&insecure).unwrap().as_str(), "https://gitlab.com/");
///
/// let internal = Url::parse("http://gitlab.example.com").unwrap();
/// assert!(enforce_public_https(&internal).is_none());
/// ```
pub fn enforce_public_https(server: &Url) -> Option<Url> {
    if server.scheme() != "http" || !is_public_gitlab(server) {
        return None;
    }
    Url::parse(GITLAB_COM_URL).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_ignores_case_and_trailing_slash() {
        let a = ServerIdentity::new("https://GITLAB.example.com/");
        let b = ServerIdentity::new("https://gitlab.example.com");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "gitlab.example.com");
    }

    #[test]
    fn test_identity_keeps_port_and_path() {
        assert_eq!(normalize_server("http://10.0.0.5:8080/"), "10.0.0.5:8080");
        assert_eq!(
            normalize_server("https://example.com/gitlab//"),
            "example.com/gitlab"
        );
        assert_ne!(
            ServerIdentity::new("https://example.com:8443"),
            ServerIdentity::new("https://example.com")
        );
    }

    #[test]
    fn test_identity_from_url() {
        let url = Url::parse("https://GitLab.Example.com/").unwrap();
        assert_eq!(ServerIdentity::from_url(&url).as_str(), "gitlab.example.com");
    }

    #[test]
    fn test_enforce_public_https() {
        let url = Url::parse("http://gitlab.com/").unwrap();
        let rewritten = enforce_public_https(&url).unwrap();
        assert_eq!(rewritten.scheme(), "https");
        assert_eq!(rewritten.host_str(), Some("gitlab.com"));

        let secure = Url::parse("https://gitlab.com").unwrap();
        assert!(enforce_public_https(&secure).is_none());

        let private = Url::parse("http://gitlab.internal").unwrap();
        assert!(enforce_public_https(&private).is_none());
    }
}
