//
//  gitlab-scm
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! GitLab accepts two mutually exclusive credential styles, and the choice
//! between them is made from the connection config alone:
//!
//! - **Private token**: a static token sent in the `PRIVATE-TOKEN` header,
//!   used when no username is configured.
//! - **OAuth 2.0 bearer token**: sent as `Authorization: Bearer <token>`,
//!   used when a username is configured. If no token is supplied, one is
//!   obtained through the password grant (see [`CredentialResolver`]).
//!
//! ## Example
//!
//! ```rust
//! use gitlab_scm::auth::AuthCredential;
//! use gitlab_scm::config::ConnectionConfig;
//!
//! let config = ConnectionConfig::new("https://gitlab.example.com")
//!     .unwrap()
//!     .with_token("glpat-123");
//!
//! let credential = AuthCredential::from_config(&config).unwrap();
//! assert!(matches!(credential, AuthCredential::PrivateToken { .. }));
//! ```

mod oauth;

pub use oauth::*;

use reqwest::RequestBuilder;

use crate::config::ConnectionConfig;

/// Header used for GitLab private tokens.
pub const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// A resolved credential ready to be attached to requests.
#[derive(Clone)]
pub enum AuthCredential {
    /// Static private token, sent in the `PRIVATE-TOKEN` header.
    PrivateToken {
        /// The token string.
        token: String,
    },
    /// OAuth 2.0 access token, sent as a bearer token.
    OAuth {
        /// The access token string.
        access_token: String,
    },
}

impl AuthCredential {
    /// Picks the credential style for a config.
    ///
    /// # Returns
    ///
    /// - `Some(OAuth)` - A token is present and a username is set
    /// - `Some(PrivateToken)` - A token is present and no username is set
    /// - `None` - No token has been configured or resolved yet
    pub fn from_config(config: &ConnectionConfig) -> Option<Self> {
        let token = config.token()?.to_string();
        Some(if config.uses_oauth() {
            Self::OAuth {
                access_token: token,
            }
        } else {
            Self::PrivateToken { token }
        })
    }

    /// Applies the credential to an HTTP request.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::PrivateToken { token } => request.header(PRIVATE_TOKEN_HEADER, token),
            Self::OAuth { access_token } => request.bearer_auth(access_token),
        }
    }

    /// Short name of the credential style, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PrivateToken { .. } => "private-token",
            Self::OAuth { .. } => "oauth",
        }
    }
}

impl std::fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthCredential")
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}
