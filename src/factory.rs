//
//  gitlab-scm
//  factory.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Provider Factory
//!
//! Entry point of the crate: turns a [`ConnectionConfig`] into a ready
//! [`ScmProvider`] for whichever API generation the server speaks.
//!
//! ## Flow
//!
//! 1. Normalize `config.server` into a [`ServerIdentity`](crate::config::ServerIdentity)
//! 2. Look the identity up in the [`VersionCache`]
//! 3. On a miss, probe the server (resolving a token first if needed) and
//!    record the result; on a probe failure nothing is recorded
//! 4. Resolve the token if it is still missing
//! 5. Build the v3 or v4 adapter around a clone of the resolved config
//!
//! ## Example
//!
//! ```rust,no_run
//! use gitlab_scm::{ConnectionConfig, ProviderFactory, VersionCache};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let factory = ProviderFactory::new(VersionCache::new())?;
//! let mut config = ConnectionConfig::new("https://gitlab.example.com")?.with_token("glpat-1");
//!
//! let provider = factory.new_provider(&mut config).await?;
//! println!("{} speaks {}", config.server, provider.generation());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, error, info};

use crate::api::common::{ApiGeneration, ProviderError};
use crate::api::provider::ScmProvider;
use crate::api::v3::GitlabV3;
use crate::api::v4::GitlabV4;
use crate::auth::CredentialResolver;
use crate::config::ConnectionConfig;
use crate::discovery::{VersionCache, VersionProber};

/// Builds generation-matched GitLab adapters.
///
/// The factory owns no per-server state besides the injected
/// [`VersionCache`]; share one cache across factories to share detections.
#[derive(Debug, Clone)]
pub struct ProviderFactory {
    http: Client,
    credentials: CredentialResolver,
    prober: VersionProber,
    cache: VersionCache,
}

impl ProviderFactory {
    /// Creates a factory using the transport's default timeouts.
    pub fn new(cache: VersionCache) -> Result<Self, ProviderError> {
        Self::with_timeout(cache, None)
    }

    /// Creates a factory whose HTTP clients time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::ClientConstructionFailed`] if an HTTP client
    /// cannot be built (for example, the TLS backend fails to initialize).
    pub fn with_timeout(
        cache: VersionCache,
        timeout: Option<Duration>,
    ) -> Result<Self, ProviderError> {
        let mut builder = Client::builder().user_agent(crate::user_agent());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ProviderError::ClientConstructionFailed(e.to_string()))?;
        let prober = VersionProber::new(timeout)
            .map_err(|e| ProviderError::ClientConstructionFailed(e.to_string()))?;

        Ok(Self {
            credentials: CredentialResolver::new(http.clone()),
            http,
            prober,
            cache,
        })
    }

    pub fn cache(&self) -> &VersionCache {
        &self.cache
    }

    /// Records `generation` for the config's server so it is never probed.
    pub fn pin_generation(&self, config: &ConnectionConfig, generation: ApiGeneration) {
        debug!(server = %config.identity(), generation = %generation, "Pinning GitLab API version");
        self.cache.put(config.identity(), generation);
    }

    /// Returns the API generation of the config's server, probing on a cache miss.
    ///
    /// The identity is taken before any credential resolution, so a public
    /// GitLab rewrite during the probe does not change the cache key.
    pub async fn api_generation(
        &self,
        config: &mut ConnectionConfig,
    ) -> Result<ApiGeneration, ProviderError> {
        let identity = config.identity();
        if let Some(generation) = self.cache.get(&identity) {
            debug!(server = %identity, generation = %generation, "GitLab API version cache hit");
            return Ok(generation);
        }

        let generation = match self.prober.probe(config, &self.credentials).await {
            Ok(generation) => generation,
            Err(e) => {
                error!(server = %identity, error = %e, "Failed to get GitLab API version");
                return Err(e.into());
            }
        };

        self.cache.put(identity, generation);
        Ok(generation)
    }

    /// Builds the adapter matching the server's API generation.
    ///
    /// On success `config` holds the resolved token, and the returned
    /// adapter holds a clone of it.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Auth`] - No token could be obtained
    /// - [`ProviderError::Probe`] - The server could not be probed
    /// - [`ProviderError::ClientConstructionFailed`] - The server URL is unusable
    pub async fn new_provider(
        &self,
        config: &mut ConnectionConfig,
    ) -> Result<Box<dyn ScmProvider>, ProviderError> {
        let generation = self.api_generation(config).await?;
        self.credentials.resolve_token(config).await?;

        info!(server = %config.server, generation = %generation, "New GitLab client");

        let provider: Box<dyn ScmProvider> = match generation {
            ApiGeneration::V3 => Box::new(GitlabV3::new(self.http.clone(), config.clone())?),
            ApiGeneration::V4 => Box::new(GitlabV4::new(self.http.clone(), config.clone())?),
        };
        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::{AuthError, ProbeError};
    use crate::config::ServerIdentity;
    use crate::discovery::VERSION_PATH;

    const VERSION_BODY: &str = r#"{"version":"15.4.0","revision":"1a2b3c"}"#;

    fn factory(cache: &VersionCache) -> ProviderFactory {
        ProviderFactory::new(cache.clone()).unwrap()
    }

    #[tokio::test]
    async fn test_second_call_uses_cache() {
        let mut server = mockito::Server::new_async().await;
        let probe = server
            .mock("GET", VERSION_PATH)
            .with_status(200)
            .with_body(VERSION_BODY)
            .expect(1)
            .create_async()
            .await;

        let cache = VersionCache::new();
        let factory = factory(&cache);

        let mut first = ConnectionConfig::new(&server.url()).unwrap().with_token("t");
        let mut second = ConnectionConfig::new(&format!("{}/", server.url()))
            .unwrap()
            .with_token("t");

        let a = factory.new_provider(&mut first).await.unwrap();
        let b = factory.new_provider(&mut second).await.unwrap();

        assert_eq!(a.generation(), ApiGeneration::V4);
        assert_eq!(b.generation(), ApiGeneration::V4);
        assert_eq!(cache.len(), 1);
        probe.assert_async().await;
    }

    #[tokio::test]
    async fn test_shared_cache_across_factories() {
        let mut server = mockito::Server::new_async().await;
        let probe = server
            .mock("GET", VERSION_PATH)
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let cache = VersionCache::new();
        for _ in 0..3 {
            let mut config = ConnectionConfig::new(&server.url()).unwrap().with_token("t");
            let provider = factory(&cache).new_provider(&mut config).await.unwrap();
            assert_eq!(provider.generation(), ApiGeneration::V3);
        }
        probe.assert_async().await;
    }

    #[tokio::test]
    async fn test_password_grant_then_probe() {
        let mut server = mockito::Server::new_async().await;
        let token = server
            .mock("POST", "/oauth/token")
            .with_status(200)
            .with_body(r#"{"access_token":"T"}"#)
            .expect(1)
            .create_async()
            .await;
        server
            .mock("GET", VERSION_PATH)
            .match_header("authorization", "Bearer T")
            .with_status(200)
            .with_body(VERSION_BODY)
            .create_async()
            .await;

        let cache = VersionCache::new();
        let mut config = ConnectionConfig::new(&server.url())
            .unwrap()
            .with_login("ci-bot", "pw");

        let provider = factory(&cache).new_provider(&mut config).await.unwrap();

        assert_eq!(config.token(), Some("T"));
        assert_eq!(provider.config().token(), Some("T"));
        assert!(provider.config().uses_oauth());
        token.assert_async().await;
    }

    #[tokio::test]
    async fn test_cache_hit_still_resolves_token() {
        let mut server = mockito::Server::new_async().await;
        let probe = server
            .mock("GET", VERSION_PATH)
            .expect(0)
            .create_async()
            .await;
        let token = server
            .mock("POST", "/oauth/token")
            .with_status(200)
            .with_body(r#"{"access_token":"T2"}"#)
            .expect(1)
            .create_async()
            .await;

        let cache = VersionCache::new();
        let factory = factory(&cache);
        let mut config = ConnectionConfig::new(&server.url())
            .unwrap()
            .with_login("ci-bot", "pw");
        factory.pin_generation(&config, ApiGeneration::V3);

        let provider = factory.new_provider(&mut config).await.unwrap();

        assert_eq!(provider.generation(), ApiGeneration::V3);
        assert_eq!(config.token(), Some("T2"));
        probe.assert_async().await;
        token.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_server_leaves_cache_untouched() {
        let cache = VersionCache::new();
        let mut config = ConnectionConfig::new("http://127.0.0.1:1")
            .unwrap()
            .with_token("t");

        let err = factory(&cache).new_provider(&mut config).await.unwrap_err();

        assert!(matches!(err, ProviderError::Probe(ProbeError::Unreachable { .. })));
        assert!(cache.get(&ServerIdentity::new("http://127.0.0.1:1")).is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let cache = VersionCache::new();
        let mut config = ConnectionConfig::new("http://127.0.0.1:1").unwrap();

        let err = factory(&cache).new_provider(&mut config).await.unwrap_err();

        assert!(matches!(err, ProviderError::Auth(AuthError::MissingCredentials)));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_unusable_server_fails_construction() {
        let cache = VersionCache::new();
        let factory = factory(&cache);
        let mut config = ConnectionConfig::new("ftp://gitlab.example.com")
            .unwrap()
            .with_token("t");
        factory.pin_generation(&config, ApiGeneration::V4);

        let err = factory.new_provider(&mut config).await.unwrap_err();
        assert!(matches!(err, ProviderError::ClientConstructionFailed(_)));
    }
}
