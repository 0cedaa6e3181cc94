//
//  gitlab-scm
//  api/v3/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # GitLab API v3
//!
//! Adapter for installations older than GitLab 9.0, which serve only
//! `/api/v3`. These servers answer the `/api/v4/version` probe with a 404 or
//! a redirect to the sign-in page.
//!
//! ## Notes
//!
//! - Project identifiers may be numeric ids or percent-encoded paths
//! - Commit statuses are keyed by `name`; v3 has no `pipeline_id`

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::api::client::GitlabClient;
use crate::api::common::{ApiGeneration, OperationError, ProviderError};
use crate::api::projects::{CommitStatus, Languages, RepoFile, StatusReport};
use crate::api::provider::ScmProvider;
use crate::config::ConnectionConfig;

/// Adapter for the GitLab v3 API.
#[derive(Debug)]
pub struct GitlabV3 {
    config: ConnectionConfig,
    client: GitlabClient,
}

impl GitlabV3 {
    /// Builds the adapter from a config whose token is already resolved.
    ///
    /// # Errors
    ///
    /// Fails when the config has no token or its server cannot serve as a
    /// base URL.
    pub fn new(http: Client, config: ConnectionConfig) -> Result<Self, ProviderError> {
        let client = GitlabClient::from_config(http, &config, ApiGeneration::V3)?;
        debug!(
            base_url = client.base_url(),
            auth = client.auth().kind(),
            "Created GitLab v3 client"
        );
        Ok(Self { config, client })
    }

    pub fn client(&self) -> &GitlabClient {
        &self.client
    }
}

#[async_trait]
impl ScmProvider for GitlabV3 {
    fn generation(&self) -> ApiGeneration {
        ApiGeneration::V3
    }

    fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    async fn report_status(
        &self,
        project: &str,
        report: &StatusReport,
    ) -> Result<CommitStatus, OperationError> {
        self.client.create_commit_status(project, report).await
    }

    async fn list_contents(&self, project: &str) -> Result<Vec<RepoFile>, OperationError> {
        self.client.repository_tree(project).await
    }

    async fn get_languages(&self, project: &str) -> Result<Languages, OperationError> {
        self.client.languages(project).await
    }
}
