//
//  gitlab-scm
//  api/v4/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # GitLab API v4
//!
//! Adapter for GitLab 9.0 and later. Detected when `/api/v4/version`
//! answers 200 with a version body.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::api::client::GitlabClient;
use crate::api::common::{ApiGeneration, OperationError, ProviderError};
use crate::api::projects::{CommitStatus, Languages, RepoFile, StatusReport};
use crate::api::provider::ScmProvider;
use crate::config::ConnectionConfig;

/// Adapter for the GitLab v4 API.
#[derive(Debug)]
pub struct GitlabV4 {
    config: ConnectionConfig,
    client: GitlabClient,
}

impl GitlabV4 {
    /// Builds the adapter from a config whose token is already resolved.
    pub fn new(http: Client, config: ConnectionConfig) -> Result<Self, ProviderError> {
        let client = GitlabClient::from_config(http, &config, ApiGeneration::V4)?;
        debug!(
            base_url = client.base_url(),
            auth = client.auth().kind(),
            "Created GitLab v4 client"
        );
        Ok(Self { config, client })
    }

    pub fn client(&self) -> &GitlabClient {
        &self.client
    }
}

#[async_trait]
impl ScmProvider for GitlabV4 {
    fn generation(&self) -> ApiGeneration {
        ApiGeneration::V4
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
