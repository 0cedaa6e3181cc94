//
//  gitlab-scm
//  api/provider.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The uniform operation set every generation adapter implements.

use std::fmt;

use async_trait::async_trait;

use crate::api::common::{ApiGeneration, OperationError};
use crate::api::projects::{top_language, CommitStatus, Languages, RepoFile, StatusReport};
use crate::config::ConnectionConfig;

/// Provider-facing interface shared by the v3 and v4 adapters.
///
/// Adapters are chosen once by [`ProviderFactory`](crate::ProviderFactory);
/// callers never need to know which generation they hold.
///
/// # Example
///
/// ```rust,no_run
/// use gitlab_scm::api::provider::ScmProvider;
///
/// # async fn example(provider: Box<dyn ScmProvider>) -> anyhow::Result<()> {
/// let files = provider.list_contents("group/app").await?;
/// let language = provider.top_language("group/app").await?;
/// println!("{} entries, mostly {}", files.len(), language);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ScmProvider: fmt::Debug + Send + Sync {
    /// API generation this adapter speaks.
    fn generation(&self) -> ApiGeneration;

    /// The resolved connection config the adapter was built from.
    fn config(&self) -> &ConnectionConfig;

    /// Publishes a commit status for a build.
    async fn report_status(
        &self,
        project: &str,
        report: &StatusReport,
    ) -> Result<CommitStatus, OperationError>;

    /// Lists the repository tree of a project.
    async fn list_contents(&self, project: &str) -> Result<Vec<RepoFile>, OperationError>;

    /// Fetches the language breakdown of a project.
    async fn get_languages(&self, project: &str) -> Result<Languages, OperationError>;

    /// Fetches the language breakdown and returns its largest entry.
    async fn top_language(&self, project: &str) -> Result<String, OperationError> {
        Ok(top_language(&self.get_languages(project).await?))
    }
}
