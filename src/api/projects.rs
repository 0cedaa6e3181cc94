//
//  gitlab-scm
//  api/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Project Operations
//!
//! Generation-agnostic calls against a project. The path is the same under
//! `/api/v3` and `/api/v4`; only the base URL differs.
//!
//! | Operation | Endpoint |
//! |-----------|----------|
//! | Language breakdown | `GET /projects/{id}/languages` |
//! | Repository tree | `GET /projects/{id}/repository/tree` |
//! | Commit status | `POST /projects/{id}/statuses/{sha}` |
//!
//! `{id}` is a numeric id or a percent-encoded `namespace/project` path.
//!
//! The free functions ([`get_languages`], [`list_contents`]) take a resolved
//! [`ConnectionConfig`] and an [`ApiGeneration`] directly, for callers that
//! already know the generation and do not need an adapter.

use std::collections::BTreeMap;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::api::client::{encode_project, project_path, GitlabClient};
use crate::api::common::{ApiGeneration, OperationError};
use crate::config::ConnectionConfig;
use crate::status::{translate_status, BuildStatus};

/// Name under which commit statuses are reported.
pub const STATUS_CONTEXT: &str = "continuous-integration/cyclone";

/// Language name to percentage of the repository, as returned by GitLab.
pub type Languages = BTreeMap<String, f32>;

/// Kind of a repository tree entry.
///
/// GitLab reports `tree` for directories and `blob` for files. Submodule
/// entries (`commit`) are treated as files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FileKind {
    File,
    Directory,
}

impl From<String> for FileKind {
    fn from(s: String) -> Self {
        if s == "tree" {
            Self::Directory
        } else {
            Self::File
        }
    }
}

impl From<FileKind> for String {
    fn from(kind: FileKind) -> Self {
        match kind {
            FileKind::File => "blob".to_string(),
            FileKind::Directory => "tree".to_string(),
        }
    }
}

/// One entry of a repository tree listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoFile {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub path: String,
}

impl RepoFile {
    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }
}

/// A commit status to publish for one commit.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    /// Commit SHA the status applies to.
    pub sha: String,
    pub status: BuildStatus,
    /// Link to the pipeline record, shown by GitLab next to the status.
    pub target_url: Option<String>,
    /// Branch or tag name, when known.
    pub git_ref: Option<String>,
}

impl StatusReport {
    pub fn new(sha: impl Into<String>, status: BuildStatus) -> Self {
        Self {
            sha: sha.into(),
            status,
            target_url: None,
            git_ref: None,
        }
    }

    pub fn with_target_url(mut self, url: impl Into<String>) -> Self {
        self.target_url = Some(url.into());
        self
    }

    pub fn with_ref(mut self, git_ref: impl Into<String>) -> Self {
        self.git_ref = Some(git_ref.into());
        self
    }
}

/// Request body for `POST /projects/{id}/statuses/{sha}`.
#[derive(Debug, Clone, Serialize)]
pub struct CommitStatusRequest {
    pub state: &'static str,
    pub description: &'static str,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
}

impl From<&StatusReport> for CommitStatusRequest {
    fn from(report: &StatusReport) -> Self {
        let (state, description) = translate_status(&report.status);
        Self {
            state,
            description,
            name: STATUS_CONTEXT,
            target_url: report.target_url.clone(),
            git_ref: report.git_ref.clone(),
        }
    }
}

/// Commit status as returned by GitLab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitStatus {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub sha: String,
    /// GitLab state, e.g. `"running"`.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_url: Option<String>,
}

impl GitlabClient {
    /// Fetches the language breakdown of `project`.
    pub async fn languages(&self, project: &str) -> Result<Languages, OperationError> {
        self.get(&project_path(project, "languages")).await
    }

    /// Lists the top level of the default branch of `project`.
    pub async fn repository_tree(&self, project: &str) -> Result<Vec<RepoFile>, OperationError> {
        self.get(&project_path(project, "repository/tree")).await
    }

    /// Publishes a commit status on `project`.
    pub async fn create_commit_status(
        &self,
        project: &str,
        report: &StatusReport,
    ) -> Result<CommitStatus, OperationError> {
        let path = format!(
            "/projects/{}/statuses/{}",
            encode_project(project),
            encode_project(&report.sha)
        );
        self.post(&path, &CommitStatusRequest::from(report)).await
    }
}

/// Fetches the language breakdown of `project` on a server of known generation.
///
/// # Errors
///
/// - [`OperationError::MissingToken`] - `config` has no resolved token
/// - [`OperationError::HttpFailure`] - Non-2xx response, with its body
/// - [`OperationError::Transport`] / [`OperationError::Decode`] - Network or body failures
pub async fn get_languages(
    http: &Client,
    config: &ConnectionConfig,
    generation: ApiGeneration,
    project: &str,
) -> Result<Languages, OperationError> {
    GitlabClient::for_operation(http.clone(), config, generation)?
        .languages(project)
        .await
}

/// Lists the repository tree of `project` on a server of known generation.
pub async fn list_contents(
    http: &Client,
    config: &ConnectionConfig,
    generation: ApiGeneration,
    project: &str,
) -> Result<Vec<RepoFile>, OperationError> {
    GitlabClient::for_operation(http.clone(), config, generation)?
        .repository_tree(project)
        .await
}

/// Returns the language with the largest share, or an empty string.
///
/// Only a strictly larger share replaces the current pick, and the map is
/// walked in name order, so ties go to the alphabetically first language.
/// Languages with a zero share are never picked.
///
/// # Example
///
/// ```rust
/// use gitlab_scm::api::projects::{top_language, Languages};
///
/// let mut languages = Languages::new();
/// languages.insert("Go".to_string(), 80.0);
/// languages.insert("Python".to_string(), 20.0);
/// assert_eq!(top_language(&languages), "Go");
///
/// assert_eq!(top_language(&Languages::new()), "");
/// ```
pub fn top_language(languages: &Languages) -> String {
    let mut top = "";
    let mut max = 0.0_f32;
    for (language, share) in languages {
        if *share > max {
            max = *share;
            top = language.as_str();
        }
    }
    top.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn languages(pairs: &[(&str, f32)]) -> Languages {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn token_config(server: &str) -> ConnectionConfig {
        ConnectionConfig::new(server).unwrap().with_token("glpat-1")
    }

    #[test]
    fn test_top_language() {
        assert_eq!(top_language(&languages(&[("Go", 80.0), ("Python", 20.0)])), "Go");
        assert_eq!(top_language(&languages(&[("Rust", 10.5), ("Shell", 89.5)])), "Shell");
        assert_eq!(top_language(&Languages::new()), "");
    }

    #[test]
    fn test_top_language_tie_goes_to_first_name() {
        assert_eq!(top_language(&languages(&[("Ruby", 50.0), ("C", 50.0)])), "C");
    }

    #[test]
    fn test_repo_file_kinds() {
        let files: Vec<RepoFile> = serde_json::from_str(
            r#"[
                {"id":"a1","name":"src","type":"tree","path":"src","mode":"040000"},
                {"id":"b2","name":"main.go","type":"blob","path":"main.go","mode":"100644"},
                {"id":"c3","name":"vendor","type":"commit","path":"vendor","mode":"160000"}
            ]"#,
        )
        .unwrap();

        assert!(files[0].is_dir());
        assert_eq!(files[1].kind, FileKind::File);
        assert_eq!(files[2].kind, FileKind::File);
        assert_eq!(files[1].path, "main.go");
    }

    #[test]
    fn test_commit_status_request_body() {
        let report = StatusReport::new("deadbeef", BuildStatus::Success)
            .with_target_url("https://ci.example.com/records/1");
        let body = serde_json::to_value(CommitStatusRequest::from(&report)).unwrap();

        assert_eq!(body["state"], "success");
        assert_eq!(body["description"], "The Cyclone CI build passed.");
        assert_eq!(body["name"], STATUS_CONTEXT);
        assert_eq!(body["target_url"], "https://ci.example.com/records/1");
        assert!(body.get("ref").is_none());
    }

    #[tokio::test]
    async fn test_get_languages_encodes_project() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v4/projects/group%2Fapp/languages")
            .match_header("private-token", "glpat-1")
            .with_status(200)
            .with_body(r#"{"Go":80.0,"Python":20.0}"#)
            .create_async()
            .await;

        let config = token_config(&server.url());
        let result = get_languages(&Client::new(), &config, ApiGeneration::V4, "group/app")
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(top_language(&result), "Go");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_languages_http_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v3/projects/7/languages")
            .with_status(404)
            .with_body(r#"{"message":"404 Project Not Found"}"#)
            .create_async()
            .await;

        let config = token_config(&server.url());
        let err = get_languages(&Client::new(), &config, ApiGeneration::V3, "7")
            .await
            .unwrap_err();

        match err {
            OperationError::HttpFailure { status, body } => {
                assert_eq!(status.as_u16(), 404);
                assert!(body.contains("Project Not Found"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_contents_v3() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v3/projects/ops%2Fdeploy/repository/tree")
            .with_status(200)
            .with_body(r#"[{"name":"Dockerfile","type":"blob","path":"Dockerfile"}]"#)
            .create_async()
            .await;

        let config = token_config(&server.url());
        let files = list_contents(&Client::new(), &config, ApiGeneration::V3, "ops/deploy")
            .await
            .unwrap();

        assert_eq!(
            files,
            vec![RepoFile {
                name: "Dockerfile".to_string(),
                kind: FileKind::File,
                path: "Dockerfile".to_string(),
            }]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_commit_status_escapes_sha() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v4/projects/7/statuses/dead%2Fbeef%3Fx")
            .with_status(201)
            .with_body(r#"{"id":1,"sha":"dead/beef?x","status":"running"}"#)
            .expect(1)
            .create_async()
            .await;

        let config = token_config(&server.url());
        let client = GitlabClient::from_config(Client::new(), &config, ApiGeneration::V4).unwrap();
        let report = StatusReport::new("dead/beef?x", BuildStatus::Running);
        let status = client.create_commit_status("7", &report).await.unwrap();

        assert_eq!(status.status, "running");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_operation_without_token() {
        let config = ConnectionConfig::new("http://127.0.0.1:1").unwrap();
        let err = list_contents(&Client::new(), &config, ApiGeneration::V4, "a/b")
            .await
            .unwrap_err();
        assert!(matches!(err, OperationError::MissingToken(_)));
    }
}
