//
//  gitlab-scm
//  status.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Build status vocabulary and its translation into GitLab commit states.
//!
//! | Build status | GitLab state | Description |
//! |--------------|--------------|-------------|
//! | `Running` | `running` | The Cyclone CI build is in progress. |
//! | `Success` | `success` | The Cyclone CI build passed. |
//! | `Failed` | `failed` | The Cyclone CI build failed. |
//! | `Aborted` | `canceled` | The Cyclone CI build failed. |
//! | anything else | `pending` | *(empty)* |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// GitLab state used when a build status has no mapping.
pub const DEFAULT_STATE: &str = "pending";

/// Status of a pipeline record in the calling service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuildStatus {
    Pending,
    Running,
    Success,
    Failed,
    Aborted,
    /// Any status this crate does not know how to report.
    Other(String),
}

impl BuildStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Success => "Success",
            Self::Failed => "Failed",
            Self::Aborted => "Aborted",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for BuildStatus {
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "running" => Self::Running,
            "success" => Self::Success,
            "failed" => Self::Failed,
            "aborted" => Self::Aborted,
            _ => Self::Other(s.to_string()),
        }
    }
}

impl From<String> for BuildStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<BuildStatus> for String {
    fn from(status: BuildStatus) -> Self {
        status.as_str().to_string()
    }
}

impl FromStr for BuildStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a build status to a GitLab commit state and description.
///
/// Never fails. Statuses without a mapping are logged and reported as
/// `("pending", "")` so status reporting cannot stall a pipeline.
///
/// # Example
///
/// ```rust
/// use gitlab_scm::status::{translate_status, BuildStatus};
///
/// assert_eq!(
///     translate_status(&BuildStatus::Running),
///     ("running", "The Cyclone CI build is in progress.")
/// );
/// assert_eq!(translate_status(&BuildStatus::from("Queued")), ("pending", ""));
/// ```
pub fn translate_status(status: &BuildStatus) -> (&'static str, &'static str) {
    match status {
        BuildStatus::Running => ("running", "The Cyclone CI build is in progress."),
        BuildStatus::Success => ("success", "The Cyclone CI build passed."),
        BuildStatus::Failed => ("failed", "The Cyclone CI build failed."),
        BuildStatus::Aborted => ("canceled", "The Cyclone CI build failed."),
        other => {
            warn!(status = %other, "Build status has no GitLab commit state, reporting pending");
            (DEFAULT_STATE, "")
        }
    }
}
