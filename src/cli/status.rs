//
//  gitlab-scm
//  cli/status.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Commit status reporting command

use anyhow::Result;
use clap::Args;

use super::GlobalOptions;
use crate::api::projects::StatusReport;
use crate::status::BuildStatus;

/// Report a build status on a commit
#[derive(Args, Debug)]
pub struct StatusCommand {
    /// Project id or namespace/project path
    pub project: String,

    /// Commit SHA
    pub sha: String,

    /// Build status: Pending, Running, Success, Failed or Aborted
    pub status: BuildStatus,

    /// Link to the build, shown next to the status
    #[arg(long)]
    pub target_url: Option<String>,

    /// Branch or tag the commit belongs to
    #[arg(long = "ref")]
    pub git_ref: Option<String>,
}

impl StatusCommand {
    fn report(&self) -> StatusReport {
        let mut report = StatusReport::new(&self.sha, self.status.clone());
        report.target_url = self.target_url.clone();
        report.git_ref = self.git_ref.clone();
        report
    }

    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let provider = global.provider().await?;
        let status = provider.report_status(&self.project, &self.report()).await?;
        global.output().write(&status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_status_args() {
        let cli = Cli::parse_from([
            "gitlab-scm",
            "status",
            "group/app",
            "deadbeef",
            "running",
            "--ref",
            "main",
        ]);
        let Commands::Status(cmd) = cli.command else {
            panic!("expected status command");
        };
        let report = cmd.report();
        assert_eq!(report.status, BuildStatus::Running);
        assert_eq!(report.git_ref.as_deref(), Some("main"));
        assert!(report.target_url.is_none());
    }
}
