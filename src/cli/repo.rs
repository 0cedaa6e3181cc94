//
//  gitlab-scm
//  cli/repo.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository commands: language breakdown and tree listing.

use anyhow::Result;
use clap::Args;

use super::GlobalOptions;
use crate::output::LanguageSummary;

/// Show the language breakdown of a project
#[derive(Args, Debug)]
pub struct LanguagesCommand {
    /// Project id or namespace/project path
    pub project: String,

    /// Print only the language with the largest share
    #[arg(long)]
    pub top: bool,
}

impl LanguagesCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let provider = global.provider().await?;

        if self.top {
            let language = provider.top_language(&self.project).await?;
            println!("{}", language);
            return Ok(());
        }

        let languages = provider.get_languages(&self.project).await?;
        global.output().write(&LanguageSummary::from(languages))
    }
}

/// List the repository tree of a project
#[derive(Args, Debug)]
pub struct TreeCommand {
    /// Project id or namespace/project path
    pub project: String,
}

impl TreeCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let provider = global.provider().await?;
        let files = provider.list_contents(&self.project).await?;
        global.output().write(&files)
    }
}
