//
//  gitlab-scm
//  cli/probe.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! API version detection command

use anyhow::Result;
use clap::Args;

use super::GlobalOptions;
use crate::output::ProbeSummary;

/// Detect which GitLab API version a server speaks
#[derive(Args, Debug)]
pub struct ProbeCommand {}

impl ProbeCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (mut config, pinned) = global.connection()?;
        let factory = global.factory()?;
        if let Some(generation) = pinned {
            factory.pin_generation(&config, generation);
        }

        let identity = config.identity();
        let api_version = factory.api_generation(&mut config).await?;

        global.output().write(&ProbeSummary {
            server: identity.to_string(),
            api_version,
        })
    }
}
