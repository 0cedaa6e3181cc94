//
//  gitlab-scm
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Renders command results either as tables for people or as JSON for
//! scripts. Every printable result implements both [`serde::Serialize`] and
//! [`TableOutput`].

mod table;

pub use table::*;

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::api::common::ApiGeneration;
use crate::api::projects::{top_language, CommitStatus, Languages, RepoFile};

/// The available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// Pretty-printed JSON for scripting and automation.
    Json,
}

/// Types that can be rendered as a table.
pub trait TableOutput {
    /// Builds the table for this value.
    fn to_table(&self) -> TableBuilder;
}

/// Writes results in the selected [`OutputFormat`].
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Writes `value` to stdout.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> Result<()> {
        let stdout = std::io::stdout();
        self.write_to(&mut stdout.lock(), value)
    }

    /// Writes `value` to `out`.
    pub fn write_to<W: Write, T: Serialize + TableOutput>(
        &self,
        out: &mut W,
        value: &T,
    ) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, value)?;
                writeln!(out)?;
            }
            OutputFormat::Table => {
                writeln!(out, "{}", value.to_table().build())?;
            }
        }
        Ok(())
    }
}

/// Result of the `probe` command.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeSummary {
    pub server: String,
    pub api_version: ApiGeneration,
}

impl TableOutput for ProbeSummary {
    fn to_table(&self) -> TableBuilder {
        TableBuilder::new()
            .headers(["Server", "API Version"])
            .row([self.server.clone(), self.api_version.to_string()])
    }
}

/// Result of the `languages` command.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageSummary {
    pub languages: Languages,
    pub top: String,
}

impl From<Languages> for LanguageSummary {
    fn from(languages: Languages) -> Self {
        let top = top_language(&languages);
        Self { languages, top }
    }
}

impl TableOutput for LanguageSummary {
    fn to_table(&self) -> TableBuilder {
        let mut entries: Vec<(&String, &f32)> = self.languages.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(a.1));

        TableBuilder::new().headers(["Language", "Share"]).rows(
            entries
                .into_iter()
                .map(|(name, share)| [name.clone(), format!("{:.2}%", share)]),
        )
    }
}

impl TableOutput for Vec<RepoFile> {
    fn to_table(&self) -> TableBuilder {
        TableBuilder::new().headers(["Type", "Name", "Path"]).rows(self.iter().map(|f| {
            let kind = if f.is_dir() { "dir" } else { "file" };
            [kind.to_string(), f.name.clone(), f.path.clone()]
        }))
    }
}

impl TableOutput for CommitStatus {
    fn to_table(&self) -> TableBuilder {
        TableBuilder::new()
            .headers(["Commit", "State", "Description"])
            .row([
                self.sha.clone(),
                self.status.clone(),
                self.description.clone().unwrap_or_default(),
            ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::projects::FileKind;

    fn render<T: Serialize + TableOutput>(format: OutputFormat, value: &T) -> String {
        let mut out = Vec::new();
        OutputWriter::new(format).write_to(&mut out, value).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_language_summary_picks_top() {
        let languages: Languages = [("Go".to_string(), 80.0), ("Python".to_string(), 20.0)]
            .into_iter()
            .collect();
        let summary = LanguageSummary::from(languages);
        assert_eq!(summary.top, "Go");

        let table = render(OutputFormat::Table, &summary);
        assert!(table.find("Go").unwrap() < table.find("Python").unwrap());
        assert!(table.contains("80.00%"));
    }

    #[test]
    fn test_tree_json_keeps_gitlab_types() {
        let files = vec![RepoFile {
            name: "src".to_string(),
            kind: FileKind::Directory,
            path: "src".to_string(),
        }];
        let json: serde_json::Value =
            serde_json::from_str(&render(OutputFormat::Json, &files)).unwrap();
        assert_eq!(json[0]["type"], "tree");
    }

    #[test]
    fn test_probe_summary_table() {
        let summary = ProbeSummary {
            server: "gitlab.example.com".to_string(),
            api_version: ApiGeneration::V3,
        };
        let table = render(OutputFormat::Table, &summary);
        assert!(table.contains("gitlab.example.com"));
        assert!(table.contains("v3"));
    }
}
