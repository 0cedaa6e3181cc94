//
//  gitlab-scm
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Low-level profile file I/O.
//!
//! These helpers back [`Config::load_from`](super::Config::load_from) and
//! return the raw TOML text.

use std::path::Path;

use anyhow::{Context, Result};

/// Reads the contents of a profile file.
///
/// # Errors
///
/// Returns an error naming the path if the file cannot be read or is not UTF-8.
pub fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))
}

/// Checks if a profile file exists.
pub fn config_exists(path: &Path) -> bool {
    path.is_file()
}
