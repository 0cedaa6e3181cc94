//
//  gitlab-scm
//  discovery/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Generation Discovery
//!
//! - [`cache`]: Shared memo of detected generations, keyed by server identity
//! - [`probe`]: The `/api/v4/version` capability probe
//!
//! Per server identity the lifecycle is `unknown -> probing -> v3 | v4`.
//! Once a generation is recorded it is not probed again for the life of the
//! cache.

pub mod cache;
pub mod probe;

pub use cache::VersionCache;
pub use probe::{VersionProber, VERSION_PATH};
