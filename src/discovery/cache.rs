//
//  gitlab-scm
//  discovery/cache.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Memo of which API generation each server speaks.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::common::ApiGeneration;
use crate::config::ServerIdentity;

/// Shared map from server identity to detected API generation.
///
/// Clones share the same underlying map, so one cache can be handed to any
/// number of factories. Entries are never evicted. Two callers probing the
/// same unseen server concurrently both write; the last write wins and both
/// write the same value.
///
/// # Example
///
/// ```rust
/// use gitlab_scm::api::common::ApiGeneration;
/// use gitlab_scm::config::ServerIdentity;
/// use gitlab_scm::discovery::VersionCache;
///
/// let cache = VersionCache::new();
/// let shared = cache.clone();
///
/// cache.put(ServerIdentity::new("https://gitlab.example.com"), ApiGeneration::V4);
/// assert_eq!(
///     shared.get(&ServerIdentity::new("https://GITLAB.example.com/")),
///     Some(ApiGeneration::V4)
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct VersionCache {
    entries: Arc<Mutex<HashMap<ServerIdentity, ApiGeneration>>>,
}

impl VersionCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded generation for `identity`, if any.
    pub fn get(&self, identity: &ServerIdentity) -> Option<ApiGeneration> {
        self.lock().get(identity).copied()
    }

    /// Records the generation for `identity`.
    pub fn put(&self, identity: ServerIdentity, generation: ApiGeneration) {
        self.lock().insert(identity, generation);
    }

    /// Number of recorded servers.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave a half-written entry, so a
    // poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<ServerIdentity, ApiGeneration>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
