//
//  gitlab-scm
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! HTTP client and adapters for GitLab's REST APIs.
//!
//! ## Supported Generations
//!
//! - **v3**: `/api/v3`, GitLab releases before 9.0
//! - **v4**: `/api/v4`, GitLab 9.0 and later
//!
//! ## Architecture
//!
//! - [`client`]: Core HTTP client with authentication and request handling
//! - [`projects`]: Project operations shared by both generations
//! - [`provider`]: The [`ScmProvider`](provider::ScmProvider) trait
//! - [`v3`] / [`v4`]: Generation adapters
//! - [`common`]: Shared types (generations, errors)
//!
//! ## Error Handling
//!
//! Adapter construction fails with [`ProviderError`]; calls made through an
//! adapter fail with [`OperationError`]:
//!
//! - `HttpFailure`: Non-2xx response, carrying the status and body
//! - `Transport`: Connection or TLS failure
//! - `Decode`: 2xx response whose body did not match the expected shape

/// Core HTTP client wrapper for GitLab APIs.
///
/// Provides the [`GitlabClient`] struct which handles:
/// - Base URL selection per generation
/// - Authentication header injection
/// - Request/response serialization
pub mod client;

/// Common types shared between generations.
pub mod common;

/// Project operations: languages, repository tree and commit statuses.
pub mod projects;

pub mod provider;

/// GitLab API v3 adapter.
pub mod v3;

/// GitLab API v4 adapter.
pub mod v4;

pub use client::GitlabClient;
pub use common::{ApiGeneration, AuthError, OperationError, ProbeError, ProviderError};
