//! Cloud provider trait definition

use crate::error::Result;
use crate::report::VerificationReport;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Cloud provider abstraction trait
///
/// The lifecycle talks to the cloud exclusively through this trait, so the
/// real provider can be swapped for a scriptable fake in tests.
#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// Returns the provider name (e.g., "gcp")
    fn name(&self) -> &str;

    /// Check that the provider is properly configured and authenticated
    async fn check_auth(&self) -> Result<AuthStatus>;

    /// List the storage buckets visible to the credential
    async fn list_buckets(&self) -> Result<Vec<String>>;

    /// Create a storage bucket with the given globally unique name
    async fn create_bucket(&self, name: &str) -> Result<()>;

    /// Force-delete a bucket, including any contained objects
    async fn delete_bucket(&self, name: &str) -> Result<()>;

    /// Build and deploy the container service
    ///
    /// A multi-step remote operation treated as one logical step: it either
    /// ends with a resolvable service URL or it failed.
    async fn deploy_service(&self, request: &DeployRequest) -> Result<DeployedService>;

    /// Delete a deployed managed service
    async fn delete_service(&self, name: &str) -> Result<()>;

    /// Single best-effort GET against the deployed service endpoint.
    /// Diagnostic only; failures land in the report, never in an `Err`.
    async fn probe_service(&self, url: &str) -> VerificationReport;
}

/// Authentication status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStatus {
    /// Whether authentication is valid
    pub authenticated: bool,

    /// Account/user information if available
    pub account_info: Option<String>,

    /// Error message if not authenticated
    pub error: Option<String>,
}

impl AuthStatus {
    pub fn ok(account_info: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            account_info: Some(account_info.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            authenticated: false,
            account_info: None,
            error: Some(error.into()),
        }
    }
}

/// What to build and deploy
#[derive(Debug, Clone)]
pub struct DeployRequest {
    /// Managed service name
    pub service_name: String,

    /// Container source directory submitted to the remote build
    pub source_dir: PathBuf,
}

/// A deployed managed service: its name and resolved public endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedService {
    pub name: String,
    pub url: String,
}
