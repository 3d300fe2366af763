//! Google Cloud provider error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GcpError {
    #[error("gcloud not found. Please install the Google Cloud SDK")]
    GcloudNotFound,

    #[error("Service account key not found: {}", .0.display())]
    CredentialNotFound(PathBuf),

    #[error("Invalid service account key: {0}")]
    CredentialInvalid(String),

    #[error("gcloud authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("gcloud command failed: {0}")]
    CommandFailed(String),

    #[error("Bucket creation failed: {0}")]
    BucketCreationFailed(String),

    #[error("Service deployment failed: {0}")]
    DeployFailed(String),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cloud error: {0}")]
    CloudError(#[from] demoforge_cloud::CloudError),
}

pub type Result<T> = std::result::Result<T, GcpError>;
