//! gcloud CLI wrapper
//!
//! Wraps the gcloud CLI commands used to manage the demo resources.

use crate::error::{GcpError, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Region the demo service is deployed to
pub const DEFAULT_REGION: &str = "us-central1";

/// Multi-region location for the demo bucket
pub const BUCKET_LOCATION: &str = "US";

/// APIs the deploy step depends on
pub const REQUIRED_SERVICES: &[&str] = &["run.googleapis.com", "cloudbuild.googleapis.com"];

/// gcloud CLI wrapper
pub struct Gcloud {
    project: String,
    region: String,
}

impl Gcloud {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            region: DEFAULT_REGION.to_string(),
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Check gcloud is installed, then activate the service account
    pub async fn activate_service_account(&self, key_file: &Path) -> Result<()> {
        let which = Command::new("which").arg("gcloud").output().await?;

        if !which.status.success() {
            return Err(GcpError::GcloudNotFound);
        }

        let key_file = key_file.display().to_string();
        self.run_command(&[
            "auth",
            "activate-service-account",
            "--key-file",
            key_file.as_str(),
            "--quiet",
        ])
        .await
        .map_err(|e| match e {
            GcpError::CommandFailed(msg) => GcpError::AuthenticationFailed(msg),
            other => other,
        })?;

        Ok(())
    }

    /// Run a gcloud command and return stdout
    async fn run_command(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("gcloud");
        cmd.args(args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: gcloud {}", args.join(" "));

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GcpError::CommandFailed(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// List bucket names visible in the project
    pub async fn list_buckets(&self) -> Result<Vec<String>> {
        let output = self
            .run_command(&["storage", "ls", "--project", self.project.as_str()])
            .await?;

        Ok(parse_bucket_urls(&output))
    }

    /// Create a storage bucket
    pub async fn create_bucket(&self, name: &str) -> Result<()> {
        let url = bucket_url(name);
        self.run_command(&[
            "storage",
            "buckets",
            "create",
            url.as_str(),
            "--project",
            self.project.as_str(),
            "--location",
            BUCKET_LOCATION,
        ])
        .await?;
        Ok(())
    }

    /// Delete a bucket and everything inside it
    pub async fn delete_bucket(&self, name: &str) -> Result<()> {
        let url = bucket_url(name);
        self.run_command(&["storage", "rm", "--recursive", url.as_str()])
            .await?;
        Ok(())
    }

    /// Enable the APIs the deploy depends on
    pub async fn enable_services(&self, services: &[&str]) -> Result<()> {
        let mut args = vec!["services", "enable"];
        args.extend_from_slice(services);
        args.push("--project");
        args.push(&self.project);

        self.run_command(&args).await?;
        Ok(())
    }

    /// Submit a container build for the given source directory
    pub async fn submit_build(&self, source: &Path, image: &str) -> Result<()> {
        let source = source.display().to_string();
        self.run_command(&[
            "builds",
            "submit",
            source.as_str(),
            "--tag",
            image,
            "--project",
            self.project.as_str(),
            "--quiet",
        ])
        .await?;
        Ok(())
    }

    /// Deploy an image as a managed Cloud Run service
    pub async fn deploy_run_service(&self, name: &str, image: &str) -> Result<()> {
        self.run_command(&[
            "run",
            "deploy",
            name,
            "--image",
            image,
            "--project",
            self.project.as_str(),
            "--region",
            self.region.as_str(),
            "--platform",
            "managed",
            "--allow-unauthenticated",
            "--quiet",
        ])
        .await?;
        Ok(())
    }

    /// Resolve the public URL of a deployed service
    pub async fn run_service_url(&self, name: &str) -> Result<String> {
        let output = self
            .run_command(&[
                "run",
                "services",
                "describe",
                name,
                "--platform",
                "managed",
                "--region",
                self.region.as_str(),
                "--project",
                self.project.as_str(),
                "--format",
                "get(status.url)",
            ])
            .await?;

        let url = output.trim().to_string();
        if url.is_empty() {
            return Err(GcpError::DeployFailed(format!(
                "service {name} has no resolvable URL"
            )));
        }
        Ok(url)
    }

    /// Delete a managed Cloud Run service
    pub async fn delete_run_service(&self, name: &str) -> Result<()> {
        self.run_command(&[
            "run",
            "services",
            "delete",
            name,
            "--platform",
            "managed",
            "--region",
            self.region.as_str(),
            "--project",
            self.project.as_str(),
            "--quiet",
        ])
        .await?;
        Ok(())
    }
}

/// Container image tag for the demo service
pub fn image_tag(project: &str, service: &str) -> String {
    format!("gcr.io/{project}/{service}")
}

fn bucket_url(name: &str) -> String {
    format!("gs://{name}")
}

/// Extract bucket names from `gcloud storage ls` output
fn parse_bucket_urls(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.trim().strip_prefix("gs://"))
        .map(|rest| rest.trim_end_matches('/').to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bucket_urls() {
        let output = "gs://automation-bucket-ab12cd34/\ngs://other-bucket/\n\n";
        assert_eq!(
            parse_bucket_urls(output),
            vec!["automation-bucket-ab12cd34", "other-bucket"]
        );
    }

    #[test]
    fn test_parse_bucket_urls_ignores_noise() {
        assert!(parse_bucket_urls("").is_empty());
        assert!(parse_bucket_urls("WARNING: something\n").is_empty());
    }

    #[test]
    fn test_image_tag() {
        assert_eq!(image_tag("demo", "svc1"), "gcr.io/demo/svc1");
    }
}
