//! Google Cloud provider implementation

use crate::credentials::Credentials;
use crate::error::GcpError;
use crate::gcloud::{Gcloud, REQUIRED_SERVICES, image_tag};
use crate::probe;
use async_trait::async_trait;
use demoforge_cloud::{
    AuthStatus, CloudError, CloudProvider, DeployRequest, DeployedService, VerificationReport,
};

/// Google Cloud provider
///
/// Buckets and the Cloud Run service are managed through the gcloud CLI;
/// the credential handle decides which service account gcloud acts as.
pub struct GcpProvider {
    gcloud: Gcloud,
    credentials: Credentials,
}

impl GcpProvider {
    /// Provider bound to an explicit project (`setup` / `reset`)
    pub fn new(credentials: Credentials, project: impl Into<String>) -> Self {
        Self {
            gcloud: Gcloud::new(project),
            credentials,
        }
    }

    /// Provider bound to the key's own project (`init` takes no --project)
    pub fn for_key_project(credentials: Credentials) -> Self {
        let project = credentials.project_id().to_string();
        Self::new(credentials, project)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

#[async_trait]
impl CloudProvider for GcpProvider {
    fn name(&self) -> &str {
        "gcp"
    }

    async fn check_auth(&self) -> demoforge_cloud::Result<AuthStatus> {
        match self
            .gcloud
            .activate_service_account(self.credentials.path())
            .await
        {
            Ok(()) => Ok(AuthStatus::ok(self.credentials.client_email())),
            Err(GcpError::GcloudNotFound) => {
                Ok(AuthStatus::failed("gcloud is not installed"))
            }
            Err(e) => Ok(AuthStatus::failed(e.to_string())),
        }
    }

    async fn list_buckets(&self) -> demoforge_cloud::Result<Vec<String>> {
        self.gcloud
            .list_buckets()
            .await
            .map_err(|e| CloudError::ApiError(e.to_string()))
    }

    async fn create_bucket(&self, name: &str) -> demoforge_cloud::Result<()> {
        self.gcloud
            .create_bucket(name)
            .await
            .map_err(|e| CloudError::ApiError(e.to_string()))
    }

    async fn delete_bucket(&self, name: &str) -> demoforge_cloud::Result<()> {
        self.gcloud
            .delete_bucket(name)
            .await
            .map_err(|e| CloudError::ApiError(e.to_string()))
    }

    async fn deploy_service(
        &self,
        request: &DeployRequest,
    ) -> demoforge_cloud::Result<DeployedService> {
        // Enable APIs, build, deploy, resolve URL. One logical step: any
        // failure along the way fails the whole deploy.
        let image = image_tag(self.gcloud.project(), &request.service_name);

        self.gcloud
            .enable_services(REQUIRED_SERVICES)
            .await
            .map_err(|e| CloudError::ApiError(e.to_string()))?;

        tracing::info!("Submitting build for {image}");
        self.gcloud
            .submit_build(&request.source_dir, &image)
            .await
            .map_err(|e| CloudError::ApiError(e.to_string()))?;

        tracing::info!("Deploying {} to Cloud Run", request.service_name);
        self.gcloud
            .deploy_run_service(&request.service_name, &image)
            .await
            .map_err(|e| CloudError::ApiError(e.to_string()))?;

        let url = self
            .gcloud
            .run_service_url(&request.service_name)
            .await
            .map_err(|e| CloudError::ApiError(e.to_string()))?;

        Ok(DeployedService {
            name: request.service_name.clone(),
            url,
        })
    }

    async fn delete_service(&self, name: &str) -> demoforge_cloud::Result<()> {
        self.gcloud
            .delete_run_service(name)
            .await
            .map_err(|e| CloudError::ApiError(e.to_string()))
    }

    async fn probe_service(&self, url: &str) -> VerificationReport {
        probe::probe_url(url).await
    }
}
