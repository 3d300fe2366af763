//! Provision / teardown lifecycle
//!
//! The two algorithms behind `setup` and `reset`. The invariant both are
//! built around: the ledger is saved after EVERY successful resource
//! creation, so a failure later in the run can never leave an unrecorded
//! resource behind.

use crate::error::Result;
use crate::ledger::{LedgerStore, ResourceLedger};
use crate::provider::{CloudProvider, DeployRequest};
use crate::report::{ProvisionReport, ResourceKind, TeardownReport};
use std::path::PathBuf;
use uuid::Uuid;

/// Prefix of every bucket this tool creates
pub const BUCKET_PREFIX: &str = "automation-bucket-";

/// Options for one provisioning run
#[derive(Debug, Clone)]
pub struct ProvisionOptions {
    /// Managed service name to deploy under
    pub service_name: String,

    /// Container source directory handed to the remote build
    pub source_dir: PathBuf,
}

/// Generate a bucket name with a random suffix. Bucket names live in a
/// global namespace, so the suffix keeps repeated demo runs from colliding.
pub fn generate_bucket_name() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{BUCKET_PREFIX}{}", &suffix[..8])
}

/// Create the demo bucket and deploy the demo service
///
/// Bucket creation failure aborts the run with an error; nothing was
/// created, so nothing is recorded. A deploy failure is NOT an error: the
/// bucket already exists and stays recorded for teardown, and the failure
/// is carried in the report instead.
pub async fn provision(
    provider: &dyn CloudProvider,
    store: &dyn LedgerStore,
    options: &ProvisionOptions,
) -> Result<ProvisionReport> {
    let bucket = generate_bucket_name();

    tracing::info!("Creating bucket {bucket}");
    provider.create_bucket(&bucket).await?;

    // Record the bucket before attempting the deploy, so a failure from
    // here on still leaves a recoverable ledger.
    let mut ledger = ResourceLedger::new();
    ledger.record_bucket(&bucket);
    store.save(&ledger).await?;

    let request = DeployRequest {
        service_name: options.service_name.clone(),
        source_dir: options.source_dir.clone(),
    };

    tracing::info!("Deploying service {}", request.service_name);
    match provider.deploy_service(&request).await {
        Ok(service) => {
            ledger.record_service(&service.name, &service.url);
            store.save(&ledger).await?;

            let verification = provider.probe_service(&service.url).await;

            Ok(ProvisionReport {
                bucket,
                service: Some(service),
                deploy_error: None,
                verification: Some(verification),
            })
        }
        Err(e) => {
            tracing::warn!("Deploy failed: {e}");
            Ok(ProvisionReport {
                bucket,
                service: None,
                deploy_error: Some(e.to_string()),
                verification: None,
            })
        }
    }
}

/// Delete every resource the ledger records, then remove the ledger
///
/// Each deletion is attempted exactly once; a failure is recorded and the
/// loop continues. The ledger is cleared even when some deletions failed,
/// so the demo is always left resettable. The trade-off (a failed deletion
/// orphans the resource as far as this tool can see) is deliberate and
/// surfaced through the report.
pub async fn deprovision(
    provider: &dyn CloudProvider,
    store: &dyn LedgerStore,
) -> Result<TeardownReport> {
    let ledger = store.load().await?;
    if ledger.is_empty() {
        tracing::info!("No resource ledger found, nothing to tear down");
        return Ok(TeardownReport::nothing_to_do());
    }

    let mut report = TeardownReport::new();

    for bucket in &ledger.buckets {
        tracing::info!("Deleting bucket {bucket}");
        match provider.delete_bucket(bucket).await {
            Ok(()) => report.record_success(ResourceKind::Bucket, bucket),
            Err(e) => report.record_failure(ResourceKind::Bucket, bucket, e.to_string()),
        }
    }

    if let Some(service) = &ledger.cloud_run_service {
        tracing::info!("Deleting service {service}");
        match provider.delete_service(service).await {
            Ok(()) => report.record_success(ResourceKind::Service, service),
            Err(e) => report.record_failure(ResourceKind::Service, service, e.to_string()),
        }
    }

    store.clear().await?;
    Ok(report)
}
