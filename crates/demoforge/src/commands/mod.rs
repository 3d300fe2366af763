pub mod init;
pub mod reset;
pub mod setup;

use colored::Colorize;
use demoforge_cloud::CloudProvider;
use demoforge_cloud_gcp::{Credentials, GcpProvider};
use std::path::Path;

/// Load credentials or terminate the process. Credential problems are
/// fatal for every subcommand; there is no retry.
pub(crate) fn load_credentials_or_exit(path: &Path) -> Credentials {
    match Credentials::load(path) {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Activate the service account, exiting when gcloud rejects it
pub(crate) async fn ensure_authenticated(provider: &GcpProvider) -> anyhow::Result<()> {
    let auth = provider.check_auth().await?;
    if !auth.authenticated {
        let cause = auth
            .error
            .unwrap_or_else(|| "authentication failed".to_string());
        eprintln!("{} {}", "Error:".red().bold(), cause);
        std::process::exit(1);
    }
    Ok(())
}
