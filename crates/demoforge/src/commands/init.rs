use colored::Colorize;
use demoforge_cloud::CloudProvider;
use demoforge_cloud_gcp::GcpProvider;
use std::path::Path;

/// Verify the credentials are usable by listing accessible buckets.
/// Never touches the ledger.
pub async fn handle(creds_path: &Path) -> anyhow::Result<()> {
    let credentials = super::load_credentials_or_exit(creds_path);
    let provider = GcpProvider::for_key_project(credentials);

    println!("{}", "Checking Google Cloud access...".blue());

    let auth = provider.check_auth().await?;
    if !auth.authenticated {
        let cause = auth
            .error
            .unwrap_or_else(|| "authentication failed".to_string());
        eprintln!("{} {}", "Error:".red().bold(), cause);
        std::process::exit(1);
    }
    if let Some(account) = &auth.account_info {
        println!("  Account: {}", account.cyan());
    }

    let buckets = provider.list_buckets().await?;
    println!(
        "{}",
        format!("✓ GCP access verified. Found {} buckets.", buckets.len())
            .green()
            .bold()
    );

    Ok(())
}
