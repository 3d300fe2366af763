use colored::Colorize;
use demoforge_cloud::{FileLedgerStore, deprovision};
use demoforge_cloud_gcp::GcpProvider;
use std::path::Path;

/// Tear down everything the ledger records, printing one line per resource.
pub async fn handle(creds_path: &Path, project: &str) -> anyhow::Result<()> {
    let credentials = super::load_credentials_or_exit(creds_path);
    let provider = GcpProvider::new(credentials, project);
    super::ensure_authenticated(&provider).await?;

    let store = FileLedgerStore::new(std::env::current_dir()?);

    println!(
        "{}",
        format!("Tearing down demo deployment in project '{}'...", project)
            .yellow()
            .bold()
    );

    let report = deprovision(&provider, &store).await?;

    if report.nothing_to_do {
        println!(
            "{}",
            "No resource ledger found. Nothing to tear down.".dimmed()
        );
        return Ok(());
    }

    println!();
    for outcome in &report.outcomes {
        if outcome.success {
            println!(
                "  {} Deleted {}: {}",
                "✓".green(),
                outcome.kind,
                outcome.name.cyan()
            );
        } else {
            println!(
                "  {} Failed to delete {} {}: {}",
                "✗".red(),
                outcome.kind,
                outcome.name,
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    println!();
    if report.is_clean() {
        println!("{}", "✓ Reset complete".green().bold());
    } else {
        println!(
            "{}",
            "⚠ Reset finished with failures; the failed resources may need manual cleanup"
                .yellow()
                .bold()
        );
    }

    Ok(())
}
