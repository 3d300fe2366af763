use colored::Colorize;
use demoforge_cloud::{FileLedgerStore, ProvisionOptions, VerificationReport, provision};
use demoforge_cloud_gcp::GcpProvider;
use std::path::{Path, PathBuf};

/// Provision the demo deployment: bucket, then service, then one probe.
pub async fn handle(
    creds_path: &Path,
    project: &str,
    service_name: String,
    source: PathBuf,
) -> anyhow::Result<()> {
    let credentials = super::load_credentials_or_exit(creds_path);
    let provider = GcpProvider::new(credentials, project);
    super::ensure_authenticated(&provider).await?;

    let store = FileLedgerStore::new(std::env::current_dir()?);
    let options = ProvisionOptions {
        service_name,
        source_dir: source,
    };

    println!(
        "{}",
        format!("Provisioning demo deployment in project '{}'...", project)
            .blue()
            .bold()
    );

    let report = provision(&provider, &store, &options).await?;

    println!();
    println!("  {} Created bucket: {}", "✓".green(), report.bucket.cyan());

    match (&report.service, &report.deploy_error) {
        (Some(service), _) => {
            println!(
                "  {} Deployed service: {}",
                "✓".green(),
                service.name.cyan()
            );
            println!("    URL: {}", service.url);
        }
        (None, Some(cause)) => {
            println!("  {} Deploy failed: {}", "✗".red(), cause);
            println!(
                "    The bucket is still recorded; run {} to tear it down.",
                "demoforge reset".cyan()
            );
        }
        (None, None) => {}
    }

    if let Some(verification) = &report.verification {
        print_verification(verification);
    }

    println!();
    if report.deployed() {
        println!("{}", "✓ Setup complete".green().bold());
    } else {
        println!(
            "{}",
            "⚠ Setup finished with a failed deploy (bucket recorded)"
                .yellow()
                .bold()
        );
    }

    Ok(())
}

fn print_verification(verification: &VerificationReport) {
    match (verification.status, &verification.error) {
        (Some(status), None) => {
            println!("  {} Verification: HTTP {}", "✓".green(), status);
            if let Some(excerpt) = &verification.excerpt {
                println!("    {}", preview(excerpt).dimmed());
            }
        }
        (status, error) => {
            let cause = error.as_deref().unwrap_or("no response");
            let status = status.map(|s| format!(" (HTTP {s})")).unwrap_or_default();
            println!("  {} Verification failed{}: {}", "⚠".yellow(), status, cause);
        }
    }
}

/// First line of the excerpt, shortened for terminal output. The full
/// excerpt stays available in the report itself.
fn preview(excerpt: &str) -> String {
    let line = excerpt.lines().next().unwrap_or_default();
    let mut preview: String = line.chars().take(120).collect();
    if preview.len() < line.len() {
        preview.push('…');
    }
    preview
}
