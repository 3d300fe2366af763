mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default name the demo service is deployed under
const DEFAULT_SERVICE_NAME: &str = "automation-demo-service";

#[derive(Parser)]
#[command(name = "demoforge")]
#[command(version)]
#[command(about = "Provision and tear down the demo cloud deployment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify the service-account credentials can reach Google Cloud
    Init {
        /// Path to the service-account key JSON
        #[arg(long, env = "DEMOFORGE_CREDS")]
        creds: PathBuf,
    },
    /// Create the demo bucket and deploy the demo service
    Setup {
        /// Path to the service-account key JSON
        #[arg(long, env = "DEMOFORGE_CREDS")]
        creds: PathBuf,
        /// Google Cloud project ID
        #[arg(long)]
        project: String,
        /// Cloud Run service name
        #[arg(long, default_value = DEFAULT_SERVICE_NAME)]
        service_name: String,
        /// Container source directory submitted to Cloud Build
        #[arg(long, default_value = ".")]
        source: PathBuf,
    },
    /// Delete every resource recorded by a previous setup
    Reset {
        /// Path to the service-account key JSON
        #[arg(long, env = "DEMOFORGE_CREDS")]
        creds: PathBuf,
        /// Google Cloud project ID
        #[arg(long)]
        project: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { creds } => {
            commands::init::handle(&creds).await?;
        }
        Commands::Setup {
            creds,
            project,
            service_name,
            source,
        } => {
            commands::setup::handle(&creds, &project, service_name, source).await?;
        }
        Commands::Reset { creds, project } => {
            commands::reset::handle(&creds, &project).await?;
        }
    }

    Ok(())
}
