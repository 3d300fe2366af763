//! Companion demo container
//!
//! One-route service deployed to Cloud Run by `demoforge setup`: fetches a
//! fixed external URL and returns an excerpt of the response plus container
//! metadata, proving the code executed inside the deployed revision.

use axum::{Json, Router, http::StatusCode, routing::get};
use serde::Serialize;
use std::time::Duration;

const EXAMPLE_URL: &str = "https://example.com";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Cap on the echoed body so the response stays small
const EXCERPT_CHAR_LIMIT: usize = 2000;

const DEFAULT_PORT: u16 = 8080;

/// Cloud Run environment, echoed back for inspection
#[derive(Debug, Serialize)]
struct ServiceEnv {
    #[serde(rename = "K_SERVICE")]
    k_service: Option<String>,

    #[serde(rename = "K_REVISION")]
    k_revision: Option<String>,

    #[serde(rename = "GCP_PROJECT")]
    gcp_project: Option<String>,

    #[serde(rename = "HOSTNAME")]
    hostname: Option<String>,
}

impl ServiceEnv {
    fn capture() -> Self {
        Self {
            k_service: std::env::var("K_SERVICE").ok(),
            k_revision: std::env::var("K_REVISION").ok(),
            gcp_project: std::env::var("GCP_PROJECT").ok(),
            hostname: std::env::var("HOSTNAME").ok(),
        }
    }
}

#[derive(Debug, Serialize)]
struct IndexResponse {
    service_env: ServiceEnv,
    example_status: u16,
    example_excerpt: String,
}

/// GET / — fetch the example page and mirror its status
async fn index() -> (StatusCode, Json<IndexResponse>) {
    let (status, body) = match fetch_example().await {
        Ok((status, body)) => (status, body),
        Err(e) => (500, format!("ERROR_FETCHING: {e}")),
    };

    let response = IndexResponse {
        service_env: ServiceEnv::capture(),
        example_status: status,
        example_excerpt: excerpt(&body),
    };

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response))
}

async fn fetch_example() -> reqwest::Result<(u16, String)> {
    let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
    let response = client.get(EXAMPLE_URL).send().await?;
    let status = response.status().as_u16();
    let body = response.text().await?;
    Ok((status, body))
}

fn excerpt(body: &str) -> String {
    body.chars().take(EXCERPT_CHAR_LIMIT).collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let app = Router::new().route("/", get(index));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Listening on port {port}");
    axum::serve(listener, app).await?;

    Ok(())
}
