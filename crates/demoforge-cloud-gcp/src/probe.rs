//! Deployed-service verification probe

use demoforge_cloud::VerificationReport;
use std::time::Duration;

/// Bound on the whole probe request
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(20);

/// Single best-effort GET against the deployed service
///
/// Whatever happens (timeout, connection refused, unreadable body) ends up
/// in the report; this function cannot fail the caller.
pub async fn probe_url(url: &str) -> VerificationReport {
    let client = match reqwest::Client::builder().timeout(PROBE_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => return VerificationReport::failure(url, e.to_string()),
    };

    tracing::debug!("Probing {url}");
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            match response.text().await {
                Ok(body) => VerificationReport::received(url, status, &body),
                Err(e) => {
                    let mut report = VerificationReport::failure(url, e.to_string());
                    report.status = Some(status);
                    report
                }
            }
        }
        Err(e) => VerificationReport::failure(url, e.to_string()),
    }
}
