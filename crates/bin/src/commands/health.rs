//! Health check command - probes `GET /health` on a running Roster server.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::HealthArgs;
use crate::output::{OutputFormat, print_json};

#[derive(Debug, Serialize, Deserialize)]
struct HealthReport {
    status: String,
    backend: String,
}

/// Resolve the health endpoint from a base URL or a full `/health` URL
fn health_url(base: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.ends_with("/health") {
        base.to_string()
    } else {
        format!("{base}/health")
    }
}

/// Run the health check command
///
/// Exits with status 1 when the server is unreachable or reports anything but healthy.
pub async fn run(args: &HealthArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let url = health_url(&args.url);
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()?;

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            eprintln!("unhealthy: failed to connect to {url}: {e}");
            std::process::exit(1);
        }
    };

    if !response.status().is_success() {
        eprintln!(
            "unhealthy: server returned HTTP status {}",
            response.status()
        );
        std::process::exit(1);
    }

    let report: HealthReport = response.json().await?;
    if report.status != "healthy" {
        eprintln!("unhealthy: server returned status {}", report.status);
        std::process::exit(1);
    }

    match format {
        OutputFormat::Human => println!("healthy ({} backend)", report.backend),
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(())
}
