use anyhow::bail;
use serde_json::Value;
use std::time::Duration;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

pub async fn handle(base_url: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let url = format!("{}/health", base_url.trim_end_matches('/'));
    let client = reqwest::Client::new();

    let response = client.get(&url).timeout(Duration::from_secs(5)).send().await?;
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if !status.is_success() {
        bail!("{} reported {}: {}", url, status, body);
    }
    output_success(output_format, &format!("{} is healthy", base_url), body)
}
