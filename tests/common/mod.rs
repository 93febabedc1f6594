use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Inherit environment so the server sees DATABASE_URL (or loads it from .env)
        let child = Command::new(env!("CARGO_BIN_EXE_logo-studio-api"))
            .env("LOGO_API_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self { base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server on {} was not healthy within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Unwrap the success envelope, failing with the body on anything else.
pub async fn data(response: reqwest::Response, expected: StatusCode) -> Result<Value> {
    let status = response.status();
    let body = response.json::<Value>().await?;
    anyhow::ensure!(status == expected, "expected {}, got {}: {}", expected, status, body);
    anyhow::ensure!(body["success"] == true, "success flag false or missing: {}", body);
    Ok(body["data"].clone())
}
