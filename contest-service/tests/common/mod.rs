use std::time::Duration;

use contest_ledger::ContestLedger;
use contest_service::state::AppState;
use reqwest::Client;
use tokio::time::sleep;

pub const OPERATOR_TOKEN: &str = "test-operator-token";

/// Serve the app in-process on an ephemeral port and return its base
/// url once it answers health checks.
pub async fn spawn_app() -> anyhow::Result<String> {
    let state = AppState::new(
        ContestLedger::in_memory(),
        Some(OPERATOR_TOKEN.to_string()),
    );
    let app = contest_service::app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });

    let base = format!("http://{}", addr);
    wait_ready(&base, 2_000).await?;
    Ok(base)
}

/// Poll /healthz until the server responds OK or timeout.
pub async fn wait_ready(base: &str, timeout_ms: u64) -> anyhow::Result<()> {
    let client = Client::new();
    let mut waited = 0u64;
    loop {
        if waited >= timeout_ms {
            anyhow::bail!("server not ready after {}ms", timeout_ms);
        }
        if let Ok(resp) = client.get(format!("{}/healthz", base)).send().await {
            if resp.status().is_success() {
                return Ok(());
            }
        }
        sleep(Duration::from_millis(50)).await;
        waited += 50;
    }
}
