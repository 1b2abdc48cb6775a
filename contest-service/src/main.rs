use std::net::SocketAddr;

use contest_ledger::{
    ContestLedger, SimulatedSettlement, SqliteStore, SystemClock, UuidReceiptIds,
};
use contest_service::state::AppState;
use contest_service::utils::{env_nonempty, env_parse};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting contest ledger service");

    // A configured database path makes the ledger survive restarts;
    // without one it runs demo-style in memory.
    let ledger = match env_nonempty("CONTEST_DB_PATH") {
        Some(db_path) => {
            let store = SqliteStore::open(&db_path)?;
            ContestLedger::new(
                Box::new(store),
                Box::new(SystemClock),
                Box::new(UuidReceiptIds),
                Box::new(SimulatedSettlement),
            )?
        }
        None => {
            info!("CONTEST_DB_PATH not set, using in-memory store");
            ContestLedger::in_memory()
        }
    };

    let operator_token = env_nonempty("OPERATOR_TOKEN");
    if operator_token.is_none() {
        info!("OPERATOR_TOKEN not set, operator routes disabled");
    }

    let app = contest_service::app(AppState::new(ledger, operator_token));

    // Run the server
    let port: u16 = env_parse("PORT", 3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
