/// DataTable WebSocket Server
///
/// Serves view-engine sessions over WebSocket. Records are seeded from the
/// JSON file named by `DATATABLE_SEED` (an array of objects); without it,
/// sessions start empty and clients send a `Load` message.

use datatable::server::run_server;
use datatable::websocket::AppState;
use datatable::{EngineConfig, SourceBuffer};
use std::io;

fn invalid_input(e: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get host and port from environment or use defaults
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .map_err(|_| invalid_input("PORT must be a number"))?;

    let config = EngineConfig::from_env().map_err(invalid_input)?;

    let seed = match std::env::var("DATATABLE_SEED") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)?;
            let buffer = SourceBuffer::from_json_str(&json).map_err(invalid_input)?;
            log::info!("seeded {} records from {}", buffer.len(), path);
            buffer.into_records()
        }
        Err(_) => Vec::new(),
    };

    run_server(&host, port, AppState::new(config, seed)).await
}
