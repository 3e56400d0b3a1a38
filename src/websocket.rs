/// WebSocket sessions driving a view engine
///
/// Every connection owns its own `ViewEngine`, seeded with the server's
/// records. The browser sends control changes; each one is answered with the
/// recomputed view of that session only.
use actix::prelude::*;
use actix_web_actors::ws;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::EngineConfig;
use crate::engine::ViewEngine;
use crate::messages::{handle_message, ClientMessage, ServerMessage};
use crate::record::Record;

/// How often heartbeat pings are sent
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
/// How long before lack of client response causes a timeout
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared, read-only state for all connections
pub struct AppState {
    pub config: EngineConfig,
    /// Records every new session starts with
    pub seed: Arc<Vec<Record>>,
}

impl AppState {
    pub fn new(config: EngineConfig, seed: Vec<Record>) -> Self {
        Self {
            config,
            seed: Arc::new(seed),
        }
    }

    /// A fresh engine for a new session
    pub fn new_engine(&self) -> ViewEngine {
        ViewEngine::with_records(self.config.clone(), self.seed.as_ref().clone())
    }
}

/// WebSocket connection actor
pub struct TableWebSocket {
    hb: Instant,
    engine: ViewEngine,
}

impl TableWebSocket {
    pub fn new(state: &AppState) -> Self {
        Self {
            hb: Instant::now(),
            engine: state.new_engine(),
        }
    }

    fn hb(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
            if Instant::now().duration_since(act.hb) > CLIENT_TIMEOUT {
                log::warn!("WebSocket client heartbeat failed, disconnecting");
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }

    fn send(&self, msg: &ServerMessage, ctx: &mut ws::WebsocketContext<Self>) {
        match serde_json::to_string(msg) {
            Ok(text) => ctx.text(text),
            Err(e) => log::error!("failed to encode server message: {}", e),
        }
    }
}

impl Actor for TableWebSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.hb(ctx);
        log::debug!("session started with {} records", self.engine.buffer().len());
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for TableWebSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                self.hb = Instant::now();
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {
                self.hb = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                let reply = match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => handle_message(&mut self.engine, client_msg),
                    Err(e) => ServerMessage::error(format!("Invalid message format: {}", e)),
                };
                self.send(&reply, ctx);
            }
            Ok(ws::Message::Binary(_)) => {
                log::warn!("Unexpected binary message");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            _ => ctx.stop(),
        }
    }
}
