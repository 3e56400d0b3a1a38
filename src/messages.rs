/// WebSocket message types for client-server communication
use serde::{Deserialize, Serialize};

use crate::control::ControlState;
use crate::engine::ViewEngine;
use crate::record::Record;
use crate::sort::SortConfig;

/// Messages sent from client to server
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Replace the session's records
    Load { records: Vec<Record> },

    /// Column header click
    Sort { key: String },

    /// Back to source order
    ClearSort,

    /// Replace the search text
    Search { term: String },

    /// Jump to a page
    Page { page: usize },

    NextPage,

    PrevPage,

    /// Request the current view
    Query,
}

/// Messages sent from server to client
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// The current page of the view
    View {
        records: Vec<Record>,
        total_pages: usize,
        total_matches: usize,
        current_page: usize,
        items_per_page: usize,
        sort: Option<SortConfig>,
        search: String,
        /// First and last row shown, 1-based
        showing: (usize, usize),
        has_prev: bool,
        has_next: bool,
    },

    /// Error occurred
    Error { message: String },
}

impl ServerMessage {
    /// Snapshot an engine's current view
    pub fn view(engine: &ViewEngine) -> Self {
        let view = engine.view();
        let control: &ControlState = engine.control();
        let (first, last, _) = view.showing();

        ServerMessage::View {
            records: view.to_owned_records(),
            total_pages: view.total_pages,
            total_matches: view.total_matches,
            current_page: view.current_page,
            items_per_page: view.items_per_page,
            sort: control.sort().cloned(),
            search: control.search().as_str().to_string(),
            showing: (first, last),
            has_prev: view.has_prev(),
            has_next: view.has_next(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }
}

/// Apply one client message to a session's engine and build the reply
pub fn handle_message(engine: &mut ViewEngine, msg: ClientMessage) -> ServerMessage {
    let result = match msg {
        ClientMessage::Load { records } => {
            engine.load(records);
            Ok(())
        }
        ClientMessage::Sort { key } => {
            engine.set_sort_key(&key);
            Ok(())
        }
        ClientMessage::ClearSort => {
            engine.clear_sort();
            Ok(())
        }
        ClientMessage::Search { term } => {
            engine.set_search(term);
            Ok(())
        }
        ClientMessage::Page { page } => engine.set_page(page),
        ClientMessage::NextPage => engine.next_page(),
        ClientMessage::PrevPage => engine.prev_page(),
        ClientMessage::Query => Ok(()),
    };

    match result {
        Ok(()) => ServerMessage::view(engine),
        Err(e) => ServerMessage::error(e.to_string()),
    }
}
