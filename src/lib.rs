/// DataTable - Sorted, Searched and Paginated Record Views
///
/// A view engine for tables of schema-agnostic records. Given the records of
/// one load cycle it derives the page of rows a table should show, and keeps
/// that page consistent as the user changes the sort column, the search text
/// or the page.
///
/// The pipeline is `sort -> filter -> page`, each stage a pure function of
/// its inputs. [`ViewEngine`] holds the current [`ControlState`] and caches
/// stage outputs on their inputs; [`derive_view`] computes the same result
/// from scratch.

pub mod error;
pub mod value;
pub mod record;
pub mod sort;
pub mod filter;
pub mod page;
pub mod control;
pub mod config;
pub mod engine;
pub mod messages;

pub use error::{ViewError, ViewResult};
pub use value::FieldValue;
pub use record::{Record, SourceBuffer};
pub use sort::{Collation, SortConfig, SortDirection};
pub use filter::SearchTerm;
pub use page::{PageSlice, PageState, DEFAULT_ITEMS_PER_PAGE};
pub use control::ControlState;
pub use config::EngineConfig;
pub use engine::{derive_view, DerivedView, StageStats, ViewEngine};

// WebSocket server modules - only when server feature is enabled
#[cfg(feature = "server")]
pub mod websocket;
#[cfg(feature = "server")]
pub mod server;
