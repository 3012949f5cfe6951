//! Hosts [`turno`] engines on tokio tasks.
//!
//! Each table owns one engine. Intents come in over an `mpsc` channel, engine
//! events fan out over a `broadcast` channel, and the engine's virtual timers
//! are driven from the tokio clock.

pub mod table;
pub mod tables;

pub use table::{join_table, run_table, spawn_table, EventSender, TableEvent, TableHandle};
pub use tables::{TableId, Tables};
