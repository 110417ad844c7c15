//! Capture of `tracing` events as typed, column-oriented tables.
//!
//! Simulation code emits flat events with an explicit target; the target names the table and
//! each field becomes a column.
//!
//! ```ignore
//! tracing::info!(target: "price_update", material = "copper", multiplier = 1.2);
//!
//! instrument::reset();
//! instrument::install();
//! // ... run ...
//! let tables = instrument::take();
//! let multipliers = tables.get("price_update").and_then(|t| t.f64s("multiplier"));
//! ```

mod frame;
mod run;
mod subscriber;
mod table;

pub use frame::save_parquet;
pub use run::RunRecorder;
pub use subscriber::{CaptureSubscriber, install, reset, take, with_tables};
pub use table::{Column, Table, Tables, Value};
