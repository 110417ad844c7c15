//! End-of-game scoring: cumulative counters, one-way achievements and the final tally.

mod achievements;
mod counters;
mod events;
mod manager;

pub use achievements::*;
pub use counters::*;
pub use events::*;
pub use manager::*;
