pub mod competitor;
pub mod strategy;

pub use competitor::*;
pub use strategy::{Decision, Goal};
