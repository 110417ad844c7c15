pub mod conditions;
pub mod manager;
pub mod player;
pub mod score;

pub use conditions::*;
pub use manager::*;
pub use player::*;
pub use score::*;
