mod events;
mod pricing;
mod trend;

pub use events::*;
pub use pricing::*;
pub use trend::*;
