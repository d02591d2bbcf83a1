pub mod attendance;
pub mod config;
pub mod engine;
pub mod rating;
mod side;

pub use attendance::*;
pub use config::*;
pub use engine::*;
pub use rating::*;
