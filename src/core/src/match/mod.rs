pub mod engine;
pub mod error;
pub mod events;
pub mod fixture;
pub mod result;
pub mod service;
pub mod setup;
pub mod squad;
pub mod statistics;

pub use engine::*;
pub use error::*;
pub use events::*;
pub use fixture::*;
pub use result::*;
pub use service::*;
pub use setup::*;
pub use squad::*;
pub use statistics::*;
