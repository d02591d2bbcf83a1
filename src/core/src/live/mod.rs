pub mod phase;
pub mod publisher;
pub mod session;
pub mod tracker;

pub use phase::*;
pub use publisher::*;
pub use session::*;
pub use tracker::*;
