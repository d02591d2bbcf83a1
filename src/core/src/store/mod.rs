pub mod error;
pub mod history;
pub mod matches;
pub mod roster;
pub mod sessions;
pub mod standings;

pub use error::*;
pub use history::*;
pub use matches::*;
pub use roster::*;
pub use sessions::*;
pub use standings::*;
