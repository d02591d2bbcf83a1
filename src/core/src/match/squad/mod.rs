pub mod formation;
pub mod module;
pub mod selector;

pub use formation::*;
pub use module::*;
pub use selector::*;
