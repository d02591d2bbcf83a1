pub mod ranking;
pub mod season;
pub mod table;

pub use ranking::*;
pub use season::*;
pub use table::*;
