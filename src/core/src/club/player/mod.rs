pub mod builder;
pub mod injury;
pub mod player;
pub mod position;
pub mod skills;

pub use builder::*;
pub use injury::*;
pub use player::*;
pub use position::*;
pub use skills::*;
