pub mod clock;
pub mod random;

pub use clock::*;
pub use random::*;
