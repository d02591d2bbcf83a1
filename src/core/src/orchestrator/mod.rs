pub mod notifier;
pub mod outcome;
pub mod processor;
pub mod scheduler;

pub use notifier::*;
pub use outcome::*;
pub use processor::*;
pub use scheduler::*;
