pub mod default_handler;
pub mod sse;
