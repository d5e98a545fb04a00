//! Lambda handlers and proxy-response helpers

pub mod handler;
pub mod hello;
pub mod helpers;

// Re-export the main handler for convenience
pub use handler::{AppState, function_handler as handler, respond};
