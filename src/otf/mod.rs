//! Account-data collaborator: traits plus the HTTP-backed implementation

pub mod auth;
pub mod client;
pub mod session;

pub use client::{HttpConnector, HttpSession};
pub use session::{OtfConnector, OtfSession};
