//! Request handling module
//!
//! Routing, rendering, and error translation for the three endpoints.

mod error;
pub mod render;
pub mod router;

pub use error::HandlerError;
pub use router::handle_request;
