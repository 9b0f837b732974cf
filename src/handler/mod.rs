//! Message handler module
//!
//! Routes inbound messages (`router`) and carries them over HTTP
//! (`transport`).

pub mod router;
pub mod transport;

// Re-export main entry points
pub use router::MessageRouter;
pub use transport::{exchange, handle_request};
