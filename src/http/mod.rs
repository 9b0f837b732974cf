//! HTTP protocol layer module
//!
//! Body shaping for envelopes and response builders for the HTTP transport,
//! decoupled from the routing logic.

pub mod body;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_400_response, build_403_response, build_405_response, build_413_response,
    build_direct_response, build_envelope_response, build_health_response,
    build_no_reply_response, build_options_response,
};
