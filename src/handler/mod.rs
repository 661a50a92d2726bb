//! Request handler module
//!
//! Routing dispatch plus one module per endpoint:
//! echo, delay, chunked streaming and multipart ingestion.

pub mod chunked;
pub mod delay;
pub mod echo;
pub mod multipart;
pub mod rejection;
pub mod router;
pub mod snapshot;

// Re-export main entry point
pub use router::handle_request;
