//! Routing module
//!
//! Resolves request paths to the reflector's fixed route table.

mod matcher;

pub use matcher::{match_route, Route};
