//! HTTP protocol layer module
//!
//! Response bodies, response builders and request decoding helpers,
//! kept apart from the handlers that use them.

pub mod body;
pub mod form;
pub mod response;

// Re-export commonly used types
pub use body::ResponseBody;
pub use response::{
    build_404_response, build_405_response, build_json_response, build_response,
    build_options_response, build_streaming_response, build_text_response,
};
