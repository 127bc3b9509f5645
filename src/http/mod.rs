//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the routing and asset-serving code:
//! content-type mapping, cache validation, range parsing, and response
//! builders for the status codes the server produces.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used items
pub use range::parse_range_header;
pub use response::{
    build_304_response, build_405_response, build_413_response, build_416_response,
    build_options_response, build_server_error_response,
};
