//! Request handler module
//!
//! The request pipeline: routing dispatch, the introspection endpoints, and
//! asset-bundle serving with the entry-document fallback.

pub mod api;
pub mod assets;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
