//! Request handler module
//!
//! Routes requests to the glossary endpoints (`/terms`, `/report_error`),
//! the entry page and static assets.

pub mod api;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
