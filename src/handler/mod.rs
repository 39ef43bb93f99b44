//! Request handler module
//!
//! Responsible for request routing dispatch: the navigation API and the
//! static site that hosts the navigation page.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
