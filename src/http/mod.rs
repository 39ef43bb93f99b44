//! HTTP protocol layer module
//!
//! Protocol helpers shared by the static site and the navigation API,
//! decoupled from either.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use range::{resolve_range, RangeOutcome};
pub use response::{
    build_304_response, build_404_response, build_405_response, build_416_response,
    build_options_response,
};
