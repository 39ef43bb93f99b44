//! Navigation document module
//!
//! The navigation document is an ordered list of categories, each holding an
//! ordered list of links. This module validates submitted documents,
//! sanitizes their icon markup, and persists them to disk.

pub mod sanitize;
pub mod store;
pub mod validator;

pub use store::NavigationStore;
pub use validator::validate;
