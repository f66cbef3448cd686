//! Helper Utilities
//!
//! Common utilities used across the application.

mod debounce;
mod fs;

pub use debounce::*;
pub use fs::*;
