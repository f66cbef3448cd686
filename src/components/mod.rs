//! Components - Reusable Grid Components
//!
//! Row models and renderers that don't depend on services or do I/O.

pub mod data_table;
