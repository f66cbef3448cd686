//! Characters Feature
//!
//! Every character loaded up front; search and sort run client-side.

mod columns;
mod controller;

pub use columns::character_columns;
pub use controller::CharactersController;
