//! Characters (Infinite Scroll) Feature
//!
//! Characters fetched one API page per row block as the grid scrolls.

mod controller;

pub use controller::CharactersInfiniteController;
