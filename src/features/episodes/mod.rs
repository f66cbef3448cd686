//! Episodes Feature
//!
//! Episodes fetched block by block; the search box drives the filter model.

mod columns;
mod controller;

pub use columns::episode_columns;
pub use controller::EpisodesController;
