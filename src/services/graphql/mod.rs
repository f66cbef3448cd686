//! GraphQL access to the public dataset.

mod client;
pub mod queries;
mod source;

pub use client::GraphQlClient;
pub use source::{CharacterSource, EpisodeSource};
