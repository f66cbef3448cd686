//! Domain types: dataset records and paged query shapes.

mod character;
mod episode;
mod page;
mod record;

pub use character::*;
pub use episode::*;
pub use page::*;
pub use record::*;

use serde::{Deserialize, Serialize};

/// Reference to a nested record by id (only ids are queried)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: String,
}
