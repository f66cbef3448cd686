//! Service Layer
//!
//! The service layer provides the paged query API behind the loaders and the
//! runtime the async work executes on.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     PageSource (trait)                       │
//! │  ┌─────────────────┐  ┌───────────────┐  ┌──────────────┐  │
//! │  │ CharacterSource │  │ EpisodeSource │  │MockPageSource│  │
//! │  └────────┬────────┘  └───────┬───────┘  └──────────────┘  │
//! │           └──── GraphQlClient ┘                              │
//! └─────────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼ Page<T>
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Loaders (eager / block data source)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod graphql;
pub mod mock;
mod page_source;
mod runtime;

pub use graphql::{CharacterSource, EpisodeSource, GraphQlClient};
pub use page_source::*;
pub use runtime::*;
