//! State Layer
//!
//! Persisted config, the mock session and the UI event bus types.
//!
//! ```text
//! Controller → UIEvent → crossbeam channel → Dashboard::drain_events → ToastLog
//! ```

mod app;
mod auth;
mod ui_event;

pub use app::*;
pub use auth::*;
pub use ui_event::*;
