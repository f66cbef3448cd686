//! Features - Vertical Feature Slices
//!
//! Each feature contains its controller and column definitions.

pub mod characters;
pub mod characters_infinite;
pub mod episodes;
pub mod search;

use crossbeam_channel::Sender;

use crate::error::Error;
use crate::states::UIEvent;

pub use search::SearchBox;

/// Send a UI event; a closed front-end is not an error
pub(crate) fn notify(events: &Sender<UIEvent>, event: UIEvent) {
    if events.send(event).is_err() {
        tracing::debug!("UI event receiver dropped");
    }
}

/// Toast a generic load failure; stale results are dropped silently
pub(crate) fn report_load_error(events: &Sender<UIEvent>, message: &str, error: &Error) {
    if error.is_superseded() {
        return;
    }
    tracing::error!(error = %error, "{message}");
    notify(events, UIEvent::error_toast(message));
}
