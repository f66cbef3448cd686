//! Search Box
//!
//! Debounced search input shared by the grid pages. Keystrokes go in through
//! [`SearchBox::input`]; the page picks up the settled term with
//! [`SearchBox::take_applied`].

use crossbeam_channel::{Receiver, Sender};
use std::time::Duration;

use crate::helpers::Debouncer;

pub struct SearchBox {
    debouncer: Debouncer<String>,
    applied: Receiver<String>,
}

impl SearchBox {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx): (Sender<String>, Receiver<String>) = crossbeam_channel::unbounded();
        let debouncer = Debouncer::new(delay, move |term: String| {
            if tx.send(term).is_err() {
                tracing::debug!("Search box closed before term settled");
            }
        });
        Self {
            debouncer,
            applied: rx,
        }
    }

    /// Record the current input text
    pub fn input(&self, text: &str) {
        self.debouncer.call(text.to_string());
    }

    /// Whether a term is still inside the debounce window
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Latest settled term, if any settled since the last call
    pub fn take_applied(&self) -> Option<String> {
        self.applied.try_iter().last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_only_last_term_settles() {
        let search = SearchBox::new(Duration::from_millis(500));
        search.input("R");
        search.input("Ri");
        tokio::time::sleep(Duration::from_millis(200)).await;
        search.input("Rick");
        assert!(search.is_pending());
        assert_eq!(search.take_applied(), None);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(search.take_applied(), Some("Rick".to_string()));
        assert_eq!(search.take_applied(), None);
        assert!(!search.is_pending());
    }
}
