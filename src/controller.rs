//! The Alert Console controller.
//!
//! Drives the two request/response flows (loading subscribers and sending an
//! alert) against an [`AlertBackend`] and reflects their outcomes into a
//! [`ConsoleView`]. The controller holds no state of its own; everything the
//! operator sees lives in the view.

use crate::core::{AlertBackend, AlertRequest, AlertResponse, ConsoleView};
use crate::errors::BackendError;
use crate::formatting::{format_response, subscriber_items};
use std::sync::Arc;
use tracing::{error, info, instrument};

pub const FETCH_FAILED_NOTICE: &str = "Could not fetch subscribers. Is the backend running?";
pub const EMPTY_MESSAGE_NOTICE: &str = "Add a message first";
pub const SEND_FAILED_NOTICE: &str = "Failed to send alert";

/// Label of the send control while idle.
pub const SEND_LABEL: &str = "Send to all subscribers";
/// Label of the send control while a request is in flight.
pub const SENDING_LABEL: &str = "Sending...";

/// How a send attempt ended when it did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// The message field was empty; nothing was sent.
    EmptyMessage,
    /// The backend answered with this body.
    Delivered(AlertResponse),
}

/// Holds the send control in its sending state for as long as it lives.
///
/// The control is restored in `Drop`, so every exit path releases it exactly
/// once, including a cancelled future.
pub struct SendingGuard {
    view: Arc<dyn ConsoleView>,
}

impl SendingGuard {
    pub fn engage(view: Arc<dyn ConsoleView>) -> Self {
        view.set_sending_state(true);
        Self { view }
    }
}

impl Drop for SendingGuard {
    fn drop(&mut self) {
        self.view.set_sending_state(false);
    }
}

/// An activated send: the captured message and the control it holds.
pub struct PendingSend {
    request: AlertRequest,
    _sending: SendingGuard,
}

impl PendingSend {
    pub fn message(&self) -> &str {
        &self.request.message
    }
}

pub struct AlertConsole {
    backend: Arc<dyn AlertBackend>,
    view: Arc<dyn ConsoleView>,
}

impl AlertConsole {
    pub fn new(backend: Arc<dyn AlertBackend>, view: Arc<dyn ConsoleView>) -> Self {
        Self { backend, view }
    }

    pub fn view(&self) -> &Arc<dyn ConsoleView> {
        &self.view
    }

    /// Fetches the subscriber list and replaces the rendered list with it.
    ///
    /// On failure the operator is notified and the previous list stays on
    /// screen. The error is returned for callers that want an exit status.
    #[instrument(skip(self))]
    pub async fn load_subscribers(&self) -> Result<usize, BackendError> {
        match self.backend.fetch_subscribers().await {
            Ok(list) => {
                let items = subscriber_items(&list.subscribers);
                self.view.render_list(&items);
                info!(count = list.subscribers.len(), "Rendered subscriber list");
                Ok(list.subscribers.len())
            }
            Err(e) => {
                error!(error = %e, kind = ?e.kind(), "Could not fetch subscribers");
                self.view.notify(FETCH_FAILED_NOTICE);
                Err(e)
            }
        }
    }

    /// Activates the send control.
    ///
    /// Captures the message field and enters the sending state before
    /// returning, so nothing typed afterwards can change what is sent.
    /// Returns `None` (after notifying) when the field is empty.
    pub fn begin_send(&self) -> Option<PendingSend> {
        let message = self.view.message();
        if message.is_empty() {
            self.view.notify(EMPTY_MESSAGE_NOTICE);
            return None;
        }
        Some(PendingSend {
            request: AlertRequest { message },
            _sending: SendingGuard::engage(self.view.clone()),
        })
    }

    /// Submits an activated send and renders its outcome.
    ///
    /// The send control is released when `pending` is dropped at the end.
    #[instrument(skip_all)]
    pub async fn complete_send(&self, pending: PendingSend) -> Result<SendOutcome, BackendError> {
        match self.backend.send_alert(&pending.request).await {
            Ok(response) => {
                self.view.set_result(&format_response(&response));
                self.view.set_message("");
                info!("Alert submitted");
                Ok(SendOutcome::Delivered(response))
            }
            Err(e) => {
                error!(error = %e, kind = ?e.kind(), "Failed to send alert");
                self.view.notify(SEND_FAILED_NOTICE);
                Err(e)
            }
        }
    }

    /// Broadcasts the current contents of the message field.
    pub async fn send_alert(&self) -> Result<SendOutcome, BackendError> {
        match self.begin_send() {
            Some(pending) => self.complete_send(pending).await,
            None => Ok(SendOutcome::EmptyMessage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FlagView {
        transitions: Mutex<Vec<bool>>,
    }

    impl ConsoleView for FlagView {
        fn render_list(&self, _items: &[String]) {}
        fn set_sending_state(&self, sending: bool) {
            self.transitions.lock().unwrap().push(sending);
        }
        fn set_result(&self, _text: &str) {}
        fn set_message(&self, _text: &str) {}
        fn message(&self) -> String {
            String::new()
        }
        fn notify(&self, _text: &str) {}
    }

    #[test]
    fn test_guard_restores_state_on_drop() {
        let view = Arc::new(FlagView::default());
        {
            let _guard = SendingGuard::engage(view.clone());
            assert_eq!(*view.transitions.lock().unwrap(), vec![true]);
        }
        assert_eq!(*view.transitions.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn test_guard_restores_state_on_early_return() {
        fn bail(view: Arc<FlagView>, fail: bool) -> Result<(), &'static str> {
            let _guard = SendingGuard::engage(view);
            if fail {
                return Err("boom");
            }
            Ok(())
        }

        let view = Arc::new(FlagView::default());
        assert!(bail(view.clone(), true).is_err());
        assert_eq!(*view.transitions.lock().unwrap(), vec![true, false]);
    }
}
