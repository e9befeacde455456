//! A `ConsoleView` that renders to a terminal.
//!
//! The view keeps the state a page would keep in its elements (the list, the
//! message field, the send control and the result area) and prints every
//! change to its writer.

use crate::controller::{SENDING_LABEL, SEND_LABEL};
use crate::core::ConsoleView;
use std::io::Write;
use std::sync::{Mutex, MutexGuard};
use tracing::warn;

struct ViewState {
    items: Vec<String>,
    message: String,
    result: Option<String>,
    send_label: &'static str,
    send_enabled: bool,
    writer: Box<dyn Write + Send>,
}

impl ViewState {
    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.writer, "{}", text).and_then(|_| self.writer.flush()) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}

fn list_block(items: &[String]) -> String {
    let mut out = String::from("Subscribers:");
    for item in items {
        out.push_str("\n  • ");
        out.push_str(item);
    }
    out
}

pub struct TerminalView {
    state: Mutex<ViewState>,
}

impl TerminalView {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            state: Mutex::new(ViewState {
                items: Vec::new(),
                message: String::new(),
                result: None,
                send_label: SEND_LABEL,
                send_enabled: true,
                writer: Box::new(writer),
            }),
        }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    // A poisoned lock only means another operation panicked mid-render; the
    // state itself is still usable.
    fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_send_enabled(&self) -> bool {
        self.lock().send_enabled
    }

    pub fn send_label(&self) -> &'static str {
        self.lock().send_label
    }

    pub fn items(&self) -> Vec<String> {
        self.lock().items.clone()
    }

    pub fn result(&self) -> Option<String> {
        self.lock().result.clone()
    }

    /// Prints a line that is not part of any element, such as help text.
    pub fn print(&self, text: &str) {
        self.lock().emit(text);
    }

    /// Prints every element's current contents.
    pub fn show(&self) {
        let mut state = self.lock();
        let mut out = list_block(&state.items);
        out.push_str(&format!("\nMessage: {:?}", state.message));
        out.push_str(&format!(
            "\n[{}]{}",
            state.send_label,
            if state.send_enabled { "" } else { " (disabled)" }
        ));
        if let Some(result) = &state.result {
            out.push_str("\nResult:\n");
            out.push_str(result);
        }
        state.emit(&out);
    }
}

impl ConsoleView for TerminalView {
    fn render_list(&self, items: &[String]) {
        let mut state = self.lock();
        state.items = items.to_vec();
        state.emit(&list_block(items));
    }

    fn set_sending_state(&self, sending: bool) {
        let mut state = self.lock();
        state.send_enabled = !sending;
        state.send_label = if sending { SENDING_LABEL } else { SEND_LABEL };
        let label = state.send_label;
        state.emit(&format!("[{}]", label));
    }

    fn set_result(&self, text: &str) {
        let mut state = self.lock();
        state.result = Some(text.to_string());
        state.emit(&format!("Result:\n{}", text));
    }

    fn set_message(&self, text: &str) {
        self.lock().message = text.to_string();
    }

    fn message(&self) -> String {
        self.lock().message.clone()
    }

    fn notify(&self, text: &str) {
        self.lock().emit(&format!("!! {}", text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::SharedBuffer;

    #[test]
    fn test_render_list_replaces_items() {
        let buffer = SharedBuffer::default();
        let view = TerminalView::new(buffer.clone());

        view.render_list(&["+1 — n/a".to_string(), "+2 — Pune".to_string()]);
        view.render_list(&["No subscribers yet.".to_string()]);

        assert_eq!(view.items(), vec!["No subscribers yet.".to_string()]);
        assert_eq!(
            buffer.contents(),
            "Subscribers:\n  • +1 — n/a\n  • +2 — Pune\nSubscribers:\n  • No subscribers yet.\n"
        );
    }

    #[test]
    fn test_sending_state_toggles_label_and_enabled() {
        let buffer = SharedBuffer::default();
        let view = TerminalView::new(buffer.clone());
        assert!(view.is_send_enabled());
        assert_eq!(view.send_label(), "Send to all subscribers");

        view.set_sending_state(true);
        assert!(!view.is_send_enabled());
        assert_eq!(view.send_label(), "Sending...");

        view.set_sending_state(false);
        assert!(view.is_send_enabled());
        assert_eq!(view.send_label(), "Send to all subscribers");
        assert_eq!(buffer.contents(), "[Sending...]\n[Send to all subscribers]\n");
    }

    #[test]
    fn test_message_field_is_silent() {
        let buffer = SharedBuffer::default();
        let view = TerminalView::new(buffer.clone());

        view.set_message("Heat wave advisory");

        assert_eq!(view.message(), "Heat wave advisory");
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn test_notify_and_result_are_printed() {
        let buffer = SharedBuffer::default();
        let view = TerminalView::new(buffer.clone());

        view.notify("Add a message first");
        view.set_result("{\n  \"sent\": 1\n}");

        assert_eq!(view.result().as_deref(), Some("{\n  \"sent\": 1\n}"));
        assert_eq!(
            buffer.contents(),
            "!! Add a message first\nResult:\n{\n  \"sent\": 1\n}\n"
        );
    }
}
