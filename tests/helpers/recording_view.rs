//! A `ConsoleView` that records every call made to it.

use alert_console::core::ConsoleView;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    List(Vec<String>),
    Sending(bool),
    Result(String),
    Message(String),
    Notify(String),
}

#[derive(Debug, Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
    message: Mutex<String>,
    items: Mutex<Vec<String>>,
    result: Mutex<Option<String>>,
    sending: Mutex<bool>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// A view whose message field already holds `message`.
    pub fn with_message(message: &str) -> Self {
        let view = Self::default();
        *view.message.lock().unwrap() = message.to_string();
        view
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Notify(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn sending_events(&self) -> Vec<bool> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Sending(sending) => Some(sending),
                _ => None,
            })
            .collect()
    }

    pub fn items(&self) -> Vec<String> {
        self.items.lock().unwrap().clone()
    }

    pub fn result(&self) -> Option<String> {
        self.result.lock().unwrap().clone()
    }

    pub fn is_sending(&self) -> bool {
        *self.sending.lock().unwrap()
    }

    fn record(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl ConsoleView for RecordingView {
    fn render_list(&self, items: &[String]) {
        *self.items.lock().unwrap() = items.to_vec();
        self.record(ViewEvent::List(items.to_vec()));
    }

    fn set_sending_state(&self, sending: bool) {
        *self.sending.lock().unwrap() = sending;
        self.record(ViewEvent::Sending(sending));
    }

    fn set_result(&self, text: &str) {
        *self.result.lock().unwrap() = Some(text.to_string());
        self.record(ViewEvent::Result(text.to_string()));
    }

    fn set_message(&self, text: &str) {
        *self.message.lock().unwrap() = text.to_string();
        self.record(ViewEvent::Message(text.to_string()));
    }

    fn message(&self) -> String {
        self.message.lock().unwrap().clone()
    }

    fn notify(&self, text: &str) {
        self.record(ViewEvent::Notify(text.to_string()));
    }
}
