//! A backend that replays queued responses and records what it was asked.

use super::recording_view::RecordingView;
use alert_console::core::{AlertBackend, AlertRequest, AlertResponse, SubscriberListResponse};
use alert_console::errors::BackendError;
use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use tokio::sync::Notify;

pub fn server_error(path: &str) -> BackendError {
    BackendError::Status {
        url: format!("http://localhost:5000{}", path),
        status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn parse_error(path: &str) -> BackendError {
    BackendError::Parse {
        url: format!("http://localhost:5000{}", path),
        source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
    }
}

#[derive(Default)]
pub struct ScriptedBackend {
    subscriber_replies: Mutex<VecDeque<Result<SubscriberListResponse, BackendError>>>,
    alert_replies: Mutex<VecDeque<Result<AlertResponse, BackendError>>>,
    pub fetch_calls: AtomicUsize,
    pub sent: Mutex<Vec<AlertRequest>>,
    /// Sending state of the watched view at the moment each alert arrived.
    pub sending_seen: Mutex<Vec<bool>>,
    watched_view: Option<Arc<RecordingView>>,
    send_gate: Option<Arc<Notify>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the view's sending state whenever an alert arrives.
    pub fn watching(mut self, view: Arc<RecordingView>) -> Self {
        self.watched_view = Some(view);
        self
    }

    /// Holds every alert request until `gate` is notified.
    pub fn with_send_gate(mut self, gate: Arc<Notify>) -> Self {
        self.send_gate = Some(gate);
        self
    }

    pub fn push_subscribers(&self, reply: Result<SubscriberListResponse, BackendError>) {
        self.subscriber_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_alert(&self, reply: Result<AlertResponse, BackendError>) {
        self.alert_replies.lock().unwrap().push_back(reply);
    }

    pub fn sent_messages(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.message.clone())
            .collect()
    }
}

#[async_trait]
impl AlertBackend for ScriptedBackend {
    async fn fetch_subscribers(&self) -> Result<SubscriberListResponse, BackendError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.subscriber_replies.lock().unwrap().pop_front();
        reply.unwrap_or_else(|| Ok(SubscriberListResponse::default()))
    }

    async fn send_alert(&self, request: &AlertRequest) -> Result<AlertResponse, BackendError> {
        self.sent.lock().unwrap().push(request.clone());
        if let Some(view) = &self.watched_view {
            self.sending_seen.lock().unwrap().push(view.is_sending());
        }
        if let Some(gate) = &self.send_gate {
            gate.notified().await;
        }
        let reply = self.alert_replies.lock().unwrap().pop_front();
        reply.unwrap_or_else(|| Ok(json!({ "status": "success" })))
    }
}
