//! Core domain types and service traits for the Alert Console
//!
//! This module defines the wire types exchanged with the backend and the
//! trait contracts that separate the controller from the HTTP transport and
//! from the rendering surface.

use crate::errors::BackendError;
use async_trait::async_trait;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A phone number with optional location metadata, owned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Subscriber {
    /// The subscriber's phone number, as stored by the backend
    pub phone_number: String,
    /// Free-form location, `null` or absent when unknown
    #[serde(default, deserialize_with = "scalar_location")]
    pub location: Option<String>,
}

/// Accepts any JSON scalar as a location. `false` and `0` count as unknown,
/// other numbers and `true` keep their JSON text.
fn scalar_location<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::Bool(true)) => Ok(Some("true".to_string())),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "location must be a string, number or boolean, got {}",
            other
        ))),
    }
}

impl Subscriber {
    /// Returns the location if it carries any text.
    pub fn known_location(&self) -> Option<&str> {
        self.location.as_deref().filter(|loc| !loc.is_empty())
    }
}

/// Body of `GET /api/subscribers`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SubscriberListResponse {
    pub subscribers: Vec<Subscriber>,
}

/// Body of `POST /api/alert`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertRequest {
    pub message: String,
}

/// Whatever JSON the backend answers an alert with. Never interpreted.
pub type AlertResponse = serde_json::Value;

// =============================================================================
// Service Traits
// =============================================================================

/// The remote collaborator that owns subscribers and delivers alerts.
#[async_trait]
pub trait AlertBackend: Send + Sync {
    /// Fetches the current subscriber list.
    ///
    /// # Returns
    /// * `Ok(SubscriberListResponse)` on a 2xx response with a valid body
    /// * `Err` on transport errors, non-2xx statuses and malformed bodies
    async fn fetch_subscribers(&self) -> Result<SubscriberListResponse, BackendError>;

    /// Submits an alert for broadcast.
    ///
    /// The HTTP status is not inspected: any response whose body parses as
    /// JSON is returned as-is.
    async fn send_alert(&self, request: &AlertRequest) -> Result<AlertResponse, BackendError>;
}

/// The rendering surface the controller drives.
///
/// Implementations are shared between concurrently running operations and
/// must handle their own interior mutability.
pub trait ConsoleView: Send + Sync {
    /// Replaces the whole subscriber list with `items`.
    fn render_list(&self, items: &[String]);

    /// Enters (`true`) or leaves (`false`) the sending state of the send control.
    fn set_sending_state(&self, sending: bool);

    /// Replaces the contents of the result area.
    fn set_result(&self, text: &str);

    /// Replaces the contents of the message field.
    fn set_message(&self, text: &str);

    /// Current contents of the message field.
    fn message(&self) -> String;

    /// Shows a notification the operator has to acknowledge.
    fn notify(&self, text: &str);
}
