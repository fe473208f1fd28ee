//! Message envelope exchanged with the companion script.
//!
//! # Format
//!
//! ```json
//! {
//!   "data": "payload",
//!   "handlerName": "submitFromWeb",
//!   "callbackId": "JAVA_CB_1_1700000000000"
//! }
//! ```
//!
//! A response carries `responseId` and `responseData` instead. Absent
//! fields are omitted on the wire.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::identifiers::CallbackId;

// ============================================================================
// Message
// ============================================================================

/// Envelope carrying a payload between native code and web content.
///
/// A message is exactly one of:
///
/// - a notification (no `callbackId`, no `responseId`)
/// - a request expecting a response (`callbackId` set)
/// - a response to a prior request (`responseId` set)
///
/// The constructors never set both correlation fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    data: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_string"
    )]
    handler_name: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_id"
    )]
    callback_id: Option<CallbackId>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_id"
    )]
    response_id: Option<CallbackId>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    response_data: Option<String>,
}

/// Role of a message in the request/response exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Fire-and-forget.
    Notification,
    /// Expects a response correlated by `callbackId`.
    Request,
    /// Answers a prior request identified by `responseId`.
    Response,
}

// ============================================================================
// Constructors
// ============================================================================

impl Message {
    /// Creates an outbound message, optionally targeting a named handler
    /// and optionally expecting a response.
    ///
    /// Empty handler names and payloads are treated as absent.
    #[must_use]
    pub fn request(
        handler_name: Option<&str>,
        data: Option<String>,
        callback_id: Option<CallbackId>,
    ) -> Self {
        Self {
            data: data.filter(|d| !d.is_empty()),
            handler_name: handler_name.filter(|n| !n.is_empty()).map(str::to_string),
            callback_id,
            response_id: None,
            response_data: None,
        }
    }

    /// Creates a response to the request identified by `response_id`.
    #[must_use]
    pub fn response(response_id: CallbackId, response_data: Option<String>) -> Self {
        Self {
            data: None,
            handler_name: None,
            callback_id: None,
            response_id: Some(response_id),
            response_data,
        }
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl Message {
    /// Request payload.
    #[inline]
    #[must_use]
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// Target handler name.
    #[inline]
    #[must_use]
    pub fn handler_name(&self) -> Option<&str> {
        self.handler_name.as_deref()
    }

    /// Correlation id the sender expects a response for.
    #[inline]
    #[must_use]
    pub fn callback_id(&self) -> Option<&CallbackId> {
        self.callback_id.as_ref()
    }

    /// Id of the request this message answers.
    #[inline]
    #[must_use]
    pub fn response_id(&self) -> Option<&CallbackId> {
        self.response_id.as_ref()
    }

    /// Response payload.
    #[inline]
    #[must_use]
    pub fn response_data(&self) -> Option<&str> {
        self.response_data.as_deref()
    }

    /// Classifies the message. A `responseId` wins over a `callbackId`
    /// should a malformed inbound message carry both.
    #[must_use]
    pub fn kind(&self) -> MessageKind {
        if self.response_id.is_some() {
            MessageKind::Response
        } else if self.callback_id.is_some() {
            MessageKind::Request
        } else {
            MessageKind::Notification
        }
    }

    /// Splits a request into its parts, dropping response fields.
    pub(crate) fn into_request_parts(self) -> (Option<String>, Option<String>, Option<CallbackId>) {
        (self.handler_name, self.data, self.callback_id)
    }
}

// ============================================================================
// Serialization
// ============================================================================

impl Message {
    /// Serializes the message to its wire JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a single message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the input is not a message object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses the companion's queued outbound messages.
    ///
    /// An empty or blank payload is an empty queue.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] if the payload is not a JSON list of
    /// message objects.
    pub fn parse_list(json: &str) -> Result<Vec<Self>> {
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(json)
            .map_err(|e| Error::protocol(format!("invalid message queue: {e}")))
    }
}

// ============================================================================
// Deserialization Helpers
// ============================================================================

/// Accepts any JSON value for a string field; non-strings keep their JSON
/// text. The companion passes handler results through untouched, so
/// numbers and objects show up here.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn non_empty_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.filter(|s| !s.is_empty()))
}

fn non_empty_id<'de, D>(deserializer: D) -> std::result::Result<Option<CallbackId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(non_empty_string(deserializer)?.map(CallbackId::from))
}

// ============================================================================
// Tests
// ============================================================================
