//! Handlers for requests arriving from web content.
//!
//! A handler receives the request payload and a [`Responder`]. The
//! responder is a plain value: the request's callback id plus a handle to
//! the owning bridge. It can be answered immediately or moved elsewhere
//! (another thread included) and answered later.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use tracing::trace;

use crate::identifiers::CallbackId;

use super::handle::BridgeHandle;

// ============================================================================
// Constants
// ============================================================================

/// Payload returned by [`DefaultHandler`].
pub const DEFAULT_RESPONSE: &str = "DefaultHandler response data";

// ============================================================================
// Types
// ============================================================================

/// One-shot callback receiving a response payload.
pub type ResponseCallback = Box<dyn FnOnce(Option<String>)>;

// ============================================================================
// BridgeHandler
// ============================================================================

/// Processes inbound requests from web content.
///
/// Implemented for any `Fn(Option<String>, Responder)` closure.
pub trait BridgeHandler {
    /// Handles one request.
    fn handle(&self, data: Option<String>, responder: Responder);
}

impl<F> BridgeHandler for F
where
    F: Fn(Option<String>, Responder),
{
    fn handle(&self, data: Option<String>, responder: Responder) {
        self(data, responder);
    }
}

/// Handler installed for unnamed requests unless replaced.
///
/// Answers every request with [`DEFAULT_RESPONSE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHandler;

impl BridgeHandler for DefaultHandler {
    fn handle(&self, data: Option<String>, responder: Responder) {
        trace!(?data, "Default handler invoked");
        responder.respond(DEFAULT_RESPONSE);
    }
}

// ============================================================================
// Responder
// ============================================================================

/// Response sink for one inbound request.
///
/// Responding re-enters the owning bridge's send path with a response
/// message. Requests sent without a callback id get a responder whose
/// `respond` is a no-op.
#[derive(Clone)]
pub struct Responder {
    callback_id: Option<CallbackId>,
    bridge: BridgeHandle,
}

impl Responder {
    pub(crate) fn new(callback_id: Option<CallbackId>, bridge: BridgeHandle) -> Self {
        Self {
            callback_id,
            bridge,
        }
    }

    /// Callback id of the request, if it expects a response.
    #[inline]
    #[must_use]
    pub fn callback_id(&self) -> Option<&CallbackId> {
        self.callback_id.as_ref()
    }

    /// Returns `true` if web content is waiting for a response.
    #[inline]
    #[must_use]
    pub fn expects_response(&self) -> bool {
        self.callback_id.is_some()
    }

    /// Sends `data` back to the requesting web content.
    pub fn respond(self, data: impl Into<String>) {
        self.respond_with(Some(data.into()));
    }

    /// Sends a response that may carry no payload.
    pub fn respond_with(self, data: Option<String>) {
        match self.callback_id {
            Some(id) => self.bridge.respond(id, data),
            None => trace!("Response dropped: request carried no callback id"),
        }
    }
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Responder")
            .field("callback_id", &self.callback_id)
            .finish_non_exhaustive()
    }
}
