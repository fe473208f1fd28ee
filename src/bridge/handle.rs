//! Thread-safe handle for posting work onto the bridge's owning context.
//!
//! [`Bridge`](super::Bridge) is bound to the context that constructed it.
//! Code running elsewhere holds a [`BridgeHandle`] instead: every call
//! posts a command onto an unbounded channel that the owning context
//! drains with [`Bridge::run_pending`](super::Bridge::run_pending) or
//! [`Bridge::tick`](super::Bridge::tick).

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use tokio::sync::mpsc;
use tracing::trace;

use crate::identifiers::CallbackId;

// ============================================================================
// Types
// ============================================================================

/// Callback posted from another thread.
pub(crate) type SendCallback = Box<dyn FnOnce(Option<String>) + Send>;

/// Work posted to the owning context.
pub(crate) enum BridgeCommand {
    /// Enqueue an outbound request or notification.
    Send {
        handler_name: Option<String>,
        data: Option<String>,
        callback: Option<SendCallback>,
    },
    /// Enqueue a response to a web request.
    Respond {
        response_id: CallbackId,
        data: Option<String>,
    },
}

// ============================================================================
// BridgeHandle
// ============================================================================

/// Cloneable, `Send` handle to a bridge.
///
/// Commands posted after the bridge was dropped are discarded.
#[derive(Clone)]
pub struct BridgeHandle {
    command_tx: mpsc::UnboundedSender<BridgeCommand>,
}

impl BridgeHandle {
    pub(crate) fn new(command_tx: mpsc::UnboundedSender<BridgeCommand>) -> Self {
        Self { command_tx }
    }

    /// Sends a fire-and-forget message to the default web handler.
    pub fn send_to_web(&self, data: impl Into<String>) {
        self.post(BridgeCommand::Send {
            handler_name: None,
            data: Some(data.into()),
            callback: None,
        });
    }

    /// Sends a message to the default web handler and awaits its response.
    pub fn send_to_web_with_callback<F>(&self, data: impl Into<String>, callback: F)
    where
        F: FnOnce(Option<String>) + Send + 'static,
    {
        self.post(BridgeCommand::Send {
            handler_name: None,
            data: Some(data.into()),
            callback: Some(Box::new(callback)),
        });
    }

    /// Calls a named web handler and awaits its response.
    pub fn call_handler<F>(
        &self,
        handler_name: impl Into<String>,
        data: impl Into<String>,
        callback: F,
    ) where
        F: FnOnce(Option<String>) + Send + 'static,
    {
        self.post(BridgeCommand::Send {
            handler_name: Some(handler_name.into()),
            data: Some(data.into()),
            callback: Some(Box::new(callback)),
        });
    }

    /// Calls a named web handler without expecting a response.
    pub fn notify_handler(&self, handler_name: impl Into<String>, data: impl Into<String>) {
        self.post(BridgeCommand::Send {
            handler_name: Some(handler_name.into()),
            data: Some(data.into()),
            callback: None,
        });
    }

    /// Answers the web request identified by `response_id`.
    pub fn respond(&self, response_id: CallbackId, data: Option<String>) {
        self.post(BridgeCommand::Respond { response_id, data });
    }

    /// Returns `true` once the bridge has been dropped.
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }

    fn post(&self, command: BridgeCommand) {
        if self.command_tx.send(command).is_err() {
            trace!("Bridge dropped, command discarded");
        }
    }
}

impl fmt::Debug for BridgeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeHandle")
            .field("closed", &self.is_closed())
            .finish()
    }
}
