//! Bridge core: pending callbacks, handler registry and startup buffer.
//!
//! # Lifecycle
//!
//! ```text
//! Buffering ──on_page_finished()──► Live
//! ```
//!
//! While buffering, every outbound message is held in the startup
//! buffer. [`Bridge::on_page_finished`] injects the companion script,
//! replays the buffer in insertion order and retires it; from then on
//! messages are dispatched immediately.
//!
//! # Inbound Flow
//!
//! 1. Web content navigates to `yy://...` (override scheme)
//! 2. The bridge executes the fetch-queue command and registers the
//!    reply under `_fetchQueue`
//! 3. Web content navigates to `yy://return/_fetchQueue/<json>`
//! 4. Responses complete pending callbacks; requests go to handlers

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use rustc_hash::FxHashMap;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::host::HostBinding;
use crate::identifiers::{CallbackId, CallbackIdGenerator};
use crate::protocol::wire::{self, UrlKind};
use crate::protocol::{Message, MessageKind};

use super::builder::BridgeBuilder;
use super::handle::{BridgeCommand, BridgeHandle};
use super::handler::{BridgeHandler, Responder, ResponseCallback};

// ============================================================================
// Types
// ============================================================================

/// Entry in the pending callback table.
enum PendingCallback {
    /// Native caller awaiting a response from web content.
    Native(ResponseCallback),
    /// Reply to the fetch-queue command.
    FetchQueue,
}

/// Pending callbacks keyed by callback id.
type PendingTable = FxHashMap<CallbackId, PendingCallback>;

/// Named handlers.
type HandlerRegistry = FxHashMap<String, Box<dyn BridgeHandler>>;

// ============================================================================
// BridgeState
// ============================================================================

/// Delivery mode of a bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    /// Page not finished loading; sends are buffered.
    Buffering,
    /// Page ready; sends dispatch immediately.
    Live,
}

// ============================================================================
// Bridge
// ============================================================================

/// Native side of the web-view message bridge.
///
/// One bridge serves one hosted web-content session. It is not `Send`:
/// it lives on the context that owns the web view, and all table
/// mutation and script execution happen there. Other threads talk to it
/// through a [`BridgeHandle`].
///
/// None of the send operations report errors. Outcomes reach the caller
/// only through the paired callback, and only on success.
pub struct Bridge<H: HostBinding> {
    /// Web view adapter.
    host: H,
    /// Name of the companion script asset.
    companion_asset: String,
    /// Callbacks awaiting a response.
    pending: PendingTable,
    /// Named handlers for web requests.
    handlers: HandlerRegistry,
    /// Handler for requests without a handler name.
    default_handler: Option<Box<dyn BridgeHandler>>,
    /// Messages sent before the page finished loading. `None` once live.
    startup: Option<Vec<Message>>,
    /// Callback id source.
    ids: CallbackIdGenerator,
    /// Sender cloned into handles and responders.
    command_tx: mpsc::UnboundedSender<BridgeCommand>,
    /// Commands posted from handles.
    command_rx: mpsc::UnboundedReceiver<BridgeCommand>,
}

// ============================================================================
// Construction
// ============================================================================

impl<H: HostBinding> Bridge<H> {
    /// Creates a bridge with the default companion asset and
    /// [`DefaultHandler`](super::DefaultHandler).
    #[must_use]
    pub fn new(host: H) -> Self {
        BridgeBuilder::new().build(host)
    }

    /// Returns a builder for a customized bridge.
    #[inline]
    #[must_use]
    pub fn builder() -> BridgeBuilder {
        BridgeBuilder::new()
    }

    pub(crate) fn from_parts(
        host: H,
        companion_asset: String,
        handlers: HandlerRegistry,
        default_handler: Option<Box<dyn BridgeHandler>>,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        Self {
            host,
            companion_asset,
            pending: PendingTable::default(),
            handlers,
            default_handler,
            startup: Some(Vec::new()),
            ids: CallbackIdGenerator::new(),
            command_tx,
            command_rx,
        }
    }

    /// Returns a handle for posting work from other threads.
    #[must_use]
    pub fn handle(&self) -> BridgeHandle {
        BridgeHandle::new(self.command_tx.clone())
    }
}

// ============================================================================
// Handler Registry
// ============================================================================

impl<H: HostBinding> Bridge<H> {
    /// Registers a handler for requests naming `name`.
    ///
    /// Replaces any handler previously registered under that name.
    pub fn register_handler(
        &mut self,
        name: impl Into<String>,
        handler: impl BridgeHandler + 'static,
    ) {
        let name = name.into();
        debug!(handler = %name, "Registering handler");
        self.handlers.insert(name, Box::new(handler));
    }

    /// Removes the handler registered under `name`, if any.
    pub fn unregister_handler(&mut self, name: &str) {
        if self.handlers.remove(name).is_some() {
            debug!(handler = %name, "Unregistered handler");
        }
    }

    /// Replaces the handler for requests without a handler name.
    pub fn set_default_handler(&mut self, handler: impl BridgeHandler + 'static) {
        self.default_handler = Some(Box::new(handler));
    }

    /// Removes the default handler; unnamed requests are then ignored.
    pub fn clear_default_handler(&mut self) {
        self.default_handler = None;
    }

    /// Returns `true` if a handler is registered under `name`.
    #[inline]
    #[must_use]
    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of named handlers.
    #[inline]
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

// ============================================================================
// Send Path
// ============================================================================

impl<H: HostBinding> Bridge<H> {
    /// Sends a fire-and-forget message to the default web handler.
    pub fn send_to_web(&mut self, data: impl Into<String>) {
        self.do_send(None, Some(data.into()), None);
    }

    /// Sends a message to the default web handler; `callback` receives
    /// the response.
    pub fn send_to_web_with_callback<F>(&mut self, data: impl Into<String>, callback: F)
    where
        F: FnOnce(Option<String>) + 'static,
    {
        self.do_send(None, Some(data.into()), Some(Box::new(callback)));
    }

    /// Calls the web handler registered under `handler_name`; `callback`
    /// receives the response.
    pub fn call_handler<F>(&mut self, handler_name: &str, data: impl Into<String>, callback: F)
    where
        F: FnOnce(Option<String>) + 'static,
    {
        self.do_send(Some(handler_name), Some(data.into()), Some(Box::new(callback)));
    }

    /// Calls a named web handler without expecting a response.
    pub fn notify_handler(&mut self, handler_name: &str, data: impl Into<String>) {
        self.do_send(Some(handler_name), Some(data.into()), None);
    }

    /// Answers a request previously received from web content.
    pub fn respond(&mut self, response_id: CallbackId, data: Option<String>) {
        trace!(response_id = %response_id, "Queueing response");
        self.queue_message(Message::response(response_id, data));
    }

    /// Executes arbitrary script code in the hosted content.
    ///
    /// Bypasses the message queue and the startup buffer.
    pub fn evaluate(&self, code: &str) {
        self.host.execute_script(&wire::javascript_command(code));
    }

    fn do_send(
        &mut self,
        handler_name: Option<&str>,
        data: Option<String>,
        callback: Option<ResponseCallback>,
    ) {
        let callback_id = callback.map(|callback| {
            let id = self.ids.next_id();
            self.pending.insert(id.clone(), PendingCallback::Native(callback));
            id
        });

        trace!(
            handler = handler_name.unwrap_or_default(),
            callback_id = ?callback_id,
            "Queueing message"
        );

        self.queue_message(Message::request(handler_name, data, callback_id));
    }

    fn queue_message(&mut self, message: Message) {
        match self.startup.as_mut() {
            Some(buffer) => buffer.push(message),
            None => self.dispatch_message(&message),
        }
    }

    fn dispatch_message(&self, message: &Message) {
        match wire::handle_message_command(message) {
            Ok(command) => {
                trace!(command_len = command.len(), "Dispatching message");
                self.host.execute_script(&command);
            }
            Err(e) => warn!(error = %e, "Failed to serialize message"),
        }
    }
}

// ============================================================================
// Host Hooks
// ============================================================================

impl<H: HostBinding> Bridge<H> {
    /// Signals that the hosted page finished loading.
    ///
    /// Injects the companion script, then replays and retires the startup
    /// buffer. Later calls re-inject the script but replay nothing.
    pub fn on_page_finished(&mut self) {
        self.inject_companion();

        if let Some(buffer) = self.startup.take() {
            debug!(buffered = buffer.len(), "Page finished, replaying startup buffer");
            for message in &buffer {
                self.dispatch_message(message);
            }
        }
    }

    /// Inspects a navigation from web content.
    ///
    /// Returns `true` if the URL belongs to the bridge and the navigation
    /// must not proceed.
    pub fn should_override_url_loading(&mut self, url: &str) -> bool {
        let url = match wire::decode_url(url) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(error = %e, "Using undecoded URL");
                url.to_string()
            }
        };

        match UrlKind::classify(&url) {
            UrlKind::ReturnData => {
                self.handle_return_data(&url);
                true
            }
            UrlKind::Override => {
                self.flush_message_queue();
                true
            }
            UrlKind::Other => false,
        }
    }

    fn inject_companion(&self) {
        match self.host.host_context().read_asset(&self.companion_asset) {
            Ok(script) => self.host.execute_script(&wire::javascript_command(&script)),
            Err(e) => warn!(error = %e, "Companion script not injected"),
        }
    }
}

// ============================================================================
// Inbound Path
// ============================================================================

impl<H: HostBinding> Bridge<H> {
    /// Asks the companion for its queued messages.
    fn flush_message_queue(&mut self) {
        self.host.execute_script(wire::FETCH_QUEUE_COMMAND);
        let key = CallbackId::from(wire::parse_function_name(wire::FETCH_QUEUE_COMMAND));
        self.pending.insert(key, PendingCallback::FetchQueue);
    }

    fn handle_return_data(&mut self, url: &str) {
        let Some(ret) = wire::parse_return_url(url) else {
            return;
        };

        let id = CallbackId::from(ret.function);
        let payload = ret.payload.map(str::to_string);
        self.complete(&id, payload);
    }

    /// Consumes the pending entry for `id`. Unknown ids are ignored.
    fn complete(&mut self, id: &CallbackId, payload: Option<String>) {
        match self.pending.remove(id) {
            Some(PendingCallback::Native(callback)) => {
                trace!(callback_id = %id, "Completing callback");
                callback(payload);
            }
            Some(PendingCallback::FetchQueue) => self.process_queue(payload.as_deref()),
            None => trace!(callback_id = %id, "No pending callback"),
        }
    }

    fn process_queue(&mut self, payload: Option<&str>) {
        let messages = match Message::parse_list(payload.unwrap_or_default()) {
            Ok(messages) => messages,
            Err(e) => {
                warn!(error = %e, "Discarding fetched queue");
                return;
            }
        };

        trace!(count = messages.len(), "Processing fetched queue");

        for message in messages {
            match (message.kind(), message.response_id().cloned()) {
                (MessageKind::Response, Some(response_id)) => {
                    let data = message.response_data().map(str::to_string);
                    self.complete(&response_id, data);
                }
                _ => self.deliver_request(message),
            }
        }

        // Drains all posted work, including responses handlers gave
        // synchronously, so they go out with this flush.
        self.run_pending();
    }

    fn deliver_request(&self, message: Message) {
        let (handler_name, data, callback_id) = message.into_request_parts();
        let responder = Responder::new(callback_id, self.handle());

        let handler = match handler_name.as_deref() {
            Some(name) => self.handlers.get(name),
            None => self.default_handler.as_ref(),
        };

        match handler {
            Some(handler) => handler.handle(data, responder),
            None => trace!(handler = ?handler_name, "No handler for request"),
        }
    }
}

// ============================================================================
// Posted Commands
// ============================================================================

impl<H: HostBinding> Bridge<H> {
    /// Applies every command posted through handles, without waiting.
    ///
    /// Returns the number of commands applied.
    pub fn run_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.command_rx.try_recv() {
            self.apply(command);
            applied += 1;
        }
        applied
    }

    /// Waits for at least one posted command, then applies everything
    /// queued.
    ///
    /// The bridge keeps a sender of its own, so this never observes a
    /// closed channel; drive it from the owning context's event loop.
    pub async fn tick(&mut self) {
        if let Some(command) = self.command_rx.recv().await {
            self.apply(command);
        }
        self.run_pending();
    }

    fn apply(&mut self, command: BridgeCommand) {
        match command {
            BridgeCommand::Send {
                handler_name,
                data,
                callback,
            } => {
                let callback = callback.map(|cb| cb as ResponseCallback);
                self.do_send(handler_name.as_deref(), data, callback);
            }
            BridgeCommand::Respond { response_id, data } => self.respond(response_id, data),
        }
    }
}

// ============================================================================
// Introspection
// ============================================================================

impl<H: HostBinding> Bridge<H> {
    /// Current delivery mode.
    #[inline]
    #[must_use]
    pub fn state(&self) -> BridgeState {
        if self.startup.is_some() {
            BridgeState::Buffering
        } else {
            BridgeState::Live
        }
    }

    /// Number of callbacks awaiting a response.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Number of messages held in the startup buffer.
    #[inline]
    #[must_use]
    pub fn buffered_count(&self) -> usize {
        self.startup.as_ref().map_or(0, Vec::len)
    }

    /// The host binding.
    #[inline]
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: HostBinding> fmt::Debug for Bridge<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("state", &self.state())
            .field("companion_asset", &self.companion_asset)
            .field("pending", &self.pending.len())
            .field("handlers", &self.handlers.len())
            .field("buffered", &self.buffered_count())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
