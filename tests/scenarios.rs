//! End-to-end bridge scenarios driven through the public API.
//!
//! A scripted host records every command the bridge executes; the tests
//! play the companion's part by decoding delivered messages and
//! navigating to the reserved URLs.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;
use std::sync::mpsc as std_mpsc;
use std::thread;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use webview_bridge::protocol::decode_script_literal;
use webview_bridge::protocol::wire::FETCH_QUEUE_COMMAND;
use webview_bridge::{
    AssetDir, Bridge, BridgeState, HostBinding, HostContext, Message, MessageKind, Responder,
    StaticAssets,
};

// ============================================================================
// Fixtures
// ============================================================================

const DELIVERY_PREFIX: &str = "javascript:WebViewJavascriptBridge._handleMessageFromNative('";
const DELIVERY_SUFFIX: &str = "');";

static LOGGING: Once = Once::new();

fn init_logging() {
    LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("webview_bridge=trace"))
            .with_test_writer()
            .try_init();
    });
}

/// Host recording executed commands.
struct ScriptedHost<C> {
    commands: RefCell<Vec<String>>,
    context: C,
}

impl<C: HostContext> ScriptedHost<C> {
    fn new(context: C) -> Rc<Self> {
        Rc::new(Self {
            commands: RefCell::new(Vec::new()),
            context,
        })
    }

    fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }

    /// Messages delivered to the companion since the last call.
    fn take_delivered(&self) -> Result<Vec<Message>> {
        let commands = std::mem::take(&mut *self.commands.borrow_mut());

        commands
            .iter()
            .filter_map(|c| c.strip_prefix(DELIVERY_PREFIX))
            .map(|c| {
                let literal = c.strip_suffix(DELIVERY_SUFFIX).context("unterminated delivery")?;
                let json = decode_script_literal(literal)?;
                Ok(Message::from_json(&json)?)
            })
            .collect()
    }
}

impl<C: HostContext> HostBinding for ScriptedHost<C> {
    fn execute_script(&self, command: &str) {
        self.commands.borrow_mut().push(command.to_string());
    }

    fn host_context(&self) -> &dyn HostContext {
        &self.context
    }
}

fn companion() -> StaticAssets {
    StaticAssets::new().with_asset("WebViewJavascriptBridge.js", "window.bridgeReady = true;")
}

/// Plays the companion: signals its queue, then answers the fetch.
fn flush_from_web<H: HostBinding>(bridge: &mut Bridge<H>, queue: &[Message]) -> Result<()> {
    assert!(bridge.should_override_url_loading("yy://__QUEUE_MESSAGE__/"));
    let json = serde_json::to_string(queue)?;
    let url = format!("yy://return/_fetchQueue/{}", urlencoding::encode(&json));
    assert!(bridge.should_override_url_loading(&url));
    Ok(())
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_startup_buffer_then_round_trip() -> Result<()> {
    init_logging();

    let host = ScriptedHost::new(companion());
    let mut bridge = Bridge::new(Rc::clone(&host));

    let replies = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&replies);
    bridge.call_handler("functionInJs", "ping", move |reply| sink.borrow_mut().push(reply));
    bridge.send_to_web("hello");

    assert_eq!(bridge.state(), BridgeState::Buffering);
    assert!(host.commands().is_empty());

    bridge.on_page_finished();
    assert_eq!(bridge.state(), BridgeState::Live);
    assert_eq!(host.commands()[0], "javascript:window.bridgeReady = true;");

    let delivered = host.take_delivered()?;
    assert_eq!(delivered.len(), 2);
    assert_eq!(delivered[0].handler_name(), Some("functionInJs"));
    assert_eq!(delivered[0].data(), Some("ping"));
    assert_eq!(delivered[1].handler_name(), None);
    assert_eq!(delivered[1].data(), Some("hello"));

    let callback_id = delivered[0].callback_id().cloned().context("callback id")?;
    assert!(callback_id.as_str().starts_with("JAVA_CB_"));

    flush_from_web(&mut bridge, &[Message::response(callback_id.clone(), Some("pong".into()))])?;
    assert_eq!(*replies.borrow(), vec![Some("pong".to_string())]);

    // A duplicate response finds nothing pending.
    flush_from_web(&mut bridge, &[Message::response(callback_id, Some("again".into()))])?;
    assert_eq!(replies.borrow().len(), 1);
    assert_eq!(bridge.pending_count(), 0);

    Ok(())
}

#[test]
fn test_web_request_answered_by_handler() -> Result<()> {
    init_logging();

    let host = ScriptedHost::new(companion());
    let mut bridge = Bridge::new(Rc::clone(&host));
    bridge.register_handler("submitFromWeb", |data: Option<String>, responder: Responder| {
        responder.respond(format!("got {}", data.unwrap_or_default()));
    });
    bridge.on_page_finished();
    host.take_delivered()?;

    let request = Message::request(
        Some("submitFromWeb"),
        Some(r#"{"name":"it's \"quoted\""}"#.to_string()),
        Some("cb_1".into()),
    );
    flush_from_web(&mut bridge, &[request])?;

    assert!(host.commands().iter().any(|c| c == FETCH_QUEUE_COMMAND));

    let delivered = host.take_delivered()?;
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].kind(), MessageKind::Response);
    assert_eq!(delivered[0].response_id().map(|id| id.as_str()), Some("cb_1"));
    assert_eq!(
        delivered[0].response_data(),
        Some(r#"got {"name":"it's \"quoted\""}"#)
    );

    Ok(())
}

#[test]
fn test_default_handler_answers_unnamed_request() -> Result<()> {
    let host = ScriptedHost::new(companion());
    let mut bridge = Bridge::new(Rc::clone(&host));
    bridge.on_page_finished();
    host.take_delivered()?;

    flush_from_web(&mut bridge, &[Message::request(None, Some("x".into()), Some("cb_9".into()))])?;

    let delivered = host.take_delivered()?;
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].response_data(), Some(webview_bridge::bridge::DEFAULT_RESPONSE));

    Ok(())
}

#[test]
fn test_ordinary_navigation_passes_through() {
    let host = ScriptedHost::new(companion());
    let mut bridge = Bridge::new(Rc::clone(&host));

    assert!(!bridge.should_override_url_loading("https://example.com/index.html"));
    assert!(host.commands().is_empty());
}

#[test]
fn test_companion_loaded_from_asset_dir() -> Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("bridge.js"), "initBridge();")?;

    let host = ScriptedHost::new(AssetDir::new(dir.path()));
    let mut bridge = Bridge::<Rc<ScriptedHost<AssetDir>>>::builder()
        .companion_asset("bridge.js")
        .build(Rc::clone(&host));

    bridge.on_page_finished();

    assert_eq!(host.commands(), vec!["javascript:initBridge();".to_string()]);
    Ok(())
}

#[test]
fn test_worker_thread_calls_through_handle() -> Result<()> {
    init_logging();

    let host = ScriptedHost::new(companion());
    let mut bridge = Bridge::new(Rc::clone(&host));
    bridge.on_page_finished();
    host.take_delivered()?;

    let (reply_tx, reply_rx) = std_mpsc::channel();
    let handle = bridge.handle();

    thread::spawn(move || {
        handle.call_handler("functionInJs", "from worker", move |reply| {
            let _ = reply_tx.send(reply);
        });
    })
    .join()
    .map_err(|_| anyhow::anyhow!("worker panicked"))?;

    tokio_test::block_on(bridge.tick());

    let delivered = host.take_delivered()?;
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].data(), Some("from worker"));

    let callback_id = delivered[0].callback_id().cloned().context("callback id")?;
    flush_from_web(&mut bridge, &[Message::response(callback_id, Some("ack".into()))])?;

    assert_eq!(reply_rx.try_recv()?, Some("ack".to_string()));
    Ok(())
}
