//! Frozen wire contract with the companion script.
//!
//! Everything here must match what the companion expects byte for byte:
//! the reserved URL schemes it navigates to, the script commands injected
//! into the page and the callback-id format.
//!
//! # URL Schemes
//!
//! | URL | Meaning |
//! |-----|---------|
//! | `yy://return/<function>/<payload>` | Result for a pending callback |
//! | `yy://return/_fetchQueue/<json>` | Companion's queued messages |
//! | `yy://<anything else>` | Queue has messages, fetch them |

// ============================================================================
// Imports
// ============================================================================

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

use super::Message;
use super::escape::encode_script_literal;

// ============================================================================
// Constants
// ============================================================================

/// Scheme the companion navigates to when its queue is non-empty.
pub const OVERRIDE_SCHEME: &str = "yy://";

/// Prefix of URLs carrying a result for a pending callback.
pub const RETURN_DATA_PREFIX: &str = "yy://return/";

/// Prefix of the reply to [`FETCH_QUEUE_COMMAND`].
pub const FETCH_QUEUE_PREFIX: &str = "yy://return/_fetchQueue/";

/// Prefix of generated callback ids.
pub const CALLBACK_ID_PREFIX: &str = "JAVA_CB_";

/// Scheme for script executed through the host's URL loader.
pub const JAVASCRIPT_SCHEME: &str = "javascript:";

/// Asks the companion to return its queued outbound messages.
pub const FETCH_QUEUE_COMMAND: &str = "javascript:WebViewJavascriptBridge._fetchQueue();";

/// Prefix shared by all commands addressed to the companion object.
const BRIDGE_OBJECT_PREFIX: &str = "javascript:WebViewJavascriptBridge.";

/// Delivers one serialized message to the companion.
const HANDLE_MESSAGE_TEMPLATE: &str =
    "javascript:WebViewJavascriptBridge._handleMessageFromNative('$MESSAGE');";

/// Matches the call-argument tail of a companion command.
static CALL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*\);").expect("call suffix pattern is valid"));

// ============================================================================
// Callback Ids
// ============================================================================

/// Formats a callback id from a per-bridge counter and a timestamp.
#[must_use]
pub fn format_callback_id(counter: u64, millis: u128) -> String {
    format!("{CALLBACK_ID_PREFIX}{counter}_{millis}")
}

// ============================================================================
// Script Commands
// ============================================================================

/// Builds the command delivering `message` to the companion.
///
/// # Errors
///
/// Returns [`Error::Json`] if the message cannot be serialized.
pub fn handle_message_command(message: &Message) -> Result<String> {
    let json = message.to_json()?;
    Ok(HANDLE_MESSAGE_TEMPLATE.replace("$MESSAGE", &encode_script_literal(&json)))
}

/// Wraps arbitrary script code in the `javascript:` scheme.
#[must_use]
pub fn javascript_command(code: &str) -> String {
    format!("{JAVASCRIPT_SCHEME}{code}")
}

/// Extracts the companion function name from a command.
///
/// `javascript:WebViewJavascriptBridge._fetchQueue();` yields
/// `_fetchQueue`, the key under which the reply is correlated.
#[must_use]
pub fn parse_function_name(command: &str) -> String {
    let name = command.strip_prefix(BRIDGE_OBJECT_PREFIX).unwrap_or(command);
    CALL_SUFFIX.replace_all(name, "").into_owned()
}

// ============================================================================
// Intercepted URLs
// ============================================================================

/// Classification of a navigation intercepted from web content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    /// `yy://return/...`: a result for a pending callback.
    ReturnData,
    /// Any other `yy://` URL: flush request.
    Override,
    /// Regular navigation.
    Other,
}

impl UrlKind {
    /// Classifies an (already percent-decoded) URL.
    #[must_use]
    pub fn classify(url: &str) -> Self {
        if url.starts_with(RETURN_DATA_PREFIX) {
            Self::ReturnData
        } else if url.starts_with(OVERRIDE_SCHEME) {
            Self::Override
        } else {
            Self::Other
        }
    }

    /// Returns `true` if the bridge consumes this navigation.
    #[inline]
    #[must_use]
    pub fn is_reserved(self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// Function name and payload carried by a return-data URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnData<'a> {
    /// Key of the pending callback.
    pub function: &'a str,
    /// Payload, absent when the URL ends right after the function name.
    pub payload: Option<&'a str>,
}

/// Splits a return-data URL into function name and payload.
///
/// The function name runs up to the first `/`; everything after it is
/// the payload, slashes included. The fetch-queue reply always carries
/// its whole remainder as payload.
///
/// Returns `None` if `url` is not a return-data URL.
#[must_use]
pub fn parse_return_url(url: &str) -> Option<ReturnData<'_>> {
    let rest = url.strip_prefix(RETURN_DATA_PREFIX)?;

    Some(match rest.split_once('/') {
        Some((function, payload)) => ReturnData {
            function,
            payload: Some(payload),
        },
        None => ReturnData {
            function: rest,
            payload: None,
        },
    })
}

/// Percent-decodes an intercepted URL.
///
/// Stray `%` characters not followed by two hex digits are kept as-is
/// and `+` is not treated as a space.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the decoded bytes are not UTF-8.
pub fn decode_url(url: &str) -> Result<String> {
    urlencoding::decode(url)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| Error::decode(format!("intercepted URL is not UTF-8: {e}")))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_callback_id() {
        assert_eq!(format_callback_id(3, 1_700_000_000_123), "JAVA_CB_3_1700000000123");
    }

    #[test]
    fn test_handle_message_command() {
        let msg = Message::request(None, Some("ping".into()), Some("JAVA_CB_1_5".into()));
        let command = handle_message_command(&msg).expect("command");

        assert_eq!(
            command,
            r#"javascript:WebViewJavascriptBridge._handleMessageFromNative('{\"data\":\"ping\",\"callbackId\":\"JAVA_CB_1_5\"}');"#
        );
    }

    #[test]
    fn test_parse_function_name() {
        assert_eq!(parse_function_name(FETCH_QUEUE_COMMAND), "_fetchQueue");
        assert_eq!(
            parse_function_name("javascript:WebViewJavascriptBridge._handleMessageFromNative('{}');"),
            "_handleMessageFromNative"
        );
    }

    #[test]
    fn test_fetch_prefix_matches_command() {
        let name = parse_function_name(FETCH_QUEUE_COMMAND);
        assert_eq!(FETCH_QUEUE_PREFIX, format!("{RETURN_DATA_PREFIX}{name}/"));
    }

    #[test]
    fn test_classify() {
        assert_eq!(UrlKind::classify("yy://return/fn/data"), UrlKind::ReturnData);
        assert_eq!(UrlKind::classify("yy://__QUEUE_MESSAGE__/"), UrlKind::Override);
        assert_eq!(UrlKind::classify("https://example.com"), UrlKind::Other);
        assert!(UrlKind::Override.is_reserved());
        assert!(!UrlKind::Other.is_reserved());
    }

    #[test]
    fn test_parse_return_url() {
        let parsed = parse_return_url("yy://return/JAVA_CB_1_5/a/b").expect("return url");
        assert_eq!(parsed.function, "JAVA_CB_1_5");
        assert_eq!(parsed.payload, Some("a/b"));

        let bare = parse_return_url("yy://return/JAVA_CB_1_5").expect("return url");
        assert_eq!(bare.function, "JAVA_CB_1_5");
        assert_eq!(bare.payload, None);

        let queue = parse_return_url(r#"yy://return/_fetchQueue/[{"data":"x/y"}]"#)
            .expect("return url");
        assert_eq!(queue.function, "_fetchQueue");
        assert_eq!(queue.payload, Some(r#"[{"data":"x/y"}]"#));

        assert!(parse_return_url("yy://__QUEUE_MESSAGE__/").is_none());
    }

    #[test]
    fn test_decode_url() {
        assert_eq!(
            decode_url("yy://return/fn/%7B%22a%22%3A1%7D").expect("decode"),
            r#"yy://return/fn/{"a":1}"#
        );
        assert_eq!(decode_url("yy://return/fn/1+1").expect("decode"), "yy://return/fn/1+1");
    }

    #[test]
    fn test_decode_url_rejects_invalid_utf8() {
        assert!(decode_url("yy://return/fn/%FF%FE").is_err());
    }
}
