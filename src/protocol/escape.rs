//! Script-literal escaping for messages delivered to the companion.
//!
//! Serialized messages are embedded in a single-quoted JavaScript string
//! inside a `javascript:` URL. Two layers apply on the way in:
//!
//! 1. The host percent-decodes the URL, so every `%` is written as `%25`.
//!    The sequences the companion itself emits when encoding braces and
//!    quotes (`%7B`, `%7D`, `%22`) therefore arrive as `%257B`, `%257D`,
//!    `%2522`.
//! 2. The JavaScript parser unescapes the string literal, so every
//!    backslash is doubled and both quote characters are escaped. JSON
//!    escapes such as `\n` therefore reach `JSON.parse` intact.
//!
//! [`decode_script_literal`] reverses both layers the way the host and
//! the companion do.

// ============================================================================
// Imports
// ============================================================================

use crate::error::{Error, Result};

// ============================================================================
// Encoder
// ============================================================================

/// Escapes serialized message JSON for embedding in the inbound command.
#[must_use]
pub fn encode_script_literal(json: &str) -> String {
    let mut out = String::with_capacity(json.len() + json.len() / 8);

    for c in json.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '%' => out.push_str("%25"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }

    out
}

// ============================================================================
// Decoder
// ============================================================================

/// Reverses [`encode_script_literal`].
///
/// # Errors
///
/// Returns [`Error::Decode`] if the percent-decoded text is not UTF-8,
/// on a dangling backslash or on a malformed `\u` escape.
pub fn decode_script_literal(literal: &str) -> Result<String> {
    let unpercented = urlencoding::decode(literal)
        .map_err(|e| Error::decode(format!("script literal is not UTF-8: {e}")))?;

    let mut out = String::with_capacity(unpercented.len());
    let mut chars = unpercented.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| Error::decode(format!("invalid \\u escape: {hex}")))?;
                out.push(code);
            }
            // Any other escaped character stands for itself.
            Some(other) => out.push(other),
            None => return Err(Error::decode("dangling backslash")),
        }
    }

    Ok(out)
}

// ============================================================================
// Tests
// ============================================================================
