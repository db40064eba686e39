//! Standalone cookie/timestamp token generation
//!
//! Cookies are opaque correlation tokens stamped into outgoing frames. The
//! server can generate one independently of anything received: a local-time
//! timestamp rendered through a caller-supplied strftime pattern. This is a
//! freestanding utility — frame validation never touches it — consumed by
//! [`crate::builder::MessageBuilder::stamp_cookie`] when originating
//! messages.

use chrono::format::{Item, StrftimeItems};
use chrono::Local;

use msp_types::protocol_constants::DEFAULT_COOKIE_PATTERN;

use crate::error::CookiePatternError;

/// Render the current local time through `pattern` (strftime syntax).
///
/// Patterns with unrecognized conversion specifiers are rejected up front
/// rather than producing garbage octets in the token.
pub fn generate_cookie(pattern: &str) -> Result<Vec<u8>, CookiePatternError> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(CookiePatternError {
            pattern: pattern.to_owned(),
        });
    }

    let stamp = Local::now().format_with_items(items.into_iter()).to_string();
    Ok(stamp.into_bytes())
}

/// [`generate_cookie`] with the conventional `%y%m%d%H%M%S` pattern.
pub fn generate_default_cookie() -> Vec<u8> {
    // The default pattern is a compile-time constant known to be valid.
    generate_cookie(DEFAULT_COOKIE_PATTERN).unwrap_or_default()
}
