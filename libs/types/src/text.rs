//! Lossy rendering of wire octets at human-facing edges

/// Render arbitrary wire octets as text for note headers, acknowledgement
/// descriptions, and logs. Invalid UTF-8 is replaced, never rejected — a
/// hostile name must not be able to fail the error path itself.
pub fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
