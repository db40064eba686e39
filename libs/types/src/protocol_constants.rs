//! Protocol-level constants for the message send wire format
//!
//! These values are part of the wire format itself and must stay consistent
//! across every implementation speaking the protocol.

/// Accepted protocol revision byte. The first octet of every request frame
/// must carry this value.
pub const PROTOCOL_REVISION: u8 = b'B';

/// Field delimiter on the wire. Request frames are NUL-separated.
pub const FIELD_DELIMITER: u8 = 0x00;

/// Exact number of delimiters a well-formed request frame contains.
pub const REQUIRED_DELIMITERS: usize = 7;

/// Number of delimited segments that carry meaning. Splitting on
/// [`FIELD_DELIMITER`] yields one more segment than [`REQUIRED_DELIMITERS`];
/// anything past the mapped segments is ignored.
pub const MAPPED_SEGMENTS: usize = 7;

/// Maximum request frame size. The protocol requires the total message
/// length to be under 512 octets.
pub const MAX_FRAME_SIZE: usize = 511;

/// Minimum request frame size: the revision byte plus seven empty
/// NUL-terminated fields. A connection cycle does not start processing
/// before this many octets have arrived.
pub const MIN_FRAME_SIZE: usize = 8;

/// Terminal-field value meaning "every terminal of the resolved user(s)".
pub const WILDCARD_TERMINAL: u8 = b'*';

/// Leading acknowledgement byte for a delivered message.
pub const ACK_SUCCESS: u8 = b'+';

/// Leading acknowledgement byte for a rejected message. Followed by a
/// NUL-terminated description of the failure.
pub const ACK_FAILURE: u8 = b'-';

/// Registered port of the message send protocol.
pub const MSP_PORT: u16 = 18;

/// How long a connection may sit without completing a message cycle before
/// the server closes it.
pub const IDLE_TIMEOUT_MS: u64 = 60_000;

/// Default strftime pattern for generated cookies.
pub const DEFAULT_COOKIE_PATTERN: &str = "%y%m%d%H%M%S";

/// Default column width notes are word-wrapped to before delivery.
pub const DEFAULT_NOTE_COLUMNS: usize = 60;

/// Character repeated to frame a delivered note.
pub const NOTE_BORDER: char = '*';
