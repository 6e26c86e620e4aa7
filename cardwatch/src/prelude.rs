// cardwatch/src/prelude.rs
//! Convenience re-exports for typical hosts.

pub use crate::binding::{BindingResult, MockBinding, PcscBinding, RawCard, RawContext};
#[cfg(feature = "system")]
pub use crate::binding::SystemBinding;
pub use crate::protocol::{ApduResponse, Status, decode_uid, encode_get_uid};
#[cfg(feature = "system")]
pub use crate::reader::read_uid_once;
pub use crate::reader::{CardWatcher, Connection, Context, read_uid_once_with};
pub use crate::{CardPresence, Error, Protocol, ReaderWatch, Result, Uid};

// Re-export small utilities for convenience
pub use crate::utils::{
    DEFAULT_POLL_TIMEOUT_MS, bytes_to_hex_spaced, bytes_to_hex_upper, default_poll_timeout, ms,
    parse_hex,
};
