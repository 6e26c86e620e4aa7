// cardwatch/src/constants.rs
//! PC/SC wire constants used across the crate.
//!
//! Values follow the WinSCard / pcsclite API; the two implementations agree
//! on everything listed here.

/// Resource-manager scope: user session.
pub const SCOPE_USER: u32 = 0x0000;

/// Share mode: shared access to the reader.
pub const SHARE_SHARED: u32 = 0x0002;

/// Protocol bit for T=0.
pub const PROTOCOL_T0: u32 = 0x0001;
/// Protocol bit for T=1.
pub const PROTOCOL_T1: u32 = 0x0002;
/// Request mask accepting whichever of T=0/T=1 the service negotiates.
pub const PROTOCOL_ANY: u32 = PROTOCOL_T0 | PROTOCOL_T1;

/// Disconnect disposition: leave the card as-is.
pub const LEAVE_CARD: u32 = 0x0000;

/// Reader state: no prior observation; forces the next status wait to
/// report the current snapshot.
pub const STATE_UNAWARE: u32 = 0x0000;
/// Reader state: state differs from the fed-back current-state.
pub const STATE_CHANGED: u32 = 0x0002;
/// Reader state: reader cannot be used.
pub const STATE_UNAVAILABLE: u32 = 0x0008;
/// Reader state: no card in the reader.
pub const STATE_EMPTY: u32 = 0x0010;
/// Reader state: a card is present.
pub const STATE_PRESENT: u32 = 0x0020;
/// Reader state: the card is held exclusively by another session.
pub const STATE_EXCLUSIVE: u32 = 0x0080;
/// Reader state: the card is in use by another session.
pub const STATE_INUSE: u32 = 0x0100;
/// Reader state: the card is mute.
pub const STATE_MUTE: u32 = 0x0200;

/// Status-wait timeout value meaning "block forever".
pub const WAIT_FOREVER: u32 = 0xFFFF_FFFF;

/// Receive buffer size for a transmit exchange. Large enough for the
/// longest short-APDU response (256 data bytes plus the status word).
pub const RECV_BUFFER_LEN: usize = 258;
