// cardwatch/src/types.rs

use crate::constants::{PROTOCOL_T0, PROTOCOL_T1, STATE_UNAWARE};

/// Card UID - Newtype over the uppercase hexadecimal rendering.
///
/// The length is driven by the card type (4, 7 or 10 bytes are common for
/// ISO 14443 cards), so no fixed width is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Uid(String);

impl Uid {
    /// Build a Uid from raw response data bytes.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(crate::utils::bytes_to_hex_upper(data))
    }

    /// The uppercase hexadecimal form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the zero-length UID a `90 00`-only response decodes to.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Negotiated card transmission protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Protocol {
    /// Character-oriented T=0.
    #[display(fmt = "T=0")]
    T0,
    /// Block-oriented T=1.
    #[display(fmt = "T=1")]
    T1,
}

impl Protocol {
    /// Decode the protocol the service reported after a connect.
    pub fn from_mask(raw: u32) -> Option<Self> {
        match raw {
            PROTOCOL_T0 => Some(Self::T0),
            PROTOCOL_T1 => Some(Self::T1),
            _ => None,
        }
    }

    /// The protocol's bit in a preferred-protocols mask.
    pub const fn as_mask(self) -> u32 {
        match self {
            Self::T0 => PROTOCOL_T0,
            Self::T1 => PROTOCOL_T1,
        }
    }
}

/// Outcome of one status poll, as handed to the downstream consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CardPresence {
    /// A card sits on the reader.
    #[display(fmt = "present")]
    Present,
    /// The reader is known but holds no card.
    #[display(fmt = "empty")]
    Empty,
    /// The reader vanished; its identity was forgotten and the next poll
    /// re-enumerates.
    #[display(fmt = "unavailable")]
    Unavailable,
}

/// Watch state for a single reader across status polls.
///
/// An owned value replaced wholesale after each poll. The service only
/// reports bits describing the current snapshot, so `current_state` must be
/// fed back with the previously observed `event_state` to receive deltas
/// rather than repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderWatch {
    /// Name of the watched reader.
    pub reader: String,
    /// What the caller last observed; input to the next status wait.
    pub current_state: u32,
    /// What the service reported on the last status wait.
    pub event_state: u32,
    /// ATR bytes captured with the last report; empty when no card was seen.
    pub atr: Vec<u8>,
}

impl ReaderWatch {
    /// Fresh watch state with no prior observation.
    pub fn unaware(reader: impl Into<String>) -> Self {
        Self {
            reader: reader.into(),
            current_state: STATE_UNAWARE,
            event_state: STATE_UNAWARE,
            atr: Vec::new(),
        }
    }

    /// Feed the last report back as the next poll's current-state.
    pub fn rearm(mut self) -> Self {
        self.current_state = self.event_state;
        self
    }

    /// Test a bit of the last reported event-state.
    pub fn event_has(&self, bit: u32) -> bool {
        self.event_state & bit != 0
    }
}
