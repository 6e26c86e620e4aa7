// cardwatch/src/protocol/status.rs

use std::fmt;

/// A PC/SC service status code, always held as an unsigned 32-bit value.
///
/// Service implementations disagree on the signedness of the return type
/// (Windows returns a signed LONG, so 0x8010000C surfaces as -2146435060).
/// Every code entering the crate passes through [`Status::from_raw`], which
/// masks to 32 bits, so comparisons are uniform everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status(u32);

impl Status {
    /// Operation completed.
    pub const SUCCESS: Self = Self(0);
    /// The status wait elapsed without a change.
    pub const TIMEOUT: Self = Self(0x8010_000A);
    /// No card is present on the reader.
    pub const NO_SMARTCARD: Self = Self(0x8010_000C);
    /// A supplied parameter could not be marshalled.
    pub const INVALID_PARAMETER: Self = Self(0x8010_0004);
    /// The smart-card resource manager is not running.
    pub const NO_SERVICE: Self = Self(0x8010_001D);
    /// No reader is connected to the system.
    pub const NO_READERS: Self = Self(0x8010_002E);
    /// The card was removed mid-operation.
    pub const REMOVED_CARD: Self = Self(0x8010_0069);

    /// Normalize a raw return value to its unsigned 32-bit bit pattern.
    pub const fn from_raw(raw: i64) -> Self {
        Self((raw as u64 & 0xFFFF_FFFF) as u32)
    }

    /// The normalized code.
    pub const fn code(self) -> u32 {
        self.0
    }

    /// Code 0.
    pub const fn is_success(self) -> bool {
        self.0 == Self::SUCCESS.0
    }

    /// One of the two "no card / card removed" codes. Expected while the
    /// reader is empty; recoverable by polling again.
    pub const fn is_no_card(self) -> bool {
        self.0 == Self::NO_SMARTCARD.0 || self.0 == Self::REMOVED_CARD.0
    }

    /// The neutral "nothing changed within the bound" outcome of a status
    /// wait.
    pub const fn is_timeout(self) -> bool {
        self.0 == Self::TIMEOUT.0
    }

    /// Ok on success, Err carrying the code otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_success() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
