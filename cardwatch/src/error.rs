// cardwatch/src/error.rs

use thiserror::Error;

use crate::protocol::Status;

/// Crate-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    /// The PC/SC service could not be reached: the platform is unsupported
    /// or establishing the resource-manager context failed.
    #[error("smart-card subsystem unavailable: {0}")]
    SubsystemUnavailable(String),

    /// Reader enumeration returned an empty list.
    #[error("no smart-card reader found")]
    NoReaderFound,

    /// Connect reported one of the two "no card / card removed" codes.
    /// Expected while nothing sits on the reader; callers should poll,
    /// not alarm.
    #[error("no smart card present or card removed")]
    NoCardDetected,

    /// The card answered with a status word other than 0x9000.
    #[error("card rejected command: SW={sw1:02X}{sw2:02X}")]
    CardCommand {
        /// First status-word byte.
        sw1: u8,
        /// Second status-word byte.
        sw2: u8,
    },

    /// The response was too short to carry a status word.
    #[error("response shorter than a status word: {actual} byte(s)")]
    ShortResponse {
        /// Length of the offending response.
        actual: usize,
    },

    /// Any other non-zero service status code.
    #[error("smart-card operation failed: status {0}")]
    Runtime(Status),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
