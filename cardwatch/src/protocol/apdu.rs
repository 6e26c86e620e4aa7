// cardwatch/src/protocol/apdu.rs

use crate::types::Uid;
use crate::{Error, Result};

/// The fixed GET-UID command: CLA 0xFF, INS 0xCA (GET DATA), P1 0x00,
/// P2 0x00, Le 0x00. Understood by contactless readers such as the ACR122U.
pub const GET_UID: [u8; 5] = [0xFF, 0xCA, 0x00, 0x00, 0x00];

/// First status-word byte of a successful exchange.
pub const SW1_OK: u8 = 0x90;
/// Second status-word byte of a successful exchange.
pub const SW2_OK: u8 = 0x00;

/// Encode the GET-UID command. Pure and constant across platforms.
pub const fn encode_get_uid() -> [u8; 5] {
    GET_UID
}

/// A decoded APDU response: data bytes followed by the two status-word
/// bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApduResponse {
    /// Response data, possibly empty.
    pub data: Vec<u8>,
    /// First status-word byte.
    pub sw1: u8,
    /// Second status-word byte.
    pub sw2: u8,
}

impl ApduResponse {
    /// Split raw response bytes into data and status word.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 2 {
            return Err(Error::ShortResponse {
                actual: bytes.len(),
            });
        }
        let (data, sw) = bytes.split_at(bytes.len() - 2);
        Ok(Self {
            data: data.to_vec(),
            sw1: sw[0],
            sw2: sw[1],
        })
    }

    /// True iff the status word is 0x9000.
    pub fn is_success(&self) -> bool {
        (self.sw1, self.sw2) == (SW1_OK, SW2_OK)
    }

    /// Apply the success rule and surrender the data bytes.
    pub fn into_data(self) -> Result<Vec<u8>> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(Error::CardCommand {
                sw1: self.sw1,
                sw2: self.sw2,
            })
        }
    }
}

/// Decode a raw GET-UID response into a [`Uid`].
///
/// A response of exactly `90 00` decodes to the empty Uid; no minimum data
/// length is enforced beyond the status word.
pub fn decode_uid(bytes: &[u8]) -> Result<Uid> {
    let data = ApduResponse::parse(bytes)?.into_data()?;
    Ok(Uid::from_bytes(&data))
}
