//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockBinding setup so tests across the
//! crate and tests/ directory can reuse the same scripting.
#![allow(dead_code)]

use std::sync::Arc;

use crate::binding::MockBinding;
use crate::constants::PROTOCOL_T1;

/// A raw response carrying `data` and the success status word.
#[doc(hidden)]
pub fn uid_response(data: &[u8]) -> Vec<u8> {
    let mut resp = data.to_vec();
    resp.extend_from_slice(&[0x90, 0x00]);
    resp
}

/// A raw response carrying only the given (failure) status word.
#[doc(hidden)]
pub fn status_word_response(sw1: u8, sw2: u8) -> Vec<u8> {
    vec![sw1, sw2]
}

/// A MockBinding pre-configured with one reader, behind an Arc so tests
/// can keep inspecting it after the reader logic takes ownership.
#[doc(hidden)]
pub fn mock_with_reader(name: &str) -> Arc<MockBinding> {
    let mock = MockBinding::new();
    mock.set_readers(&[name]);
    Arc::new(mock)
}

/// Script one successful connect followed by a UID exchange, so the next
/// read over the binding yields `data` as the UID.
#[doc(hidden)]
pub fn script_uid_read(mock: &MockBinding, data: &[u8]) {
    mock.push_connect_ok(1, PROTOCOL_T1);
    mock.push_transmit(uid_response(data));
}
