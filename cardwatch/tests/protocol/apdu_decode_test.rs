#[path = "../common/mod.rs"]
mod common;

use cardwatch::protocol::{ApduResponse, decode_uid, encode_get_uid};
use cardwatch::{Error, Uid};
use proptest::prelude::*;

#[test]
fn command_is_the_documented_five_bytes() {
    assert_eq!(encode_get_uid(), [0xFF, 0xCA, 0x00, 0x00, 0x00]);
}

#[test]
fn decode_sample_uid() {
    let uid = decode_uid(&common::uid_response()).unwrap();
    assert_eq!(uid.as_str(), common::sample_uid_hex());
}

#[test]
fn decode_seven_byte_uid() {
    let mut resp = hex::decode("04D2F1A2B3C480").unwrap();
    resp.extend_from_slice(&[0x90, 0x00]);
    let uid = decode_uid(&resp).unwrap();
    assert_eq!(uid.as_str(), "04D2F1A2B3C480");
}

#[test]
fn decode_matches_uid_from_bytes() {
    let uid = decode_uid(&common::uid_response()).unwrap();
    assert_eq!(uid, Uid::from_bytes(&common::sample_uid_bytes()));
}

#[test]
fn parse_keeps_data_and_status_word_apart() {
    let resp = ApduResponse::parse(&[0xAA, 0xBB, 0x63, 0x00]).unwrap();
    assert_eq!(resp.data, vec![0xAA, 0xBB]);
    assert_eq!((resp.sw1, resp.sw2), (0x63, 0x00));
    assert!(!resp.is_success());
}

#[test]
fn wrong_status_word_reports_both_bytes() {
    match decode_uid(&[0x01, 0x02, 0x69, 0x85]) {
        Err(Error::CardCommand { sw1, sw2 }) => assert_eq!((sw1, sw2), (0x69, 0x85)),
        other => panic!("expected CardCommand, got {:?}", other),
    }
}

proptest! {
    // UID length is twice the data length for any successful response.
    #[test]
    fn uid_length_tracks_data_length(data in prop::collection::vec(any::<u8>(), 0..48)) {
        let mut resp = data.clone();
        resp.extend_from_slice(&[0x90, 0x00]);
        let uid = decode_uid(&resp).unwrap();
        prop_assert_eq!(uid.as_str().len(), 2 * data.len());
    }

    // The decoder never panics, whatever bytes arrive.
    #[test]
    fn decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = decode_uid(&bytes);
    }
}
