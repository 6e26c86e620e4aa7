use cardwatch::protocol::Status;
use proptest::prelude::*;

#[test]
fn the_two_no_card_codes() {
    assert!(Status::from_raw(0x8010_000C).is_no_card());
    assert!(Status::from_raw(0x8010_0069).is_no_card());
}

#[test]
fn the_two_no_card_codes_as_signed_longs() {
    // What a signed 32-bit LONG return renders them as.
    assert!(Status::from_raw(-2146435060).is_no_card()); // 0x8010000C
    assert!(Status::from_raw(-2146434967).is_no_card()); // 0x80100069
}

#[test]
fn neighbouring_codes_are_not_no_card() {
    assert!(!Status::from_raw(0x8010_000B).is_no_card());
    assert!(!Status::from_raw(0x8010_000D).is_no_card());
    assert!(!Status::from_raw(0x8010_0068).is_no_card());
    assert!(!Status::from_raw(0x8010_006A).is_no_card());
}

#[test]
fn timeout_is_neutral_not_no_card() {
    let timeout = Status::from_raw(0x8010_000A);
    assert!(timeout.is_timeout());
    assert!(!timeout.is_no_card());
    assert!(!timeout.is_success());
}

proptest! {
    // Signed and unsigned renderings of the same 32-bit pattern are
    // indistinguishable after normalization.
    #[test]
    fn signed_unsigned_agree(code in any::<u32>()) {
        let unsigned = Status::from_raw(code as i64);
        let signed = Status::from_raw(code as i32 as i64);
        prop_assert_eq!(unsigned, signed);
    }

    // Only code 0 is success.
    #[test]
    fn only_zero_succeeds(code in 1u32..) {
        prop_assert!(!Status::from_raw(code as i64).is_success());
        prop_assert!(Status::from_raw(code as i64).into_result().is_err());
    }
}
