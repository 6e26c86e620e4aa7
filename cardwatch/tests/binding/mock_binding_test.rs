#[path = "../common/mod.rs"]
mod common;

use cardwatch::binding::{MockBinding, PcscBinding};
use cardwatch::constants::{LEAVE_CARD, PROTOCOL_ANY, SHARE_SHARED, STATE_PRESENT, STATE_UNAWARE};
use cardwatch::protocol::Status;
use cardwatch::types::ReaderWatch;

#[test]
fn full_exchange_through_the_trait_object() {
    let mock = common::mock_with_reader();
    common::script_uid_read(&mock);

    let binding: &dyn PcscBinding = mock.as_ref();
    let ctx = binding.establish_context().unwrap();
    let readers = binding.list_readers(ctx).unwrap();
    assert_eq!(readers, vec![common::READER_NAME]);

    let (card, proto) = binding
        .connect(ctx, &readers[0], SHARE_SHARED, PROTOCOL_ANY)
        .unwrap();
    let resp = binding
        .transmit(card, proto, &cardwatch::protocol::encode_get_uid())
        .unwrap();
    assert_eq!(resp, common::uid_response());

    binding.disconnect(card, LEAVE_CARD).unwrap();
    binding.release_context(ctx).unwrap();

    assert_eq!(mock.transmitted(), vec![vec![0xFF, 0xCA, 0x00, 0x00, 0x00]]);
    assert_eq!(mock.dispositions(), vec![LEAVE_CARD]);
    assert_eq!(mock.release_count(), 1);
}

#[test]
fn status_wait_replaces_the_watch_value() {
    let mock = MockBinding::new();
    mock.push_status_change(STATE_PRESENT, &common::sample_atr());

    let ctx = mock.establish_context().unwrap();
    let before = ReaderWatch::unaware(common::READER_NAME);
    let after = mock.get_status_change(ctx, 250, &before).unwrap();

    // The input is left alone; the update arrives as a fresh value.
    assert_eq!(before.event_state, STATE_UNAWARE);
    assert_eq!(after.event_state, STATE_PRESENT);
    assert_eq!(after.atr, common::sample_atr());
    assert_eq!(after.reader, before.reader);
}

#[test]
fn queued_failures_replay_in_order() {
    let mock = MockBinding::new();
    mock.push_connect_err(Status::REMOVED_CARD);
    mock.push_connect_ok(5, cardwatch::constants::PROTOCOL_T1);

    let ctx = mock.establish_context().unwrap();
    assert_eq!(
        mock.connect(ctx, "r", SHARE_SHARED, PROTOCOL_ANY),
        Err(Status::REMOVED_CARD)
    );
    assert!(mock.connect(ctx, "r", SHARE_SHARED, PROTOCOL_ANY).is_ok());
    assert_eq!(mock.connects().len(), 2);
}
