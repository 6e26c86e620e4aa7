#[path = "../common/mod.rs"]
mod common;

use cardwatch::CardPresence;
use cardwatch::constants::{
    PROTOCOL_T0, STATE_CHANGED, STATE_EMPTY, STATE_PRESENT, STATE_UNAVAILABLE, STATE_UNAWARE,
};
use cardwatch::protocol::Status;
use cardwatch::reader::CardWatcher;

#[test]
fn insert_read_remove_cycle() {
    let mock = common::mock_with_reader();
    let mut watcher = CardWatcher::open(mock.clone()).unwrap();

    // Insert: the poll reports presence, the read between polls succeeds.
    mock.push_status_change(STATE_PRESENT | STATE_CHANGED, &common::sample_atr());
    common::script_uid_read(&mock);
    assert_eq!(watcher.wait_for_card(250), Some(CardPresence::Present));
    assert_eq!(
        watcher.read_uid().unwrap().as_str(),
        common::sample_uid_hex()
    );
    assert_eq!(watcher.last_atr(), Some(common::sample_atr().as_slice()));

    // Remove: the next poll reports empty, a read now comes back absent.
    mock.push_status_change(STATE_EMPTY | STATE_CHANGED, &[]);
    assert_eq!(watcher.wait_for_card(250), Some(CardPresence::Empty));
    assert_eq!(watcher.read_uid(), None);

    // One opportunistic connection was opened and torn down again.
    assert_eq!(mock.disconnect_count(), 1);

    watcher.close();
    assert_eq!(mock.release_count(), 1);
}

#[test]
fn polls_feed_back_the_previous_event_state() {
    let mock = common::mock_with_reader();
    let mut watcher = CardWatcher::open(mock.clone()).unwrap();

    mock.push_status_change(STATE_PRESENT | STATE_CHANGED, &[]);
    mock.push_status_change(STATE_EMPTY | STATE_CHANGED, &[]);
    mock.push_status_change(STATE_EMPTY, &[]);

    watcher.wait_for_card(250);
    watcher.wait_for_card(250);
    watcher.wait_for_card(250);

    let polls = mock.polled_states();
    assert_eq!(polls.len(), 3);
    // First poll starts unaware; every later poll carries the event-state
    // the service reported the poll before.
    assert_eq!(polls[0].1, STATE_UNAWARE);
    assert_eq!(polls[1].1, STATE_PRESENT | STATE_CHANGED);
    assert_eq!(polls[2].1, STATE_EMPTY | STATE_CHANGED);
}

#[test]
fn unavailable_reader_is_rediscovered() {
    let mock = common::mock_with_reader();
    let mut watcher = CardWatcher::open(mock.clone()).unwrap();

    mock.push_status_change(STATE_UNAVAILABLE | STATE_CHANGED, &[]);
    assert_eq!(watcher.wait_for_card(250), Some(CardPresence::Unavailable));

    // The next poll enumerates again instead of reusing the old name, and
    // its watch state starts from scratch.
    mock.push_status_change(STATE_PRESENT, &[]);
    assert_eq!(watcher.wait_for_card(250), Some(CardPresence::Present));
    assert_eq!(mock.list_calls(), 2);
    assert_eq!(mock.polled_states()[1].1, STATE_UNAWARE);
}

#[test]
fn poll_errors_are_swallowed_and_force_rediscovery() {
    let mock = common::mock_with_reader();
    let mut watcher = CardWatcher::open(mock.clone()).unwrap();

    mock.push_status_err(Status::from_raw(0x8010_0017)); // reader unavailable
    assert_eq!(watcher.wait_for_card(250), None);

    mock.push_status_change(STATE_EMPTY, &[]);
    assert_eq!(watcher.wait_for_card(250), Some(CardPresence::Empty));
    assert_eq!(mock.list_calls(), 2);
}

#[test]
fn timeouts_leave_the_watch_state_alone() {
    let mock = common::mock_with_reader();
    let mut watcher = CardWatcher::open(mock.clone()).unwrap();

    mock.push_status_change(STATE_PRESENT, &[]);
    assert_eq!(watcher.wait_for_card(250), Some(CardPresence::Present));

    // Two timeouts in a row: no rediscovery, no state change.
    assert_eq!(watcher.wait_for_card(250), None);
    assert_eq!(watcher.wait_for_card(250), None);
    assert_eq!(mock.list_calls(), 1);
    let polls = mock.polled_states();
    assert_eq!(polls[1].1, STATE_PRESENT);
    assert_eq!(polls[2].1, STATE_PRESENT);
}

#[test]
fn read_uid_failures_never_fault() {
    let mock = common::mock_with_reader();
    let mut watcher = CardWatcher::open(mock.clone()).unwrap();
    mock.push_status_change(STATE_PRESENT, &[]);
    assert_eq!(watcher.wait_for_card(250), Some(CardPresence::Present));

    // Connect refused, transmit failed, short response, bad status word:
    // each read is simply absent.
    mock.push_connect_err(Status::from_raw(0x8010_000B));
    assert_eq!(watcher.read_uid(), None);

    mock.push_connect_ok(1, PROTOCOL_T0);
    mock.push_transmit_err(Status::from_raw(0x8010_0016));
    assert_eq!(watcher.read_uid(), None);

    mock.push_connect_ok(2, PROTOCOL_T0);
    mock.push_transmit(vec![0x90]);
    assert_eq!(watcher.read_uid(), None);

    mock.push_connect_ok(3, PROTOCOL_T0);
    mock.push_transmit(vec![0x6A, 0x82]);
    assert_eq!(watcher.read_uid(), None);

    // Each opened connection was torn down.
    assert_eq!(mock.disconnect_count(), 3);
}

#[test]
fn close_then_poll_is_harmless() {
    let mock = common::mock_with_reader();
    let mut watcher = CardWatcher::open(mock.clone()).unwrap();
    watcher.close();
    watcher.close();
    assert_eq!(watcher.wait_for_card(250), None);
    assert_eq!(watcher.read_uid(), None);
    assert_eq!(mock.release_count(), 1);
}
