#![cfg(feature = "system")]

use cardwatch::prelude::*;
use serial_test::serial;

// These tests require a connected PC/SC reader (and, for the read tests, a
// card resting on it). They are marked `#[ignore]` so CI does not attempt
// to run them. Run manually with:
//
// cargo test -p cardwatch --test hardware --features system -- --ignored

#[test]
#[serial]
#[ignore]
fn establish_and_enumerate() -> Result<()> {
    let context = Context::establish(SystemBinding::shared()?)?;
    let readers = context.list_readers()?;
    assert!(!readers.is_empty());
    println!("readers: {readers:?}");
    Ok(())
}

#[test]
#[serial]
#[ignore]
fn one_shot_read() {
    match read_uid_once() {
        Ok(uid) => {
            println!("card UID: {uid}");
            assert!(uid.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        }
        // An empty reader is a legitimate outcome here.
        Err(Error::NoCardDetected) => println!("no card on the reader"),
        Err(err) => panic!("unexpected failure: {err}"),
    }
}

#[test]
#[serial]
#[ignore]
fn short_watch_loop() -> Result<()> {
    let mut watcher = CardWatcher::open_system()?;
    for _ in 0..10 {
        match watcher.wait_for_card(DEFAULT_POLL_TIMEOUT_MS) {
            Some(CardPresence::Present) => {
                if let Some(uid) = watcher.read_uid() {
                    println!("card present, UID {uid}");
                    break;
                }
            }
            Some(presence) => println!("reader reports {presence}"),
            None => {}
        }
    }
    watcher.close();
    Ok(())
}
