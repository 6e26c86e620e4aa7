// Watch the first PC/SC reader and print UIDs as cards arrive.
//
// Run with: cargo run -p cardwatch --example watch_uid --features system
// Stop with Ctrl+C.

use cardwatch::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut watcher = CardWatcher::open_system()?;
    println!("waiting for cards... (Ctrl+C to quit)");

    loop {
        match watcher.wait_for_card(DEFAULT_POLL_TIMEOUT_MS) {
            Some(CardPresence::Present) => {
                if let Some(uid) = watcher.read_uid() {
                    println!("card present: UID {uid}");
                    if let Some(atr) = watcher.last_atr() {
                        println!("             ATR {}", bytes_to_hex_spaced(atr));
                    }
                } else {
                    println!("card present but the UID read failed; will retry");
                }
            }
            Some(CardPresence::Empty) => println!("card removed"),
            Some(CardPresence::Unavailable) => println!("reader lost; rediscovering"),
            None => {}
        }
    }
}
