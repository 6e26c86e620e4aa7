// Read the UID of the card on the first PC/SC reader, once.
//
// Run with: cargo run -p cardwatch --example one_shot --features system

use cardwatch::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match read_uid_once() {
        Ok(uid) if uid.is_empty() => println!("card answered with an empty UID"),
        Ok(uid) => println!("card UID: {uid}"),
        Err(Error::NoCardDetected) => println!("no card on the reader; place one and retry"),
        Err(Error::NoReaderFound) => println!("no PC/SC reader connected"),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
