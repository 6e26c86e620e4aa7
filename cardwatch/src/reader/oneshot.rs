// cardwatch/src/reader/oneshot.rs
//! Single synchronous UID read: establish, enumerate, connect, exchange,
//! clean up. No state survives the call and nothing is retried; a failed
//! attempt is reported to the caller as-is.

use std::sync::Arc;

use log::debug;

use crate::Result;
use crate::binding::PcscBinding;
use crate::reader::context::Context;
use crate::types::Uid;

/// Read the UID of the card on the first enumerated reader.
///
/// Fails with `SubsystemUnavailable`, `NoReaderFound`, `NoCardDetected`
/// (recoverable: poll again), `Runtime`, `ShortResponse` or `CardCommand`
/// depending on the failing step. The connection and context are torn down
/// on every exit path.
pub fn read_uid_once_with(binding: Arc<dyn PcscBinding>) -> Result<Uid> {
    let context = Context::establish(binding)?;
    let readers = context.list_readers()?;
    // Enumeration order is stable within the service; take the first slot.
    let reader = &readers[0];
    debug!("reading UID from {reader}");

    let connection = context.connect(reader)?;
    let uid = connection.read_uid()?;
    debug!("card UID {uid}");
    Ok(uid)
}

/// [`read_uid_once_with`] over the process-wide system binding.
#[cfg(feature = "system")]
pub fn read_uid_once() -> Result<Uid> {
    let binding = crate::binding::SystemBinding::shared()?;
    read_uid_once_with(binding)
}
