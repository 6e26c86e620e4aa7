// cardwatch/src/reader/mod.rs
//! Reader-facing flows built on the platform binding: context ownership,
//! the one-shot UID read and the event-driven card watcher.

pub mod context;
pub mod oneshot;
pub mod watch;

pub use context::{Connection, Context};
#[cfg(feature = "system")]
pub use oneshot::read_uid_once;
pub use oneshot::read_uid_once_with;
pub use watch::CardWatcher;
