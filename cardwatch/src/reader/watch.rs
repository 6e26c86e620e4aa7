// cardwatch/src/reader/watch.rs
//! Event-driven card watcher.
//!
//! A long-lived object for one dedicated polling loop: the host calls
//! [`CardWatcher::wait_for_card`] repeatedly and reads the UID when a
//! `present` edge arrives. Per-iteration faults never escape: they
//! downgrade to a neutral result and, where the reader itself looks gone,
//! force rediscovery on the next poll.

use std::sync::Arc;

use log::{debug, warn};

use crate::binding::PcscBinding;
use crate::constants::{STATE_EMPTY, STATE_PRESENT, STATE_UNAVAILABLE};
use crate::reader::context::Context;
use crate::types::{CardPresence, ReaderWatch, Uid};
use crate::Result;

/// Stateful reader watcher with lifecycle `open → (poll)* → close`.
///
/// Owns one context and at most one reader's watch state. Not internally
/// synchronized: one caller drives it for its whole lifetime (the object is
/// `Send`, so that caller may be a dedicated background thread).
pub struct CardWatcher {
    context: Option<Context>,
    watch: Option<ReaderWatch>,
}

impl CardWatcher {
    /// Open a watcher on the given binding. No reader is known yet; the
    /// first poll discovers one.
    pub fn open(binding: Arc<dyn PcscBinding>) -> Result<Self> {
        Ok(Self {
            context: Some(Context::establish(binding)?),
            watch: None,
        })
    }

    /// Open a watcher on the process-wide system binding.
    #[cfg(feature = "system")]
    pub fn open_system() -> Result<Self> {
        Self::open(crate::binding::SystemBinding::shared()?)
    }

    /// Wait, bounded by `timeout_ms`, for a card availability change.
    ///
    /// Returns the observed presence, or `None` when no reader exists, the
    /// bound elapsed without a change, or the poll failed (failures also
    /// forget the reader so the next call re-enumerates). This is the only
    /// blocking operation of the watcher and it always returns within the
    /// bound.
    pub fn wait_for_card(&mut self, timeout_ms: u32) -> Option<CardPresence> {
        let context = self.context.as_ref()?;

        if self.watch.is_none() {
            let mut readers = match context.list_readers() {
                Ok(readers) => readers,
                Err(_) => return None,
            };
            let reader = readers.swap_remove(0);
            debug!("watching reader {reader}");
            self.watch = Some(ReaderWatch::unaware(reader));
        }
        let watch = self.watch.as_ref()?;

        match context.wait_status_change(timeout_ms, watch) {
            Ok(updated) => {
                if updated.event_has(STATE_PRESENT) {
                    debug!("card present on {}", updated.reader);
                    self.watch = Some(updated.rearm());
                    Some(CardPresence::Present)
                } else if updated.event_has(STATE_EMPTY) {
                    debug!("reader {} is empty", updated.reader);
                    self.watch = Some(updated.rearm());
                    Some(CardPresence::Empty)
                } else if updated.event_has(STATE_UNAVAILABLE) {
                    warn!("reader {} unavailable, will rediscover", updated.reader);
                    self.watch = None;
                    Some(CardPresence::Unavailable)
                } else {
                    self.watch = Some(updated.rearm());
                    None
                }
            }
            Err(status) if status.is_timeout() => None,
            Err(status) => {
                warn!("status poll failed ({status}), will rediscover reader");
                self.watch = None;
                None
            }
        }
    }

    /// Best-effort UID read from the watched reader.
    ///
    /// Opens a fresh shared connection, exchanges GET-UID and decodes.
    /// Every failure (connect, transmit, malformed response, wrong status
    /// word) yields `None` so a single missed read never disrupts the
    /// polling loop; the connection is always torn down first.
    pub fn read_uid(&self) -> Option<Uid> {
        let context = self.context.as_ref()?;
        let reader = self.watch.as_ref()?.reader.clone();
        let connection = match context.connect(&reader) {
            Ok(connection) => connection,
            Err(err) => {
                debug!("opportunistic read skipped: {err}");
                return None;
            }
        };
        match connection.read_uid() {
            Ok(uid) => Some(uid),
            Err(err) => {
                debug!("opportunistic read failed: {err}");
                None
            }
        }
    }

    /// ATR bytes captured by the most recent successful poll, if any.
    pub fn last_atr(&self) -> Option<&[u8]> {
        self.watch
            .as_ref()
            .map(|watch| watch.atr.as_slice())
            .filter(|atr| !atr.is_empty())
    }

    /// Release the held context. Idempotent; polls after close return
    /// `None`.
    pub fn close(&mut self) {
        if let Some(context) = self.context.take() {
            context.release();
        }
        self.watch = None;
    }
}
