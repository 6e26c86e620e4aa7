// cardwatch/src/reader/context.rs

use std::sync::Arc;

use log::{debug, warn};

use crate::binding::{BindingResult, PcscBinding, RawCard, RawContext};
use crate::constants::{LEAVE_CARD, PROTOCOL_ANY, SHARE_SHARED};
use crate::protocol::{Status, decode_uid, encode_get_uid};
use crate::types::{Protocol, ReaderWatch, Uid};
use crate::{Error, Result};

/// Owner of the resource-manager context.
///
/// The context is released exactly once: either through the explicit
/// [`release`](Context::release) or when the value drops, whichever comes
/// first. Every reader operation goes through a live `Context`, so nothing
/// can touch the service after release.
pub struct Context {
    binding: Arc<dyn PcscBinding>,
    raw: RawContext,
    released: bool,
}

impl Context {
    /// Establish a context on the given binding.
    pub fn establish(binding: Arc<dyn PcscBinding>) -> Result<Self> {
        let raw = binding.establish_context().map_err(|status| {
            Error::SubsystemUnavailable(format!("establish context failed: {status}"))
        })?;
        debug!("smart-card context established");
        Ok(Self {
            binding,
            raw,
            released: false,
        })
    }

    /// Enumerate connected readers in service order.
    ///
    /// An empty enumeration and the service's own "no readers" code both
    /// surface as [`Error::NoReaderFound`].
    pub fn list_readers(&self) -> Result<Vec<String>> {
        match self.binding.list_readers(self.raw) {
            Ok(readers) if readers.is_empty() => Err(Error::NoReaderFound),
            Ok(readers) => Ok(readers),
            Err(status) if status == Status::NO_READERS => Err(Error::NoReaderFound),
            Err(status) => Err(Error::Runtime(status)),
        }
    }

    /// Connect to a reader in shared mode, accepting whichever of T=0/T=1
    /// the service negotiates.
    ///
    /// The two "no card / card removed" codes map to
    /// [`Error::NoCardDetected`]; any other failure is
    /// [`Error::Runtime`].
    pub fn connect(&self, reader: &str) -> Result<Connection<'_>> {
        match self.binding.connect(self.raw, reader, SHARE_SHARED, PROTOCOL_ANY) {
            Ok((card, active_protocol)) => {
                debug!(
                    "connected to {reader} using protocol mask {active_protocol:#x}"
                );
                Ok(Connection {
                    context: self,
                    card,
                    active_protocol,
                    disconnected: false,
                })
            }
            Err(status) if status.is_no_card() => Err(Error::NoCardDetected),
            Err(status) => Err(Error::Runtime(status)),
        }
    }

    /// One bounded status-change wait. Passes the watch value through the
    /// binding untouched and hands back the replacement; raw so the caller
    /// can discriminate the timeout status from real faults.
    pub fn wait_status_change(
        &self,
        timeout_ms: u32,
        watch: &ReaderWatch,
    ) -> BindingResult<ReaderWatch> {
        self.binding.get_status_change(self.raw, timeout_ms, watch)
    }

    /// Release the context now instead of at drop.
    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if !self.released {
            self.released = true;
            if let Err(status) = self.binding.release_context(self.raw) {
                warn!("release context failed: {status}");
            }
        }
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        self.release_once();
    }
}

/// A live card connection, valid strictly between connect and disconnect.
///
/// Disconnects (leave-card disposition) on every exit path when dropped;
/// never reused across connects.
pub struct Connection<'a> {
    context: &'a Context,
    card: RawCard,
    active_protocol: u32,
    disconnected: bool,
}

impl Connection<'_> {
    /// The protocol the service negotiated, if it is one of T=0/T=1.
    pub fn protocol(&self) -> Option<Protocol> {
        Protocol::from_mask(self.active_protocol)
    }

    /// Exchange one command APDU.
    pub fn transmit(&self, command: &[u8]) -> Result<Vec<u8>> {
        self.context
            .binding
            .transmit(self.card, self.active_protocol, command)
            .map_err(Error::Runtime)
    }

    /// Transmit the GET-UID command and decode the response.
    pub fn read_uid(&self) -> Result<Uid> {
        let response = self.transmit(&encode_get_uid())?;
        decode_uid(&response)
    }

    /// Disconnect now instead of at drop.
    pub fn disconnect(mut self) {
        self.disconnect_once();
    }

    fn disconnect_once(&mut self) {
        if !self.disconnected {
            self.disconnected = true;
            if let Err(status) = self.context.binding.disconnect(self.card, LEAVE_CARD) {
                warn!("disconnect failed: {status}");
            }
        }
    }
}

impl Drop for Connection<'_> {
    fn drop(&mut self) {
        self.disconnect_once();
    }
}
