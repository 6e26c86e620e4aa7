// cardwatch/src/binding/traits.rs

use crate::protocol::Status;
use crate::types::ReaderWatch;

/// Outcome of a binding operation: the payload, or the non-zero service
/// status code (already normalized to unsigned 32-bit).
pub type BindingResult<T> = std::result::Result<T, Status>;

/// Opaque resource-manager context handle.
///
/// Wide enough for every platform's native width (pointer-sized on
/// Windows, 32-bit on macOS, long elsewhere).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawContext(pub u64);

/// Opaque card connection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawCard(pub u64);

/// PcscBinding abstracts the OS smart-card service away from reader logic.
///
/// Implementations absorb the platform ABI differences: reader-name string
/// encoding (wide vs. byte strings) and handle integer width. Reader names
/// cross this seam as `String`, handles as [`RawContext`]/[`RawCard`], and
/// every failure as a normalized [`Status`].
pub trait PcscBinding: Send + Sync {
    /// Establish the resource-manager context.
    fn establish_context(&self) -> BindingResult<RawContext>;

    /// Release a context obtained from [`establish_context`](Self::establish_context).
    fn release_context(&self, context: RawContext) -> BindingResult<()>;

    /// Enumerate connected readers, in service order.
    fn list_readers(&self, context: RawContext) -> BindingResult<Vec<String>>;

    /// Connect to a reader. Returns the card handle and the protocol the
    /// service negotiated out of `protocols`.
    fn connect(
        &self,
        context: RawContext,
        reader: &str,
        share_mode: u32,
        protocols: u32,
    ) -> BindingResult<(RawCard, u32)>;

    /// Exchange one command APDU under the negotiated protocol.
    fn transmit(&self, card: RawCard, active_protocol: u32, command: &[u8])
    -> BindingResult<Vec<u8>>;

    /// Disconnect a card connection with the given disposition.
    fn disconnect(&self, card: RawCard, disposition: u32) -> BindingResult<()>;

    /// Wait, bounded by `timeout_ms`, for the reader's state to differ from
    /// `watch.current_state`. Returns a fresh watch value carrying the
    /// reported event-state and ATR; the input is not mutated.
    fn get_status_change(
        &self,
        context: RawContext,
        timeout_ms: u32,
        watch: &ReaderWatch,
    ) -> BindingResult<ReaderWatch>;
}
