// cardwatch/src/binding/system/mod.rs

#![cfg(feature = "system")]

//! Binding over the platform smart-card service library.
//!
//! The strategy is selected per platform at compile time: the Windows path
//! talks to the wide-string (`...W`) WinSCard entry points, the unix path to
//! the byte-string pcsclite/PCSC.framework ones. Both surface through the
//! same [`PcscBinding`] interface with `String` reader names and normalized
//! [`Status`] codes, so callers never see the difference.

use std::sync::Arc;

use crate::Result;
use crate::binding::traits::{BindingResult, PcscBinding, RawCard, RawContext};
use crate::protocol::Status;
use crate::types::ReaderWatch;

#[cfg(any(windows, unix))]
mod sys;

/// The process-wide binding to the linked PC/SC library.
///
/// Zero-sized: the dynamic loader resolves the entry points once when the
/// process starts, and [`SystemBinding::shared`] hands out one cached
/// instance.
#[derive(Debug, Clone, Copy)]
pub struct SystemBinding {
    _priv: (),
}

#[cfg(any(windows, unix))]
impl SystemBinding {
    /// Binding over the platform service.
    pub fn new() -> Result<Self> {
        Ok(Self { _priv: () })
    }

    /// The cached process-wide instance.
    pub fn shared() -> Result<Arc<Self>> {
        static SHARED: std::sync::OnceLock<Arc<SystemBinding>> = std::sync::OnceLock::new();
        Ok(Arc::clone(
            SHARED.get_or_init(|| Arc::new(SystemBinding { _priv: () })),
        ))
    }
}

#[cfg(not(any(windows, unix)))]
impl SystemBinding {
    /// Unsupported platform: always fails.
    pub fn new() -> Result<Self> {
        Err(crate::Error::SubsystemUnavailable(
            "this build supports Windows and unix platforms only".into(),
        ))
    }

    /// Unsupported platform: always fails.
    pub fn shared() -> Result<Arc<Self>> {
        Err(crate::Error::SubsystemUnavailable(
            "this build supports Windows and unix platforms only".into(),
        ))
    }
}

#[cfg(any(windows, unix))]
impl PcscBinding for SystemBinding {
    fn establish_context(&self) -> BindingResult<RawContext> {
        let mut handle: sys::SCARDCONTEXT = 0;
        let rv = unsafe {
            sys::SCardEstablishContext(
                crate::constants::SCOPE_USER as sys::DWORD,
                std::ptr::null(),
                std::ptr::null(),
                &mut handle,
            )
        };
        Status::from_raw(rv as i64).into_result()?;
        Ok(RawContext(handle as u64))
    }

    fn release_context(&self, context: RawContext) -> BindingResult<()> {
        let rv = unsafe { sys::SCardReleaseContext(context.0 as sys::SCARDCONTEXT) };
        Status::from_raw(rv as i64).into_result()
    }

    fn list_readers(&self, context: RawContext) -> BindingResult<Vec<String>> {
        platform::list_readers(context)
    }

    fn connect(
        &self,
        context: RawContext,
        reader: &str,
        share_mode: u32,
        protocols: u32,
    ) -> BindingResult<(RawCard, u32)> {
        platform::connect(context, reader, share_mode, protocols)
    }

    fn transmit(
        &self,
        card: RawCard,
        active_protocol: u32,
        command: &[u8],
    ) -> BindingResult<Vec<u8>> {
        let pci = sys::SCARD_IO_REQUEST {
            dwProtocol: active_protocol as sys::DWORD,
            cbPciLength: std::mem::size_of::<sys::SCARD_IO_REQUEST>() as sys::DWORD,
        };
        let mut recv = [0u8; crate::constants::RECV_BUFFER_LEN];
        let mut recv_len = recv.len() as sys::DWORD;
        let rv = unsafe {
            sys::SCardTransmit(
                card.0 as sys::SCARDHANDLE,
                &pci,
                command.as_ptr(),
                command.len() as sys::DWORD,
                std::ptr::null_mut(),
                recv.as_mut_ptr(),
                &mut recv_len,
            )
        };
        Status::from_raw(rv as i64).into_result()?;
        Ok(recv[..recv_len as usize].to_vec())
    }

    fn disconnect(&self, card: RawCard, disposition: u32) -> BindingResult<()> {
        let rv = unsafe {
            sys::SCardDisconnect(card.0 as sys::SCARDHANDLE, disposition as sys::DWORD)
        };
        Status::from_raw(rv as i64).into_result()
    }

    fn get_status_change(
        &self,
        context: RawContext,
        timeout_ms: u32,
        watch: &ReaderWatch,
    ) -> BindingResult<ReaderWatch> {
        platform::get_status_change(context, timeout_ms, watch)
    }
}

#[cfg(not(any(windows, unix)))]
impl PcscBinding for SystemBinding {
    // Unreachable in practice (`new` never constructs one here); keeps the
    // type usable behind `Arc<dyn PcscBinding>` on every target.
    fn establish_context(&self) -> BindingResult<RawContext> {
        Err(Status::NO_SERVICE)
    }

    fn release_context(&self, _context: RawContext) -> BindingResult<()> {
        Err(Status::NO_SERVICE)
    }

    fn list_readers(&self, _context: RawContext) -> BindingResult<Vec<String>> {
        Err(Status::NO_SERVICE)
    }

    fn connect(
        &self,
        _context: RawContext,
        _reader: &str,
        _share_mode: u32,
        _protocols: u32,
    ) -> BindingResult<(RawCard, u32)> {
        Err(Status::NO_SERVICE)
    }

    fn transmit(
        &self,
        _card: RawCard,
        _active_protocol: u32,
        _command: &[u8],
    ) -> BindingResult<Vec<u8>> {
        Err(Status::NO_SERVICE)
    }

    fn disconnect(&self, _card: RawCard, _disposition: u32) -> BindingResult<()> {
        Err(Status::NO_SERVICE)
    }

    fn get_status_change(
        &self,
        _context: RawContext,
        _timeout_ms: u32,
        _watch: &ReaderWatch,
    ) -> BindingResult<ReaderWatch> {
        Err(Status::NO_SERVICE)
    }
}

/// Wide-string marshalling for the WinSCard entry points.
#[cfg(windows)]
mod platform {
    use super::sys;
    use crate::binding::traits::{BindingResult, RawCard, RawContext};
    use crate::protocol::Status;
    use crate::types::ReaderWatch;
    use crate::utils::split_multistring_wide;

    fn to_wide(s: &str) -> Vec<u16> {
        s.encode_utf16().chain(std::iter::once(0)).collect()
    }

    pub(super) fn list_readers(context: RawContext) -> BindingResult<Vec<String>> {
        let ctx = context.0 as sys::SCARDCONTEXT;
        let mut len: sys::DWORD = 0;
        let rv = unsafe {
            sys::SCardListReadersW(ctx, std::ptr::null(), std::ptr::null_mut(), &mut len)
        };
        Status::from_raw(rv as i64).into_result()?;

        let mut buf = vec![0u16; len as usize];
        let rv =
            unsafe { sys::SCardListReadersW(ctx, std::ptr::null(), buf.as_mut_ptr(), &mut len) };
        Status::from_raw(rv as i64).into_result()?;
        buf.truncate(len as usize);
        Ok(split_multistring_wide(&buf))
    }

    pub(super) fn connect(
        context: RawContext,
        reader: &str,
        share_mode: u32,
        protocols: u32,
    ) -> BindingResult<(RawCard, u32)> {
        let wide = to_wide(reader);
        let mut card: sys::SCARDHANDLE = 0;
        let mut active: sys::DWORD = 0;
        let rv = unsafe {
            sys::SCardConnectW(
                context.0 as sys::SCARDCONTEXT,
                wide.as_ptr(),
                share_mode as sys::DWORD,
                protocols as sys::DWORD,
                &mut card,
                &mut active,
            )
        };
        Status::from_raw(rv as i64).into_result()?;
        Ok((RawCard(card as u64), active as u32))
    }

    pub(super) fn get_status_change(
        context: RawContext,
        timeout_ms: u32,
        watch: &ReaderWatch,
    ) -> BindingResult<ReaderWatch> {
        let wide = to_wide(&watch.reader);
        let mut state = sys::SCARD_READERSTATE {
            szReader: wide.as_ptr(),
            pvUserData: std::ptr::null_mut(),
            dwCurrentState: watch.current_state as sys::DWORD,
            dwEventState: 0,
            cbAtr: 0,
            rgbAtr: [0; sys::ATR_BUFFER_SIZE],
        };
        let rv = unsafe {
            sys::SCardGetStatusChangeW(
                context.0 as sys::SCARDCONTEXT,
                timeout_ms as sys::DWORD,
                &mut state,
                1,
            )
        };
        Status::from_raw(rv as i64).into_result()?;
        Ok(super::watch_from_state(watch, &state))
    }
}

/// Byte-string marshalling for the pcsclite / PCSC.framework entry points.
#[cfg(unix)]
mod platform {
    use std::ffi::CString;

    use super::sys;
    use crate::binding::traits::{BindingResult, RawCard, RawContext};
    use crate::protocol::Status;
    use crate::types::ReaderWatch;
    use crate::utils::split_multistring;

    fn to_cstring(s: &str) -> Result<CString, Status> {
        CString::new(s).map_err(|_| Status::INVALID_PARAMETER)
    }

    pub(super) fn list_readers(context: RawContext) -> BindingResult<Vec<String>> {
        let ctx = context.0 as sys::SCARDCONTEXT;
        let mut len: sys::DWORD = 0;
        let rv =
            unsafe { sys::SCardListReaders(ctx, std::ptr::null(), std::ptr::null_mut(), &mut len) };
        Status::from_raw(rv as i64).into_result()?;

        let mut buf = vec![0u8; len as usize];
        let rv = unsafe {
            sys::SCardListReaders(
                ctx,
                std::ptr::null(),
                buf.as_mut_ptr() as *mut std::os::raw::c_char,
                &mut len,
            )
        };
        Status::from_raw(rv as i64).into_result()?;
        buf.truncate(len as usize);
        Ok(split_multistring(&buf))
    }

    pub(super) fn connect(
        context: RawContext,
        reader: &str,
        share_mode: u32,
        protocols: u32,
    ) -> BindingResult<(RawCard, u32)> {
        let name = to_cstring(reader)?;
        let mut card: sys::SCARDHANDLE = 0;
        let mut active: sys::DWORD = 0;
        let rv = unsafe {
            sys::SCardConnect(
                context.0 as sys::SCARDCONTEXT,
                name.as_ptr(),
                share_mode as sys::DWORD,
                protocols as sys::DWORD,
                &mut card,
                &mut active,
            )
        };
        Status::from_raw(rv as i64).into_result()?;
        Ok((RawCard(card as u64), active as u32))
    }

    pub(super) fn get_status_change(
        context: RawContext,
        timeout_ms: u32,
        watch: &ReaderWatch,
    ) -> BindingResult<ReaderWatch> {
        let name = to_cstring(&watch.reader)?;
        let mut state = sys::SCARD_READERSTATE {
            szReader: name.as_ptr(),
            pvUserData: std::ptr::null_mut(),
            dwCurrentState: watch.current_state as sys::DWORD,
            dwEventState: 0,
            cbAtr: 0,
            rgbAtr: [0; sys::ATR_BUFFER_SIZE],
        };
        let rv = unsafe {
            sys::SCardGetStatusChange(
                context.0 as sys::SCARDCONTEXT,
                timeout_ms as sys::DWORD,
                &mut state,
                1,
            )
        };
        Status::from_raw(rv as i64).into_result()?;
        Ok(super::watch_from_state(watch, &state))
    }
}

/// Build the replacement watch value from a filled reader-state struct.
///
/// Fields are copied out by value first: the struct is packed on macOS, so
/// taking references into it is not allowed.
#[cfg(any(windows, unix))]
fn watch_from_state(watch: &ReaderWatch, state: &sys::SCARD_READERSTATE) -> ReaderWatch {
    let event_state = state.dwEventState;
    let atr_len = state.cbAtr;
    let atr_buf = state.rgbAtr;
    let atr_len = (atr_len as usize).min(atr_buf.len());
    ReaderWatch {
        reader: watch.reader.clone(),
        current_state: watch.current_state,
        event_state: event_state as u32,
        atr: atr_buf[..atr_len].to_vec(),
    }
}
