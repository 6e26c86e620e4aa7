// cardwatch/src/binding/system/sys.rs
//! Raw declarations for the platform PC/SC entry points.
//!
//! Windows links the built-in `WinSCard.dll` and uses the wide-string
//! (`...W`) entry points; macOS links the PCSC framework; other unixes link
//! pcsclite. The type aliases absorb the differing integer widths: DWORD is
//! `c_ulong` except on macOS where it is 32-bit, and context/card handles
//! are pointer-sized on Windows but LONG-sized elsewhere.

#![allow(non_camel_case_types, non_snake_case)]

#[cfg(not(windows))]
use std::os::raw::c_char;
use std::os::raw::c_void;
#[cfg(not(target_os = "macos"))]
use std::os::raw::{c_long, c_ulong};

#[cfg(not(target_os = "macos"))]
pub type DWORD = c_ulong;
#[cfg(not(target_os = "macos"))]
pub type LONG = c_long;

#[cfg(target_os = "macos")]
pub type DWORD = u32;
#[cfg(target_os = "macos")]
pub type LONG = i32;

#[cfg(windows)]
pub type SCARDCONTEXT = usize;
#[cfg(windows)]
pub type SCARDHANDLE = usize;

#[cfg(not(windows))]
pub type SCARDCONTEXT = LONG;
#[cfg(not(windows))]
pub type SCARDHANDLE = LONG;

#[cfg(not(windows))]
pub const ATR_BUFFER_SIZE: usize = 33;
#[cfg(windows)]
pub const ATR_BUFFER_SIZE: usize = 36;

#[cfg_attr(not(target_os = "macos"), repr(C))]
#[cfg_attr(target_os = "macos", repr(C, packed))]
pub struct SCARD_IO_REQUEST {
    pub dwProtocol: DWORD,
    pub cbPciLength: DWORD,
}

#[cfg_attr(not(target_os = "macos"), repr(C))]
#[cfg_attr(target_os = "macos", repr(C, packed))]
pub struct SCARD_READERSTATE {
    #[cfg(windows)]
    pub szReader: *const u16,
    #[cfg(not(windows))]
    pub szReader: *const c_char,
    pub pvUserData: *mut c_void,
    pub dwCurrentState: DWORD,
    pub dwEventState: DWORD,
    pub cbAtr: DWORD,
    pub rgbAtr: [u8; ATR_BUFFER_SIZE],
}

#[cfg_attr(windows, link(name = "winscard"))]
#[cfg_attr(target_os = "macos", link(name = "PCSC", kind = "framework"))]
#[cfg_attr(all(unix, not(target_os = "macos")), link(name = "pcsclite"))]
unsafe extern "system" {
    pub fn SCardEstablishContext(
        dwScope: DWORD,
        pvReserved1: *const c_void,
        pvReserved2: *const c_void,
        phContext: *mut SCARDCONTEXT,
    ) -> LONG;

    pub fn SCardReleaseContext(hContext: SCARDCONTEXT) -> LONG;

    pub fn SCardDisconnect(hCard: SCARDHANDLE, dwDisposition: DWORD) -> LONG;

    pub fn SCardTransmit(
        hCard: SCARDHANDLE,
        pioSendPci: *const SCARD_IO_REQUEST,
        pbSendBuffer: *const u8,
        cbSendLength: DWORD,
        pioRecvPci: *mut SCARD_IO_REQUEST,
        pbRecvBuffer: *mut u8,
        pcbRecvLength: *mut DWORD,
    ) -> LONG;
}

#[cfg(windows)]
#[link(name = "winscard")]
unsafe extern "system" {
    pub fn SCardListReadersW(
        hContext: SCARDCONTEXT,
        mszGroups: *const u16,
        mszReaders: *mut u16,
        pcchReaders: *mut DWORD,
    ) -> LONG;

    pub fn SCardConnectW(
        hContext: SCARDCONTEXT,
        szReader: *const u16,
        dwShareMode: DWORD,
        dwPreferredProtocols: DWORD,
        phCard: *mut SCARDHANDLE,
        pdwActiveProtocol: *mut DWORD,
    ) -> LONG;

    pub fn SCardGetStatusChangeW(
        hContext: SCARDCONTEXT,
        dwTimeout: DWORD,
        rgReaderStates: *mut SCARD_READERSTATE,
        cReaders: DWORD,
    ) -> LONG;
}

#[cfg(not(windows))]
#[cfg_attr(target_os = "macos", link(name = "PCSC", kind = "framework"))]
#[cfg_attr(all(unix, not(target_os = "macos")), link(name = "pcsclite"))]
unsafe extern "system" {
    pub fn SCardListReaders(
        hContext: SCARDCONTEXT,
        mszGroups: *const c_char,
        mszReaders: *mut c_char,
        pcchReaders: *mut DWORD,
    ) -> LONG;

    pub fn SCardConnect(
        hContext: SCARDCONTEXT,
        szReader: *const c_char,
        dwShareMode: DWORD,
        dwPreferredProtocols: DWORD,
        phCard: *mut SCARDHANDLE,
        pdwActiveProtocol: *mut DWORD,
    ) -> LONG;

    pub fn SCardGetStatusChange(
        hContext: SCARDCONTEXT,
        dwTimeout: DWORD,
        rgReaderStates: *mut SCARD_READERSTATE,
        cReaders: DWORD,
    ) -> LONG;
}
