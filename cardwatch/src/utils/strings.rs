//! PC/SC multistring handling.
//!
//! Reader enumeration returns a block of NUL-separated names terminated by a
//! double NUL. Windows hands back UTF-16 units, the other platforms bytes;
//! both collapse to the same `Vec<String>` here.

/// Split a narrow (byte) multistring into its non-empty components.
pub fn split_multistring(buf: &[u8]) -> Vec<String> {
    buf.split(|&b| b == 0)
        .filter(|part| !part.is_empty())
        .map(|part| String::from_utf8_lossy(part).into_owned())
        .collect()
}

/// Split a wide (UTF-16) multistring into its non-empty components.
pub fn split_multistring_wide(buf: &[u16]) -> Vec<String> {
    buf.split(|&c| c == 0)
        .filter(|part| !part.is_empty())
        .map(String::from_utf16_lossy)
        .collect()
}
