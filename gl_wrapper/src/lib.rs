pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod program;
pub mod renderer;
pub mod texture;
pub mod uniform_buffer;

use std::ffi::c_char;

/// Turns a NUL padded info log buffer into a string.
pub(crate) fn log_to_string(buf: &[u8]) -> String {
    let data = buf.split(|a| *a == 0).next().unwrap_or(buf);

    String::from_utf8_lossy(data).trim_end().to_string()
}

pub(crate) fn as_c_ptr(buf: &mut [u8]) -> *mut c_char {
    buf.as_mut_ptr() as *mut c_char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_log_stops_at_nul() {
        let mut buf = [0_u8; 16];
        buf[..6].copy_from_slice(b"error\n");

        assert_eq!(log_to_string(&buf), "error");
        assert_eq!(log_to_string(b"no terminator"), "no terminator");
        assert_eq!(log_to_string(&[0; 4]), "");
    }
}
