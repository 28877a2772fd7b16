//! Status response encoding
//!
//! Every connection is answered with the same fixed-shape plaintext reply,
//! whether or not the request changed anything. The body reports the state
//! the sign holds after handling, so a client can confirm its update (or
//! discover that a malformed one was ignored).

use core::fmt::Write;

use heapless::String;

/// Capacity of the encoded response buffer.
///
/// Status line + two headers + blank line + `Mode=, Temp=` with two full
/// `i32`s is 98 bytes.
pub const RESPONSE_CAPACITY: usize = 128;

/// The fixed `200 OK` reply carrying current mode and temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusResponse {
    /// Screen mode after the request was applied
    pub mode: i32,
    /// Temperature value after the request was applied
    pub temp: i32,
}

impl StatusResponse {
    pub fn new(mode: i32, temp: i32) -> Self {
        Self { mode, temp }
    }

    /// Encode the full response, headers and body, ready to write to the
    /// connection.
    pub fn encode(&self) -> String<RESPONSE_CAPACITY> {
        let mut out = String::new();
        // Capacity covers the worst case, so the write cannot fail
        let _ = write!(
            out,
            "HTTP/1.1 200 OK\r\n\
             Content-Type: text/plain\r\n\
             Connection: close\r\n\
             \r\n\
             Mode={}, Temp={}",
            self.mode, self.temp
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_shape() {
        let encoded = StatusResponse::new(1, 72).encode();
        assert_eq!(
            encoded.as_str(),
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nConnection: close\r\n\r\nMode=1, Temp=72"
        );
    }

    #[test]
    fn test_response_negative_temperature() {
        let encoded = StatusResponse::new(1, -40).encode();
        assert!(encoded.ends_with("Mode=1, Temp=-40"));
    }

    #[test]
    fn test_response_echoes_unvalidated_mode() {
        // Out-of-range modes are stored and reported verbatim
        let encoded = StatusResponse::new(7, 0).encode();
        assert!(encoded.ends_with("Mode=7, Temp=0"));
    }

    #[test]
    fn test_worst_case_fits_capacity() {
        let encoded = StatusResponse::new(i32::MIN, i32::MIN).encode();
        assert!(encoded.ends_with("Mode=-2147483648, Temp=-2147483648"));
        assert!(encoded.len() <= RESPONSE_CAPACITY);
    }
}
