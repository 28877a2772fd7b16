//! Screen-update wire protocol for the Chronotherm matrix sign
//!
//! The sign speaks a deliberately small HTTP subset, server role only. A
//! client pushes a new screen selection and/or temperature reading with a
//! single fire-and-forget exchange:
//!
//! ```text
//! GET /screen?mode=<int>&temp=<int> HTTP/1.1
//! ```
//!
//! Either query parameter may be absent and they may appear in either order.
//! No other method or path is recognized; an unrecognized request changes
//! nothing but is still answered. The reply is always the same fixed shape,
//! reporting the state the sign holds *after* the request was applied:
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: text/plain
//! Connection: close
//!
//! Mode=<mode>, Temp=<temp>
//! ```
//!
//! There are no other endpoints, no TLS, and no persistent connections.
//! Everything here is transport-free so it can be tested on the host.

#![no_std]
#![deny(unsafe_code)]

pub mod request;
pub mod response;

pub use request::{parse_decimal, parse_request_line, ScreenUpdate, REQUEST_PREFIX};
pub use response::{StatusResponse, RESPONSE_CAPACITY};

/// Longest request line the sign will look at. Longer lines are truncated
/// by the transport before parsing; the interesting part (method, path,
/// query) fits comfortably.
pub const MAX_REQUEST_LINE: usize = 256;
