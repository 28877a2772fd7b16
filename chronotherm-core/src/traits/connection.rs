//! Connection acceptor trait
//!
//! The network stack is an opaque collaborator. The controller only ever
//! asks two things of it: "is a connection waiting?" (non-blocking, so the
//! render cadence can never stall on the network) and, per connection,
//! "give me the request line / take this response". Connections close when
//! dropped.

use chronotherm_protocol::{StatusResponse, MAX_REQUEST_LINE};
use heapless::String;

/// One request line, already terminated at the carriage return. The rest of
/// the header is the transport's to discard.
pub type RequestLine = String<MAX_REQUEST_LINE>;

/// Errors on a single connection exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionError {
    /// Peer went away before the request line arrived
    ReadFailed,
    /// Peer went away before the response was written
    WriteFailed,
}

/// A single accepted connection
pub trait Connection {
    /// Read the request line (up to the carriage return)
    fn read_line(&mut self) -> Result<RequestLine, ConnectionError>;

    /// Write the status response; the connection closes afterwards
    fn write_response(&mut self, response: &StatusResponse) -> Result<(), ConnectionError>;
}

/// Non-blocking source of inbound connections
pub trait ConnectionSource {
    type Conn: Connection;

    /// Return a pending connection if one is waiting, without blocking.
    ///
    /// At most one connection is taken per controller tick; anything else
    /// queues in the transport until the next tick.
    fn poll_connection(&mut self) -> Option<Self::Conn>;
}
