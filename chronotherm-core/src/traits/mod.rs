//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic and the
//! external collaborators: the matrix panel, the network connection
//! acceptor, and the time-sync client.

pub mod connection;
pub mod panel;
pub mod time;

pub use connection::{Connection, ConnectionError, ConnectionSource, RequestLine};
pub use panel::Panel;
pub use time::TimeClient;
