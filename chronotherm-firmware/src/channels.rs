//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.
//!
//! The server task and the controller task meet in the middle here: one
//! request line goes in, one encoded response comes back. Both channels have
//! capacity 1 on purpose - the controller services at most one connection
//! per tick, and the server holds any further connections in the TCP
//! backlog until it gets its answer.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use chronotherm_core::traits::RequestLine;
use chronotherm_protocol::RESPONSE_CAPACITY;
use heapless::String;

use crate::time::SyncPoint;

/// Request lines from accepted connections, one at a time
pub static REQUEST_CHANNEL: Channel<CriticalSectionRawMutex, RequestLine, 1> = Channel::new();

/// Encoded status responses back to the connection being serviced
pub static RESPONSE_CHANNEL: Channel<CriticalSectionRawMutex, String<RESPONSE_CAPACITY>, 1> =
    Channel::new();

/// Latest successful time sync (unix seconds + the instant it landed)
pub static TIME_SYNC: Signal<CriticalSectionRawMutex, SyncPoint> = Signal::new();
