//! HTTP listener task
//!
//! Accepts one connection at a time, reads the request line, hands it to
//! the controller through [`REQUEST_CHANNEL`], waits for the encoded
//! response, writes it and closes. The controller polls its end once per
//! tick, so a connection is answered within about one tick interval;
//! anything arriving meanwhile waits in the TCP backlog.
//!
//! This task is also where the core's connection seam is implemented:
//! [`NetRequests`] is the non-blocking [`ConnectionSource`] the controller
//! polls, backed by these channels.

use defmt::*;
use embassy_net::tcp::TcpSocket;
use embassy_net::Stack;
use embassy_time::Duration;
use embedded_io_async::Write;

use chronotherm_core::traits::{Connection, ConnectionError, ConnectionSource, RequestLine};
use chronotherm_protocol::StatusResponse;

use crate::channels::{REQUEST_CHANNEL, RESPONSE_CHANNEL};

/// Give up on a silent peer rather than wedging the listener
const SOCKET_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP listener - one connection at a time
#[embassy_executor::task]
pub async fn server_task(stack: Stack<'static>, port: u16) -> ! {
    info!("HTTP server started on port {}", port);

    let mut rx_buffer = [0u8; 512];
    let mut tx_buffer = [0u8; 512];

    loop {
        let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
        socket.set_timeout(Some(SOCKET_TIMEOUT));

        if let Err(e) = socket.accept(port).await {
            warn!("accept failed: {:?}", e);
            continue;
        }

        // A dead or silent peer yields an empty line, which the controller
        // answers like any other unrecognized request.
        let line = read_request_line(&mut socket).await;
        debug!("request: {}", line.as_str());

        REQUEST_CHANNEL.send(line).await;
        let response = RESPONSE_CHANNEL.receive().await;

        // Peer may have hung up while we waited for the tick; abandon it
        if socket.write_all(response.as_bytes()).await.is_ok() {
            let _ = socket.flush().await;
        }
        socket.close();
    }
}

/// Read up to the first line feed, keeping everything before the carriage
/// return. The rest of the request header is not interesting and is left
/// for the close to discard.
async fn read_request_line(socket: &mut TcpSocket<'_>) -> RequestLine {
    let mut line = RequestLine::new();
    let mut buf = [0u8; 64];

    'outer: loop {
        let n = match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        for &byte in &buf[..n] {
            match byte {
                b'\r' | b'\n' => break 'outer,
                _ => {
                    // Longer than the line buffer means it is not a
                    // request we recognize anyway; truncate and move on
                    if line.push(byte as char).is_err() {
                        break 'outer;
                    }
                }
            }
        }
    }

    line
}

/// The controller's view of the listener: poll for a forwarded request
/// line, answer into the response channel
pub struct NetRequests;

/// One forwarded exchange
pub struct NetRequest {
    line: RequestLine,
}

impl ConnectionSource for NetRequests {
    type Conn = NetRequest;

    fn poll_connection(&mut self) -> Option<Self::Conn> {
        REQUEST_CHANNEL
            .try_receive()
            .ok()
            .map(|line| NetRequest { line })
    }
}

impl Connection for NetRequest {
    fn read_line(&mut self) -> Result<RequestLine, ConnectionError> {
        Ok(self.line.clone())
    }

    fn write_response(&mut self, response: &StatusResponse) -> Result<(), ConnectionError> {
        // The server task is parked on this channel, so capacity 1 always
        // has room; a full channel means the listener died mid-exchange.
        RESPONSE_CHANNEL
            .try_send(response.encode())
            .map_err(|_| ConnectionError::WriteFailed)
    }
}
