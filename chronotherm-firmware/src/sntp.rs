//! Minimal SNTP client
//!
//! One 48-byte request, one 48-byte reply, no poll intervals, no stratum
//! chasing: the sign only needs unix seconds good to the minute. The sync
//! task decides how often to call this; failures here just mean the sign
//! keeps running on the previous sync.

use embassy_net::dns::DnsQueryType;
use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::{IpEndpoint, Stack};
use embassy_time::{with_timeout, Duration};

/// NTP wire port
const NTP_PORT: u16 = 123;

/// Local port for the exchange (smoltcp requires a concrete one)
const LOCAL_PORT: u16 = 58123;

/// Seconds between the NTP epoch (1900) and the unix epoch (1970)
const NTP_UNIX_EPOCH_DELTA: u64 = 2_208_988_800;

/// LI = unknown, version 4, mode = client
const REQUEST_HEADER: u8 = 0xE3;

/// Offset of the transmit-timestamp seconds field in the reply
const TRANSMIT_SECONDS_OFFSET: usize = 40;

/// How long to wait for the authority before giving up this round
const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

/// Ways a sync round can fail (all of them retryable)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SntpError {
    /// Hostname did not resolve
    Dns,
    /// Socket bind/send failed
    Network,
    /// No reply within the timeout
    Timeout,
    /// Reply too short or timestamp zero
    Malformed,
}

/// Query the time authority once; returns unix seconds
pub async fn query_unix_time(stack: Stack<'static>, server: &str) -> Result<u64, SntpError> {
    let addrs = stack
        .dns_query(server, DnsQueryType::A)
        .await
        .map_err(|_| SntpError::Dns)?;
    let addr = *addrs.first().ok_or(SntpError::Dns)?;

    let mut rx_meta = [PacketMetadata::EMPTY; 2];
    let mut rx_buffer = [0u8; 64];
    let mut tx_meta = [PacketMetadata::EMPTY; 2];
    let mut tx_buffer = [0u8; 64];
    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );
    socket.bind(LOCAL_PORT).map_err(|_| SntpError::Network)?;

    let mut packet = [0u8; 48];
    packet[0] = REQUEST_HEADER;
    socket
        .send_to(&packet, IpEndpoint::new(addr, NTP_PORT))
        .await
        .map_err(|_| SntpError::Network)?;

    let mut reply = [0u8; 48];
    let (len, _) = with_timeout(REPLY_TIMEOUT, socket.recv_from(&mut reply))
        .await
        .map_err(|_| SntpError::Timeout)?
        .map_err(|_| SntpError::Network)?;

    if len < TRANSMIT_SECONDS_OFFSET + 4 {
        return Err(SntpError::Malformed);
    }

    let mut seconds = [0u8; 4];
    seconds.copy_from_slice(&reply[TRANSMIT_SECONDS_OFFSET..TRANSMIT_SECONDS_OFFSET + 4]);
    let ntp_seconds = u64::from(u32::from_be_bytes(seconds));

    // A zero (or otherwise pre-1970) timestamp is a kiss-of-death reply
    ntp_seconds
        .checked_sub(NTP_UNIX_EPOCH_DELTA)
        .ok_or(SntpError::Malformed)
}
