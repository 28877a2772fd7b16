//! Time-sync client trait

use crate::time::TimeSnapshot;

/// Opaque client for the remote time authority
///
/// The client owns its own refresh policy: `update` is called once per
/// controller tick and the implementation decides internally whether to
/// actually consult the network or keep serving cached time. Sync failures
/// are the client's private business; the sign keeps rendering stale or
/// default time.
pub trait TimeClient {
    /// Give the client a chance to refresh; must not block the render path
    fn update(&mut self);

    /// Latest resolved local time, `None` before the first successful sync
    fn now(&self) -> Option<TimeSnapshot>;
}
