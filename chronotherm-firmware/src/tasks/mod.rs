//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod controller;
pub mod net;
pub mod panel;
pub mod server;
pub mod sync;

pub use controller::controller_task;
pub use net::{net_task, wifi_task};
pub use panel::panel_task;
pub use server::server_task;
pub use sync::sync_task;
