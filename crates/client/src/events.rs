// SPDX-License-Identifier: MIT

//! Event delivery seam between the notification listener and whatever
//! front-end consumes the client (CLI, GUI). The core never depends on
//! consumer types; it only calls through this trait.

use async_trait::async_trait;

/// Whether the notification listener keeps running after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlow {
    Continue,
    /// Terminate the listener loop; no further datagrams are processed.
    Stop,
}

/// Receiver for application event datagrams.
///
/// Liveness pings are answered inside the listener and never reach the
/// handler; every other datagram is delivered verbatim.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn on_event(&self, payload: Vec<u8>) -> EventFlow;
}
