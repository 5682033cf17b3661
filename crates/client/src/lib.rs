// SPDX-License-Identifier: MIT

//! Client for the LinuxSampler Control Protocol (LSCP).
//!
//! Commands travel over a persistent TCP stream, one transaction in
//! flight at a time; asynchronous events and liveness pings arrive on a
//! companion UDP socket serviced by a background task. The [`Client`]
//! handle owns both channels, the session identifier, and the result
//! caches populated by the typed queries.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod error;
mod events;
mod listener;
mod session;
mod transport;

pub use error::ClientError;
pub use events::{EventFlow, EventHandler};
pub use session::Client;

// Re-export the wire-level types callers see in the public API.
pub use lscp_proto::{
    AudioBackend, BufferFill, ChannelInfo, Command, EngineInfo, ErrorCode, MidiBackend, Status,
    UsageUnit,
};

/// Library package name.
pub const PACKAGE: &str = env!("CARGO_PKG_NAME");

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
