// SPDX-License-Identifier: MIT

//! Client error taxonomy.
//!
//! Transport failures are always `Err` and never retried internally.
//! Server-reported `ERR:`/`WRN:` replies are not errors at this level;
//! they land in the session's status/result/errno caches.

use std::io;

use thiserror::Error;

/// Errors from connection setup and control-stream transactions.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("no address found for {host}")]
    NoAddress { host: String },

    #[error("control connect failed: {0}")]
    Connect(#[source] io::Error),

    #[error("event socket bind failed: {0}")]
    Bind(#[source] io::Error),

    #[error("send failed: {0}")]
    Send(#[source] io::Error),

    #[error("receive failed: {0}")]
    Recv(#[source] io::Error),

    #[error("connection closed by server")]
    ConnectionClosed,

    #[error("a session is already subscribed")]
    AlreadySubscribed,

    #[error("no session is subscribed")]
    NotSubscribed,

    #[error("invalid argument: {0}")]
    InvalidArg(&'static str),
}
