// SPDX-License-Identifier: MIT

//! Wire grammar for the LinuxSampler Control Protocol (LSCP).
//!
//! Commands are ASCII lines terminated by CRLF; responses are either a
//! success line, `ERR:<code>:<message>`, or `WRN:<code>:<message>`.
//! This crate holds the text scanner, response classification, the
//! typed response records with their parsers, and the command builders.
//! It performs no I/O.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod command;
mod record;
mod scanner;
mod status;

pub use command::Command;
pub use record::{
    parse_buffer_fill, parse_engine_names, AudioBackend, BufferFill, ChannelInfo, EngineInfo,
    MidiBackend, UsageUnit, ENGINES_BLOCK,
};
pub use scanner::{ltrim, Scanner};
pub use status::{ErrorCode, Reply, Status};
