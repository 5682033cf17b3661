// SPDX-License-Identifier: MIT

//! Response classification for the control stream.
//!
//! Every response line is classified as success, warning, or error by
//! prefix. Error and warning lines carry `ERR:<code>:<message>` or
//! `WRN:<code>:<message>`; the message keeps any further colons.

use crate::scanner::ltrim;

/// Outcome of one control-stream transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Server accepted the command.
    Ok,
    /// Server answered with a `WRN:` line.
    Warning,
    /// Server answered with an `ERR:` line.
    Error,
    /// The transaction itself failed at the transport level.
    Failed,
}

/// Cached numeric error code from the last classified reply.
///
/// `Unset` means no query has completed yet; `Unknown` means the server
/// sent an error line whose numeric part did not parse. Keeping those
/// explicit avoids inheriting a stale code from an earlier reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCode {
    #[default]
    Unset,
    Code(i32),
    Unknown,
}

impl ErrorCode {
    /// Numeric value, if the server reported one.
    pub fn as_i32(self) -> Option<i32> {
        match self {
            ErrorCode::Code(code) => Some(code),
            ErrorCode::Unset | ErrorCode::Unknown => None,
        }
    }
}

/// A classified response line.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: Status,
    /// Success text or error/warning message, left-trimmed.
    pub message: Option<String>,
    pub code: ErrorCode,
}

impl Reply {
    /// Classify a raw response, trimming trailing CR/LF first.
    pub fn classify(raw: &str) -> Reply {
        let line = raw.trim_end_matches(['\r', '\n']);
        if let Some(rest) = line.strip_prefix("ERR:") {
            Self::fault(Status::Error, rest)
        } else if let Some(rest) = line.strip_prefix("WRN:") {
            Self::fault(Status::Warning, rest)
        } else {
            Reply {
                status: Status::Ok,
                message: Some(ltrim(line).to_string()),
                code: ErrorCode::Code(0),
            }
        }
    }

    /// Split `<code>:<message>` after an `ERR:`/`WRN:` prefix. The
    /// message keeps any colons of its own.
    fn fault(status: Status, rest: &str) -> Reply {
        let mut parts = rest.splitn(2, ':');
        let code = parts
            .next()
            .and_then(|tok| tok.trim().parse().ok())
            .map_or(ErrorCode::Unknown, ErrorCode::Code);
        let message = parts.next().map(|msg| ltrim(msg).to_string());
        Reply { status, message, code }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
