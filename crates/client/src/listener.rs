// SPDX-License-Identifier: MIT

//! Notification listener: the event socket's background loop.
//!
//! Each datagram is either a liveness ping (answered in-loop) or an
//! application event (forwarded to the handler). The loop exits on
//! `stop()`, on a receive error, or when the handler signals stop.

use std::net::SocketAddr;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use lscp_proto::Scanner;

use crate::events::{EventFlow, EventHandler};
use crate::transport::RECV_BUF;

const PING_PREFIX: &[u8] = b"PING ";

pub(crate) async fn run(
    socket: Arc<UdpSocket>,
    handler: Arc<dyn EventHandler>,
    session_id: Arc<Mutex<Option<String>>>,
    cancel: CancellationToken,
) {
    debug!("event listener started");
    let mut buf = vec![0u8; RECV_BUF];
    loop {
        let (len, peer) = tokio::select! {
            _ = cancel.cancelled() => break,
            received = socket.recv_from(&mut buf) => match received {
                Ok(pair) => pair,
                Err(e) => {
                    error!(error = %e, "event receive failed");
                    break;
                }
            },
        };

        let datagram = &buf[..len];
        if datagram.starts_with(PING_PREFIX) {
            answer_ping(&socket, &session_id, datagram, peer).await;
        } else if handler.on_event(datagram.to_vec()).await == EventFlow::Stop {
            debug!("event handler requested stop");
            break;
        }
    }
    debug!("event listener exited");
}

/// Handle a `PING <port> <session-id>` datagram.
///
/// Adopts the session identifier if none is held yet, then replies
/// `PONG <session-id>` to the ping's origin when the token matches the
/// held identifier. A mismatch is a stray ping from an earlier session
/// and is ignored. A reply failure does not stop the loop.
async fn answer_ping(
    socket: &UdpSocket,
    session_id: &Mutex<Option<String>>,
    datagram: &[u8],
    peer: SocketAddr,
) {
    let text = String::from_utf8_lossy(datagram);
    let seps = " \r\n";
    let mut scan = Scanner::new(&text);
    scan.next(seps); // "PING"
    scan.next(seps); // originating port, already in `peer`
    let Some(token) = scan.next(seps) else {
        return;
    };

    // Lock scope ends before the reply send.
    let reply = {
        let mut held = session_id.lock();
        if held.is_none() {
            *held = Some(token.to_string());
        }
        match held.as_deref() {
            Some(sessid) if sessid == token => Some(format!("PONG {sessid}\r\n")),
            _ => None,
        }
    };

    match reply {
        Some(pong) => {
            if let Err(e) = socket.send_to(pong.as_bytes(), peer).await {
                warn!(error = %e, %peer, "pong reply failed");
            }
        }
        None => debug!(%peer, "ignoring ping for unknown session"),
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
