// SPDX-License-Identifier: MIT

//! Shared fixtures for the integration specs: a scripted mock sampler
//! and event-handler helpers.

#![allow(dead_code)] // each spec file uses a subset of the prelude

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::mpsc;

use lscp_client::{Client, EventFlow, EventHandler};

/// Scripted control-stream peer. Accepts one connection, answers each
/// received request with the next canned response, records every
/// request, and closes the stream once the script runs out.
pub struct MockSampler {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockSampler {
    pub async fn start(script: Vec<&'static str>) -> MockSampler {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);

        tokio::spawn(async move {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let mut script = script.into_iter();
            let mut buf = [0u8; 4096];
            loop {
                let Ok(len) = stream.read(&mut buf).await else {
                    break;
                };
                if len == 0 {
                    break;
                }
                log.lock()
                    .unwrap()
                    .push(String::from_utf8_lossy(&buf[..len]).into_owned());
                match script.next() {
                    Some(reply) => {
                        if stream.write_all(reply.as_bytes()).await.is_err() {
                            break;
                        }
                    }
                    // Script exhausted: drop the connection.
                    None => break,
                }
            }
        });

        MockSampler { addr, requests }
    }

    /// Connect a client to this mock with a given handler.
    pub async fn client_with(&self, handler: Arc<dyn EventHandler>) -> Client {
        Client::connect("127.0.0.1", self.addr.port(), handler)
            .await
            .unwrap()
    }

    /// Connect a client that discards all events.
    pub async fn client(&self) -> Client {
        self.client_with(Arc::new(NullHandler)).await
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Handler that discards every event.
pub struct NullHandler;

#[async_trait]
impl EventHandler for NullHandler {
    async fn on_event(&self, _payload: Vec<u8>) -> EventFlow {
        EventFlow::Continue
    }
}

/// Handler that forwards payloads to a channel, stopping the listener
/// when the channel's receiver is dropped.
pub struct ChannelHandler {
    sender: mpsc::UnboundedSender<Vec<u8>>,
}

#[async_trait]
impl EventHandler for ChannelHandler {
    async fn on_event(&self, payload: Vec<u8>) -> EventFlow {
        if self.sender.send(payload).is_ok() {
            EventFlow::Continue
        } else {
            EventFlow::Stop
        }
    }
}

/// Build a channel-backed handler plus its receiving end.
pub fn event_channel() -> (Arc<dyn EventHandler>, mpsc::UnboundedReceiver<Vec<u8>>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (Arc::new(ChannelHandler { sender }), receiver)
}

/// Server-side UDP endpoint for driving the client's event socket.
pub struct EventPeer {
    pub socket: UdpSocket,
}

impl EventPeer {
    pub async fn start() -> EventPeer {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        EventPeer { socket }
    }

    pub async fn send(&self, payload: &[u8], client_port: u16) {
        let target: SocketAddr = ([127, 0, 0, 1], client_port).into();
        self.socket.send_to(payload, target).await.unwrap();
    }

    /// Wait briefly for a reply datagram; `None` on timeout.
    pub async fn recv(&self) -> Option<String> {
        let mut buf = [0u8; 512];
        match tokio::time::timeout(Duration::from_millis(300), self.socket.recv_from(&mut buf))
            .await
        {
            Ok(Ok((len, _))) => Some(String::from_utf8_lossy(&buf[..len]).into_owned()),
            _ => None,
        }
    }
}
