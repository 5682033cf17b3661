// SPDX-License-Identifier: MIT

//! Transport agents: the synchronous control stream and the event
//! datagram socket with its background listener task.

use std::net::SocketAddr;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::ClientError;
use crate::events::EventHandler;
use crate::listener;

/// Receive buffer for one response or datagram.
pub(crate) const RECV_BUF: usize = 4096;

/// Control stream agent. No background loop; `call` is the only user
/// and is never invoked concurrently with itself.
#[derive(Debug)]
pub(crate) struct Control {
    stream: TcpStream,
}

impl Control {
    pub async fn connect(addr: SocketAddr) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(addr).await.map_err(ClientError::Connect)?;
        debug!(%addr, "control stream connected");
        Ok(Self { stream })
    }

    /// Send the exact request bytes, then block for one response.
    ///
    /// A zero-length receive means the server closed the stream; the
    /// caller must treat any failure as connection-level.
    pub async fn call(&mut self, request: &[u8]) -> Result<Vec<u8>, ClientError> {
        self.stream.write_all(request).await.map_err(ClientError::Send)?;
        let mut buf = vec![0u8; RECV_BUF];
        let len = self.stream.read(&mut buf).await.map_err(ClientError::Recv)?;
        if len == 0 {
            return Err(ClientError::ConnectionClosed);
        }
        buf.truncate(len);
        Ok(buf)
    }
}

/// Event datagram agent: a UDP socket bound to an ephemeral local port
/// plus the background listener task that services it.
#[derive(Debug)]
pub(crate) struct EventPort {
    socket: Arc<UdpSocket>,
    local_port: u16,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl EventPort {
    pub async fn bind() -> Result<Self, ClientError> {
        let socket = UdpSocket::bind(("0.0.0.0", 0)).await.map_err(ClientError::Bind)?;
        let local_port = socket.local_addr().map_err(ClientError::Bind)?.port();
        debug!(port = local_port, "event socket bound");
        Ok(Self {
            socket: Arc::new(socket),
            local_port,
            cancel: CancellationToken::new(),
            task: None,
        })
    }

    /// Port the server must be told to ping (`SUBSCRIBE NOTIFICATION`).
    pub fn local_port(&self) -> u16 {
        self.local_port
    }

    /// Launch the listener loop. At most one task is ever started.
    pub fn start(
        &mut self,
        handler: Arc<dyn EventHandler>,
        session_id: Arc<Mutex<Option<String>>>,
    ) {
        if self.task.is_some() {
            return;
        }
        let socket = Arc::clone(&self.socket);
        let cancel = self.cancel.clone();
        self.task = Some(tokio::spawn(listener::run(socket, handler, session_id, cancel)));
    }

    /// Request the listener loop to exit.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Wait for the listener task to finish.
    pub async fn join(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}
