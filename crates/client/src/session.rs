// SPDX-License-Identifier: MIT

//! The client handle: connection lifecycle, the request/response
//! transaction, and the result caches the typed queries populate.
//!
//! One transaction is in flight at a time; every control-stream
//! operation takes `&mut self` and blocks until the response is read.
//! The session identifier is the only field shared with the listener
//! task and lives behind a mutex.

use std::net::SocketAddr;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::net::lookup_host;
use tracing::{debug, warn};

use lscp_proto::{
    parse_buffer_fill, parse_engine_names, AudioBackend, BufferFill, ChannelInfo, Command,
    EngineInfo, ErrorCode, MidiBackend, Reply, Scanner, Status, UsageUnit,
};

use crate::error::ClientError;
use crate::events::EventHandler;
use crate::transport::{Control, EventPort};

/// A connected LSCP client.
///
/// Created by [`Client::connect`]; torn down by [`Client::close`],
/// which stops and joins the notification listener before the sockets
/// are released. Callers are expected to check the returned [`Status`]
/// after every query and read [`Client::result`] / [`Client::errno`]
/// only when it is not `Ok`.
#[derive(Debug)]
pub struct Client {
    control: Control,
    events: EventPort,
    /// Shared with the listener task, which adopts the identifier from
    /// the first liveness ping when subscribe hasn't assigned one yet.
    session_id: Arc<Mutex<Option<String>>>,
    last_result: Option<String>,
    last_error: ErrorCode,
    engines: Option<Vec<String>>,
    engine_info: EngineInfo,
    channel_info: ChannelInfo,
    /// Sized to the queried channel's stream count at last measurement.
    buffer_fill: Vec<BufferFill>,
}

impl Client {
    /// Connect to a server, bind the event socket, and start the
    /// notification listener.
    ///
    /// Any failure unwinds everything acquired so far; a half-built
    /// handle is never returned.
    pub async fn connect(
        host: &str,
        port: u16,
        handler: Arc<dyn EventHandler>,
    ) -> Result<Client, ClientError> {
        let addr = resolve(host, port).await?;
        let control = Control::connect(addr).await?;
        let mut events = EventPort::bind().await?;

        let session_id = Arc::new(Mutex::new(None));
        events.start(handler, Arc::clone(&session_id));
        debug!(host, port, "client connected");

        Ok(Client {
            control,
            events,
            session_id,
            last_result: None,
            last_error: ErrorCode::Unset,
            engines: None,
            engine_info: EngineInfo::default(),
            channel_info: ChannelInfo::default(),
            buffer_fill: Vec::new(),
        })
    }

    /// Tear the client down: stop the listener, wait for it to exit,
    /// then release caches and sockets.
    pub async fn close(mut self) {
        self.events.stop();
        self.events.join().await;
        self.session_id.lock().take();
        debug!("client closed");
    }

    // --- Raw transaction ---

    /// Send exact request bytes and return the raw response bytes.
    ///
    /// No retry: a failure is connection-level and the caller should
    /// reconnect.
    pub async fn call(&mut self, request: &[u8]) -> Result<Vec<u8>, ClientError> {
        self.control.call(request).await
    }

    /// Submit one CRLF-terminated command line and classify the
    /// response, updating the result and errno caches.
    ///
    /// On [`Status::Failed`] the caches keep their previous contents;
    /// the transport detail is logged, not returned.
    pub async fn query(&mut self, line: &str) -> Status {
        let raw = match self.control.call(line.as_bytes()).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "control transaction failed");
                return Status::Failed;
            }
        };
        let text = String::from_utf8_lossy(&raw);
        let reply = Reply::classify(&text);
        self.last_result = reply.message;
        self.last_error = reply.code;
        reply.status
    }

    /// Last result text: the success line, or the error/warning message.
    pub fn result(&self) -> Option<&str> {
        self.last_result.as_deref()
    }

    /// Numeric code cached from the last classified reply.
    pub fn errno(&self) -> ErrorCode {
        self.last_error
    }

    /// Currently held session identifier, if subscribed.
    pub fn session_id(&self) -> Option<String> {
        self.session_id.lock().clone()
    }

    /// Local UDP port the server sends events and liveness pings to.
    pub fn notification_port(&self) -> u16 {
        self.events.local_port()
    }

    // --- Event registration ---

    /// Register for event notifications: `SUBSCRIBE NOTIFICATION
    /// <udp-port>`. Refused without touching the transport while a
    /// session identifier is already held.
    ///
    /// The identifier comes from the server's `OK[<sessid>]`
    /// acknowledgment, or later from the first liveness ping --
    /// whichever happens first.
    pub async fn subscribe(&mut self) -> Result<Status, ClientError> {
        if self.session_id.lock().is_some() {
            return Err(ClientError::AlreadySubscribed);
        }
        let command = Command::Subscribe { port: self.events.local_port() };
        let status = self.query(&command.to_wire()).await;
        if status == Status::Ok {
            if let Some(sessid) = self.last_result.as_deref().and_then(parse_subscribe_ack) {
                let mut held = self.session_id.lock();
                // The listener may have adopted one from a ping already.
                if held.is_none() {
                    *held = Some(sessid);
                }
            }
        }
        Ok(status)
    }

    /// Deregister from event notifications and clear the held session
    /// identifier, so stale pings are no longer answered.
    pub async fn unsubscribe(&mut self) -> Result<Status, ClientError> {
        let Some(sessid) = self.session_id.lock().clone() else {
            return Err(ClientError::NotSubscribed);
        };
        let command = Command::Unsubscribe { session: &sessid };
        let status = self.query(&command.to_wire()).await;
        if status == Status::Ok {
            self.session_id.lock().take();
        }
        Ok(status)
    }

    // --- Channel management ---

    /// `ADD CHANNEL`
    pub async fn add_channel(&mut self) -> Status {
        self.query(&Command::AddChannel.to_wire()).await
    }

    /// `REMOVE CHANNEL <channel>`
    pub async fn remove_channel(&mut self, channel: u32) -> Status {
        self.query(&Command::RemoveChannel { channel }.to_wire()).await
    }

    /// `RESET CHANNEL <channel>`
    pub async fn reset_channel(&mut self, channel: u32) -> Status {
        self.query(&Command::ResetChannel { channel }.to_wire()).await
    }

    /// `LOAD ENGINE <engine> <channel>`
    pub async fn load_engine(&mut self, engine: &str, channel: u32) -> Status {
        self.query(&Command::LoadEngine { engine, channel }.to_wire()).await
    }

    /// `LOAD INSTRUMENT <path> <index> <channel>`
    pub async fn load_instrument(&mut self, path: &str, index: u32, channel: u32) -> Status {
        self.query(&Command::LoadInstrument { path, index, channel }.to_wire()).await
    }

    // --- Numeric queries ---

    /// `GET CHANNELS`: current number of sampler channels.
    pub async fn channels(&mut self) -> Option<u32> {
        self.numeric_query(&Command::GetChannels.to_wire()).await
    }

    /// `GET CHANNEL VOICE_COUNT <channel>`
    pub async fn voice_count(&mut self, channel: u32) -> Option<u32> {
        self.numeric_query(&Command::GetVoiceCount { channel }.to_wire()).await
    }

    /// `GET CHANNEL STREAM_COUNT <channel>`
    pub async fn stream_count(&mut self, channel: u32) -> Option<u32> {
        self.numeric_query(&Command::GetStreamCount { channel }.to_wire()).await
    }

    async fn numeric_query(&mut self, line: &str) -> Option<u32> {
        if self.query(line).await != Status::Ok {
            return None;
        }
        self.last_result.as_deref().and_then(|text| text.trim().parse().ok())
    }

    // --- Structured queries ---

    /// `GET AVAILABLE_ENGINES`: enumerate loadable engines.
    ///
    /// An empty slice means the server reported no engines; `None`
    /// means the query failed (the previous cache, if any, is kept).
    pub async fn available_engines(&mut self) -> Option<&[String]> {
        if self.query(&Command::GetAvailableEngines.to_wire()).await != Status::Ok {
            return None;
        }
        let names = parse_engine_names(self.last_result.as_deref().unwrap_or_default());
        self.engines = Some(names);
        self.engines.as_deref()
    }

    /// Engine names cached by the last successful enumeration.
    pub fn engine_names(&self) -> Option<&[String]> {
        self.engines.as_deref()
    }

    /// `GET ENGINE INFO <engine>`: description and version.
    ///
    /// The cached record is reset before repopulation, so fields the
    /// response omits read as unset. Copy the record before issuing
    /// another query if it must outlive the next call.
    pub async fn engine_info(&mut self, engine: &str) -> Option<&EngineInfo> {
        if engine.is_empty() {
            return None;
        }
        if self.query(&Command::GetEngineInfo { engine }.to_wire()).await != Status::Ok {
            return None;
        }
        self.engine_info = EngineInfo::parse(self.last_result.as_deref().unwrap_or_default());
        Some(&self.engine_info)
    }

    /// `GET CHANNEL INFO <channel>`: routing, instrument and volume.
    /// Same reset-before-populate rule as [`Client::engine_info`].
    pub async fn channel_info(&mut self, channel: u32) -> Option<&ChannelInfo> {
        if self.query(&Command::GetChannelInfo { channel }.to_wire()).await != Status::Ok {
            return None;
        }
        self.channel_info = ChannelInfo::parse(self.last_result.as_deref().unwrap_or_default());
        Some(&self.channel_info)
    }

    /// Channel volume, read via `GET CHANNEL INFO <channel>`.
    pub async fn volume(&mut self, channel: u32) -> Option<f32> {
        self.channel_info(channel).await.map(|info| info.volume)
    }

    /// `GET CHANNEL BUFFER_FILL {BYTES|PERCENTAGE} <channel>`: per-disk-
    /// stream buffer usage.
    ///
    /// The table is sized by a fresh `STREAM_COUNT` query whenever the
    /// count differs from its last-known size; wire entries beyond that
    /// capacity are dropped.
    pub async fn buffer_fill(
        &mut self,
        unit: UsageUnit,
        channel: u32,
    ) -> Option<&[BufferFill]> {
        let count = self.stream_count(channel).await? as usize;
        if count == 0 {
            return None;
        }
        if self.buffer_fill.len() != count {
            self.buffer_fill = vec![BufferFill::default(); count];
        }
        if self.query(&Command::GetBufferFill { unit, channel }.to_wire()).await != Status::Ok {
            return None;
        }
        parse_buffer_fill(
            self.last_result.as_deref().unwrap_or_default(),
            &mut self.buffer_fill,
        );
        Some(&self.buffer_fill)
    }

    // --- Routing setters ---

    /// `SET CHANNEL AUDIO_OUTPUT_TYPE <channel> <driver>`
    pub async fn set_audio_type(
        &mut self,
        channel: u32,
        backend: AudioBackend,
    ) -> Result<Status, ClientError> {
        if backend.as_wire().is_none() {
            return Err(ClientError::InvalidArg("audio backend must be a concrete driver"));
        }
        Ok(self.query(&Command::SetAudioType { channel, backend }.to_wire()).await)
    }

    /// `SET CHANNEL AUDIO_OUTPUT_CHANNEL <channel> <audio-channel>`
    pub async fn set_audio_channel(&mut self, channel: u32, audio_channel: u32) -> Status {
        self.query(&Command::SetAudioChannel { channel, audio_channel }.to_wire()).await
    }

    /// `SET CHANNEL MIDI_INPUT_TYPE <channel> <driver>`
    pub async fn set_midi_type(
        &mut self,
        channel: u32,
        backend: MidiBackend,
    ) -> Result<Status, ClientError> {
        if backend.as_wire().is_none() {
            return Err(ClientError::InvalidArg("midi backend must be a concrete driver"));
        }
        Ok(self.query(&Command::SetMidiType { channel, backend }.to_wire()).await)
    }

    /// `SET CHANNEL MIDI_INPUT_PORT <channel> <port>`
    pub async fn set_midi_port(&mut self, channel: u32, port: &str) -> Status {
        self.query(&Command::SetMidiPort { channel, port }.to_wire()).await
    }

    /// `SET CHANNEL MIDI_INPUT_CHANNEL <channel> <midi-channel>`,
    /// MIDI channel 1-16.
    pub async fn set_midi_channel(
        &mut self,
        channel: u32,
        midi_channel: u8,
    ) -> Result<Status, ClientError> {
        if !(1..=16).contains(&midi_channel) {
            return Err(ClientError::InvalidArg("midi channel must be 1-16"));
        }
        Ok(self.query(&Command::SetMidiChannel { channel, midi_channel }.to_wire()).await)
    }

    /// `SET CHANNEL VOLUME <channel> <volume>`, volume non-negative.
    pub async fn set_volume(&mut self, channel: u32, volume: f32) -> Result<Status, ClientError> {
        if !volume.is_finite() || volume < 0.0 {
            return Err(ClientError::InvalidArg("volume must be a non-negative number"));
        }
        Ok(self.query(&Command::SetVolume { channel, volume }.to_wire()).await)
    }
}

async fn resolve(host: &str, port: u16) -> Result<SocketAddr, ClientError> {
    let mut addrs = lookup_host((host, port)).await.map_err(|source| ClientError::Resolve {
        host: host.to_string(),
        source,
    })?;
    addrs.next().ok_or_else(|| ClientError::NoAddress { host: host.to_string() })
}

/// Extract the session identifier from an `OK[<sessid>]` acknowledgment.
fn parse_subscribe_ack(result: &str) -> Option<String> {
    let mut scan = Scanner::new(result);
    if scan.next("[]") != Some("OK") {
        return None;
    }
    scan.next("[]").map(str::to_string)
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
