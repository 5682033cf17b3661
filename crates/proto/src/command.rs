// SPDX-License-Identifier: MIT

//! Typed builders for control-stream command lines.
//!
//! Each variant renders one CRLF-terminated ASCII line. Argument
//! validation (MIDI channel range, backend selection) happens in the
//! client before a command is built; rendering itself cannot fail.

use std::fmt;

use crate::record::{AudioBackend, MidiBackend, UsageUnit};

/// A control-stream command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command<'a> {
    AddChannel,
    RemoveChannel { channel: u32 },
    ResetChannel { channel: u32 },
    GetChannels,
    GetAvailableEngines,
    GetEngineInfo { engine: &'a str },
    GetChannelInfo { channel: u32 },
    GetVoiceCount { channel: u32 },
    GetStreamCount { channel: u32 },
    GetBufferFill { unit: UsageUnit, channel: u32 },
    LoadEngine { engine: &'a str, channel: u32 },
    LoadInstrument { path: &'a str, index: u32, channel: u32 },
    SetAudioType { channel: u32, backend: AudioBackend },
    SetAudioChannel { channel: u32, audio_channel: u32 },
    SetMidiType { channel: u32, backend: MidiBackend },
    SetMidiPort { channel: u32, port: &'a str },
    SetMidiChannel { channel: u32, midi_channel: u8 },
    SetVolume { channel: u32, volume: f32 },
    Subscribe { port: u16 },
    Unsubscribe { session: &'a str },
}

impl Command<'_> {
    /// Render the CRLF-terminated wire line.
    pub fn to_wire(&self) -> String {
        format!("{self}\r\n")
    }
}

impl fmt::Display for Command<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::AddChannel => write!(f, "ADD CHANNEL"),
            Command::RemoveChannel { channel } => write!(f, "REMOVE CHANNEL {channel}"),
            Command::ResetChannel { channel } => write!(f, "RESET CHANNEL {channel}"),
            Command::GetChannels => write!(f, "GET CHANNELS"),
            Command::GetAvailableEngines => write!(f, "GET AVAILABLE_ENGINES"),
            Command::GetEngineInfo { engine } => write!(f, "GET ENGINE INFO {engine}"),
            Command::GetChannelInfo { channel } => write!(f, "GET CHANNEL INFO {channel}"),
            Command::GetVoiceCount { channel } => {
                write!(f, "GET CHANNEL VOICE_COUNT {channel}")
            }
            Command::GetStreamCount { channel } => {
                write!(f, "GET CHANNEL STREAM_COUNT {channel}")
            }
            Command::GetBufferFill { unit, channel } => {
                write!(f, "GET CHANNEL BUFFER_FILL {} {channel}", unit.as_wire())
            }
            Command::LoadEngine { engine, channel } => {
                write!(f, "LOAD ENGINE {engine} {channel}")
            }
            Command::LoadInstrument { path, index, channel } => {
                write!(f, "LOAD INSTRUMENT {path} {index} {channel}")
            }
            Command::SetAudioType { channel, backend } => {
                let driver = backend.as_wire().unwrap_or("NONE");
                write!(f, "SET CHANNEL AUDIO_OUTPUT_TYPE {channel} {driver}")
            }
            Command::SetAudioChannel { channel, audio_channel } => {
                write!(f, "SET CHANNEL AUDIO_OUTPUT_CHANNEL {channel} {audio_channel}")
            }
            Command::SetMidiType { channel, backend } => {
                let driver = backend.as_wire().unwrap_or("NONE");
                write!(f, "SET CHANNEL MIDI_INPUT_TYPE {channel} {driver}")
            }
            Command::SetMidiPort { channel, port } => {
                write!(f, "SET CHANNEL MIDI_INPUT_PORT {channel} {port}")
            }
            Command::SetMidiChannel { channel, midi_channel } => {
                write!(f, "SET CHANNEL MIDI_INPUT_CHANNEL {channel} {midi_channel}")
            }
            Command::SetVolume { channel, volume } => {
                write!(f, "SET CHANNEL VOLUME {channel} {volume}")
            }
            Command::Subscribe { port } => write!(f, "SUBSCRIBE NOTIFICATION {port}"),
            Command::Unsubscribe { session } => {
                write!(f, "UNSUBSCRIBE NOTIFICATION {session}")
            }
        }
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
