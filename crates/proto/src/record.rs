// SPDX-License-Identifier: MIT

//! Typed response records and their parsers.
//!
//! All parsers work on the already-classified result text of a
//! successful query and populate a fresh record, so a field absent from
//! the wire reads as its default rather than a stale value from an
//! earlier response. Unknown keywords and unknown driver literals are
//! ignored by design.

use crate::scanner::{ltrim, Scanner};

/// Allocation block for the engine-name cache.
pub const ENGINES_BLOCK: usize = 8;

const CRLF: &str = "\r\n";
const COLON: &str = ":";

/// Audio output driver attached to a sampler channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioBackend {
    #[default]
    None,
    Alsa,
    Jack,
}

impl AudioBackend {
    /// Wire literal used by `SET CHANNEL AUDIO_OUTPUT_TYPE`.
    pub fn as_wire(self) -> Option<&'static str> {
        match self {
            AudioBackend::Alsa => Some("ALSA"),
            AudioBackend::Jack => Some("JACK"),
            AudioBackend::None => None,
        }
    }

    fn from_wire(token: &str) -> Self {
        match token {
            "ALSA" => AudioBackend::Alsa,
            "JACK" => AudioBackend::Jack,
            _ => AudioBackend::None,
        }
    }
}

/// MIDI input driver attached to a sampler channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MidiBackend {
    #[default]
    None,
    Alsa,
}

impl MidiBackend {
    /// Wire literal used by `SET CHANNEL MIDI_INPUT_TYPE`.
    pub fn as_wire(self) -> Option<&'static str> {
        match self {
            MidiBackend::Alsa => Some("ALSA"),
            MidiBackend::None => None,
        }
    }

    fn from_wire(token: &str) -> Self {
        match token {
            "ALSA" => MidiBackend::Alsa,
            _ => MidiBackend::None,
        }
    }
}

/// Unit reported by `GET CHANNEL BUFFER_FILL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageUnit {
    Bytes,
    Percentage,
}

impl UsageUnit {
    pub fn as_wire(self) -> &'static str {
        match self {
            UsageUnit::Bytes => "BYTES",
            UsageUnit::Percentage => "PERCENTAGE",
        }
    }
}

/// `GET ENGINE INFO` record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineInfo {
    pub description: Option<String>,
    pub version: Option<String>,
}

impl EngineInfo {
    /// Parse a `KEY: value` response into a fresh record.
    pub fn parse(text: &str) -> EngineInfo {
        let mut info = EngineInfo::default();
        let mut scan = Scanner::new(text);
        while let Some(key) = scan.next(COLON) {
            match key.trim() {
                "DESCRIPTION" => info.description = value(&mut scan),
                "VERSION" => info.version = value(&mut scan),
                // Skip the unknown keyword's value so the next key parses.
                _ => {
                    scan.next(CRLF);
                }
            }
        }
        info
    }
}

/// `GET CHANNEL INFO` record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChannelInfo {
    pub engine_name: Option<String>,
    pub audio_backend: AudioBackend,
    pub audio_channel: Option<u32>,
    pub instrument: Option<String>,
    pub midi_backend: MidiBackend,
    pub midi_port: Option<String>,
    /// MIDI channel 1-16; `None` is omni/unset.
    pub midi_channel: Option<u8>,
    pub volume: f32,
}

impl ChannelInfo {
    /// Parse a `KEY: value` response into a fresh record.
    pub fn parse(text: &str) -> ChannelInfo {
        let mut info = ChannelInfo::default();
        let mut scan = Scanner::new(text);
        while let Some(key) = scan.next(COLON) {
            match key.trim() {
                "ENGINE_NAME" => info.engine_name = value(&mut scan),
                "AUDIO_OUTPUT_TYPE" => {
                    if let Some(tok) = scan.next(CRLF) {
                        info.audio_backend = AudioBackend::from_wire(ltrim(tok));
                    }
                }
                "AUDIO_OUTPUT_CHANNEL" => info.audio_channel = scan.next_u32(CRLF),
                "INSTRUMENT" => info.instrument = value(&mut scan),
                "MIDI_INPUT_TYPE" => {
                    if let Some(tok) = scan.next(CRLF) {
                        info.midi_backend = MidiBackend::from_wire(ltrim(tok));
                    }
                }
                "MIDI_INPUT_PORT" => info.midi_port = value(&mut scan),
                "MIDI_INPUT_CHANNEL" => {
                    info.midi_channel =
                        scan.next_u32(CRLF).and_then(|ch| u8::try_from(ch).ok())
                }
                "VOLUME" => info.volume = scan.next_f32(CRLF).unwrap_or_default(),
                _ => {
                    scan.next(CRLF);
                }
            }
        }
        info
    }
}

/// Capture the rest of the line, left-trimmed.
fn value(scan: &mut Scanner<'_>) -> Option<String> {
    scan.next(CRLF).map(|tok| ltrim(tok).to_string())
}

/// One disk stream's buffer usage at last measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferFill {
    pub stream_id: u32,
    /// Raw byte count or percentage, depending on the queried unit.
    pub usage: u64,
}

/// Parse engine enumeration text: one engine name per CR/LF line,
/// empty lines skipped. Order is preserved.
pub fn parse_engine_names(text: &str) -> Vec<String> {
    let mut names = Vec::with_capacity(ENGINES_BLOCK);
    let mut scan = Scanner::new(text);
    while let Some(name) = scan.next(CRLF) {
        names.push(name.to_string());
    }
    names
}

/// Parse a bracketed buffer-fill list (`[3,120%,7,45%]`) into `table`,
/// consuming (id, usage) pairs until the tokens or the table capacity
/// run out. Excess wire entries are dropped, bounding the table by the
/// last-known stream count. The whole table is reset first, so slots
/// the response doesn't cover read as default rather than the previous
/// measurement. Returns the number of entries written.
pub fn parse_buffer_fill(text: &str, table: &mut [BufferFill]) -> usize {
    table.fill(BufferFill::default());
    let seps = "[]%,";
    let mut scan = Scanner::new(text);
    let mut filled = 0;
    while filled < table.len() {
        let Some(stream_id) = scan.next_u32(seps) else { break };
        let Some(usage) = scan.next_u64(seps) else { break };
        table[filled] = BufferFill { stream_id, usage };
        filled += 1;
    }
    filled
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
