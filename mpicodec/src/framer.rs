//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

use crate::consts;
use crate::error::MpiCodecError;
use crate::message::{MpiCommand, MpiMessage};
use bytes::{Buf, BufMut, BytesMut};
use std::collections::VecDeque;
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

/// What the framer hands the application layer.
#[derive(Clone, Debug, PartialEq)]
pub enum MpiEvent {
    /// A run of game text, delivered unchanged.
    Text(BytesMut),
    /// A complete MPI message.
    Message(MpiMessage),
}

/// A stateful framer for the MPI remote-editing protocol.
///
/// MPI messages travel inline in the telnet plain-data stream:
///
/// ```text
/// ~$#E <command byte> <decimal length> LF <length bytes of raw payload>
/// ```
///
/// The decoder scans game text for the four-byte marker, then switches into
/// length-delimited extraction. The declared byte count is authoritative:
/// payload bytes are copied verbatim whatever they contain, so a payload
/// holding the marker itself, telnet escape bytes, or any other byte soup
/// is never reinterpreted. Text around the messages passes through
/// untouched.
///
/// A marker may arrive split across any number of chunks. Matched prefix
/// bytes are held back until the match completes or fails; on failure they
/// are re-emitted as ordinary text, with the failing byte reconsidered as a
/// possible new match start, so no byte is ever lost to a near-miss.
///
/// Malformed messages (a non-digit in the length field, a length that
/// overflows, a missing terminator) are dropped with a warning and the
/// framer returns to scanning. The bytes already swallowed stay invisible
/// to the application, which keeps half-parsed protocol litter off the
/// player's screen, and a lone bad message never ends the session.
pub struct MpiCodec {
    state: FramerState,
    text_run: BytesMut,
    command: MpiCommand,
    length: usize,
    have_digits: bool,
    payload: BytesMut,
    ready: VecDeque<MpiEvent>,
}

impl MpiCodec {
    /// Creates a new framer in the scanning state.
    pub fn new() -> MpiCodec {
        MpiCodec::default()
    }

    /// Writes the announcement that this client speaks the remote-editing
    /// protocol, sent once when the connection opens.
    ///
    /// This is the one frame without a length field; the historical wire
    /// form is the bare marker, the identify command, and a line feed.
    pub fn encode_handshake(dst: &mut BytesMut) {
        dst.reserve(consts::MPI_MARKER.len() + 2);
        dst.put_slice(&consts::MPI_MARKER);
        dst.put_u8(MpiCommand::IDENTIFY.to_u8());
        dst.put_u8(consts::LF);
    }

    /// Flushes pending text into the ready queue.
    fn flush_text_run(&mut self) {
        if !self.text_run.is_empty() {
            let run = self.text_run.split();
            self.ready.push_back(MpiEvent::Text(run));
        }
    }

    /// Abandons the message being parsed and resumes scanning.
    fn resync(&mut self) {
        self.payload.clear();
        self.state = FramerState::Scan { matched: 0 };
    }

    /// Advances the marker match by one byte.
    fn scan_byte(&mut self, matched: usize, byte: u8) {
        if byte == consts::MPI_MARKER[matched] {
            let matched = matched + 1;
            if matched == consts::MPI_MARKER.len() {
                self.flush_text_run();
                self.state = FramerState::Command;
            } else {
                self.state = FramerState::Scan { matched };
            }
        } else {
            // The held prefix was ordinary text after all. The marker's
            // bytes are pairwise distinct, so a failed match can only
            // restart at its first byte.
            self.text_run.extend_from_slice(&consts::MPI_MARKER[..matched]);
            if byte == consts::MPI_MARKER[0] {
                self.state = FramerState::Scan { matched: 1 };
            } else {
                self.text_run.put_u8(byte);
                self.state = FramerState::Scan { matched: 0 };
            }
        }
    }

    /// Consumes one byte of the decimal length field.
    fn length_byte(&mut self, byte: u8) {
        if byte.is_ascii_digit() {
            let digit = usize::from(byte - b'0');
            match self
                .length
                .checked_mul(10)
                .and_then(|value| value.checked_add(digit))
            {
                Some(value) => {
                    self.length = value;
                    self.have_digits = true;
                }
                None => {
                    warn!("MPI length field overflows, dropping message");
                    self.resync();
                }
            }
        } else if byte == consts::LF && self.have_digits {
            if self.length == 0 {
                let message = MpiMessage::new(self.command, BytesMut::new());
                self.ready.push_back(MpiEvent::Message(message));
                self.state = FramerState::Scan { matched: 0 };
            } else {
                self.payload.clear();
                self.state = FramerState::Payload;
            }
        } else {
            warn!("invalid byte {byte:#04X} in MPI length field, dropping message");
            self.resync();
        }
    }
}

impl Default for MpiCodec {
    fn default() -> Self {
        MpiCodec {
            state: FramerState::Scan { matched: 0 },
            text_run: BytesMut::new(),
            command: MpiCommand(0),
            length: 0,
            have_digits: false,
            payload: BytesMut::new(),
            ready: VecDeque::new(),
        }
    }
}

impl Decoder for MpiCodec {
    type Item = MpiEvent;
    type Error = MpiCodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<MpiEvent>, Self::Error> {
        loop {
            if let Some(event) = self.ready.pop_front() {
                return Ok(Some(event));
            }
            if !src.has_remaining() {
                // Deliver the text this chunk ended on. A held marker
                // prefix stays held; it may still complete next chunk.
                if matches!(self.state, FramerState::Scan { .. }) && !self.text_run.is_empty() {
                    return Ok(Some(MpiEvent::Text(self.text_run.split())));
                }
                return Ok(None);
            }
            match self.state {
                FramerState::Scan { matched } => {
                    let byte = src.get_u8();
                    self.scan_byte(matched, byte);
                }
                FramerState::Command => {
                    self.command = MpiCommand(src.get_u8());
                    self.length = 0;
                    self.have_digits = false;
                    self.state = FramerState::Length;
                }
                FramerState::Length => {
                    let byte = src.get_u8();
                    self.length_byte(byte);
                }
                FramerState::Payload => {
                    // Bulk-copy as much of the payload as this chunk holds;
                    // the declared count decides where the message ends.
                    let take = usize::min(self.length - self.payload.len(), src.remaining());
                    self.payload.extend_from_slice(&src[..take]);
                    src.advance(take);
                    if self.payload.len() == self.length {
                        let message = MpiMessage::new(self.command, self.payload.split());
                        self.ready.push_back(MpiEvent::Message(message));
                        self.state = FramerState::Scan { matched: 0 };
                    }
                }
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<MpiEvent>, Self::Error> {
        if let Some(event) = self.decode(src)? {
            return Ok(Some(event));
        }
        match self.state {
            FramerState::Scan { matched } => {
                if matched > 0 {
                    // A marker prefix that can no longer complete.
                    self.state = FramerState::Scan { matched: 0 };
                }
            }
            _ => {
                warn!("connection closed in the middle of an MPI message, discarding");
                self.resync();
            }
        }
        Ok(None)
    }
}

impl Encoder<MpiMessage> for MpiCodec {
    type Error = MpiCodecError;

    /// Frames a message for the wire: marker, command byte, the payload
    /// length in decimal, a line feed, then the payload verbatim.
    ///
    /// No escaping is applied to the payload; the receiver counts bytes
    /// rather than scanning for a terminator, which is what makes the
    /// protocol binary-safe.
    fn encode(&mut self, item: MpiMessage, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let length = item.payload.len().to_string();
        dst.reserve(consts::MPI_MARKER.len() + 1 + length.len() + 1 + item.payload.len());
        dst.put_slice(&consts::MPI_MARKER);
        dst.put_u8(item.command.to_u8());
        dst.put_slice(length.as_bytes());
        dst.put_u8(consts::LF);
        dst.put_slice(&item.payload);
        Ok(())
    }
}

/// The framer's scanning automaton.
#[derive(Clone, Copy, Debug)]
enum FramerState {
    /// Scanning game text; `matched` marker bytes are held back.
    Scan {
        /// How many leading marker bytes have matched so far.
        matched: usize,
    },
    /// Marker complete; next byte is the command.
    Command,
    /// Accumulating the decimal length field.
    Length,
    /// Copying exactly the declared number of payload bytes.
    Payload,
}
