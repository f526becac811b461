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

use crate::error::MpiCodecError;
use crate::framer::{MpiCodec, MpiEvent};
use crate::message::MpiMessage;
use bytes::BytesMut;
use mudlink_telnetcodec::{
    SupportTable, TelnetArgument, TelnetCodec, TelnetCommand, TelnetEvent, TelnetFrame,
    TelnetOption, TelnetSide, naws::WindowSize,
};
use tokio_util::codec::{Decoder, Encoder};

/// Everything a session can hand the application layer.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// A run of game text with all protocol framing removed.
    Text(BytesMut),
    /// A complete MPI message from the game.
    Mpi(MpiMessage),
    /// An option changed state on one side of the connection.
    OptionChanged {
        /// The option that changed.
        option: TelnetOption,
        /// Which side it changed on.
        side: TelnetSide,
        /// The new state.
        enabled: bool,
    },
    /// A single-byte telnet command from the peer.
    Command(TelnetCommand),
    /// A completed subnegotiation payload.
    Subnegotiation(TelnetArgument),
}

/// The complete protocol state of one MUD connection.
///
/// A session stacks the two codecs: inbound bytes run through the telnet
/// demuxer, the recovered plain-data stream runs through the MPI framer,
/// and the rest comes out as events. Negotiation replies the telnet engine
/// queues are encoded into an internal outbound buffer automatically; the
/// caller drains it with [`MudSession::take_outbound`] after each call and
/// writes it to the socket verbatim, in order.
///
/// The session never blocks and never performs I/O. Feed it chunks exactly
/// as the transport delivers them; partial protocol sequences are retained
/// between calls. Dropping the session discards any such remnants, which is
/// the correct behavior on connection close.
///
/// Sessions are fully independent of each other: one connection, one
/// session, no shared state.
pub struct MudSession {
    telnet: TelnetCodec,
    mpi: MpiCodec,
    outbound: BytesMut,
}

impl MudSession {
    /// Creates a session with the default option support table.
    pub fn new() -> MudSession {
        MudSession::default()
    }

    /// Creates a session with a caller-adjusted option support table.
    pub fn with_support(support: SupportTable) -> MudSession {
        MudSession {
            telnet: TelnetCodec::with_support(support),
            mpi: MpiCodec::new(),
            outbound: BytesMut::new(),
        }
    }

    /// Processes one inbound chunk and returns the events it completes.
    ///
    /// Chunking is transparent: any way of splitting the inbound stream
    /// yields the same events, with text possibly regrouped into
    /// different-sized runs.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<SessionEvent>, MpiCodecError> {
        let mut src = BytesMut::from(chunk);
        let mut events = Vec::new();
        while let Some(event) = self.telnet.decode(&mut src)? {
            self.route(event, &mut events)?;
        }
        self.flush_replies()?;
        Ok(events)
    }

    /// Signals end of stream and returns whatever cleanly completes.
    ///
    /// Partial messages and half-finished sequences are discarded, not
    /// flushed; a connection that dies mid-payload loses that payload.
    pub fn finish(&mut self) -> Result<Vec<SessionEvent>, MpiCodecError> {
        let mut src = BytesMut::new();
        let mut events = Vec::new();
        while let Some(event) = self.telnet.decode_eof(&mut src)? {
            self.route(event, &mut events)?;
        }
        let mut plain = BytesMut::new();
        while let Some(event) = self.mpi.decode_eof(&mut plain)? {
            events.push(match event {
                MpiEvent::Text(text) => SessionEvent::Text(text),
                MpiEvent::Message(message) => SessionEvent::Mpi(message),
            });
        }
        self.flush_replies()?;
        Ok(events)
    }

    fn route(
        &mut self,
        event: TelnetEvent,
        events: &mut Vec<SessionEvent>,
    ) -> Result<(), MpiCodecError> {
        match event {
            TelnetEvent::Data(mut bytes) => {
                while let Some(event) = self.mpi.decode(&mut bytes)? {
                    events.push(match event {
                        MpiEvent::Text(text) => SessionEvent::Text(text),
                        MpiEvent::Message(message) => SessionEvent::Mpi(message),
                    });
                }
            }
            TelnetEvent::Command(command) => events.push(SessionEvent::Command(command)),
            TelnetEvent::OptionStatus(option, side, enabled) => {
                events.push(SessionEvent::OptionChanged {
                    option,
                    side,
                    enabled,
                });
            }
            TelnetEvent::Subnegotiation(argument) => {
                events.push(SessionEvent::Subnegotiation(argument));
            }
        }
        Ok(())
    }

    /// Encodes queued negotiation replies into the outbound buffer.
    fn flush_replies(&mut self) -> Result<(), MpiCodecError> {
        while let Some(reply) = self.telnet.next_reply() {
            self.telnet.encode(reply, &mut self.outbound)?;
        }
        Ok(())
    }

    /// Takes the bytes waiting to be written to the socket.
    pub fn take_outbound(&mut self) -> BytesMut {
        self.outbound.split()
    }

    /// Whether anything is waiting in the outbound buffer.
    pub fn has_outbound(&self) -> bool {
        !self.outbound.is_empty()
    }

    /// Queues a line of player input, terminated with the network newline.
    pub fn send_line(&mut self, line: &str) -> Result<(), MpiCodecError> {
        self.telnet.encode(line, &mut self.outbound)?;
        Ok(())
    }

    /// Queues raw bytes, escaped for the transport but otherwise untouched.
    pub fn send_raw(&mut self, data: &[u8]) -> Result<(), MpiCodecError> {
        self.telnet.encode(data, &mut self.outbound)?;
        Ok(())
    }

    /// Queues an MPI message for the game.
    pub fn send_mpi(&mut self, message: MpiMessage) -> Result<(), MpiCodecError> {
        // MPI frames ride the plain-data stream, so they take the telnet
        // escaping path like any other data.
        let mut framed = BytesMut::new();
        self.mpi.encode(message, &mut framed)?;
        self.telnet.encode(&framed[..], &mut self.outbound)?;
        Ok(())
    }

    /// Queues the announcement that this client speaks the remote-editing
    /// protocol. Sent once, when the connection opens.
    pub fn announce_editor(&mut self) {
        MpiCodec::encode_handshake(&mut self.outbound);
    }

    /// Queues a subnegotiation payload.
    pub fn send_subnegotiation(&mut self, argument: TelnetArgument) -> Result<(), MpiCodecError> {
        self.telnet
            .encode(TelnetFrame::Subnegotiate(argument), &mut self.outbound)?;
        Ok(())
    }

    /// Queues a window size report for the game.
    pub fn send_window_size(&mut self, cols: u16, rows: u16) -> Result<(), MpiCodecError> {
        self.send_subnegotiation(TelnetArgument::WindowSize(WindowSize::new(cols, rows)))
    }

    /// Starts negotiation to enable an option on our side. Returns whether
    /// a request actually went on the wire.
    pub fn request_enable_local(&mut self, option: TelnetOption) -> Result<bool, MpiCodecError> {
        match self.telnet.enable_local(option) {
            Some(frame) => {
                self.telnet.encode(frame, &mut self.outbound)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Starts negotiation to disable an option on our side.
    pub fn request_disable_local(&mut self, option: TelnetOption) -> Result<bool, MpiCodecError> {
        match self.telnet.disable_local(option) {
            Some(frame) => {
                self.telnet.encode(frame, &mut self.outbound)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Asks the peer to enable an option on its side.
    pub fn request_enable_remote(&mut self, option: TelnetOption) -> Result<bool, MpiCodecError> {
        match self.telnet.enable_remote(option) {
            Some(frame) => {
                self.telnet.encode(frame, &mut self.outbound)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Asks the peer to disable an option on its side.
    pub fn request_disable_remote(&mut self, option: TelnetOption) -> Result<bool, MpiCodecError> {
        match self.telnet.disable_remote(option) {
            Some(frame) => {
                self.telnet.encode(frame, &mut self.outbound)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Whether the option is currently enabled on our side.
    pub fn is_enabled_local(&self, option: TelnetOption) -> bool {
        self.telnet.is_enabled_local(option)
    }

    /// Whether the option is currently enabled on the peer's side.
    pub fn is_enabled_remote(&self, option: TelnetOption) -> bool {
        self.telnet.is_enabled_remote(option)
    }
}

impl Default for MudSession {
    fn default() -> Self {
        MudSession {
            telnet: TelnetCodec::new(),
            mpi: MpiCodec::new(),
            outbound: BytesMut::new(),
        }
    }
}
