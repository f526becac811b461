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

use super::{CodecError, TelnetEvent, TelnetFrame, TelnetOption, consts};
use crate::args::TelnetArgument;
use crate::frame::TelnetCommand;
use crate::options::{NegotiationVerb, SupportTable, TelnetOptions};
use bytes::{Buf, BufMut, BytesMut};
use std::collections::VecDeque;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, warn};

/// A stateful codec for the Telnet protocol.
///
/// The decoder splits an arbitrarily-chunked inbound byte stream into plain
/// data runs, single-byte commands, completed option negotiations, and
/// subnegotiation payloads; the encoder produces escaped wire bytes for the
/// outbound direction. Negotiation is handled internally by an RFC 1143
/// engine: received WILL/WONT/DO/DONT verbs never surface as events, and any
/// reply the protocol requires is queued on the codec for the caller to
/// drain with [`TelnetCodec::next_reply`] and write to the transport.
///
/// Feeding the decoder a byte sequence split at any points produces the same
/// event stream as feeding it whole, with plain data possibly regrouped into
/// different-sized runs. Incomplete sequences (a lone IAC, a half-finished
/// subnegotiation) are retained across calls and are not errors.
///
/// One codec serves one connection; nothing is shared between instances.
pub struct TelnetCodec {
    decoder_state: DecoderState,
    data_run: BytesMut,
    subneg_buffer: BytesMut,
    ready: VecDeque<TelnetEvent>,
    replies: VecDeque<TelnetFrame>,
    options: TelnetOptions,
}

impl TelnetCodec {
    /// Creates a codec with the default option support table.
    pub fn new() -> TelnetCodec {
        TelnetCodec::default()
    }

    /// Creates a codec with a caller-adjusted option support table.
    ///
    /// # Example
    /// ```
    /// use mudlink_telnetcodec::{SupportTable, TelnetCodec, TelnetOption};
    ///
    /// let mut support = SupportTable::default();
    /// support.allow_remote(TelnetOption::GMCP);
    /// let codec = TelnetCodec::with_support(support);
    /// ```
    pub fn with_support(support: SupportTable) -> TelnetCodec {
        TelnetCodec {
            options: TelnetOptions::new(support),
            ..TelnetCodec::default()
        }
    }

    /// Whether we are willing to perform the option ourselves.
    pub fn is_supported_local(&self, option: TelnetOption) -> bool {
        self.options.is_supported_local(option)
    }

    /// Whether we are willing to let the peer perform the option.
    pub fn is_supported_remote(&self, option: TelnetOption) -> bool {
        self.options.is_supported_remote(option)
    }

    /// Whether the option is currently enabled on our side.
    pub fn is_enabled_local(&self, option: TelnetOption) -> bool {
        self.options.local_enabled(option)
    }

    /// Whether the option is currently enabled on the peer's side.
    pub fn is_enabled_remote(&self, option: TelnetOption) -> bool {
        self.options.remote_enabled(option)
    }

    /// Starts negotiation to enable an option on our side.
    ///
    /// Returns the `WILL` frame to send, or `None` when no traffic is
    /// needed (unsupported, already enabled, or a request is in flight).
    pub fn enable_local(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        self.options.enable_local(option)
    }

    /// Starts negotiation to disable an option on our side.
    pub fn disable_local(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        self.options.disable_local(option)
    }

    /// Starts negotiation to enable an option on the peer's side.
    pub fn enable_remote(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        self.options.enable_remote(option)
    }

    /// Starts negotiation to disable an option on the peer's side.
    pub fn disable_remote(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        self.options.disable_remote(option)
    }

    /// Pops the next negotiation reply queued by the decoder.
    ///
    /// Replies must be encoded and written to the transport in the order
    /// they are popped, or the peer's state machine will desynchronize.
    pub fn next_reply(&mut self) -> Option<TelnetFrame> {
        self.replies.pop_front()
    }

    /// Flushes a pending data run into the ready queue.
    fn flush_data_run(&mut self) {
        if !self.data_run.is_empty() {
            let run = self.data_run.split();
            self.ready.push_back(TelnetEvent::Data(run));
        }
    }

    /// Consumes one byte in the current state.
    fn accept(&mut self, byte: u8) {
        match (self.decoder_state, byte) {
            (DecoderState::Data, consts::IAC) => {
                self.flush_data_run();
                self.decoder_state = DecoderState::Command;
            }
            (DecoderState::Data, _) => {
                self.data_run.put_u8(byte);
            }
            (DecoderState::Command, consts::IAC) => {
                // Doubled IAC is a literal 0xFF data byte.
                self.data_run.put_u8(consts::IAC);
                self.decoder_state = DecoderState::Data;
            }
            (DecoderState::Command, consts::SB) => {
                self.decoder_state = DecoderState::SubnegotiationOption;
            }
            (DecoderState::Command, consts::SE) => {
                warn!("IAC SE received outside of subnegotiation");
                self.decoder_state = DecoderState::Data;
            }
            (DecoderState::Command, consts::WILL) => {
                self.decoder_state = DecoderState::Negotiation(NegotiationVerb::Will);
            }
            (DecoderState::Command, consts::WONT) => {
                self.decoder_state = DecoderState::Negotiation(NegotiationVerb::Wont);
            }
            (DecoderState::Command, consts::DO) => {
                self.decoder_state = DecoderState::Negotiation(NegotiationVerb::Do);
            }
            (DecoderState::Command, consts::DONT) => {
                self.decoder_state = DecoderState::Negotiation(NegotiationVerb::Dont);
            }
            (DecoderState::Command, _) => {
                self.decoder_state = DecoderState::Data;
                match TelnetCommand::from_u8(byte) {
                    Some(command) => {
                        debug!("received IAC {command}");
                        self.ready.push_back(TelnetEvent::Command(command));
                    }
                    None => warn!("unknown telnet command {byte:#04X}"),
                }
            }
            (DecoderState::Negotiation(verb), _) => {
                self.decoder_state = DecoderState::Data;
                let option = TelnetOption::from_u8(byte);
                debug!("received IAC {verb} {option}");
                let outcome = self.options.receive(verb, option);
                if let Some(reply) = outcome.reply {
                    debug!("queueing reply {reply}");
                    self.replies.push_back(reply);
                }
                if let Some((side, enabled)) = outcome.status_change {
                    self.ready
                        .push_back(TelnetEvent::OptionStatus(option, side, enabled));
                }
            }
            (DecoderState::SubnegotiationOption, _) => {
                self.decoder_state = DecoderState::Subnegotiation(byte);
            }
            (DecoderState::Subnegotiation(option), consts::IAC) => {
                self.decoder_state = DecoderState::SubnegotiationIac(option);
            }
            (DecoderState::Subnegotiation(_option), _) => {
                self.subneg_buffer.put_u8(byte);
            }
            (DecoderState::SubnegotiationIac(option), consts::IAC) => {
                // Doubled IAC inside the payload unescapes to one byte.
                self.subneg_buffer.put_u8(consts::IAC);
                self.decoder_state = DecoderState::Subnegotiation(option);
            }
            (DecoderState::SubnegotiationIac(option), consts::SE) => {
                self.decoder_state = DecoderState::Data;
                let option = TelnetOption::from_u8(option);
                let payload = self.subneg_buffer.split();
                debug!("received IAC SB {option} ({} bytes) IAC SE", payload.len());
                let argument = TelnetArgument::parse(option, payload);
                self.ready.push_back(TelnetEvent::Subnegotiation(argument));
            }
            (DecoderState::SubnegotiationIac(_option), _) => {
                warn!("invalid command {byte:#04X} during subnegotiation, aborting");
                self.subneg_buffer.clear();
                self.decoder_state = DecoderState::Data;
            }
        }
    }
}

impl Default for TelnetCodec {
    fn default() -> Self {
        TelnetCodec {
            decoder_state: DecoderState::Data,
            data_run: BytesMut::new(),
            subneg_buffer: BytesMut::new(),
            ready: VecDeque::new(),
            replies: VecDeque::new(),
            options: TelnetOptions::default(),
        }
    }
}

impl Decoder for TelnetCodec {
    type Item = TelnetEvent;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<TelnetEvent>, Self::Error> {
        loop {
            if let Some(event) = self.ready.pop_front() {
                return Ok(Some(event));
            }
            if !src.has_remaining() {
                // Deliver whatever plain data this chunk ended on; partial
                // command sequences stay buffered for the next chunk.
                if matches!(self.decoder_state, DecoderState::Data) && !self.data_run.is_empty() {
                    return Ok(Some(TelnetEvent::Data(self.data_run.split())));
                }
                return Ok(None);
            }
            let byte = src.get_u8();
            self.accept(byte);
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<TelnetEvent>, Self::Error> {
        if let Some(event) = self.decode(src)? {
            return Ok(Some(event));
        }
        match self.decoder_state {
            DecoderState::Data => {}
            state => {
                warn!("connection closed mid-sequence in state {state:?}, discarding");
                self.subneg_buffer.clear();
                self.decoder_state = DecoderState::Data;
            }
        }
        Ok(None)
    }
}

impl Encoder<TelnetFrame> for TelnetCodec {
    type Error = CodecError;

    /// Encodes a frame into escaped wire bytes.
    ///
    /// Data frames have literal `0xFF` bytes doubled; subnegotiation
    /// payloads are written raw by the argument and doubled here before the
    /// closing `IAC SE`, so any byte value can cross the wire intact.
    fn encode(&mut self, item: TelnetFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            TelnetFrame::Data(bytes) => {
                dst.reserve(bytes.len() + 4);
                for &byte in bytes.iter() {
                    if byte == consts::IAC {
                        dst.put_u8(consts::IAC);
                    }
                    dst.put_u8(byte);
                }
            }
            TelnetFrame::Command(command) => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(command.to_u8());
            }
            TelnetFrame::Will(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::WILL);
                dst.put_u8(option.into());
            }
            TelnetFrame::Wont(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::WONT);
                dst.put_u8(option.into());
            }
            TelnetFrame::Do(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::DO);
                dst.put_u8(option.into());
            }
            TelnetFrame::Dont(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::DONT);
                dst.put_u8(option.into());
            }
            TelnetFrame::Subnegotiate(argument) => {
                let mut payload = Vec::with_capacity(argument.len());
                argument.write(&mut payload)?;
                dst.reserve(payload.len() + 5);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SB);
                dst.put_u8(argument.option().to_u8());
                for &byte in &payload {
                    if byte == consts::IAC {
                        dst.put_u8(consts::IAC);
                    }
                    dst.put_u8(byte);
                }
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SE);
            }
        }
        Ok(())
    }
}

impl Encoder<&[u8]> for TelnetCodec {
    type Error = CodecError;

    /// Encodes raw application bytes, doubling any literal `0xFF`.
    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encode(TelnetFrame::Data(BytesMut::from(item)), dst)
    }
}

impl Encoder<&str> for TelnetCodec {
    type Error = CodecError;

    /// Encodes a line of text followed by the network newline.
    fn encode(&mut self, item: &str, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encode(item.as_bytes(), dst)?;
        dst.reserve(2);
        dst.put_u8(consts::CR);
        dst.put_u8(consts::LF);
        Ok(())
    }
}

/// The decoder's scanning automaton.
///
/// One state per position in a Telnet command sequence; `Data` copies bytes
/// through verbatim, everything else consumes the bytes of an in-progress
/// command. The option code of an open subnegotiation rides inside the
/// state so a chunk boundary can fall anywhere.
#[derive(Clone, Copy, Debug)]
enum DecoderState {
    /// Normal data.
    Data,
    /// IAC seen; next byte is a command.
    Command,
    /// Negotiation verb seen; next byte is the option code.
    Negotiation(NegotiationVerb),
    /// IAC SB seen; next byte is the option code.
    SubnegotiationOption,
    /// Accumulating a subnegotiation payload for the option.
    Subnegotiation(u8),
    /// IAC inside a subnegotiation; next byte disambiguates.
    SubnegotiationIac(u8),
}
