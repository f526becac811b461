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

use super::TelnetOption;
use crate::args::TelnetArgument;
use crate::consts;
use bytes::BytesMut;
use std::fmt::Formatter;

/// A single-byte Telnet command, carried on the wire as `IAC <command>`.
///
/// These commands request out-of-band actions from the peer and take no
/// option argument. This implementation surfaces them as events and answers
/// none of them with altered behavior.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetCommand {
    /// No operation.
    NoOperation,
    /// End of urgent data stream.
    DataMark,
    /// Operator pressed the Break or Attention key.
    Break,
    /// Interrupt the current process.
    InterruptProcess,
    /// Cancel output from the current process.
    AbortOutput,
    /// Request acknowledgment.
    AreYouThere,
    /// Request that the operator erase the previous character.
    EraseCharacter,
    /// Request that the operator erase the previous line.
    EraseLine,
    /// End of input for half-duplex connections.
    GoAhead,
    /// End of record, used by MUD servers to mark the end of a prompt.
    EndOfRecord,
}

impl TelnetCommand {
    /// Returns the wire byte for this command.
    pub fn to_u8(self) -> u8 {
        match self {
            TelnetCommand::NoOperation => consts::NOP,
            TelnetCommand::DataMark => consts::DM,
            TelnetCommand::Break => consts::BRK,
            TelnetCommand::InterruptProcess => consts::IP,
            TelnetCommand::AbortOutput => consts::AO,
            TelnetCommand::AreYouThere => consts::AYT,
            TelnetCommand::EraseCharacter => consts::EC,
            TelnetCommand::EraseLine => consts::EL,
            TelnetCommand::GoAhead => consts::GA,
            TelnetCommand::EndOfRecord => consts::EOR,
        }
    }

    /// Maps a command byte back to a `TelnetCommand`, or `None` for bytes
    /// that are not single-byte commands (negotiation verbs, SB/SE, IAC).
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            consts::NOP => Some(TelnetCommand::NoOperation),
            consts::DM => Some(TelnetCommand::DataMark),
            consts::BRK => Some(TelnetCommand::Break),
            consts::IP => Some(TelnetCommand::InterruptProcess),
            consts::AO => Some(TelnetCommand::AbortOutput),
            consts::AYT => Some(TelnetCommand::AreYouThere),
            consts::EC => Some(TelnetCommand::EraseCharacter),
            consts::EL => Some(TelnetCommand::EraseLine),
            consts::GA => Some(TelnetCommand::GoAhead),
            consts::EOR => Some(TelnetCommand::EndOfRecord),
            _ => None,
        }
    }
}

impl std::fmt::Display for TelnetCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetCommand::NoOperation => write!(f, "NOP"),
            TelnetCommand::DataMark => write!(f, "DM"),
            TelnetCommand::Break => write!(f, "BRK"),
            TelnetCommand::InterruptProcess => write!(f, "IP"),
            TelnetCommand::AbortOutput => write!(f, "AO"),
            TelnetCommand::AreYouThere => write!(f, "AYT"),
            TelnetCommand::EraseCharacter => write!(f, "EC"),
            TelnetCommand::EraseLine => write!(f, "EL"),
            TelnetCommand::GoAhead => write!(f, "GA"),
            TelnetCommand::EndOfRecord => write!(f, "EOR"),
        }
    }
}

/// An encodable unit of the Telnet wire protocol.
///
/// Frames are what the encoder consumes and what the negotiation engine
/// produces as replies: application data (escaped on the way out), single
/// byte commands, the four negotiation verbs, and subnegotiations.
#[derive(Clone, Debug, PartialEq)]
pub enum TelnetFrame {
    /// Application data. Literal `0xFF` bytes are doubled on encode.
    Data(BytesMut),
    /// A single-byte command, `IAC <command>`.
    Command(TelnetCommand),
    /// `IAC WILL <option>`: we want to enable, or confirm enabling, an
    /// option on our side.
    Will(TelnetOption),
    /// `IAC WONT <option>`: we refuse to enable, or stop performing, an
    /// option on our side.
    Wont(TelnetOption),
    /// `IAC DO <option>`: we want the peer to enable an option.
    Do(TelnetOption),
    /// `IAC DONT <option>`: we want the peer to disable an option.
    Dont(TelnetOption),
    /// `IAC SB <option> <payload> IAC SE`, with IAC-doubling inside.
    Subnegotiate(TelnetArgument),
}

impl std::fmt::Display for TelnetFrame {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetFrame::Data(bytes) => write!(f, "Data({} bytes)", bytes.len()),
            TelnetFrame::Command(command) => write!(f, "IAC {command}"),
            TelnetFrame::Will(option) => write!(f, "IAC WILL {option}"),
            TelnetFrame::Wont(option) => write!(f, "IAC WONT {option}"),
            TelnetFrame::Do(option) => write!(f, "IAC DO {option}"),
            TelnetFrame::Dont(option) => write!(f, "IAC DONT {option}"),
            TelnetFrame::Subnegotiate(argument) => write!(f, "IAC SB {argument} IAC SE"),
        }
    }
}
