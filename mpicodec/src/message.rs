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

use bytes::BytesMut;
use std::fmt::Formatter;

/// The single-byte action selector of an MPI message.
///
/// The set of commands is an external contract with the game server, so the
/// type is deliberately opaque: any byte is a valid command, and nothing in
/// this crate keys behavior on specific values. The constants below name
/// the commands the MUME remote-editing protocol is known to use.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct MpiCommand(pub u8);

impl MpiCommand {
    /// Open an editing session on the payload.
    pub const EDIT: MpiCommand = MpiCommand(b'E');
    /// Display the payload read-only.
    pub const VIEW: MpiCommand = MpiCommand(b'V');
    /// Client announcement that it speaks the remote-editing protocol.
    pub const IDENTIFY: MpiCommand = MpiCommand(b'I');
    /// Cancel an editing session.
    pub const CANCEL: MpiCommand = MpiCommand(b'C');

    /// Returns the wire byte for this command.
    pub fn to_u8(self) -> u8 {
        self.0
    }
}

impl From<u8> for MpiCommand {
    fn from(byte: u8) -> Self {
        MpiCommand(byte)
    }
}

impl std::fmt::Debug for MpiCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "MpiCommand({})", self)
    }
}

impl std::fmt::Display for MpiCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0.is_ascii_graphic() {
            write!(f, "{}", self.0 as char)
        } else {
            write!(f, "{:#04X}", self.0)
        }
    }
}

/// A complete MPI message.
///
/// The framer only constructs one of these once exactly the declared number
/// of payload bytes has arrived, so `payload.len()` always equals the
/// length field that crossed the wire; partial or over-length messages
/// never reach the application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MpiMessage {
    /// The requested action.
    pub command: MpiCommand,
    /// The raw payload, byte-exact as received.
    pub payload: BytesMut,
}

impl MpiMessage {
    /// Creates a message from a command and payload.
    pub fn new(command: MpiCommand, payload: impl Into<BytesMut>) -> Self {
        MpiMessage {
            command,
            payload: payload.into(),
        }
    }
}

impl std::fmt::Display for MpiMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "MPI {} ({} bytes)", self.command, self.payload.len())
    }
}
