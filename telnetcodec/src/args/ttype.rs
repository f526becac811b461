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

//! Terminal Type negotiation (RFC 1091).

use crate::consts;
use bytes::BytesMut;

/// A TERMINAL-TYPE subnegotiation payload.
///
/// The server sends `SEND`; the client answers `IS <name>`. Repeated SENDs
/// cycle through the client's terminal names per the RFC, but that policy
/// belongs to the application layer; this type only carries the wire form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TerminalType {
    /// Request that the peer name its terminal type.
    Send,
    /// The sender's terminal type name.
    Is(BytesMut),
}

impl TerminalType {
    /// The encoded payload length.
    pub fn len(&self) -> usize {
        match self {
            TerminalType::Send => 1,
            TerminalType::Is(name) => 1 + name.len(),
        }
    }

    /// Writes the raw subnegotiation payload.
    pub fn write<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        match self {
            TerminalType::Send => {
                writer.write_all(&[consts::ttype::SEND])?;
                Ok(1)
            }
            TerminalType::Is(name) => {
                writer.write_all(&[consts::ttype::IS])?;
                writer.write_all(name)?;
                Ok(1 + name.len())
            }
        }
    }

    /// Parses a received TERMINAL-TYPE payload, or `None` if it is neither
    /// a bare `SEND` nor an `IS` with a name.
    pub fn parse(payload: &[u8]) -> Option<Self> {
        let (&command, rest) = payload.split_first()?;
        match command {
            consts::ttype::SEND if rest.is_empty() => Some(TerminalType::Send),
            consts::ttype::IS => Some(TerminalType::Is(BytesMut::from(rest))),
            _ => None,
        }
    }
}

impl std::fmt::Display for TerminalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminalType::Send => write!(f, "TerminalTypeSend"),
            TerminalType::Is(name) => {
                write!(f, "TerminalTypeIs({})", String::from_utf8_lossy(name))
            }
        }
    }
}
