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

use crate::TelnetOption;
use crate::args::charset::CharsetNegotiation;
use crate::args::naws::WindowSize;
use crate::args::ttype::TerminalType;
use bytes::BytesMut;
use std::fmt::Formatter;
use tracing::warn;

pub mod charset;
pub mod naws;
pub mod ttype;

///
/// A Telnet subnegotiation payload, parsed where the option is one this
/// stack understands.
///
/// The decoder produces these from `IAC SB ... IAC SE` sequences, and the
/// encoder consumes them for the outbound direction. Payloads for options
/// without a typed representation, and payloads that fail their option's
/// parser, travel as [`TelnetArgument::Unknown`] so nothing is lost.
///
/// The `write`/`len` methods deal in the *raw* payload, before IAC
/// doubling; the frame encoder applies the escaping rule when it brackets
/// the payload in SB/SE.
///
#[derive(Clone, Debug, PartialEq)]
pub enum TelnetArgument {
    /// A window size report (NAWS).
    WindowSize(WindowSize),
    /// A charset negotiation step.
    Charset(CharsetNegotiation),
    /// A terminal type request or reply.
    TerminalType(TerminalType),
    /// A payload for any other option, carried verbatim.
    Unknown(TelnetOption, BytesMut),
}

impl TelnetArgument {
    /// Parses a completed subnegotiation payload for the given option.
    ///
    /// Never fails: a payload the typed parser rejects is demoted to
    /// [`TelnetArgument::Unknown`] with a warning, since a peer that sends
    /// us garbage for one option should not cost us the session.
    pub(crate) fn parse(option: TelnetOption, payload: BytesMut) -> TelnetArgument {
        let parsed = match option {
            TelnetOption::WindowSize => WindowSize::decode(&payload).map(TelnetArgument::WindowSize),
            TelnetOption::Charset => CharsetNegotiation::parse(&payload).map(TelnetArgument::Charset),
            TelnetOption::TerminalType => {
                TerminalType::parse(&payload).map(TelnetArgument::TerminalType)
            }
            _ => None,
        };
        match parsed {
            Some(argument) => argument,
            None => {
                if matches!(
                    option,
                    TelnetOption::WindowSize | TelnetOption::Charset | TelnetOption::TerminalType
                ) {
                    warn!("unparseable {option} subnegotiation ({} bytes)", payload.len());
                }
                TelnetArgument::Unknown(option, payload)
            }
        }
    }

    /// The option this payload belongs to.
    pub fn option(&self) -> TelnetOption {
        match self {
            TelnetArgument::WindowSize(_) => TelnetOption::WindowSize,
            TelnetArgument::Charset(_) => TelnetOption::Charset,
            TelnetArgument::TerminalType(_) => TelnetOption::TerminalType,
            TelnetArgument::Unknown(option, _) => *option,
        }
    }

    /// The raw payload length, before IAC doubling.
    pub fn len(&self) -> usize {
        match self {
            TelnetArgument::WindowSize(inner) => inner.len(),
            TelnetArgument::Charset(inner) => inner.len(),
            TelnetArgument::TerminalType(inner) => inner.len(),
            TelnetArgument::Unknown(_option, payload) => payload.len(),
        }
    }

    /// Writes the raw payload bytes, before IAC doubling.
    pub fn write<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        match self {
            TelnetArgument::WindowSize(inner) => inner.write(writer),
            TelnetArgument::Charset(inner) => inner.write(writer),
            TelnetArgument::TerminalType(inner) => inner.write(writer),
            TelnetArgument::Unknown(_option, payload) => {
                writer.write_all(payload)?;
                Ok(payload.len())
            }
        }
    }
}

impl std::fmt::Display for TelnetArgument {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetArgument::WindowSize(inner) => write!(f, "{inner}"),
            TelnetArgument::Charset(inner) => write!(f, "{inner}"),
            TelnetArgument::TerminalType(inner) => write!(f, "{inner}"),
            TelnetArgument::Unknown(option, payload) => {
                write!(f, "{option}({} bytes)", payload.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_routes_known_options() {
        let arg = TelnetArgument::parse(
            TelnetOption::WindowSize,
            BytesMut::from(&[0x00, 0x50, 0x00, 0x18][..]),
        );
        assert_eq!(arg, TelnetArgument::WindowSize(WindowSize::new(80, 24)));
        assert_eq!(arg.option(), TelnetOption::WindowSize);
    }

    #[test]
    fn parse_demotes_bad_payload_to_unknown() {
        let payload = BytesMut::from(&b"xx"[..]);
        let arg = TelnetArgument::parse(TelnetOption::WindowSize, payload.clone());
        assert_eq!(arg, TelnetArgument::Unknown(TelnetOption::WindowSize, payload));
    }

    #[test]
    fn parse_passes_unhandled_options_through() {
        let payload = BytesMut::from(&b"Core.Hello"[..]);
        let arg = TelnetArgument::parse(TelnetOption::GMCP, payload.clone());
        assert_eq!(arg, TelnetArgument::Unknown(TelnetOption::GMCP, payload));
    }

    #[test]
    fn write_emits_raw_payload() {
        let arg = TelnetArgument::Unknown(
            TelnetOption::GMCP,
            BytesMut::from(&[0x01, 0xFF, 0x03][..]),
        );
        let mut raw = Vec::new();
        let written = arg.write(&mut raw).unwrap();
        assert_eq!(written, 3);
        // Raw form: no doubling here, the frame encoder escapes.
        assert_eq!(raw, vec![0x01, 0xFF, 0x03]);
    }
}
