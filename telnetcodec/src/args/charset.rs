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

//! Charset negotiation (RFC 2066).

use crate::consts;
use crate::result::{CodecError, CodecResult};
use bytes::BytesMut;

/// The separator the REQUEST builder uses between character set names.
const DEFAULT_SEPARATOR: u8 = b';';

/// A CHARSET subnegotiation payload.
///
/// Only the REQUEST/ACCEPTED/REJECTED exchange is modeled; the optional
/// translation-table commands of the RFC are not used by MUD servers and
/// fall through to the unknown-argument path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CharsetNegotiation {
    /// Sender proposes the listed character sets, in order of preference.
    Request {
        /// The byte separating names on the wire.
        separator: u8,
        /// The proposed character set names.
        charsets: Vec<BytesMut>,
    },
    /// Receiver accepts the named character set.
    Accepted(BytesMut),
    /// Receiver will use none of the proposed character sets.
    Rejected,
}

impl CharsetNegotiation {
    /// Builds a REQUEST payload from a list of character set names.
    ///
    /// Names must be non-empty and must not contain the separator; a name
    /// that violates this would change meaning on the wire, so it is
    /// refused here rather than sent corrupted.
    pub fn request<I, N>(names: I) -> CodecResult<Self>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<[u8]>,
    {
        let mut charsets = Vec::new();
        for name in names {
            let name = name.as_ref();
            if name.is_empty() || name.contains(&DEFAULT_SEPARATOR) {
                return Err(CodecError::SubnegotiationError {
                    option: Some(consts::option::CHARSET),
                    reason: format!("invalid charset name {:?}", String::from_utf8_lossy(name)),
                });
            }
            charsets.push(BytesMut::from(name));
        }
        if charsets.is_empty() {
            return Err(CodecError::SubnegotiationError {
                option: Some(consts::option::CHARSET),
                reason: "charset request needs at least one name".into(),
            });
        }
        Ok(CharsetNegotiation::Request {
            separator: DEFAULT_SEPARATOR,
            charsets,
        })
    }

    /// The encoded payload length.
    pub fn len(&self) -> usize {
        match self {
            CharsetNegotiation::Request {
                charsets: sets, ..
            } => 1 + sets.iter().map(|s| s.len() + 1).sum::<usize>(),
            CharsetNegotiation::Accepted(name) => 1 + name.len(),
            CharsetNegotiation::Rejected => 1,
        }
    }

    /// Writes the raw subnegotiation payload.
    pub fn write<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        match self {
            CharsetNegotiation::Request {
                separator,
                charsets,
            } => {
                let mut written = 1;
                writer.write_all(&[consts::charset::REQUEST])?;
                for name in charsets {
                    writer.write_all(&[*separator])?;
                    writer.write_all(name)?;
                    written += 1 + name.len();
                }
                Ok(written)
            }
            CharsetNegotiation::Accepted(name) => {
                writer.write_all(&[consts::charset::ACCEPTED])?;
                writer.write_all(name)?;
                Ok(1 + name.len())
            }
            CharsetNegotiation::Rejected => {
                writer.write_all(&[consts::charset::REJECTED])?;
                Ok(1)
            }
        }
    }

    /// Parses a received CHARSET payload.
    ///
    /// Returns `None` for empty payloads and for commands this module does
    /// not model, leaving the caller to fall back to an unknown argument.
    pub fn parse(payload: &[u8]) -> Option<Self> {
        let (&status, rest) = payload.split_first()?;
        match status {
            consts::charset::REQUEST => {
                let (&separator, names) = rest.split_first()?;
                let charsets: Vec<BytesMut> = names
                    .split(|&byte| byte == separator)
                    .filter(|name| !name.is_empty())
                    .map(BytesMut::from)
                    .collect();
                if charsets.is_empty() {
                    return None;
                }
                Some(CharsetNegotiation::Request {
                    separator,
                    charsets,
                })
            }
            consts::charset::ACCEPTED => Some(CharsetNegotiation::Accepted(BytesMut::from(rest))),
            consts::charset::REJECTED => Some(CharsetNegotiation::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for CharsetNegotiation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharsetNegotiation::Request { charsets, .. } => {
                write!(f, "CharsetRequest(")?;
                for (idx, name) in charsets.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", String::from_utf8_lossy(name))?;
                }
                write!(f, ")")
            }
            CharsetNegotiation::Accepted(name) => {
                write!(f, "CharsetAccepted({})", String::from_utf8_lossy(name))
            }
            CharsetNegotiation::Rejected => write!(f, "CharsetRejected"),
        }
    }
}
