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

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors the Telnet codec can surface to a caller.
///
/// Malformed input from the peer never produces one of these: the decoder
/// resynchronizes to a safe state and logs a warning instead, because a
/// single corrupt sequence should not be fatal to the session. The variants
/// below cover the encoding API and the transport bridge only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// An I/O error occurred while writing to the underlying stream.
    IoError {
        /// The kind of I/O error that occurred.
        kind: std::io::ErrorKind,
        /// Description of the operation that failed.
        operation: String,
    },

    /// A subnegotiation payload could not be constructed.
    ///
    /// Returned by the typed argument builders when the requested payload
    /// would be ill-formed on the wire, for example a CHARSET request whose
    /// name contains the chosen separator.
    SubnegotiationError {
        /// The Telnet option being subnegotiated, if known.
        option: Option<u8>,
        /// Why the payload was refused.
        reason: String,
    },
}

impl std::error::Error for CodecError {}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::IoError { kind, operation } => {
                write!(f, "I/O error during {}: {:?}", operation, kind)
            }
            CodecError::SubnegotiationError { option, reason } => {
                if let Some(opt) = option {
                    write!(f, "Subnegotiation error for option {}: {}", opt, reason)
                } else {
                    write!(f, "Subnegotiation error: {}", reason)
                }
            }
        }
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::IoError {
            kind: err.kind(),
            operation: err.to_string(),
        }
    }
}
