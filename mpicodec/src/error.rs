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

use mudlink_telnetcodec::CodecError;
use thiserror::Error;

/// Errors the MPI codec and session can surface.
///
/// Malformed MPI traffic from the peer is never one of these: the framer
/// logs the violation, drops the message, and resynchronizes. What remains
/// is the transport bridge and anything the telnet layer underneath
/// reports.
#[derive(Debug, Error)]
pub enum MpiCodecError {
    /// An I/O error from the underlying transport.
    #[error("transport i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// An error surfaced by the telnet layer beneath the framer.
    #[error("telnet codec error: {0}")]
    Telnet(#[from] CodecError),
}
