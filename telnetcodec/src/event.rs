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
use crate::frame::TelnetCommand;
use crate::options::TelnetSide;
use bytes::BytesMut;

///
/// `TelnetEvent` is what the decoder hands the application layer.
///
/// Unlike [`TelnetFrame`](crate::TelnetFrame), which mirrors the wire,
/// events are post-negotiation: WILL/WONT/DO/DONT never appear here. The
/// negotiation engine consumes the verbs, queues any protocol-correct reply
/// on the codec, and surfaces only the completed transition as
/// `OptionStatus`.
///
#[derive(Clone, Debug, PartialEq)]
pub enum TelnetEvent {
    /// A run of plain application bytes with IAC escapes removed.
    ///
    /// Runs are coalesced: the decoder emits one `Data` event per stretch of
    /// ordinary bytes rather than one per byte, splitting only where a
    /// command interrupts the stream or the fed chunk ends.
    Data(BytesMut),
    /// A single-byte command from the peer.
    Command(TelnetCommand),
    /// An option changed state on one side of the connection.
    ///
    /// Emitted only when the effective enabled/disabled status actually
    /// flips, never for retransmissions or refused requests.
    OptionStatus(TelnetOption, TelnetSide, bool),
    /// A complete subnegotiation payload, parsed where the option is known.
    Subnegotiation(TelnetArgument),
}
