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

//! Wire-level constants for the Telnet protocol (RFC 854 and friends).

/// End of Record command (RFC 885).
pub(crate) const EOR: u8 = 239;
/// End of subnegotiation parameters.
pub(crate) const SE: u8 = 240;
/// No operation.
pub(crate) const NOP: u8 = 241;
/// Data Mark, the data stream portion of a Synch.
pub(crate) const DM: u8 = 242;
/// NVT character Break.
pub(crate) const BRK: u8 = 243;
/// Interrupt Process.
pub(crate) const IP: u8 = 244;
/// Abort Output.
pub(crate) const AO: u8 = 245;
/// Are You There.
pub(crate) const AYT: u8 = 246;
/// Erase Character.
pub(crate) const EC: u8 = 247;
/// Erase Line.
pub(crate) const EL: u8 = 248;
/// Go Ahead.
pub(crate) const GA: u8 = 249;
/// Begin subnegotiation of the indicated option.
pub(crate) const SB: u8 = 250;
/// Sender wants to enable an option on its own side.
pub(crate) const WILL: u8 = 251;
/// Sender refuses to enable an option on its own side.
pub(crate) const WONT: u8 = 252;
/// Sender wants the peer to enable an option.
pub(crate) const DO: u8 = 253;
/// Sender wants the peer to disable an option.
pub(crate) const DONT: u8 = 254;
/// Interpret As Command, the escape byte introducing every Telnet command.
pub(crate) const IAC: u8 = 255;

/// Carriage return.
pub(crate) const CR: u8 = 13;
/// Line feed.
pub(crate) const LF: u8 = 10;

/// Telnet option codes.
///
/// See the [IANA registry](https://www.iana.org/assignments/telnet-options/telnet-options.xhtml)
/// for the full list. MUD-specific extensions follow the assignments used by
/// the tintin/mudhalla protocol pages.
pub(crate) mod option {
    /// Binary Transmission (RFC 856).
    pub const BINARY: u8 = 0;
    /// Echo (RFC 857).
    pub const ECHO: u8 = 1;
    /// Suppress Go Ahead (RFC 858).
    pub const SGA: u8 = 3;
    /// Status (RFC 859).
    pub const STATUS: u8 = 5;
    /// Timing Mark (RFC 860).
    pub const TM: u8 = 6;
    /// Terminal Type (RFC 1091).
    pub const TTYPE: u8 = 24;
    /// End of Record (RFC 885).
    pub const EOR: u8 = 25;
    /// Negotiate About Window Size (RFC 1073).
    pub const NAWS: u8 = 31;
    /// Terminal Speed (RFC 1079).
    pub const TSPEED: u8 = 32;
    /// Remote Flow Control (RFC 1372).
    pub const LFLOW: u8 = 33;
    /// Linemode (RFC 1184).
    pub const LINEMODE: u8 = 34;
    /// New Environment (RFC 1572).
    pub const NEW_ENVIRON: u8 = 39;
    /// Charset (RFC 2066).
    pub const CHARSET: u8 = 42;
    /// Mud Server Data Protocol.
    pub const MSDP: u8 = 69;
    /// Mud Server Status Protocol.
    pub const MSSP: u8 = 70;
    /// Mud Client Compression Protocol V1.
    pub const MCCP1: u8 = 85;
    /// Mud Client Compression Protocol V2.
    pub const MCCP2: u8 = 86;
    /// Mud Client Compression Protocol V3.
    pub const MCCP3: u8 = 87;
    /// Mud Sound Protocol.
    pub const MSP: u8 = 90;
    /// Mud Extension Protocol.
    pub const MXP: u8 = 91;
    /// Zenith Mud Protocol.
    pub const ZMP: u8 = 93;
    /// Achaea Telnet Client Protocol.
    pub const ATCP: u8 = 200;
    /// Generic Mud Communication Protocol.
    pub const GMCP: u8 = 201;
    /// Extended Options List (RFC 861).
    pub const EXOPL: u8 = 255;
}

/// CHARSET subnegotiation commands (RFC 2066).
pub(crate) mod charset {
    /// Sender requests switching to one of the listed character sets.
    pub const REQUEST: u8 = 1;
    /// Receiver accepts the named character set.
    pub const ACCEPTED: u8 = 2;
    /// Receiver will use none of the requested character sets.
    pub const REJECTED: u8 = 3;
}

/// TERMINAL-TYPE subnegotiation commands (RFC 1091).
pub(crate) mod ttype {
    /// The payload names the sender's terminal type.
    pub const IS: u8 = 0;
    /// Request that the peer send its terminal type.
    pub const SEND: u8 = 1;
}
