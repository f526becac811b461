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

use crate::consts;
use crate::frame::TelnetFrame;
use std::fmt::Formatter;
use tracing::debug;

///
/// A Telnet capability that can be negotiated between the two sides of a
/// connection.
///
/// The named variants cover the [IANA options](https://www.iana.org/assignments/telnet-options/telnet-options.xhtml)
/// a MUD client encounters in practice plus the common MUD extensions; every
/// other code round-trips through [`TelnetOption::Unknown`]. Each option
/// carries default support flags per direction, consulted when building a
/// [`SupportTable`].
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetOption {
    /// Binary Transmission [RFC856](https://tools.ietf.org/html/rfc856)
    TransmitBinary,
    /// Echo [RFC857](https://tools.ietf.org/html/rfc857)
    Echo,
    /// Suppress Go Ahead [RFC858](https://tools.ietf.org/html/rfc858)
    SuppressGoAhead,
    /// Status [RFC859](http://www.iana.org/go/rfc859)
    Status,
    /// Timing Mark [RFC860](http://www.iana.org/go/rfc860)
    TimingMark,
    /// Terminal Type [RFC1091](http://www.iana.org/go/rfc1091)
    TerminalType,
    /// End of Record [RFC885](http://www.iana.org/go/rfc885)
    EndOfRecord,
    /// Negotiate About Window Size [RFC1073](http://www.iana.org/go/rfc1073)
    WindowSize,
    /// Terminal Speed [RFC1079](http://www.iana.org/go/rfc1079)
    TerminalSpeed,
    /// Remote Flow Control [RFC1372](http://www.iana.org/go/rfc1372)
    FlowControl,
    /// Linemode [RFC1184](http://www.iana.org/go/rfc1184)
    Linemode,
    /// New Environment [RFC1572](http://www.iana.org/go/rfc1572)
    NewEnvironment,
    /// Charset [RFC2066](http://www.iana.org/go/rfc2066)
    Charset,
    /// Mud Server Data Protocol [MSDP](https://tintin.sourceforge.io/protocols/msdp/)
    MSDP,
    /// Mud Server Status Protocol [MSSP](https://tintin.sourceforge.io/protocols/mssp/)
    MSSP,
    /// Mud Client Compression Protocol version 1 [MCCPv1](http://www.gammon.com.au/mccp/protocol.html)
    Compress1,
    /// Mud Client Compression Protocol version 2 [MCCPv2](https://tintin.sourceforge.io/protocols/mccp/)
    Compress2,
    /// Mud Client Compression Protocol version 3
    Compress3,
    /// Mud Sound Protocol
    MSP,
    /// Mud Extension Protocol
    MXP,
    /// Zenith Mud Protocol [ZMP](http://discworld.starturtle.net/external/protocols/zmp.html)
    ZMP,
    /// Achaea Telnet Client Protocol
    ATCP,
    /// Generic Mud Communication Protocol [GMCP](https://www.gammon.com.au/gmcp)
    GMCP,
    /// Extended Options List [RFC861](http://www.iana.org/go/rfc861)
    EXOPL,
    /// Any option code this implementation has no name for.
    Unknown(u8),
}

impl TelnetOption {
    /// Returns the wire code for this option.
    pub fn to_u8(&self) -> u8 {
        match self {
            TelnetOption::TransmitBinary => consts::option::BINARY,
            TelnetOption::Echo => consts::option::ECHO,
            TelnetOption::SuppressGoAhead => consts::option::SGA,
            TelnetOption::Status => consts::option::STATUS,
            TelnetOption::TimingMark => consts::option::TM,
            TelnetOption::TerminalType => consts::option::TTYPE,
            TelnetOption::EndOfRecord => consts::option::EOR,
            TelnetOption::WindowSize => consts::option::NAWS,
            TelnetOption::TerminalSpeed => consts::option::TSPEED,
            TelnetOption::FlowControl => consts::option::LFLOW,
            TelnetOption::Linemode => consts::option::LINEMODE,
            TelnetOption::NewEnvironment => consts::option::NEW_ENVIRON,
            TelnetOption::Charset => consts::option::CHARSET,
            TelnetOption::MSDP => consts::option::MSDP,
            TelnetOption::MSSP => consts::option::MSSP,
            TelnetOption::Compress1 => consts::option::MCCP1,
            TelnetOption::Compress2 => consts::option::MCCP2,
            TelnetOption::Compress3 => consts::option::MCCP3,
            TelnetOption::MSP => consts::option::MSP,
            TelnetOption::MXP => consts::option::MXP,
            TelnetOption::ZMP => consts::option::ZMP,
            TelnetOption::ATCP => consts::option::ATCP,
            TelnetOption::GMCP => consts::option::GMCP,
            TelnetOption::EXOPL => consts::option::EXOPL,
            TelnetOption::Unknown(byte) => *byte,
        }
    }

    /// Maps an option code to its registry entry. Codes without a named
    /// variant become [`TelnetOption::Unknown`].
    pub fn from_u8(byte: u8) -> Self {
        match byte {
            consts::option::BINARY => TelnetOption::TransmitBinary,
            consts::option::ECHO => TelnetOption::Echo,
            consts::option::SGA => TelnetOption::SuppressGoAhead,
            consts::option::STATUS => TelnetOption::Status,
            consts::option::TM => TelnetOption::TimingMark,
            consts::option::TTYPE => TelnetOption::TerminalType,
            consts::option::EOR => TelnetOption::EndOfRecord,
            consts::option::NAWS => TelnetOption::WindowSize,
            consts::option::TSPEED => TelnetOption::TerminalSpeed,
            consts::option::LFLOW => TelnetOption::FlowControl,
            consts::option::LINEMODE => TelnetOption::Linemode,
            consts::option::NEW_ENVIRON => TelnetOption::NewEnvironment,
            consts::option::CHARSET => TelnetOption::Charset,
            consts::option::MSDP => TelnetOption::MSDP,
            consts::option::MSSP => TelnetOption::MSSP,
            consts::option::MCCP1 => TelnetOption::Compress1,
            consts::option::MCCP2 => TelnetOption::Compress2,
            consts::option::MCCP3 => TelnetOption::Compress3,
            consts::option::MSP => TelnetOption::MSP,
            consts::option::MXP => TelnetOption::MXP,
            consts::option::ZMP => TelnetOption::ZMP,
            consts::option::ATCP => TelnetOption::ATCP,
            consts::option::GMCP => TelnetOption::GMCP,
            consts::option::EXOPL => TelnetOption::EXOPL,
            byte => TelnetOption::Unknown(byte),
        }
    }

    /// The directions in which this client supports the option by default.
    ///
    /// Everything else is answered with the protocol-correct refusal. The
    /// defaults reflect a client endpoint: the server echoes and marks
    /// prompts, we report terminal type and window size, and binary
    /// transmission, go-ahead suppression, and charset selection work in
    /// both directions.
    pub fn default_support(&self) -> Support {
        match self {
            TelnetOption::TransmitBinary => Support::BOTH,
            TelnetOption::Echo => Support::REMOTE,
            TelnetOption::SuppressGoAhead => Support::BOTH,
            TelnetOption::TerminalType => Support::LOCAL,
            TelnetOption::EndOfRecord => Support::REMOTE,
            TelnetOption::WindowSize => Support::LOCAL,
            TelnetOption::Charset => Support::BOTH,
            _ => Support::NONE,
        }
    }
}

impl std::fmt::Display for TelnetOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetOption::TransmitBinary => write!(f, "TransmitBinary"),
            TelnetOption::Echo => write!(f, "Echo"),
            TelnetOption::SuppressGoAhead => write!(f, "SuppressGoAhead"),
            TelnetOption::Status => write!(f, "Status"),
            TelnetOption::TimingMark => write!(f, "TimingMark"),
            TelnetOption::TerminalType => write!(f, "TerminalType"),
            TelnetOption::EndOfRecord => write!(f, "EndOfRecord"),
            TelnetOption::WindowSize => write!(f, "WindowSize"),
            TelnetOption::TerminalSpeed => write!(f, "TerminalSpeed"),
            TelnetOption::FlowControl => write!(f, "FlowControl"),
            TelnetOption::Linemode => write!(f, "Linemode"),
            TelnetOption::NewEnvironment => write!(f, "NewEnvironment"),
            TelnetOption::Charset => write!(f, "Charset"),
            TelnetOption::MSDP => write!(f, "MSDP"),
            TelnetOption::MSSP => write!(f, "MSSP"),
            TelnetOption::Compress1 => write!(f, "Compress1"),
            TelnetOption::Compress2 => write!(f, "Compress2"),
            TelnetOption::Compress3 => write!(f, "Compress3"),
            TelnetOption::MSP => write!(f, "MSP"),
            TelnetOption::MXP => write!(f, "MXP"),
            TelnetOption::ZMP => write!(f, "ZMP"),
            TelnetOption::ATCP => write!(f, "ATCP"),
            TelnetOption::GMCP => write!(f, "GMCP"),
            TelnetOption::EXOPL => write!(f, "EXOPL"),
            TelnetOption::Unknown(option) => write!(f, "Unknown({option})"),
        }
    }
}

impl From<u8> for TelnetOption {
    fn from(byte: u8) -> Self {
        Self::from_u8(byte)
    }
}

impl From<TelnetOption> for u8 {
    fn from(option: TelnetOption) -> Self {
        option.to_u8()
    }
}

/// The side of the connection an option state refers to.
///
/// Telnet negotiates each option independently per side: the local path
/// (what *we* perform, negotiated with WILL/WONT and answered with
/// DO/DONT) and the remote path (what the *peer* performs, negotiated with
/// DO/DONT and answered with WILL/WONT).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetSide {
    /// Our side of the connection: options we perform.
    Local,
    /// The peer's side of the connection: options it performs.
    Remote,
}

impl std::fmt::Display for TelnetSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetSide::Local => write!(f, "Local"),
            TelnetSide::Remote => write!(f, "Remote"),
        }
    }
}

/// The four Telnet negotiation verbs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NegotiationVerb {
    /// Peer offers to perform an option.
    Will,
    /// Peer refuses, or stops, performing an option.
    Wont,
    /// Peer asks us to perform an option.
    Do,
    /// Peer asks us to stop performing an option.
    Dont,
}

impl std::fmt::Display for NegotiationVerb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NegotiationVerb::Will => write!(f, "WILL"),
            NegotiationVerb::Wont => write!(f, "WONT"),
            NegotiationVerb::Do => write!(f, "DO"),
            NegotiationVerb::Dont => write!(f, "DONT"),
        }
    }
}

/// Which directions of an option this endpoint is willing to enable.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Support {
    /// We are willing to perform the option ourselves (answer DO with WILL).
    pub local: bool,
    /// We are willing to let the peer perform it (answer WILL with DO).
    pub remote: bool,
}

impl Support {
    /// Supported in neither direction.
    pub const NONE: Support = Support {
        local: false,
        remote: false,
    };
    /// Supported on our side only.
    pub const LOCAL: Support = Support {
        local: true,
        remote: false,
    };
    /// Supported on the peer's side only.
    pub const REMOTE: Support = Support {
        local: false,
        remote: true,
    };
    /// Supported in both directions.
    pub const BOTH: Support = Support {
        local: true,
        remote: true,
    };
}

/// The per-connection registry of which options this endpoint answers
/// affirmatively, keyed by option code.
///
/// Built once from [`TelnetOption::default_support`] and optionally adjusted
/// before the connection starts exchanging traffic. Each codec owns its own
/// table; there is no global registry.
#[derive(Clone, Debug)]
pub struct SupportTable {
    entries: [Support; 256],
}

impl SupportTable {
    /// Looks up the support flags for an option.
    pub fn get(&self, option: TelnetOption) -> Support {
        self.entries[option.to_u8() as usize]
    }

    /// Marks an option as one we are willing to perform ourselves.
    pub fn allow_local(&mut self, option: TelnetOption) -> &mut Self {
        self.entries[option.to_u8() as usize].local = true;
        self
    }

    /// Marks an option as one we are willing to let the peer perform.
    pub fn allow_remote(&mut self, option: TelnetOption) -> &mut Self {
        self.entries[option.to_u8() as usize].remote = true;
        self
    }

    /// Withdraws support for an option in both directions.
    pub fn forbid(&mut self, option: TelnetOption) -> &mut Self {
        self.entries[option.to_u8() as usize] = Support::NONE;
        self
    }
}

impl Default for SupportTable {
    fn default() -> Self {
        SupportTable {
            entries: core::array::from_fn(|idx| {
                TelnetOption::from_u8(idx as u8).default_support()
            }),
        }
    }
}

/// The result of feeding one received negotiation verb through the engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NegotiationOutcome {
    /// The frame to send back, if the protocol requires an answer.
    pub reply: Option<TelnetFrame>,
    /// The side whose effective enabled status flipped, and its new value.
    pub status_change: Option<(TelnetSide, bool)>,
}

/// Per-option, per-side negotiation state, after RFC 1143's Q method.
///
/// The six states guarantee loop-free convergence: `WantNo`/`WantYes` mark
/// an outstanding request of ours, and the `Opposite` variants queue a
/// single reversal to be issued once the outstanding request resolves.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub(crate) enum QState {
    /// Option is off and nothing is outstanding.
    #[default]
    No,
    /// Option is on and nothing is outstanding.
    Yes,
    /// We asked to disable and await the acknowledgment.
    WantNo,
    /// We asked to disable, then decided we want it on after all.
    WantNoOpposite,
    /// We asked to enable and await the acknowledgment.
    WantYes,
    /// We asked to enable, then decided we want it off after all.
    WantYesOpposite,
}

impl QState {
    /// Whether the option is effectively on in this state.
    ///
    /// A side stays enabled while we are waiting for the peer to confirm a
    /// disable: the peer may legitimately keep performing the option until
    /// it acknowledges.
    fn enabled(self) -> bool {
        matches!(self, QState::Yes | QState::WantNo | QState::WantNoOpposite)
    }
}

impl std::fmt::Display for QState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QState::No => write!(f, "No"),
            QState::Yes => write!(f, "Yes"),
            QState::WantNo => write!(f, "WantNo"),
            QState::WantNoOpposite => write!(f, "WantNoOpposite"),
            QState::WantYes => write!(f, "WantYes"),
            QState::WantYesOpposite => write!(f, "WantYesOpposite"),
        }
    }
}

/// Negotiation state for one option: what we perform (`us`) and what the
/// peer performs (`him`).
#[derive(Clone, Copy, Debug, Default)]
struct OptionState {
    us: QState,
    him: QState,
}

///
/// The negotiation engine: one [`QState`] pair per option code plus the
/// support registry, implementing the RFC 1143 transition discipline.
///
/// Requests are issued at most once while unacknowledged. Asking for the
/// opposite of an in-flight request does not put a second verb on the wire;
/// it is queued through the `Opposite` states and sent when the peer's
/// answer arrives. Incoming verbs are answered at most once, so two engines
/// talking to each other always reach a stable Yes/No in a bounded number of
/// exchanges.
///
#[derive(Clone, Debug)]
pub struct TelnetOptions {
    support: SupportTable,
    state: [OptionState; 256],
}

impl TelnetOptions {
    /// Creates an engine with the given support registry.
    pub fn new(support: SupportTable) -> Self {
        TelnetOptions {
            support,
            state: core::array::from_fn(|_| OptionState::default()),
        }
    }

    /// Whether we are willing to perform this option ourselves.
    pub fn is_supported_local(&self, option: TelnetOption) -> bool {
        self.support.get(option).local
    }

    /// Whether we are willing to let the peer perform this option.
    pub fn is_supported_remote(&self, option: TelnetOption) -> bool {
        self.support.get(option).remote
    }

    /// Whether the option is effectively enabled on our side.
    pub fn local_enabled(&self, option: TelnetOption) -> bool {
        self.state[option.to_u8() as usize].us.enabled()
    }

    /// Whether the option is effectively enabled on the peer's side.
    pub fn remote_enabled(&self, option: TelnetOption) -> bool {
        self.state[option.to_u8() as usize].him.enabled()
    }

    /// Requests enabling the option on our side.
    ///
    /// Returns the `WILL` frame to put on the wire, or `None` when the
    /// option is unsupported, already on, or a request is already
    /// outstanding (in which case the desire is queued per RFC 1143).
    pub fn enable_local(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        if !self.support.get(option).local {
            debug!("refusing to offer unsupported option {option}");
            return None;
        }
        let state = &mut self.state[option.to_u8() as usize].us;
        match *state {
            QState::No => {
                *state = QState::WantYes;
                Some(TelnetFrame::Will(option))
            }
            QState::WantNo => {
                // Disable still in flight; queue the reversal.
                *state = QState::WantNoOpposite;
                None
            }
            QState::WantYesOpposite => {
                // Cancel the queued disable.
                *state = QState::WantYes;
                None
            }
            QState::Yes | QState::WantYes | QState::WantNoOpposite => None,
        }
    }

    /// Requests disabling the option on our side.
    ///
    /// Returns the `WONT` frame to send, or `None` when nothing needs to go
    /// on the wire.
    pub fn disable_local(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        let state = &mut self.state[option.to_u8() as usize].us;
        match *state {
            QState::Yes => {
                *state = QState::WantNo;
                Some(TelnetFrame::Wont(option))
            }
            QState::WantYes => {
                *state = QState::WantYesOpposite;
                None
            }
            QState::WantNoOpposite => {
                *state = QState::WantNo;
                None
            }
            QState::No | QState::WantNo | QState::WantYesOpposite => None,
        }
    }

    /// Requests that the peer enable the option.
    ///
    /// Returns the `DO` frame to send, or `None` per the same rules as
    /// [`TelnetOptions::enable_local`].
    pub fn enable_remote(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        if !self.support.get(option).remote {
            debug!("refusing to request unsupported option {option}");
            return None;
        }
        let state = &mut self.state[option.to_u8() as usize].him;
        match *state {
            QState::No => {
                *state = QState::WantYes;
                Some(TelnetFrame::Do(option))
            }
            QState::WantNo => {
                *state = QState::WantNoOpposite;
                None
            }
            QState::WantYesOpposite => {
                *state = QState::WantYes;
                None
            }
            QState::Yes | QState::WantYes | QState::WantNoOpposite => None,
        }
    }

    /// Requests that the peer disable the option.
    pub fn disable_remote(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        let state = &mut self.state[option.to_u8() as usize].him;
        match *state {
            QState::Yes => {
                *state = QState::WantNo;
                Some(TelnetFrame::Dont(option))
            }
            QState::WantYes => {
                *state = QState::WantYesOpposite;
                None
            }
            QState::WantNoOpposite => {
                *state = QState::WantNo;
                None
            }
            QState::No | QState::WantNo | QState::WantYesOpposite => None,
        }
    }

    /// Feeds one received negotiation verb through the engine.
    ///
    /// Produces at most one reply frame and reports whether the affected
    /// side's effective status flipped.
    pub fn receive(&mut self, verb: NegotiationVerb, option: TelnetOption) -> NegotiationOutcome {
        let side = match verb {
            NegotiationVerb::Will | NegotiationVerb::Wont => TelnetSide::Remote,
            NegotiationVerb::Do | NegotiationVerb::Dont => TelnetSide::Local,
        };
        let before = match side {
            TelnetSide::Local => self.state[option.to_u8() as usize].us.enabled(),
            TelnetSide::Remote => self.state[option.to_u8() as usize].him.enabled(),
        };
        let reply = match verb {
            NegotiationVerb::Will => self.recv_will(option),
            NegotiationVerb::Wont => self.recv_wont(option),
            NegotiationVerb::Do => self.recv_do(option),
            NegotiationVerb::Dont => self.recv_dont(option),
        };
        let after = match side {
            TelnetSide::Local => self.state[option.to_u8() as usize].us.enabled(),
            TelnetSide::Remote => self.state[option.to_u8() as usize].him.enabled(),
        };
        NegotiationOutcome {
            reply,
            status_change: (before != after).then_some((side, after)),
        }
    }

    /// Peer sent `WILL option`: it offers to perform, or confirms
    /// performing, the option.
    fn recv_will(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        if !self.support.get(option).remote {
            // Never silently accept; refuse so the peer's machine settles.
            return Some(TelnetFrame::Dont(option));
        }
        let state = &mut self.state[option.to_u8() as usize].him;
        match *state {
            QState::No => {
                *state = QState::Yes;
                Some(TelnetFrame::Do(option))
            }
            QState::Yes => None,
            QState::WantNo => {
                // WILL in answer to our DONT: treat the option as settled off.
                debug!("peer answered DONT {option} with WILL");
                *state = QState::No;
                None
            }
            QState::WantNoOpposite => {
                debug!("peer answered DONT {option} with WILL");
                *state = QState::Yes;
                None
            }
            QState::WantYes => {
                *state = QState::Yes;
                None
            }
            QState::WantYesOpposite => {
                // Enable confirmed, but a disable is queued behind it.
                *state = QState::WantNo;
                Some(TelnetFrame::Dont(option))
            }
        }
    }

    /// Peer sent `WONT option`: it refuses, or stops, performing the option.
    fn recv_wont(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        let state = &mut self.state[option.to_u8() as usize].him;
        match *state {
            QState::No => None,
            QState::Yes => {
                *state = QState::No;
                Some(TelnetFrame::Dont(option))
            }
            QState::WantNo => {
                *state = QState::No;
                None
            }
            QState::WantNoOpposite => {
                // Disable acknowledged; issue the queued enable.
                *state = QState::WantYes;
                Some(TelnetFrame::Do(option))
            }
            QState::WantYes | QState::WantYesOpposite => {
                *state = QState::No;
                None
            }
        }
    }

    /// Peer sent `DO option`: it asks us to perform the option.
    fn recv_do(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        if !self.support.get(option).local {
            return Some(TelnetFrame::Wont(option));
        }
        let state = &mut self.state[option.to_u8() as usize].us;
        match *state {
            QState::No => {
                *state = QState::Yes;
                Some(TelnetFrame::Will(option))
            }
            QState::Yes => None,
            QState::WantNo => {
                debug!("peer answered WONT {option} with DO");
                *state = QState::No;
                None
            }
            QState::WantNoOpposite => {
                debug!("peer answered WONT {option} with DO");
                *state = QState::Yes;
                None
            }
            QState::WantYes => {
                *state = QState::Yes;
                None
            }
            QState::WantYesOpposite => {
                *state = QState::WantNo;
                Some(TelnetFrame::Wont(option))
            }
        }
    }

    /// Peer sent `DONT option`: it asks us to stop performing the option.
    fn recv_dont(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        let state = &mut self.state[option.to_u8() as usize].us;
        match *state {
            QState::No => None,
            QState::Yes => {
                *state = QState::No;
                Some(TelnetFrame::Wont(option))
            }
            QState::WantNo => {
                *state = QState::No;
                None
            }
            QState::WantNoOpposite => {
                *state = QState::WantYes;
                Some(TelnetFrame::Will(option))
            }
            QState::WantYes | QState::WantYesOpposite => {
                *state = QState::No;
                None
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn us_state(&self, option: TelnetOption) -> QState {
        self.state[option.to_u8() as usize].us
    }

    #[cfg(test)]
    pub(crate) fn him_state(&self, option: TelnetOption) -> QState {
        self.state[option.to_u8() as usize].him
    }
}

impl Default for TelnetOptions {
    fn default() -> Self {
        TelnetOptions::new(SupportTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPT: TelnetOption = TelnetOption::TransmitBinary;

    // ============================================================================
    // Local Side (us): WILL/WONT requested by us, answered with DO/DONT
    // ============================================================================

    #[test]
    fn local_enable_sends_will_once() {
        let mut opts = TelnetOptions::default();
        assert_eq!(opts.enable_local(OPT), Some(TelnetFrame::Will(OPT)));
        assert_eq!(opts.us_state(OPT), QState::WantYes);
        // Re-requesting while outstanding puts nothing on the wire.
        assert_eq!(opts.enable_local(OPT), None);
        assert_eq!(opts.us_state(OPT), QState::WantYes);
    }

    #[test]
    fn local_enable_confirmed_by_do() {
        let mut opts = TelnetOptions::default();
        opts.enable_local(OPT);
        let outcome = opts.receive(NegotiationVerb::Do, OPT);
        assert_eq!(outcome.reply, None);
        assert_eq!(outcome.status_change, Some((TelnetSide::Local, true)));
        assert!(opts.local_enabled(OPT));
    }

    #[test]
    fn local_enable_refused_by_dont() {
        let mut opts = TelnetOptions::default();
        opts.enable_local(OPT);
        let outcome = opts.receive(NegotiationVerb::Dont, OPT);
        assert_eq!(outcome.reply, None);
        assert_eq!(outcome.status_change, None);
        assert!(!opts.local_enabled(OPT));
        assert_eq!(opts.us_state(OPT), QState::No);
    }

    #[test]
    fn local_disable_round_trip() {
        let mut opts = TelnetOptions::default();
        opts.enable_local(OPT);
        opts.receive(NegotiationVerb::Do, OPT);
        assert_eq!(opts.disable_local(OPT), Some(TelnetFrame::Wont(OPT)));
        // Still enabled until the peer acknowledges.
        assert!(opts.local_enabled(OPT));
        let outcome = opts.receive(NegotiationVerb::Dont, OPT);
        assert_eq!(outcome.status_change, Some((TelnetSide::Local, false)));
        assert!(!opts.local_enabled(OPT));
    }

    #[test]
    fn unsolicited_do_is_accepted_for_supported_option() {
        let mut opts = TelnetOptions::default();
        let outcome = opts.receive(NegotiationVerb::Do, OPT);
        assert_eq!(outcome.reply, Some(TelnetFrame::Will(OPT)));
        assert_eq!(outcome.status_change, Some((TelnetSide::Local, true)));
    }

    #[test]
    fn unsolicited_do_is_refused_for_unsupported_option() {
        let mut opts = TelnetOptions::default();
        let option = TelnetOption::Linemode;
        let outcome = opts.receive(NegotiationVerb::Do, option);
        assert_eq!(outcome.reply, Some(TelnetFrame::Wont(option)));
        assert_eq!(outcome.status_change, None);
        assert!(!opts.local_enabled(option));
    }

    #[test]
    fn unsolicited_dont_when_disabled_is_ignored() {
        let mut opts = TelnetOptions::default();
        let outcome = opts.receive(NegotiationVerb::Dont, OPT);
        assert_eq!(outcome, NegotiationOutcome::default());
    }

    #[test]
    fn unsolicited_dont_when_enabled_is_acknowledged() {
        let mut opts = TelnetOptions::default();
        opts.receive(NegotiationVerb::Do, OPT);
        let outcome = opts.receive(NegotiationVerb::Dont, OPT);
        assert_eq!(outcome.reply, Some(TelnetFrame::Wont(OPT)));
        assert_eq!(outcome.status_change, Some((TelnetSide::Local, false)));
    }

    // ============================================================================
    // Remote Side (him): DO/DONT requested by us, answered with WILL/WONT
    // ============================================================================

    #[test]
    fn remote_enable_sends_do_once() {
        let mut opts = TelnetOptions::default();
        assert_eq!(opts.enable_remote(OPT), Some(TelnetFrame::Do(OPT)));
        assert_eq!(opts.enable_remote(OPT), None);
        assert_eq!(opts.him_state(OPT), QState::WantYes);
    }

    #[test]
    fn remote_enable_confirmed_by_will() {
        let mut opts = TelnetOptions::default();
        opts.enable_remote(OPT);
        let outcome = opts.receive(NegotiationVerb::Will, OPT);
        assert_eq!(outcome.reply, None);
        assert_eq!(outcome.status_change, Some((TelnetSide::Remote, true)));
        assert!(opts.remote_enabled(OPT));
    }

    #[test]
    fn unsolicited_will_is_accepted_for_supported_option() {
        let mut opts = TelnetOptions::default();
        let option = TelnetOption::Echo;
        let outcome = opts.receive(NegotiationVerb::Will, option);
        assert_eq!(outcome.reply, Some(TelnetFrame::Do(option)));
        assert_eq!(outcome.status_change, Some((TelnetSide::Remote, true)));
    }

    #[test]
    fn unsolicited_will_is_refused_for_unsupported_option() {
        let mut opts = TelnetOptions::default();
        let option = TelnetOption::GMCP;
        let outcome = opts.receive(NegotiationVerb::Will, option);
        assert_eq!(outcome.reply, Some(TelnetFrame::Dont(option)));
        assert!(!opts.remote_enabled(option));
    }

    #[test]
    fn unsupported_option_never_reaches_yes_under_repeated_offers() {
        let mut opts = TelnetOptions::default();
        let option = TelnetOption::Compress2;
        for _ in 0..4 {
            let outcome = opts.receive(NegotiationVerb::Will, option);
            assert_eq!(outcome.reply, Some(TelnetFrame::Dont(option)));
            assert_eq!(outcome.status_change, None);
        }
    }

    // ============================================================================
    // Collision and queue discipline
    // ============================================================================

    #[test]
    fn reversal_during_outstanding_enable_is_queued_not_sent() {
        let mut opts = TelnetOptions::default();
        opts.enable_remote(OPT);
        // Changing our mind mid-flight must not put a second verb on the wire.
        assert_eq!(opts.disable_remote(OPT), None);
        assert_eq!(opts.him_state(OPT), QState::WantYesOpposite);
        // Peer confirms the enable; the queued disable goes out now.
        let outcome = opts.receive(NegotiationVerb::Will, OPT);
        assert_eq!(outcome.reply, Some(TelnetFrame::Dont(OPT)));
        assert_eq!(opts.him_state(OPT), QState::WantNo);
        // And the final acknowledgment settles at No.
        let outcome = opts.receive(NegotiationVerb::Wont, OPT);
        assert_eq!(outcome.reply, None);
        assert_eq!(opts.him_state(OPT), QState::No);
    }

    #[test]
    fn reversal_during_outstanding_disable_is_queued_not_sent() {
        let mut opts = TelnetOptions::default();
        opts.receive(NegotiationVerb::Will, OPT);
        opts.disable_remote(OPT);
        assert_eq!(opts.enable_remote(OPT), None);
        assert_eq!(opts.him_state(OPT), QState::WantNoOpposite);
        // Peer acknowledges the disable; the queued enable goes out.
        let outcome = opts.receive(NegotiationVerb::Wont, OPT);
        assert_eq!(outcome.reply, Some(TelnetFrame::Do(OPT)));
        assert_eq!(opts.him_state(OPT), QState::WantYes);
        let outcome = opts.receive(NegotiationVerb::Will, OPT);
        assert_eq!(outcome.status_change, Some((TelnetSide::Remote, true)));
        assert!(opts.remote_enabled(OPT));
    }

    #[test]
    fn cancelled_reversal_restores_original_request() {
        let mut opts = TelnetOptions::default();
        opts.enable_remote(OPT);
        opts.disable_remote(OPT);
        assert_eq!(opts.him_state(OPT), QState::WantYesOpposite);
        // Cancelling the queued disable sends nothing either.
        assert_eq!(opts.enable_remote(OPT), None);
        assert_eq!(opts.him_state(OPT), QState::WantYes);
    }

    #[test]
    fn negotiation_terminates_for_any_verb_storm() {
        // Whatever the peer throws at one option, the engine answers with at
        // most one frame per verb and lands in a stable state.
        let verbs = [
            NegotiationVerb::Will,
            NegotiationVerb::Wont,
            NegotiationVerb::Will,
            NegotiationVerb::Will,
            NegotiationVerb::Wont,
            NegotiationVerb::Wont,
        ];
        let mut opts = TelnetOptions::default();
        for verb in verbs {
            let _ = opts.receive(verb, TelnetOption::Echo);
        }
        let settled = opts.him_state(TelnetOption::Echo);
        assert!(matches!(settled, QState::No | QState::Yes));
    }

    #[test]
    fn support_table_overrides_defaults() {
        let mut table = SupportTable::default();
        table.allow_remote(TelnetOption::GMCP);
        table.forbid(TelnetOption::Echo);
        let mut opts = TelnetOptions::new(table);
        let outcome = opts.receive(NegotiationVerb::Will, TelnetOption::GMCP);
        assert_eq!(outcome.reply, Some(TelnetFrame::Do(TelnetOption::GMCP)));
        let outcome = opts.receive(NegotiationVerb::Will, TelnetOption::Echo);
        assert_eq!(outcome.reply, Some(TelnetFrame::Dont(TelnetOption::Echo)));
    }
}
