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

//! # Mudlink Telnet Protocol Codec
//!
//! A stateful codec for the Telnet protocol (RFC 854) as spoken by MUD
//! servers, designed for client-side use on top of asynchronous networking
//! libraries like Tokio. It provides a byte-oriented interface over
//! [`bytes::BytesMut`] through the `tokio_util::codec` traits and performs
//! no I/O of its own.
//!
//! ## Overview
//!
//! The codec handles:
//!
//! - **Data transmission**: plain bytes with IAC (Interpret As Command)
//!   escaping removed inbound and applied outbound
//! - **Control commands**: NOP, Break, Are You There, Go Ahead, End of
//!   Record, and friends, surfaced as events
//! - **Option negotiation**: the WILL/WONT/DO/DONT exchange, driven by an
//!   RFC 1143 "Q method" engine that guarantees loop-free convergence
//! - **Subnegotiation**: `IAC SB ... IAC SE` payloads with IAC-doubling,
//!   parsed into typed arguments for NAWS, CHARSET, and TERMINAL-TYPE
//!
//! ## Core Components
//!
//! ### [`TelnetCodec`]
//!
//! The codec itself. Implements [`Decoder`](tokio_util::codec::Decoder)
//! producing [`TelnetEvent`]s and [`Encoder`](tokio_util::codec::Encoder)
//! for [`TelnetFrame`]s, raw byte slices, and text lines. Negotiation
//! verbs never reach the application: the engine answers them internally
//! and queues the replies for the caller to drain with
//! [`TelnetCodec::next_reply`].
//!
//! ### [`TelnetOptions`]
//!
//! The negotiation engine, usable standalone. Tracks one six-state RFC 1143
//! state machine per option per side and enforces the one-outstanding-
//! request discipline: reversing a request mid-flight queues the reversal
//! instead of putting a second verb on the wire.
//!
//! ### [`SupportTable`]
//!
//! The per-connection registry of options this endpoint answers
//! affirmatively, keyed by option code and direction. Everything outside
//! the table is refused with the protocol-correct DONT/WONT so the peer's
//! state machine settles.
//!
//! ## Usage Example
//!
//! ```rust
//! use mudlink_telnetcodec::{TelnetCodec, TelnetEvent, TelnetOption};
//! use tokio_util::codec::{Decoder, Encoder};
//! use bytes::BytesMut;
//!
//! # fn main() -> Result<(), mudlink_telnetcodec::CodecError> {
//! let mut codec = TelnetCodec::new();
//!
//! // "Hello" followed by IAC WILL ECHO.
//! let mut input = BytesMut::from(&b"Hello\xFF\xFB\x01"[..]);
//! while let Some(event) = codec.decode(&mut input)? {
//!     match event {
//!         TelnetEvent::Data(bytes) => println!("data: {bytes:?}"),
//!         TelnetEvent::OptionStatus(option, side, enabled) => {
//!             println!("{option} is now {enabled} on the {side} side");
//!         }
//!         _ => {}
//!     }
//! }
//!
//! // The engine accepted the echo offer; send its DO reply to the server.
//! let mut outbound = BytesMut::new();
//! while let Some(reply) = codec.next_reply() {
//!     codec.encode(reply, &mut outbound)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! `TelnetCodec` is not thread-safe and is not meant to be shared: each
//! connection owns its own codec instance, and separate connections are
//! fully independent.

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

mod args;
mod codec;
mod consts;
mod event;
mod frame;
mod options;
mod result;

pub use self::args::{TelnetArgument, charset, naws, ttype};
pub use self::codec::TelnetCodec;
pub use self::event::TelnetEvent;
pub use self::frame::{TelnetCommand, TelnetFrame};
pub use self::options::{
    NegotiationOutcome, NegotiationVerb, Support, SupportTable, TelnetOption, TelnetOptions,
    TelnetSide,
};
pub use self::result::{CodecError, CodecResult};
