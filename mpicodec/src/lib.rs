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

//! # Mudlink MPI Codec
//!
//! MPI is the remote-editing protocol MUME-style game servers tunnel inside
//! the telnet plain-data stream. A message is a fixed four-byte marker
//! (`~$#E`), a single command byte, a decimal length, a line feed, and then
//! exactly that many raw payload bytes:
//!
//! ```text
//! ~$#EE37\n<37 bytes of payload>
//! ```
//!
//! Because the receiver counts bytes instead of scanning for a terminator,
//! payloads are fully binary-safe: a payload may contain the marker itself,
//! telnet escape bytes, or anything else without being reinterpreted.
//!
//! ## Core Components
//!
//! ### [`MpiCodec`]
//!
//! The framer. Implements [`Decoder`](tokio_util::codec::Decoder) over the
//! *plain* byte stream (after telnet demuxing) and yields [`MpiEvent`]s:
//! game text passes through untouched, complete messages come out as
//! [`MpiMessage`]s. The [`Encoder`](tokio_util::codec::Encoder) half frames
//! outbound messages with the computed length. Malformed traffic is logged,
//! dropped, and scanned past; it never ends the session and never reaches
//! the player's screen as garbage.
//!
//! ### [`MudSession`]
//!
//! The per-connection glue: a telnet codec under an MPI framer plus an
//! outbound buffer. `feed` bytes from the socket in, get
//! [`SessionEvent`]s out, write [`MudSession::take_outbound`] back to the
//! socket. See the crate-level example below.
//!
//! ## Usage Example
//!
//! ```rust
//! use mudlink_mpicodec::{MudSession, SessionEvent};
//!
//! # fn main() -> Result<(), mudlink_mpicodec::MpiCodecError> {
//! let mut session = MudSession::new();
//! session.announce_editor();
//!
//! // One inbound chunk: text, then the server offers to echo.
//! for event in session.feed(b"hello \xFF\xFB\x01world")? {
//!     match event {
//!         SessionEvent::Text(text) => { /* render */ }
//!         SessionEvent::Mpi(message) => { /* open editor, pager, ... */ }
//!         SessionEvent::OptionChanged { option, enabled, .. } => {
//!             println!("{option} -> {enabled}");
//!         }
//!         _ => {}
//!     }
//! }
//!
//! // The handshake and the negotiation reply are waiting for the socket.
//! let outbound = session.take_outbound();
//! assert!(!outbound.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! One session per connection; sessions share nothing and may live on
//! different threads independently.

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

mod consts;
mod error;
mod framer;
mod message;
mod session;

pub use self::consts::MPI_MARKER;
pub use self::error::MpiCodecError;
pub use self::framer::{MpiCodec, MpiEvent};
pub use self::message::{MpiCommand, MpiMessage};
pub use self::session::{MudSession, SessionEvent};
