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

//! Integration tests for the MPI codec and session layer
//!
//! These drive a full session with the byte sequences a MUME-style server
//! actually produces, protocol layers interleaved.

use bytes::BytesMut;
use mudlink_mpicodec::{MpiCommand, MpiMessage, MudSession, SessionEvent};
use mudlink_telnetcodec::{TelnetOption, TelnetSide};
use tracing_test::traced_test;

// ============================================================================
// Helper Functions
// ============================================================================

fn text(bytes: &[u8]) -> SessionEvent {
    SessionEvent::Text(BytesMut::from(bytes))
}

fn mpi(command: u8, payload: &[u8]) -> SessionEvent {
    SessionEvent::Mpi(MpiMessage::new(MpiCommand(command), payload))
}

/// Concatenates adjacent text events so assertions are independent of how
/// runs happened to split.
fn merge_text(events: Vec<SessionEvent>) -> Vec<SessionEvent> {
    let mut merged: Vec<SessionEvent> = Vec::new();
    for event in events {
        match (merged.last_mut(), event) {
            (Some(SessionEvent::Text(run)), SessionEvent::Text(next)) => {
                run.extend_from_slice(&next);
            }
            (_, event) => merged.push(event),
        }
    }
    merged
}

// ============================================================================
// End-to-End Scenarios
// ============================================================================

#[test]
fn login_sequence_with_echo_suppression() {
    let mut session = MudSession::new();

    // Banner, then the server takes over echo for password entry.
    let events = session.feed(b"Account: \xFF\xFB\x01").unwrap();
    assert_eq!(
        events,
        vec![
            text(b"Account: "),
            SessionEvent::OptionChanged {
                option: TelnetOption::Echo,
                side: TelnetSide::Remote,
                enabled: true,
            },
        ]
    );
    assert!(session.is_enabled_remote(TelnetOption::Echo));
    // Our acceptance went out.
    assert_eq!(&session.take_outbound()[..], &[0xFF, 0xFD, 0x01]);

    // And back off again after the password.
    let events = session.feed(b"\xFF\xFC\x01ok\r\n").unwrap();
    assert_eq!(
        events,
        vec![
            SessionEvent::OptionChanged {
                option: TelnetOption::Echo,
                side: TelnetSide::Remote,
                enabled: false,
            },
            text(b"ok\r\n"),
        ]
    );
    assert!(!session.is_enabled_remote(TelnetOption::Echo));
    // The disable is acknowledged with DONT.
    assert_eq!(&session.take_outbound()[..], &[0xFF, 0xFE, 0x01]);
}

#[test]
fn remote_edit_request_between_room_descriptions() {
    let mut session = MudSession::new();
    let mut wire = BytesMut::from(&b"A quiet library.\r\n"[..]);
    wire.extend_from_slice(b"~$#EE21\nM12345\nA letter\nDear sir");
    wire.extend_from_slice(b"\r\nExits: north.\r\n");

    // Payload is exactly 21 bytes; what follows is game text again.
    let events = merge_text(session.feed(&wire).unwrap());
    assert_eq!(
        events,
        vec![
            text(b"A quiet library.\r\n"),
            mpi(b'E', b"M12345\nA letter\nDear "),
            text(b"sir\r\nExits: north.\r\n"),
        ]
    );
}

#[test]
fn mpi_payload_full_of_protocol_noise_is_binary_safe() {
    let mut session = MudSession::new();
    // The payload contains a complete fake MPI message and telnet command
    // bytes. On the wire the 0xFF bytes are IAC-escaped by the server.
    let payload: &[u8] = b"~$#EV3\nxyz\xFF\xFD\x01\x00\x07";
    let escaped: Vec<u8> = payload
        .iter()
        .flat_map(|&byte| {
            if byte == 0xFF {
                vec![0xFF, 0xFF]
            } else {
                vec![byte]
            }
        })
        .collect();
    let mut wire = BytesMut::from(format!("~$#EV{}\n", payload.len()).as_bytes());
    wire.extend_from_slice(&escaped);
    wire.extend_from_slice(b"tail");

    let events = merge_text(session.feed(&wire).unwrap());
    assert_eq!(events, vec![mpi(b'V', payload), text(b"tail")]);
}

#[test]
fn malformed_length_is_invisible_and_recoverable() {
    let mut session = MudSession::new();
    let events = merge_text(session.feed(b"~$#EVabc\n").unwrap());
    // No message, and the swallowed marker/command bytes never render.
    assert!(!events.iter().any(|e| matches!(e, SessionEvent::Mpi(_))));
    // The framer is scanning again: valid traffic flows.
    let events = merge_text(session.feed(b"~$#EV2\nhi and text").unwrap());
    assert_eq!(events, vec![mpi(b'V', b"hi"), text(b" and text")]);
}

#[test]
fn marker_fed_byte_by_byte_then_diverging() {
    let mut session = MudSession::new();
    for byte in b"~$#" {
        assert_eq!(session.feed(&[*byte]).unwrap(), vec![]);
    }
    // The fourth byte breaks the match; everything held comes back as text.
    let events = session.feed(b"!").unwrap();
    assert_eq!(events, vec![text(b"~$#!")]);
}

#[test]
fn marker_fed_byte_by_byte_then_completing() {
    let mut session = MudSession::new();
    for byte in b"~$#EV2\nh" {
        assert_eq!(session.feed(&[*byte]).unwrap(), vec![]);
    }
    let events = session.feed(b"i").unwrap();
    assert_eq!(events, vec![mpi(b'V', b"hi")]);
}

#[test]
fn chunking_is_transparent_for_a_mixed_stream() {
    let mut wire = BytesMut::from(&b"north\r\n"[..]);
    wire.extend_from_slice(&[0xFF, 0xFB, 0x01]); // IAC WILL ECHO
    wire.extend_from_slice(b"~$#EV4\nwxyz");
    wire.extend_from_slice(&[0xFF, 0xF9]); // IAC GA
    wire.extend_from_slice(b"prompt> ");

    let mut whole = MudSession::new();
    let expected = merge_text(whole.feed(&wire).unwrap());

    for chunk_size in [1, 2, 3, 5, 7] {
        let mut chunked = MudSession::new();
        let mut events = Vec::new();
        for chunk in wire.chunks(chunk_size) {
            events.extend(chunked.feed(chunk).unwrap());
        }
        assert_eq!(
            merge_text(events),
            expected,
            "chunk size {chunk_size} changed the event stream"
        );
    }
}

// ============================================================================
// Outbound Direction
// ============================================================================

#[test]
fn outbound_edit_reply_round_trips_through_a_server_session() {
    // Client frames an edit reply; a second session playing the server
    // side must recover it byte-exact.
    let mut client = MudSession::new();
    let body = b"E12345\nfixed text\n";
    client
        .send_mpi(MpiMessage::new(MpiCommand::EDIT, &body[..]))
        .unwrap();
    let wire = client.take_outbound();

    let mut server = MudSession::new();
    let events = server.feed(&wire).unwrap();
    assert_eq!(events, vec![mpi(b'E', body)]);
}

#[test]
fn window_size_report_reaches_peer() {
    let mut client = MudSession::new();
    client.send_window_size(120, 40).unwrap();
    let wire = client.take_outbound();
    assert_eq!(&wire[..], &[255, 250, 31, 0, 120, 0, 40, 255, 240]);
}

#[test]
fn negotiation_requests_go_out_once() {
    let mut session = MudSession::new();
    assert!(session.request_enable_remote(TelnetOption::SuppressGoAhead).unwrap());
    // A second request while the first is outstanding stays off the wire.
    assert!(!session.request_enable_remote(TelnetOption::SuppressGoAhead).unwrap());
    assert_eq!(&session.take_outbound()[..], &[255, 253, 3]);
}

#[test]
fn player_line_is_escaped_and_terminated() {
    let mut session = MudSession::new();
    session.send_line("say hello").unwrap();
    assert_eq!(&session.take_outbound()[..], b"say hello\r\n");
}

// ============================================================================
// Logging
// ============================================================================

#[traced_test]
#[test]
fn malformed_mpi_length_logs_a_warning() {
    let mut session = MudSession::new();
    session.feed(b"~$#EVnope\n").unwrap();
    assert!(logs_contain("invalid byte"));
}
