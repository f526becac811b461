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

//! Property tests for the telnet codec.

use bytes::BytesMut;
use mudlink_telnetcodec::{TelnetCodec, TelnetEvent};
use proptest::prelude::*;
use tokio_util::codec::{Decoder, Encoder};

/// Decodes everything, flattening data runs into one byte vector and
/// collecting the non-data events separately.
fn decode_flattened(codec: &mut TelnetCodec, mut src: BytesMut) -> (Vec<u8>, Vec<TelnetEvent>) {
    let mut bytes = Vec::new();
    let mut events = Vec::new();
    while let Some(event) = codec.decode(&mut src).unwrap() {
        match event {
            TelnetEvent::Data(run) => bytes.extend_from_slice(&run),
            other => events.push(other),
        }
    }
    (bytes, events)
}

proptest! {
    /// decode(encode(x)) == x for arbitrary binary data, including 0xFF.
    #[test]
    fn iac_escape_round_trip(input in proptest::collection::vec(any::<u8>(), 0..512)) {
        let mut codec = TelnetCodec::new();
        let mut wire = BytesMut::new();
        codec.encode(&input[..], &mut wire).unwrap();
        let (decoded, events) = decode_flattened(&mut codec, wire);
        prop_assert_eq!(decoded, input);
        prop_assert!(events.is_empty());
    }

    /// Splitting the wire stream at arbitrary points changes nothing about
    /// the decoded output.
    #[test]
    fn chunk_boundary_transparency(
        input in proptest::collection::vec(any::<u8>(), 0..256),
        cuts in proptest::collection::vec(any::<proptest::sample::Index>(), 0..8),
    ) {
        let mut wire = BytesMut::new();
        TelnetCodec::new().encode(&input[..], &mut wire).unwrap();
        let wire = wire.freeze();

        let mut whole_codec = TelnetCodec::new();
        let whole = decode_flattened(&mut whole_codec, BytesMut::from(&wire[..]));

        let mut offsets: Vec<usize> = cuts.iter().map(|idx| idx.index(wire.len() + 1)).collect();
        offsets.push(0);
        offsets.push(wire.len());
        offsets.sort_unstable();

        let mut chunked_codec = TelnetCodec::new();
        let mut bytes = Vec::new();
        let mut events = Vec::new();
        for pair in offsets.windows(2) {
            let chunk = BytesMut::from(&wire[pair[0]..pair[1]]);
            let (chunk_bytes, chunk_events) = decode_flattened(&mut chunked_codec, chunk);
            bytes.extend(chunk_bytes);
            events.extend(chunk_events);
        }
        prop_assert_eq!(bytes, whole.0);
        prop_assert_eq!(events, whole.1);
    }
}
