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

//! Negotiate About Window Size (RFC 1073).

use byteorder::{BigEndian, WriteBytesExt};

/// The terminal dimensions exchanged in a NAWS subnegotiation.
///
/// Encoded as four bytes: columns then rows, each a big-endian 16-bit word.
/// A value of zero means "unspecified" per the RFC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSize {
    /// The number of character columns in the terminal window.
    pub cols: u16,
    /// The number of character rows in the terminal window.
    pub rows: u16,
}

impl WindowSize {
    /// Creates a new `WindowSize` with the given dimensions.
    pub fn new(cols: u16, rows: u16) -> Self {
        WindowSize { cols, rows }
    }

    /// The encoded payload length. Always four bytes.
    pub fn len(&self) -> usize {
        4
    }

    /// Writes the raw subnegotiation payload for this window size.
    pub fn write<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        writer.write_u16::<BigEndian>(self.cols)?;
        writer.write_u16::<BigEndian>(self.rows)?;
        Ok(4)
    }

    /// Decodes a window size from a raw subnegotiation payload.
    ///
    /// Returns `None` unless the payload is exactly the four bytes the RFC
    /// prescribes.
    pub fn decode(payload: &[u8]) -> Option<Self> {
        if payload.len() != 4 {
            return None;
        }
        Some(WindowSize {
            cols: u16::from_be_bytes([payload[0], payload[1]]),
            rows: u16::from_be_bytes([payload[2], payload[3]]),
        })
    }
}

impl std::fmt::Display for WindowSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WindowSize({}x{})", self.cols, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_size_round_trip() {
        let size = WindowSize::new(80, 24);
        let mut raw = Vec::new();
        assert_eq!(size.write(&mut raw).unwrap(), 4);
        assert_eq!(raw, vec![0x00, 0x50, 0x00, 0x18]);
        assert_eq!(WindowSize::decode(&raw), Some(size));
    }

    #[test]
    fn window_size_wide_terminal_uses_high_byte() {
        let size = WindowSize::new(300, 100);
        let mut raw = Vec::new();
        size.write(&mut raw).unwrap();
        assert_eq!(raw, vec![0x01, 0x2C, 0x00, 0x64]);
        assert_eq!(WindowSize::decode(&raw), Some(size));
    }

    #[test]
    fn window_size_rejects_short_payload() {
        assert_eq!(WindowSize::decode(&[0x00, 0x50, 0x00]), None);
        assert_eq!(WindowSize::decode(&[]), None);
    }
}
