//! Mode-byte streaming format used by WLED-style realtime senders.
//!
//! The leading byte selects the pixel layout; the second header byte (a
//! sender-side timeout hint) is ignored. Datagrams are applied
//! independently in arrival order, so a packet with an explicit start
//! index simply overwrites whatever earlier packets put there.

use super::{MTU, write_rgb_run, write_rgbw_run};
use crate::FrameSink;

/// Conventional realtime port.
pub const REALTIME_PORT: u16 = 21324;

const MIN_DATAGRAM: usize = 5;

/// Sequential RGB triples from index 0.
const MODE_DRGB: u8 = 0x02;
/// Sequential RGBW groups from index 0.
const MODE_DRGBW: u8 = 0x03;
/// RGB triples with an optional explicit start index.
const MODE_DNRGB: u8 = 0x04;

/// Decode one mode-byte datagram.
///
/// Returns whether a recognized mode was applied; unknown modes are a
/// silent no-op.
pub fn decode<S: FrameSink>(datagram: &[u8], sink: &mut S) -> bool {
    if datagram.len() < MIN_DATAGRAM || datagram.len() >= MTU {
        return false;
    }
    match datagram[0] {
        MODE_DRGB => write_rgb_run(sink, &datagram[2..], 0),
        MODE_DRGBW => write_rgbw_run(sink, &datagram[2..], 0),
        MODE_DNRGB => {
            // The big-endian start index is present exactly when the
            // datagram length is congruent to 1 mod 3.
            if datagram.len() % 3 == 1 {
                let start = u16::from_be_bytes([datagram[2], datagram[3]]);
                write_rgb_run(sink, &datagram[4..], usize::from(start));
            } else {
                write_rgb_run(sink, &datagram[2..], 0);
            }
        }
        _ => return false,
    }
    true
}
