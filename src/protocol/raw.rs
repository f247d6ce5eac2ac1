//! Headerless streaming format: the whole payload is RGB triples from
//! pixel 0.

use super::{MTU, write_rgb_run};
use crate::FrameSink;

/// Conventional port for the headerless format.
pub const RAW_PORT: u16 = 5568;

const MIN_DATAGRAM: usize = 3;

/// Decode one headerless datagram. Returns whether pixels were applied.
pub fn decode<S: FrameSink>(datagram: &[u8], sink: &mut S) -> bool {
    if datagram.len() < MIN_DATAGRAM || datagram.len() >= MTU {
        return false;
    }
    write_rgb_run(sink, datagram, 0);
    true
}
