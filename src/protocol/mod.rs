//! UDP wire protocol decoders.
//!
//! Three independent formats share one contract: consume a single datagram,
//! produce zero or more pixel writes against a [`FrameSink`], optionally
//! produce a reply datagram, and report whether the packet counts as a live
//! stream frame. Malformed or oversized datagrams are dropped silently; the
//! decoders never block, allocate, or panic on hostile input.

pub mod ddp;
pub mod raw;
pub mod realtime;

use self::ddp::DdpReply;
use crate::FrameSink;
use crate::config::DeviceIdentity;

/// Ethernet MTU; no larger datagram is ever processed.
pub const MTU: usize = 1500;

/// Wire format carried by a datagram, chosen by receiving port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamProtocol {
    /// Discovery-capable format with a 10-byte header (DDP).
    Ddp,
    /// Mode-byte format used by WLED-style senders.
    Realtime,
    /// Headerless runs of RGB triples.
    Raw,
}

/// What one decode pass produced.
#[derive(Debug, Default)]
pub struct DecodeOutcome {
    /// The packet refreshed stream liveness and wants a presentation.
    pub stream_frame: bool,
    /// Reply datagram for the sender, produced by discovery queries.
    pub reply: Option<DdpReply>,
}

/// Decode one datagram against `sink`.
pub fn decode<S: FrameSink>(
    protocol: StreamProtocol,
    datagram: &[u8],
    sink: &mut S,
    identity: &DeviceIdentity,
) -> DecodeOutcome {
    match protocol {
        StreamProtocol::Ddp => ddp::decode(datagram, sink, identity),
        StreamProtocol::Realtime => DecodeOutcome {
            stream_frame: realtime::decode(datagram, sink),
            reply: None,
        },
        StreamProtocol::Raw => DecodeOutcome {
            stream_frame: raw::decode(datagram, sink),
            reply: None,
        },
    }
}

/// Write consecutive RGB triples starting at pixel `start`, stopping at the
/// end of `bytes` or the sink's pixel count. A trailing partial group is
/// dropped.
pub(crate) fn write_rgb_run<S: FrameSink>(sink: &mut S, bytes: &[u8], start: usize) {
    let count = sink.pixel_count();
    for (i, group) in bytes.chunks_exact(3).enumerate() {
        let index = start + i;
        if index >= count {
            break;
        }
        sink.set_pixel(index, group[0], group[1], group[2]);
    }
}

/// Four-channel variant of [`write_rgb_run`].
pub(crate) fn write_rgbw_run<S: FrameSink>(sink: &mut S, bytes: &[u8], start: usize) {
    let count = sink.pixel_count();
    for (i, group) in bytes.chunks_exact(4).enumerate() {
        let index = start + i;
        if index >= count {
            break;
        }
        sink.set_pixel_w(index, group[0], group[1], group[2], group[3]);
    }
}
