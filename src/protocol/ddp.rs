//! Distributed Display Protocol (DDP) decoding.
//!
//! The only format carrying a discovery exchange: a query packet is answered
//! with an identity string instead of pixel writes.

use core::fmt::Write as _;

use heapless::{String, Vec};

use super::{DecodeOutcome, MTU, write_rgb_run, write_rgbw_run};
use crate::FrameSink;
use crate::config::DeviceIdentity;

/// Conventional DDP port, also advertised inside the identity string.
pub const DDP_PORT: u16 = 4048;

/// Fixed header length.
pub const HEADER_LEN: usize = 10;

const MIN_DATAGRAM: usize = 5;

/// Protocol version lives in the top two flag bits.
const FLAGS_VERSION_MASK: u8 = 0xC0;
const FLAGS_VERSION_1: u8 = 0x40;
/// A 4-byte timecode follows the header.
const FLAGS_TIMECODE: u8 = 0x10;
/// Set on replies.
const FLAGS_REPLY: u8 = 0x04;
/// Sender asks for a status reply instead of pushing pixels.
const FLAGS_QUERY: u8 = 0x02;
/// Present the frame after applying this packet.
const FLAGS_PUSH: u8 = 0x01;

/// Layout bits within the type field.
const TYPE_LAYOUT_MASK: u8 = 0x38;
const TYPE_LAYOUT_RGBW: u8 = 0x18;
/// Pre-standard senders put a bare 3 in the type field for RGBW.
const TYPE_LEGACY_RGBW: u8 = 0x03;
/// Type field carried by status replies.
const TYPE_STATUS: u8 = 0x10;

const IDENTITY_PROTOCOL_VERSION: u8 = 1;
const IDENTITY_FORMAT_VERSION: u8 = 1;

/// Longest identity payload carried in a reply.
const REPLY_INFO_MAX: usize = 128;
const REPLY_MAX: usize = HEADER_LEN + REPLY_INFO_MAX;

/// Decoded 10-byte header.
///
/// Field extraction is explicit byte shuffling, never a memory-layout
/// reinterpretation, so decoding works the same on any target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdpHeader {
    pub flags: u8,
    pub reserved: u8,
    pub pixel_type: u8,
    pub channel: u8,
    /// Byte offset of the first pixel, big-endian on the wire.
    pub offset: u32,
    /// Declared payload length, big-endian on the wire.
    pub length: u16,
}

impl DdpHeader {
    /// Parse a header from the front of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < HEADER_LEN {
            return None;
        }
        Some(Self {
            flags: bytes[0],
            reserved: bytes[1],
            pixel_type: bytes[2],
            channel: bytes[3],
            offset: u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            length: u16::from_be_bytes([bytes[8], bytes[9]]),
        })
    }

    /// Serialize the header for a reply.
    pub fn to_bytes(self) -> [u8; HEADER_LEN] {
        let offset = self.offset.to_be_bytes();
        let length = self.length.to_be_bytes();
        [
            self.flags,
            self.reserved,
            self.pixel_type,
            self.channel,
            offset[0],
            offset[1],
            offset[2],
            offset[3],
            length[0],
            length[1],
        ]
    }

    const fn version_ok(&self) -> bool {
        self.flags & FLAGS_VERSION_MASK == FLAGS_VERSION_1
    }

    const fn is_query(&self) -> bool {
        self.flags & FLAGS_QUERY != 0
    }

    const fn is_push(&self) -> bool {
        self.flags & FLAGS_PUSH != 0
    }

    const fn has_timecode(&self) -> bool {
        self.flags & FLAGS_TIMECODE != 0
    }

    /// RGBW layouts match on the layout bits or on the legacy value some
    /// senders still emit. Both checks are needed in the field.
    const fn bytes_per_pixel(&self) -> usize {
        if self.pixel_type & TYPE_LAYOUT_MASK == TYPE_LAYOUT_RGBW
            || self.pixel_type == TYPE_LEGACY_RGBW
        {
            4
        } else {
            3
        }
    }
}

/// Reply datagram built for a discovery query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdpReply {
    bytes: Vec<u8, REPLY_MAX>,
}

impl DdpReply {
    /// Wire bytes to send back to the requester.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Decode one DDP datagram.
///
/// Queries produce a reply and no writes. A pixel packet is dropped whole
/// when its declared length exceeds what actually arrived; extra trailing
/// bytes beyond the declared length are still decoded.
#[allow(clippy::cast_possible_truncation)]
pub fn decode<S: FrameSink>(
    datagram: &[u8],
    sink: &mut S,
    identity: &DeviceIdentity,
) -> DecodeOutcome {
    if datagram.len() < MIN_DATAGRAM || datagram.len() > MTU {
        return DecodeOutcome::default();
    }
    let Some(header) = DdpHeader::from_bytes(datagram) else {
        return DecodeOutcome::default();
    };
    if !header.version_ok() {
        return DecodeOutcome::default();
    }
    if header.is_query() {
        return DecodeOutcome {
            stream_frame: false,
            reply: Some(build_reply(&header, sink.pixel_count(), identity)),
        };
    }

    let timecode_len = if header.has_timecode() { 4 } else { 0 };
    let expected = HEADER_LEN + usize::from(header.length) + timecode_len;
    if datagram.len() < expected {
        return DecodeOutcome::default();
    }
    let payload = &datagram[HEADER_LEN + timecode_len..];

    let bytes_per_pixel = header.bytes_per_pixel();
    let start = header.offset as usize / bytes_per_pixel;
    if bytes_per_pixel == 4 {
        write_rgbw_run(sink, payload, start);
    } else {
        write_rgb_run(sink, payload, start);
    }

    DecodeOutcome {
        stream_frame: header.is_push(),
        reply: None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn build_reply(request: &DdpHeader, pixel_count: usize, identity: &DeviceIdentity) -> DdpReply {
    let mut info: String<REPLY_INFO_MAX> = String::new();
    // protocol-version;format-version;name;model;firmware;pixels;port
    let _ = write!(
        info,
        "{IDENTITY_PROTOCOL_VERSION};{IDENTITY_FORMAT_VERSION};{};{};{};{pixel_count};{DDP_PORT}",
        identity.name, identity.model, identity.version
    );
    let header = DdpHeader {
        flags: FLAGS_VERSION_1 | FLAGS_REPLY,
        reserved: request.reserved,
        pixel_type: TYPE_STATUS,
        channel: request.channel,
        offset: request.offset,
        length: info.len() as u16,
    };
    let mut bytes: Vec<u8, REPLY_MAX> = Vec::new();
    let _ = bytes.extend_from_slice(&header.to_bytes());
    let _ = bytes.extend_from_slice(info.as_bytes());
    DdpReply { bytes }
}
