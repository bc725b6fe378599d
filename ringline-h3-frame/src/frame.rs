//! HTTP/3 frame wire model.
//!
//! Every frame starts with a varint type code followed by a type-specific
//! body. Frames are plain owned values: handing a frame to the encoder or to
//! the next pipeline stage moves it, and a dropped frame releases its
//! payload exactly once.

use bytes::Bytes;

use crate::settings::Settings;

// ── Frame type constants (RFC 9114 Section 7.2) ─────────────────────

pub const FRAME_DATA: u64 = 0x00;
pub const FRAME_HEADERS: u64 = 0x01;
pub const FRAME_CANCEL_PUSH: u64 = 0x03;
pub const FRAME_SETTINGS: u64 = 0x04;
pub const FRAME_PUSH_PROMISE: u64 = 0x05;
pub const FRAME_GOAWAY: u64 = 0x07;
pub const FRAME_MAX_PUSH_ID: u64 = 0x0d;

/// HTTP/2 frame types that MUST NOT appear in HTTP/3 (RFC 9114 Section 7.2.8).
const RESERVED_H2_TYPES: &[u64] = &[0x02, 0x06, 0x08, 0x09];

/// Type codes that have a dedicated [`Frame`] variant.
const KNOWN_TYPES: &[u64] = &[
    FRAME_DATA,
    FRAME_HEADERS,
    FRAME_CANCEL_PUSH,
    FRAME_SETTINGS,
    FRAME_PUSH_PROMISE,
    FRAME_GOAWAY,
    FRAME_MAX_PUSH_ID,
];

/// A single header name-value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    pub name: Vec<u8>,
    pub value: Vec<u8>,
}

impl HeaderField {
    pub fn new(name: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An HTTP/3 frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// DATA frame (type 0x00): carries request or response body.
    Data { payload: Bytes },
    /// HEADERS frame (type 0x01): field section, compressed on encode.
    Headers { headers: Vec<HeaderField> },
    /// CANCEL_PUSH frame (type 0x03): cancels a server push.
    CancelPush { push_id: u64 },
    /// SETTINGS frame (type 0x04): configuration parameters.
    Settings(Settings),
    /// PUSH_PROMISE frame (type 0x05). The push ID travels with the stream.
    PushPromise { headers: Vec<HeaderField> },
    /// GOAWAY frame (type 0x07): graceful shutdown with a stream or push ID.
    GoAway { id: u64 },
    /// MAX_PUSH_ID frame (type 0x0d): highest push ID the client accepts.
    MaxPushId { push_id: u64 },
    /// Any other type code, passed through untouched.
    Unknown { frame_type: u64, payload: Bytes },
}

/// Payload-free discriminant of [`Frame`], used for legality checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    Data,
    Headers,
    CancelPush,
    Settings,
    PushPromise,
    GoAway,
    MaxPushId,
    Unknown,
}

impl Frame {
    /// The wire type code of this frame.
    pub fn frame_type(&self) -> u64 {
        match self {
            Frame::Data { .. } => FRAME_DATA,
            Frame::Headers { .. } => FRAME_HEADERS,
            Frame::CancelPush { .. } => FRAME_CANCEL_PUSH,
            Frame::Settings(_) => FRAME_SETTINGS,
            Frame::PushPromise { .. } => FRAME_PUSH_PROMISE,
            Frame::GoAway { .. } => FRAME_GOAWAY,
            Frame::MaxPushId { .. } => FRAME_MAX_PUSH_ID,
            Frame::Unknown { frame_type, .. } => *frame_type,
        }
    }

    pub fn kind(&self) -> FrameKind {
        match self {
            Frame::Data { .. } => FrameKind::Data,
            Frame::Headers { .. } => FrameKind::Headers,
            Frame::CancelPush { .. } => FrameKind::CancelPush,
            Frame::Settings(_) => FrameKind::Settings,
            Frame::PushPromise { .. } => FrameKind::PushPromise,
            Frame::GoAway { .. } => FrameKind::GoAway,
            Frame::MaxPushId { .. } => FrameKind::MaxPushId,
            Frame::Unknown { .. } => FrameKind::Unknown,
        }
    }

    /// Returns true for an unknown frame whose type code is reserved from
    /// HTTP/2. Receipt of such a frame is always a connection error.
    pub fn is_reserved_h2(&self) -> bool {
        match self {
            Frame::Unknown { frame_type, .. } => RESERVED_H2_TYPES.contains(frame_type),
            _ => false,
        }
    }

    /// Returns true for an unknown frame tagged with a type code that has
    /// its own variant. Such a frame is never legal on any stream.
    pub fn is_mislabeled(&self) -> bool {
        match self {
            Frame::Unknown { frame_type, .. } => KNOWN_TYPES.contains(frame_type),
            _ => false,
        }
    }
}

impl FrameKind {
    /// Human-readable frame name as used in RFC 9114.
    pub fn name(self) -> &'static str {
        match self {
            FrameKind::Data => "DATA",
            FrameKind::Headers => "HEADERS",
            FrameKind::CancelPush => "CANCEL_PUSH",
            FrameKind::Settings => "SETTINGS",
            FrameKind::PushPromise => "PUSH_PROMISE",
            FrameKind::GoAway => "GOAWAY",
            FrameKind::MaxPushId => "MAX_PUSH_ID",
            FrameKind::Unknown => "UNKNOWN",
        }
    }
}
