//! Stream kinds and the frames each one may carry.

use crate::frame::{Frame, FrameKind};

/// HTTP/3 uni-stream type identifiers (RFC 9114 Section 6.2).
pub const STREAM_TYPE_CONTROL: u64 = 0x00;
pub const STREAM_TYPE_PUSH: u64 = 0x01;
pub const STREAM_TYPE_QPACK_ENCODER: u64 = 0x02;
pub const STREAM_TYPE_QPACK_DECODER: u64 = 0x03;

/// The kind of HTTP/3 stream a frame arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    /// The connection's single control stream.
    Control,
    /// A client-initiated bidirectional request stream.
    Request,
    /// A server-initiated push stream.
    Push,
}

impl StreamKind {
    /// Map a unidirectional stream type to the kind of frames it carries.
    ///
    /// QPACK streams and unknown stream types carry no HTTP/3 frames.
    pub fn from_uni_stream_type(stream_type: u64) -> Option<Self> {
        match stream_type {
            STREAM_TYPE_CONTROL => Some(StreamKind::Control),
            STREAM_TYPE_PUSH => Some(StreamKind::Push),
            _ => None,
        }
    }

    /// Returns true if frames of `kind` may appear on this stream kind.
    ///
    /// Unknown frame types are allowed everywhere; reserved HTTP/2 types and
    /// unknown frames carrying a known type code are filtered separately by
    /// [`StreamKind::allows`].
    pub fn allows_kind(self, kind: FrameKind) -> bool {
        match self {
            StreamKind::Control => matches!(
                kind,
                FrameKind::Settings
                    | FrameKind::GoAway
                    | FrameKind::MaxPushId
                    | FrameKind::CancelPush
                    | FrameKind::Unknown
            ),
            StreamKind::Request => matches!(
                kind,
                FrameKind::Data | FrameKind::Headers | FrameKind::PushPromise | FrameKind::Unknown
            ),
            StreamKind::Push => matches!(
                kind,
                FrameKind::Data | FrameKind::Headers | FrameKind::Unknown
            ),
        }
    }

    /// Returns true if `frame` may appear on this stream kind.
    pub fn allows(self, frame: &Frame) -> bool {
        !frame.is_reserved_h2() && !frame.is_mislabeled() && self.allows_kind(frame.kind())
    }
}

// ── QUIC stream ID helpers (RFC 9000 Section 2.1) ───────────────────

/// Returns true if the stream was opened by the client.
#[inline]
pub fn is_client_initiated(stream_id: u64) -> bool {
    stream_id & 0x1 == 0
}

/// Returns true if the stream is bidirectional.
#[inline]
pub fn is_bidirectional(stream_id: u64) -> bool {
    stream_id & 0x2 == 0
}

/// Returns true for client-initiated bidirectional streams, the only
/// streams that carry HTTP requests.
#[inline]
pub fn is_client_bidi(stream_id: u64) -> bool {
    is_client_initiated(stream_id) && is_bidirectional(stream_id)
}
