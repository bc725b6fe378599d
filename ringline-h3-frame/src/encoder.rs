//! HTTP/3 frame encoder.
//!
//! Frames are serialized as a varint type code followed by a type-specific
//! body:
//!
//! ```text
//! DATA          type len payload
//! HEADERS       type header-block
//! CANCEL_PUSH   type push-id
//! SETTINGS      type (id value)*
//! PUSH_PROMISE  type header-block
//! GOAWAY        type id
//! MAX_PUSH_ID   type push-id
//! ```
//!
//! A DATA payload is never copied: it rides along as a second part of the
//! [`EncodedFrame`] so the sink can hand it to the transport as-is.

use bytes::{Bytes, BytesMut};

use crate::error::H3Error;
use crate::frame::{
    FRAME_CANCEL_PUSH, FRAME_DATA, FRAME_GOAWAY, FRAME_MAX_PUSH_ID, FRAME_SETTINGS, Frame,
    HeaderField,
};
use crate::metrics::{BYTES_ENCODED, ENCODE_FAILURES, FRAMES_ENCODED};
use crate::transport::{HeaderEncoder, StreamSink};
use crate::varint::encode_varint;

/// The wire form of one frame: an encoded head plus an optional shared payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrame {
    head: Bytes,
    payload: Bytes,
}

impl EncodedFrame {
    /// Type code and frame body, or for DATA the type code and length.
    pub fn head(&self) -> &Bytes {
        &self.head
    }

    /// DATA payload, empty for every other frame type.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Total encoded length in bytes.
    pub fn len(&self) -> usize {
        self.head.len() + self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_parts(self) -> (Bytes, Bytes) {
        (self.head, self.payload)
    }

    /// Copy both parts into one contiguous buffer.
    pub fn to_bytes(&self) -> Bytes {
        if self.payload.is_empty() {
            return self.head.clone();
        }
        let mut buf = BytesMut::with_capacity(self.len());
        buf.extend_from_slice(&self.head);
        buf.extend_from_slice(&self.payload);
        buf.freeze()
    }
}

/// Any `FnMut(&[HeaderField], &mut BytesMut)` can stand in for a header encoder.
impl<F> HeaderEncoder for F
where
    F: FnMut(&[HeaderField], &mut BytesMut) -> Result<(), H3Error>,
{
    fn encode_headers(
        &mut self,
        headers: &[HeaderField],
        buf: &mut BytesMut,
    ) -> Result<(), H3Error> {
        self(headers, buf)
    }
}

/// Serializes [`Frame`] values for a single outbound stream.
pub struct FrameEncoder<H> {
    header_encoder: H,
    /// Reused between frames; each encoded head is split off and frozen.
    scratch: BytesMut,
}

impl<H: HeaderEncoder> FrameEncoder<H> {
    pub fn new(header_encoder: H) -> Self {
        Self {
            header_encoder,
            scratch: BytesMut::with_capacity(64),
        }
    }

    /// Encode `frame`, consuming it.
    ///
    /// Unknown frame types fail with [`H3Error::UnsupportedFrameType`]; the
    /// frame is dropped either way.
    pub fn encode(&mut self, frame: Frame) -> Result<EncodedFrame, H3Error> {
        self.scratch.clear();
        match self.encode_frame(frame) {
            Ok(encoded) => {
                FRAMES_ENCODED.increment();
                BYTES_ENCODED.add(encoded.len() as u64);
                Ok(encoded)
            }
            Err(e) => {
                self.scratch.clear();
                ENCODE_FAILURES.increment();
                tracing::debug!(error = %e, "h3 frame encode failed");
                Err(e)
            }
        }
    }

    /// Encode `frame` and hand it to `sink` in a single write.
    ///
    /// Nothing reaches the sink when encoding fails. A sink error is returned
    /// unchanged; no retry or queuing happens here.
    pub fn write<S: StreamSink + ?Sized>(
        &mut self,
        frame: Frame,
        sink: &mut S,
    ) -> Result<(), H3Error> {
        let encoded = self.encode(frame)?;
        sink.write_frame(encoded).inspect_err(|e| {
            ENCODE_FAILURES.increment();
            tracing::debug!(error = %e, "h3 frame write failed");
        })
    }

    fn encode_frame(&mut self, frame: Frame) -> Result<EncodedFrame, H3Error> {
        let frame_type = frame.frame_type();
        let buf = &mut self.scratch;
        let payload = match frame {
            Frame::Data { payload } => {
                encode_varint(FRAME_DATA, buf)?;
                encode_varint(payload.len() as u64, buf)?;
                payload
            }
            Frame::Headers { headers } | Frame::PushPromise { headers } => {
                encode_varint(frame_type, buf)?;
                self.header_encoder.encode_headers(&headers, buf)?;
                Bytes::new()
            }
            Frame::CancelPush { push_id } => {
                encode_varint(FRAME_CANCEL_PUSH, buf)?;
                encode_varint(push_id, buf)?;
                Bytes::new()
            }
            Frame::Settings(settings) => {
                encode_varint(FRAME_SETTINGS, buf)?;
                settings.encode(buf)?;
                Bytes::new()
            }
            Frame::GoAway { id } => {
                encode_varint(FRAME_GOAWAY, buf)?;
                encode_varint(id, buf)?;
                Bytes::new()
            }
            Frame::MaxPushId { push_id } => {
                encode_varint(FRAME_MAX_PUSH_ID, buf)?;
                encode_varint(push_id, buf)?;
                Bytes::new()
            }
            Frame::Unknown { frame_type, .. } => {
                return Err(H3Error::UnsupportedFrameType(frame_type));
            }
        };
        tracing::trace!(frame_type, len = buf.len() + payload.len(), "h3 frame encoded");
        Ok(EncodedFrame {
            head: buf.split().freeze(),
            payload,
        })
    }
}
