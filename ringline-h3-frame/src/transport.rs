//! Interfaces to the collaborators this crate sits between.
//!
//! The QUIC transport, the header compressor and the event pipeline live
//! outside this crate. They are reached only through these traits, so the
//! framing layer stays sans-IO.

use bytes::BytesMut;

use crate::encoder::EncodedFrame;
use crate::error::{ErrorCode, H3Error};
use crate::frame::HeaderField;

/// Outbound half of a QUIC stream.
pub trait StreamSink {
    /// Queue one encoded frame for transmission.
    ///
    /// Called exactly once per frame. Backpressure is the sink's concern; an
    /// `Err` is reported back to whoever asked for the frame to be written.
    fn write_frame(&mut self, frame: EncodedFrame) -> Result<(), H3Error>;
}

/// Connection-level operations needed to report protocol violations.
pub trait ConnectionControl {
    /// Close the QUIC connection with an HTTP/3 application error code.
    fn close_connection(&mut self, code: ErrorCode, reason: &[u8]);
}

/// Header block compression (QPACK or otherwise).
///
/// The encoder inserts whatever this produces directly into the HEADERS or
/// PUSH_PROMISE frame body.
pub trait HeaderEncoder {
    fn encode_headers(
        &mut self,
        headers: &[HeaderField],
        buf: &mut BytesMut,
    ) -> Result<(), H3Error>;
}

/// Collects frames into a single contiguous buffer.
impl StreamSink for BytesMut {
    fn write_frame(&mut self, frame: EncodedFrame) -> Result<(), H3Error> {
        self.extend_from_slice(frame.head());
        self.extend_from_slice(frame.payload());
        Ok(())
    }
}

/// Keeps each encoded frame separate, payloads still shared.
impl StreamSink for Vec<EncodedFrame> {
    fn write_frame(&mut self, frame: EncodedFrame) -> Result<(), H3Error> {
        self.push(frame);
        Ok(())
    }
}
