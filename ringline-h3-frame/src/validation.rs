//! Frame-type validation for HTTP/3 streams.
//!
//! A [`FrameTypeValidator`] guards one inbound stream and admits only the
//! frame types that stream kind may carry. Anything else is a connection
//! error of type `H3_FRAME_UNEXPECTED`.

use crate::error::H3Error;
use crate::frame::Frame;
use crate::metrics::{CONNECTIONS_CLOSED, FRAMES_DISCARDED, FRAMES_FORWARDED, FRAMES_REJECTED};
use crate::stream::StreamKind;
use crate::transport::ConnectionControl;

/// Outcome of delivering one inbound frame to a validating stage.
#[derive(Debug, PartialEq, Eq)]
pub enum Inbound {
    /// Accepted; the frame continues to the next stage unchanged.
    Forward(Frame),
    /// Accepted and absorbed; nothing continues downstream.
    Consumed,
    /// Dropped because the stream already failed. No further close is issued.
    Discarded,
}

impl Inbound {
    pub fn is_forwarded(&self) -> bool {
        matches!(self, Inbound::Forward(_))
    }

    pub fn into_frame(self) -> Option<Frame> {
        match self {
            Inbound::Forward(frame) => Some(frame),
            _ => None,
        }
    }
}

/// Frame types admitted by a [`FrameTypeValidator`].
#[derive(Debug, Clone, Copy)]
enum Accept {
    Stream(StreamKind),
    Predicate(fn(&Frame) -> bool),
}

/// Admits only the frames a given stream kind may carry.
#[derive(Debug)]
pub struct FrameTypeValidator {
    accept: Accept,
    failed: bool,
}

impl FrameTypeValidator {
    /// Validator for the frames legal on `kind` streams.
    pub fn new(kind: StreamKind) -> Self {
        Self {
            accept: Accept::Stream(kind),
            failed: false,
        }
    }

    /// Validator with a caller-supplied acceptance predicate.
    pub fn with_predicate(predicate: fn(&Frame) -> bool) -> Self {
        Self {
            accept: Accept::Predicate(predicate),
            failed: false,
        }
    }

    /// Returns true once a violation has been reported on this stream.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    fn accepts(&self, frame: &Frame) -> bool {
        match self.accept {
            Accept::Stream(kind) => kind.allows(frame),
            Accept::Predicate(predicate) => predicate(frame),
        }
    }

    /// Validate one inbound frame.
    ///
    /// A rejected frame is dropped, the connection is closed with
    /// `H3_FRAME_UNEXPECTED` and the error is returned. Every frame after
    /// that is dropped and reported as [`Inbound::Discarded`].
    pub fn on_frame<C>(&mut self, frame: Frame, conn: &mut C) -> Result<Inbound, H3Error>
    where
        C: ConnectionControl + ?Sized,
    {
        if self.failed {
            return Ok(discard(frame));
        }
        if !self.accepts(&frame) {
            self.failed = true;
            return reject(
                frame,
                H3Error::FrameUnexpected,
                "frame type not allowed on this stream",
                conn,
            );
        }
        FRAMES_FORWARDED.increment();
        Ok(Inbound::Forward(frame))
    }
}

/// Drop a frame that arrived after its stream failed.
pub(crate) fn discard(frame: Frame) -> Inbound {
    tracing::trace!(frame = frame.kind().name(), "h3 frame discarded on failed stream");
    drop(frame);
    FRAMES_DISCARDED.increment();
    Inbound::Discarded
}

/// Release `frame`, then close the connection with the code for `err`.
pub(crate) fn reject<C>(
    frame: Frame,
    err: H3Error,
    reason: &str,
    conn: &mut C,
) -> Result<Inbound, H3Error>
where
    C: ConnectionControl + ?Sized,
{
    let kind = frame.kind();
    drop(frame);
    let code = err.code();
    tracing::warn!(frame = kind.name(), %code, reason, "h3 protocol violation");
    FRAMES_REJECTED.increment();
    CONNECTIONS_CLOSED.increment();
    conn.close_connection(code, reason.as_bytes());
    Err(err)
}
