//! HTTP/3 control stream state machine.
//!
//! Each connection has exactly one inbound control stream. On top of the
//! frame-type rules every stream has, the control stream enforces:
//!
//! - the first frame is SETTINGS (`H3_MISSING_SETTINGS` otherwise);
//! - GOAWAY identifiers never increase (`H3_ID_ERROR`), and a client only
//!   accepts identifiers of client-initiated bidirectional streams
//!   (`H3_FRAME_UNEXPECTED`);
//! - MAX_PUSH_ID is only sent to servers (`H3_FRAME_UNEXPECTED`) and never
//!   decreases (`H3_ID_ERROR`).
//!
//! ```text
//!  AwaitingSettings ──SETTINGS──▶ Established
//!         │                          │
//!         └──────── violation ───────┴──▶ Failed (connection closed)
//! ```

use crate::config::{ControlStreamConfig, ForwardMode, Role};
use crate::error::H3Error;
use crate::frame::Frame;
use crate::metrics::{FRAMES_CONSUMED, FRAMES_FORWARDED};
use crate::stream::{StreamKind, is_client_bidi};
use crate::transport::ConnectionControl;
use crate::validation::{Inbound, discard, reject};

/// Validates the peer's control stream.
///
/// Owned by whatever drives the stream; every inbound frame goes through
/// [`ControlStream::on_frame`] in arrival order.
#[derive(Debug)]
pub struct ControlStream {
    role: Role,
    forward: ForwardMode,
    last_goaway_id: Option<u64>,
    last_max_push_id: Option<u64>,
    settings_received: bool,
    /// Set by the first violation; terminal.
    failed: bool,
}

impl ControlStream {
    pub fn new(config: ControlStreamConfig) -> Self {
        Self {
            role: config.role,
            forward: config.forward,
            last_goaway_id: None,
            last_max_push_id: None,
            settings_received: false,
            failed: false,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn forward_mode(&self) -> ForwardMode {
        self.forward
    }

    /// Returns true once the peer's SETTINGS frame has been accepted.
    pub fn settings_received(&self) -> bool {
        self.settings_received
    }

    /// The most recently accepted GOAWAY identifier.
    pub fn last_goaway_id(&self) -> Option<u64> {
        self.last_goaway_id
    }

    /// The most recently accepted MAX_PUSH_ID value.
    pub fn last_max_push_id(&self) -> Option<u64> {
        self.last_max_push_id
    }

    /// Returns true once a violation has closed the connection.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Process one inbound control frame.
    ///
    /// On success the frame is either forwarded unchanged or consumed,
    /// depending on the configured [`ForwardMode`]. On a violation the frame
    /// is dropped, `conn` is closed with the matching error code, and the
    /// error is returned; later frames are discarded without another close.
    pub fn on_frame<C>(&mut self, frame: Frame, conn: &mut C) -> Result<Inbound, H3Error>
    where
        C: ConnectionControl + ?Sized,
    {
        if self.failed {
            return Ok(discard(frame));
        }
        if let Err((err, reason)) = self.apply(&frame) {
            self.failed = true;
            return reject(frame, err, reason, conn);
        }
        Ok(match self.forward {
            ForwardMode::Forward => {
                FRAMES_FORWARDED.increment();
                Inbound::Forward(frame)
            }
            ForwardMode::Consume => {
                drop(frame);
                FRAMES_CONSUMED.increment();
                Inbound::Consumed
            }
        })
    }

    /// Check `frame` against the current state and record its effect.
    ///
    /// State only changes when the frame is accepted.
    fn apply(&mut self, frame: &Frame) -> Result<(), (H3Error, &'static str)> {
        if !self.settings_received {
            if !matches!(frame, Frame::Settings(_)) {
                return Err((
                    H3Error::MissingSettings,
                    "first control stream frame must be SETTINGS",
                ));
            }
            tracing::debug!(role = ?self.role, "h3 control stream established");
            self.settings_received = true;
            return Ok(());
        }

        if !StreamKind::Control.allows(frame) {
            return Err((
                H3Error::FrameUnexpected,
                "frame type not allowed on the control stream",
            ));
        }

        match *frame {
            Frame::GoAway { id } => {
                if self.role == Role::Client && !is_client_bidi(id) {
                    return Err((
                        H3Error::FrameUnexpected,
                        "GOAWAY id is not a client-initiated bidirectional stream",
                    ));
                }
                if let Some(last) = self.last_goaway_id
                    && id > last
                {
                    return Err((H3Error::IdError, "GOAWAY id larger than a previous one"));
                }
                tracing::debug!(id, "h3 GOAWAY accepted");
                self.last_goaway_id = Some(id);
            }
            Frame::MaxPushId { push_id } => {
                if self.role == Role::Client {
                    return Err((
                        H3Error::FrameUnexpected,
                        "MAX_PUSH_ID received by a client",
                    ));
                }
                if let Some(last) = self.last_max_push_id
                    && push_id < last
                {
                    return Err((
                        H3Error::IdError,
                        "MAX_PUSH_ID smaller than a previous one",
                    ));
                }
                tracing::debug!(push_id, "h3 MAX_PUSH_ID accepted");
                self.last_max_push_id = Some(push_id);
            }
            _ => {}
        }
        Ok(())
    }
}
