//! HTTP/3 frame encoding and stream validation for ringline.
//!
//! This crate is the sans-IO HTTP/3 framing layer that sits between a QUIC
//! transport and HTTP request handling. It provides:
//!
//! - QUIC variable-length integer encoding/decoding
//! - HTTP/3 frame encoding (DATA, HEADERS, CANCEL_PUSH, SETTINGS,
//!   PUSH_PROMISE, GOAWAY, MAX_PUSH_ID)
//! - Frame-type validation for request, push and control streams
//! - The control stream state machine (SETTINGS first, GOAWAY and
//!   MAX_PUSH_ID ordering, role-dependent frame legality)
//!
//! Header compression, the QUIC transport and the stream pipeline are
//! collaborators reached through the traits in [`transport`].
//!
//! # Architecture
//!
//! ```text
//!   outbound Frame                       inbound Frame (decoded)
//!        │                                      │
//!   ┌────▼───────┐                  ┌───────────▼──────────┐
//!   │FrameEncoder│ ─ HeaderEncoder  │ ControlStream /      │
//!   └────┬───────┘                  │ FrameTypeValidator   │
//!        │ EncodedFrame             └─────┬──────────┬─────┘
//!   ┌────▼───────┐              Inbound::Forward   violation
//!   │ StreamSink │                        │          │
//!   └────────────┘                  next stage   ConnectionControl
//!                                                 ::close_connection
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use ringline_h3_frame::{ControlStream, ControlStreamConfig, Frame, Inbound};
//!
//! let mut control = ControlStream::new(ControlStreamConfig::client());
//!
//! // For each frame decoded from the peer's control stream:
//! match control.on_frame(frame, &mut conn)? {
//!     Inbound::Forward(frame) => handle_control_frame(frame),
//!     Inbound::Consumed | Inbound::Discarded => {}
//! }
//! ```

pub mod config;
pub mod control;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod metrics;
pub mod settings;
pub mod stream;
pub mod transport;
pub mod validation;
pub mod varint;

pub use config::{ControlStreamConfig, ForwardMode, Role};
pub use control::ControlStream;
pub use encoder::{EncodedFrame, FrameEncoder};
pub use error::{ErrorCode, H3Error};
pub use frame::{Frame, FrameKind, HeaderField};
pub use settings::Settings;
pub use stream::StreamKind;
pub use transport::{ConnectionControl, HeaderEncoder, StreamSink};
pub use validation::{FrameTypeValidator, Inbound};
pub use varint::{VARINT_MAX, decode_varint, encode_varint, varint_len};
