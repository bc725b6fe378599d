//! Control stream state machine tests.
//!
//! Every scenario runs for each combination of endpoint role and forward
//! mode. A recording connection captures `close_connection` calls so each
//! test can check both the returned error and the close code.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use ringline_h3_frame::{
    ConnectionControl, ControlStream, ControlStreamConfig, ErrorCode, ForwardMode, Frame, H3Error,
    Inbound, Role, Settings,
};

// ── Helpers ──────────────────────────────────────────────────────────

#[derive(Default)]
struct RecordingConnection {
    closes: Vec<(ErrorCode, Vec<u8>)>,
}

impl ConnectionControl for RecordingConnection {
    fn close_connection(&mut self, code: ErrorCode, reason: &[u8]) {
        self.closes.push((code, reason.to_vec()));
    }
}

impl RecordingConnection {
    fn codes(&self) -> Vec<ErrorCode> {
        self.closes.iter().map(|(code, _)| *code).collect()
    }
}

/// Payload owner that counts how many times it is dropped.
struct Tracked(Arc<AtomicUsize>);

impl AsRef<[u8]> for Tracked {
    fn as_ref(&self) -> &[u8] {
        b"tracked"
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn tracked_payload() -> (Bytes, Arc<AtomicUsize>) {
    let drops = Arc::new(AtomicUsize::new(0));
    (Bytes::from_owner(Tracked(drops.clone())), drops)
}

fn configs() -> Vec<ControlStreamConfig> {
    let mut configs = Vec::new();
    for role in [Role::Server, Role::Client] {
        for forward in [ForwardMode::Forward, ForwardMode::Consume] {
            configs.push(ControlStreamConfig { role, forward });
        }
    }
    configs
}

struct Harness {
    config: ControlStreamConfig,
    control: ControlStream,
    conn: RecordingConnection,
}

impl Harness {
    fn new(config: ControlStreamConfig) -> Self {
        Self {
            config,
            control: ControlStream::new(config),
            conn: RecordingConnection::default(),
        }
    }

    /// A control stream that has already accepted the peer's SETTINGS.
    fn established(config: ControlStreamConfig) -> Self {
        let mut h = Self::new(config);
        h.write_valid(Frame::Settings(Settings::new()));
        assert!(h.control.settings_received());
        h
    }

    fn write_valid(&mut self, frame: Frame) {
        let expected = frame.clone();
        let result = self.control.on_frame(frame, &mut self.conn);
        match self.config.forward {
            ForwardMode::Forward => assert_eq!(result, Ok(Inbound::Forward(expected))),
            ForwardMode::Consume => assert_eq!(result, Ok(Inbound::Consumed)),
        }
        assert!(self.conn.closes.is_empty(), "{:?}", self.config);
    }

    fn write_invalid(&mut self, code: ErrorCode, frame: Frame) {
        let err = self
            .control
            .on_frame(frame, &mut self.conn)
            .expect_err("frame should be rejected");
        assert_eq!(err.code(), code, "{:?}", self.config);
        assert_eq!(self.conn.codes(), vec![code], "{:?}", self.config);
        assert!(self.control.is_failed());
    }

    /// After a violation nothing more is accepted and nothing closes again.
    fn assert_terminal(&mut self) {
        for frame in [
            Frame::Settings(Settings::new()),
            Frame::GoAway { id: 0 },
            Frame::CancelPush { push_id: 0 },
        ] {
            assert_eq!(
                self.control.on_frame(frame, &mut self.conn),
                Ok(Inbound::Discarded)
            );
        }
        assert_eq!(self.conn.closes.len(), 1);
    }
}

// ── SETTINGS first ───────────────────────────────────────────────────

#[test]
fn settings_first_is_accepted() {
    for config in configs() {
        let h = Harness::established(config);
        assert!(!h.control.is_failed());
    }
}

#[test]
fn invalid_first_frame_goaway() {
    for config in configs() {
        let mut h = Harness::new(config);
        h.write_invalid(ErrorCode::MissingSettings, Frame::GoAway { id: 0 });
        h.assert_terminal();
    }
}

#[test]
fn invalid_first_frame_max_push_id() {
    for config in configs() {
        let mut h = Harness::new(config);
        h.write_invalid(ErrorCode::MissingSettings, Frame::MaxPushId { push_id: 0 });
        h.assert_terminal();
    }
}

#[test]
fn invalid_first_frame_cancel_push() {
    for config in configs() {
        let mut h = Harness::new(config);
        h.write_invalid(ErrorCode::MissingSettings, Frame::CancelPush { push_id: 0 });
        h.assert_terminal();
    }
}

#[test]
fn invalid_first_frame_request_stream_frame() {
    for config in configs() {
        let mut h = Harness::new(config);
        h.write_invalid(
            ErrorCode::MissingSettings,
            Frame::Headers { headers: vec![] },
        );
        h.assert_terminal();
        assert!(!h.control.settings_received());
    }
}

#[test]
fn missing_settings_reason_is_reported() {
    let mut h = Harness::new(ControlStreamConfig::server());
    h.write_invalid(ErrorCode::MissingSettings, Frame::GoAway { id: 0 });
    assert!(!h.conn.closes[0].1.is_empty());
}

// ── GOAWAY ───────────────────────────────────────────────────────────

#[test]
fn valid_goaway_frame_repeated() {
    for config in configs() {
        let mut h = Harness::established(config);
        h.write_valid(Frame::GoAway { id: 0 });
        h.write_valid(Frame::GoAway { id: 0 });
        assert_eq!(h.control.last_goaway_id(), Some(0));
    }
}

#[test]
fn second_goaway_with_higher_id_fails() {
    for config in configs() {
        let mut h = Harness::established(config);
        h.write_valid(Frame::GoAway { id: 0 });
        h.write_invalid(ErrorCode::IdError, Frame::GoAway { id: 4 });
        assert_eq!(h.control.last_goaway_id(), Some(0));
        h.assert_terminal();
    }
}

#[test]
fn goaway_id_non_request_stream() {
    for config in configs() {
        let mut h = Harness::established(config);
        match config.role {
            Role::Server => h.write_valid(Frame::GoAway { id: 3 }),
            Role::Client => {
                h.write_invalid(ErrorCode::FrameUnexpected, Frame::GoAway { id: 3 });
                assert_eq!(h.control.last_goaway_id(), None);
                h.assert_terminal();
            }
        }
    }
}

#[test]
fn goaway_direction_checked_before_monotonicity() {
    let mut h = Harness::established(ControlStreamConfig::client());
    h.write_valid(Frame::GoAway { id: 4 });
    // Larger and not a request stream: the direction error wins.
    h.write_invalid(ErrorCode::FrameUnexpected, Frame::GoAway { id: 7 });
}

// ── MAX_PUSH_ID ──────────────────────────────────────────────────────

#[test]
fn max_push_id_frames() {
    for config in configs() {
        let mut h = Harness::established(config);
        match config.role {
            Role::Server => {
                h.write_valid(Frame::MaxPushId { push_id: 0 });
                h.write_valid(Frame::MaxPushId { push_id: 4 });
                h.write_valid(Frame::MaxPushId { push_id: 4 });
                assert_eq!(h.control.last_max_push_id(), Some(4));
            }
            Role::Client => {
                h.write_invalid(ErrorCode::FrameUnexpected, Frame::MaxPushId { push_id: 4 });
                assert_eq!(h.control.last_max_push_id(), None);
                h.assert_terminal();
            }
        }
    }
}

#[test]
fn second_max_push_id_with_smaller_id_fails() {
    for config in configs() {
        if config.role != Role::Server {
            continue;
        }
        let mut h = Harness::established(config);
        h.write_valid(Frame::MaxPushId { push_id: 4 });
        h.write_invalid(ErrorCode::IdError, Frame::MaxPushId { push_id: 0 });
        assert_eq!(h.control.last_max_push_id(), Some(4));
        h.assert_terminal();
    }
}

// ── Other control frames ─────────────────────────────────────────────

#[test]
fn cancel_push_accepted() {
    for config in configs() {
        let mut h = Harness::established(config);
        h.write_valid(Frame::CancelPush { push_id: 7 });
        h.write_valid(Frame::CancelPush { push_id: 1 });
    }
}

#[test]
fn request_and_push_frames_unexpected() {
    for config in configs() {
        let mut h = Harness::established(config);
        h.write_invalid(
            ErrorCode::FrameUnexpected,
            Frame::Data {
                payload: Bytes::from_static(b"body"),
            },
        );
        h.assert_terminal();

        let mut h = Harness::established(config);
        h.write_invalid(
            ErrorCode::FrameUnexpected,
            Frame::PushPromise { headers: vec![] },
        );
    }
}

#[test]
fn unknown_frame_with_known_code_unexpected() {
    for config in configs() {
        let mut h = Harness::established(config);
        h.write_valid(Frame::Unknown {
            frame_type: 0x21,
            payload: Bytes::new(),
        });
        h.write_invalid(
            ErrorCode::FrameUnexpected,
            Frame::Unknown {
                frame_type: 0x00,
                payload: Bytes::new(),
            },
        );
        h.assert_terminal();
    }
}

// ── Forwarding ───────────────────────────────────────────────────────

#[test]
fn forwarded_frame_is_the_same_value() {
    let mut settings = Settings::new();
    settings.insert(0x06, 16384).unwrap();
    settings.insert(0x21, 7).unwrap();

    let mut control = ControlStream::new(ControlStreamConfig::server());
    let mut conn = RecordingConnection::default();
    let forwarded = control
        .on_frame(Frame::Settings(settings.clone()), &mut conn)
        .unwrap()
        .into_frame();
    assert_eq!(forwarded, Some(Frame::Settings(settings)));

    let (payload, _drops) = tracked_payload();
    let ptr = payload.as_ptr();
    let grease = Frame::Unknown {
        frame_type: 0x21,
        payload,
    };
    match control.on_frame(grease, &mut conn).unwrap() {
        Inbound::Forward(Frame::Unknown { payload, .. }) => assert_eq!(payload.as_ptr(), ptr),
        other => panic!("expected forwarded unknown frame, got {other:?}"),
    }
}

#[test]
fn bookkeeping_identical_in_both_modes() {
    for role in [Role::Server, Role::Client] {
        let mut forward = Harness::established(ControlStreamConfig {
            role,
            forward: ForwardMode::Forward,
        });
        let mut consume = Harness::established(ControlStreamConfig {
            role,
            forward: ForwardMode::Consume,
        });
        for h in [&mut forward, &mut consume] {
            h.write_valid(Frame::GoAway { id: 8 });
            h.write_valid(Frame::GoAway { id: 4 });
            h.write_valid(Frame::CancelPush { push_id: 1 });
            if role == Role::Server {
                h.write_valid(Frame::MaxPushId { push_id: 10 });
            }
        }
        assert_eq!(forward.control.last_goaway_id(), consume.control.last_goaway_id());
        assert_eq!(
            forward.control.last_max_push_id(),
            consume.control.last_max_push_id()
        );
        assert_eq!(
            forward.control.settings_received(),
            consume.control.settings_received()
        );
    }
}

// ── Resource release ─────────────────────────────────────────────────

#[test]
fn consumed_frame_released_once() {
    let mut h = Harness::established(ControlStreamConfig::server().consume());
    let (payload, drops) = tracked_payload();
    let frame = Frame::Unknown {
        frame_type: 0x21,
        payload,
    };
    assert_eq!(h.control.on_frame(frame, &mut h.conn), Ok(Inbound::Consumed));
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

#[test]
fn rejected_frame_released_once() {
    for config in configs() {
        let mut h = Harness::established(config);
        let (payload, drops) = tracked_payload();
        let frame = Frame::Data { payload };
        assert_eq!(
            h.control.on_frame(frame, &mut h.conn),
            Err(H3Error::FrameUnexpected)
        );
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }
}

#[test]
fn discarded_frame_released_once() {
    let mut h = Harness::new(ControlStreamConfig::client());
    h.write_invalid(ErrorCode::MissingSettings, Frame::GoAway { id: 0 });
    let (payload, drops) = tracked_payload();
    assert_eq!(
        h.control.on_frame(Frame::Data { payload }, &mut h.conn),
        Ok(Inbound::Discarded)
    );
    assert_eq!(drops.load(Ordering::SeqCst), 1);
    assert_eq!(h.conn.closes.len(), 1);
}
