/// HTTP/3 application error codes (RFC 9114 Section 8.1).
///
/// These are carried as the application error value when a QUIC connection
/// is closed because of an HTTP/3 protocol violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum ErrorCode {
    NoError = 0x100,
    GeneralProtocolError = 0x101,
    InternalError = 0x102,
    StreamCreationError = 0x103,
    ClosedCriticalStream = 0x104,
    FrameUnexpected = 0x105,
    FrameError = 0x106,
    ExcessiveLoad = 0x107,
    IdError = 0x108,
    SettingsError = 0x109,
    MissingSettings = 0x10a,
    RequestRejected = 0x10b,
    RequestCancelled = 0x10c,
    RequestIncomplete = 0x10d,
    MessageError = 0x10e,
    ConnectError = 0x10f,
    VersionFallback = 0x110,
}

impl ErrorCode {
    pub fn from_u64(v: u64) -> Self {
        match v {
            0x100 => Self::NoError,
            0x101 => Self::GeneralProtocolError,
            0x102 => Self::InternalError,
            0x103 => Self::StreamCreationError,
            0x104 => Self::ClosedCriticalStream,
            0x105 => Self::FrameUnexpected,
            0x106 => Self::FrameError,
            0x107 => Self::ExcessiveLoad,
            0x108 => Self::IdError,
            0x109 => Self::SettingsError,
            0x10a => Self::MissingSettings,
            0x10b => Self::RequestRejected,
            0x10c => Self::RequestCancelled,
            0x10d => Self::RequestIncomplete,
            0x10e => Self::MessageError,
            0x10f => Self::ConnectError,
            0x110 => Self::VersionFallback,
            // Unknown codes MUST be treated as H3_NO_ERROR (RFC 9114 Section 9).
            _ => Self::NoError,
        }
    }

    /// The wire value of this code.
    pub fn as_u64(self) -> u64 {
        self as u64
    }

    /// The registered name, e.g. `H3_FRAME_UNEXPECTED`.
    pub fn name(self) -> &'static str {
        match self {
            Self::NoError => "H3_NO_ERROR",
            Self::GeneralProtocolError => "H3_GENERAL_PROTOCOL_ERROR",
            Self::InternalError => "H3_INTERNAL_ERROR",
            Self::StreamCreationError => "H3_STREAM_CREATION_ERROR",
            Self::ClosedCriticalStream => "H3_CLOSED_CRITICAL_STREAM",
            Self::FrameUnexpected => "H3_FRAME_UNEXPECTED",
            Self::FrameError => "H3_FRAME_ERROR",
            Self::ExcessiveLoad => "H3_EXCESSIVE_LOAD",
            Self::IdError => "H3_ID_ERROR",
            Self::SettingsError => "H3_SETTINGS_ERROR",
            Self::MissingSettings => "H3_MISSING_SETTINGS",
            Self::RequestRejected => "H3_REQUEST_REJECTED",
            Self::RequestCancelled => "H3_REQUEST_CANCELLED",
            Self::RequestIncomplete => "H3_REQUEST_INCOMPLETE",
            Self::MessageError => "H3_MESSAGE_ERROR",
            Self::ConnectError => "H3_CONNECT_ERROR",
            Self::VersionFallback => "H3_VERSION_FALLBACK",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:#x})", self.name(), self.as_u64())
    }
}

/// Errors produced by the HTTP/3 framing layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum H3Error {
    /// Fewer bytes were available than the varint's length prefix announced.
    #[error("malformed varint")]
    MalformedVarint,

    /// Value does not fit in a 62-bit QUIC varint.
    #[error("value out of varint range: {0}")]
    ValueOutOfRange(u64),

    /// The encoder has no wire representation for this frame type.
    #[error("unsupported frame type: {0:#x}")]
    UnsupportedFrameType(u64),

    /// A frame arrived on a stream where its type is not permitted.
    #[error("unexpected frame type")]
    FrameUnexpected,

    /// Control stream did not start with a SETTINGS frame.
    #[error("missing SETTINGS on control stream")]
    MissingSettings,

    /// A GOAWAY or MAX_PUSH_ID identifier violated its ordering rule.
    #[error("identifier error")]
    IdError,

    /// Invalid SETTINGS identifier or value.
    #[error("settings error")]
    SettingsError,

    /// The header compression collaborator failed.
    #[error("header encoding: {0}")]
    HeaderEncoding(String),

    /// The stream sink refused the write.
    #[error("stream closed")]
    StreamClosed,
}

impl H3Error {
    /// The application error code used when this error closes a connection.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedVarint | Self::UnsupportedFrameType(_) => ErrorCode::FrameError,
            Self::ValueOutOfRange(_) => ErrorCode::FrameError,
            Self::FrameUnexpected => ErrorCode::FrameUnexpected,
            Self::MissingSettings => ErrorCode::MissingSettings,
            Self::IdError => ErrorCode::IdError,
            Self::SettingsError => ErrorCode::SettingsError,
            Self::HeaderEncoding(_) | Self::StreamClosed => ErrorCode::InternalError,
        }
    }

    /// Returns true for peer protocol violations that terminate the connection.
    ///
    /// Encode-side failures are reported to the writer and never close the
    /// connection on their own.
    #[inline]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedVarint | Self::FrameUnexpected | Self::MissingSettings | Self::IdError
        )
    }
}
