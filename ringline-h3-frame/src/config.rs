/// Which side of the connection this endpoint is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Client,
    Server,
}

/// What happens to a control frame once it has been validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForwardMode {
    /// Hand the frame on to the next stage.
    Forward,
    /// Apply it to the control stream state, then drop it.
    Consume,
}

/// Configuration for a [`ControlStream`](crate::ControlStream).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlStreamConfig {
    /// Role of the local endpoint, i.e. the receiver of the peer's control
    /// frames. Default: `Server`.
    pub role: Role,
    /// Whether accepted frames are forwarded or consumed. Default: `Forward`.
    pub forward: ForwardMode,
}

impl Default for ControlStreamConfig {
    fn default() -> Self {
        Self::server()
    }
}

impl ControlStreamConfig {
    /// Client-side config, forwarding accepted frames.
    pub fn client() -> Self {
        Self {
            role: Role::Client,
            forward: ForwardMode::Forward,
        }
    }

    /// Server-side config, forwarding accepted frames.
    pub fn server() -> Self {
        Self {
            role: Role::Server,
            forward: ForwardMode::Forward,
        }
    }

    /// Consume accepted frames instead of forwarding them.
    pub fn consume(mut self) -> Self {
        self.forward = ForwardMode::Consume;
        self
    }
}
