//! Session state value objects.

use std::fmt;

/// Identifies one attempt to play the stream. Strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub u64);

impl SessionId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Controller lifecycle, independent of any single session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, `initialize` not yet received
    #[default]
    Idle,
    /// Engine not available; terminal
    Unsupported,
    /// Sessions are being run
    Active,
}

/// Per-session phase as seen by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
}

/// All flags the transition function reads and writes.
///
/// `retrying` and `watchdog_spent` span sessions; the rest are reset (or
/// consumed) as sessions come and go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    pub lifecycle: Lifecycle,
    pub session: Option<SessionId>,
    pub ready: bool,
    pub play_requested: bool,
    pub attempted_autoplay: bool,
    pub retrying: bool,
    pub watchdog_spent: bool,
}

impl SessionState {
    pub fn phase(&self) -> Option<Phase> {
        self.session.map(|_| {
            if self.ready {
                Phase::Ready
            } else {
                Phase::Loading
            }
        })
    }

    /// True when `id` names the session currently owned by the controller.
    pub fn is_current(&self, id: SessionId) -> bool {
        self.session == Some(id)
    }

    pub(crate) fn next_session_id(&self) -> SessionId {
        self.session.map_or(SessionId(1), SessionId::next)
    }
}
