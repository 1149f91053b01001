//! Inputs accepted by the controller and the UI strings it produces.

use super::state::SessionId;

/// Error category reported by the streaming engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineErrorKind {
    Network,
    Media,
    Other,
}

impl EngineErrorKind {
    /// Maps an mpegts.js `ErrorTypes` value.
    pub fn from_error_type(error_type: &str) -> Self {
        match error_type {
            "NetworkError" => Self::Network,
            "MediaError" => Self::Media,
            _ => Self::Other,
        }
    }
}

/// Why the controller asked the element to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayReason {
    /// First `loadedmetadata` of a session
    Autoplay,
    /// A play request vetoed earlier, honoured on `canplay`
    Deferred,
}

/// Everything that can happen to the controller.
///
/// Session-scoped inputs carry the id of the session whose listener raised
/// them; inputs for a session that has since been replaced are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Hosting page is ready
    Initialize,
    /// Periodic reconnect timer fired
    RetryTick,
    /// One-shot initial stall timer fired
    WatchdogElapsed,
    EngineError {
        session: SessionId,
        kind: EngineErrorKind,
        detail: String,
    },
    MetadataLoaded {
        session: SessionId,
    },
    CanPlay {
        session: SessionId,
    },
    /// The element's `play` event, user initiated or not
    PlayAttempted {
        session: SessionId,
    },
    ElementError {
        session: SessionId,
        code: Option<u16>,
    },
    /// The promise returned by the element's `play()` was rejected
    PlayRejected {
        session: SessionId,
        reason: PlayReason,
        message: String,
    },
}

impl InputEvent {
    pub fn session(&self) -> Option<SessionId> {
        match self {
            Self::Initialize | Self::RetryTick | Self::WatchdogElapsed => None,
            Self::EngineError { session, .. }
            | Self::MetadataLoaded { session }
            | Self::CanPlay { session }
            | Self::PlayAttempted { session }
            | Self::ElementError { session, .. }
            | Self::PlayRejected { session, .. } => Some(*session),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::RetryTick => "retry-tick",
            Self::WatchdogElapsed => "watchdog",
            Self::EngineError { .. } => "engine-error",
            Self::MetadataLoaded { .. } => "loadedmetadata",
            Self::CanPlay { .. } => "canplay",
            Self::PlayAttempted { .. } => "play",
            Self::ElementError { .. } => "element-error",
            Self::PlayRejected { .. } => "play-rejected",
        }
    }
}

/// What the caller of `dispatch` should do with the originating DOM event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Let the default action proceed
    Allowed,
    /// Cancel the default action
    Vetoed,
    /// Raised while another input was being handled; processed afterwards
    Queued,
    /// Stale session, controller gone, or not applicable
    Ignored,
}

/// User-visible status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusText {
    ConnectionLostRetrying,
    MediaErrorRetrying,
    ConnectionLostReconnecting,
    WaitingForStream,
}

impl StatusText {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConnectionLostRetrying => "Connection lost. Retrying...",
            Self::MediaErrorRetrying => "Media error. Retrying...",
            Self::ConnectionLostReconnecting => "Connection lost. Reconnecting...",
            Self::WaitingForStream => "Waiting for stream to start...",
        }
    }

    pub fn for_engine_error(kind: EngineErrorKind) -> Self {
        match kind {
            EngineErrorKind::Media => Self::MediaErrorRetrying,
            EngineErrorKind::Network | EngineErrorKind::Other => Self::ConnectionLostRetrying,
        }
    }
}
