//! Pure session state machine.
//!
//! `transition` never touches a collaborator: it returns the next state and
//! the ordered list of effects the controller has to carry out.

use std::time::Duration;

use super::event::{Disposition, InputEvent, StatusText};
use super::state::{Lifecycle, SessionId, SessionState};
use crate::config::Timing;

/// Facts about the outside world a transition may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Environment {
    /// Result of the engine support probe. Only consulted on `Initialize`.
    pub engine_supported: bool,
    pub timing: Timing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ReportUnsupported,
    ArmWatchdog { delay: Duration },
    /// Tear down the current player and build a new one for `session`
    StartSession { session: SessionId },
    ShowOverlay,
    HideOverlay,
    SetStatus(StatusText),
    Autoplay { session: SessionId },
    PlayDeferred { session: SessionId },
    /// Re-pause the element after a vetoed `play`
    VetoPlay,
    ArmRetryTimer { period: Duration },
    CancelRetryTimer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: SessionState,
    pub effects: Vec<Effect>,
    pub disposition: Disposition,
}

impl Step {
    fn unchanged(state: SessionState) -> Self {
        Self {
            state,
            effects: Vec::new(),
            disposition: Disposition::Ignored,
        }
    }
}

pub fn transition(state: SessionState, event: &InputEvent, env: &Environment) -> Step {
    if let Some(session) = event.session() {
        if !state.is_current(session) {
            return Step::unchanged(state);
        }
    }

    let mut next = state;
    let mut effects = Vec::new();
    let mut disposition = Disposition::Allowed;

    match event {
        InputEvent::Initialize => {
            if state.lifecycle != Lifecycle::Idle {
                return Step::unchanged(state);
            }
            if !env.engine_supported {
                next.lifecycle = Lifecycle::Unsupported;
                effects.push(Effect::ReportUnsupported);
            } else {
                next.lifecycle = Lifecycle::Active;
                start_session(&mut next, &mut effects);
                effects.push(Effect::ArmWatchdog {
                    delay: env.timing.watchdog_delay,
                });
            }
        }
        InputEvent::RetryTick => {
            if state.lifecycle != Lifecycle::Active || !state.retrying {
                return Step::unchanged(state);
            }
            start_session(&mut next, &mut effects);
        }
        InputEvent::WatchdogElapsed => {
            if state.watchdog_spent {
                return Step::unchanged(state);
            }
            next.watchdog_spent = true;
            if !state.ready && !state.retrying {
                effects.push(Effect::SetStatus(StatusText::WaitingForStream));
                start_retrying(&mut next, &mut effects, env);
            }
        }
        InputEvent::EngineError { kind, .. } => {
            if !state.retrying {
                effects.push(Effect::SetStatus(StatusText::for_engine_error(*kind)));
                start_retrying(&mut next, &mut effects, env);
            }
        }
        InputEvent::ElementError { .. } => {
            if !state.retrying {
                effects.push(Effect::SetStatus(StatusText::ConnectionLostReconnecting));
                start_retrying(&mut next, &mut effects, env);
            }
        }
        InputEvent::MetadataLoaded { session } => {
            if !state.attempted_autoplay && !state.ready {
                next.attempted_autoplay = true;
                effects.push(Effect::Autoplay { session: *session });
            }
        }
        InputEvent::CanPlay { session } => {
            if state.ready {
                return Step::unchanged(state);
            }
            next.ready = true;
            // no autoplay once the stream is playable
            next.attempted_autoplay = true;
            effects.push(Effect::HideOverlay);
            if state.retrying {
                next.retrying = false;
                effects.push(Effect::CancelRetryTimer);
            }
            if state.play_requested {
                next.play_requested = false;
                effects.push(Effect::PlayDeferred { session: *session });
            }
        }
        InputEvent::PlayAttempted { .. } => {
            if !state.ready {
                next.play_requested = true;
                effects.push(Effect::VetoPlay);
                disposition = Disposition::Vetoed;
            }
        }
        InputEvent::PlayRejected { .. } => {}
    }

    Step {
        state: next,
        effects,
        disposition,
    }
}

fn start_session(state: &mut SessionState, effects: &mut Vec<Effect>) {
    let session = state.next_session_id();
    state.session = Some(session);
    state.ready = false;
    state.attempted_autoplay = false;
    effects.push(Effect::StartSession { session });
    effects.push(Effect::ShowOverlay);
}

fn start_retrying(state: &mut SessionState, effects: &mut Vec<Effect>, env: &Environment) {
    if state.retrying {
        return;
    }
    state.retrying = true;
    effects.push(Effect::ArmRetryTimer {
        period: env.timing.retry_period,
    });
}
