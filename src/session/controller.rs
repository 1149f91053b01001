//! Owns the live session and carries out the effects of each transition.

use tracing::{debug, error, info, warn};

use super::bus::EventSink;
use super::event::{Disposition, EngineErrorKind, InputEvent, PlayReason};
use super::release::try_release;
use super::state::{Lifecycle, SessionId, SessionState};
use super::transition::{transition, Effect, Environment};
use crate::config::PlayerConfig;
use crate::error::Result;
use crate::platform::{Platform, Player};

/// Resources owned by the current session. Dropped as a unit on teardown.
struct ActiveSession<P: Platform> {
    id: SessionId,
    /// `None` when the engine refused to construct a player
    player: Option<P::Player>,
    listeners: Option<P::Listeners>,
}

pub struct PlaybackSessionController<P: Platform> {
    platform: P,
    config: PlayerConfig,
    sink: EventSink,
    state: SessionState,
    session: Option<ActiveSession<P>>,
    retry_timer: Option<P::Timer>,
    watchdog: Option<P::Timer>,
}

impl<P: Platform> PlaybackSessionController<P> {
    pub fn new(platform: P, config: PlayerConfig, sink: EventSink) -> Self {
        Self {
            platform,
            config,
            sink,
            state: SessionState::default(),
            session: None,
            retry_timer: None,
            watchdog: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn has_player(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.player.is_some())
    }

    pub fn retry_timer_armed(&self) -> bool {
        self.retry_timer.is_some()
    }

    pub fn watchdog_armed(&self) -> bool {
        self.watchdog.is_some()
    }

    /// Applies one input. Callers go through `EventBus::dispatch`.
    pub(crate) fn handle(&mut self, event: InputEvent) -> Disposition {
        debug!(event = event.name(), session = ?event.session(), "dispatching");
        self.log_input(&event);

        let env = Environment {
            engine_supported: matches!(event, InputEvent::Initialize)
                && self.state.lifecycle == Lifecycle::Idle
                && self.platform.engine_supported(),
            timing: self.config.timing,
        };
        let step = transition(self.state, &event, &env);
        if step.disposition == Disposition::Ignored {
            debug!(
                event = event.name(),
                session = ?event.session(),
                current = ?self.state.session,
                "input ignored"
            );
        }

        self.state = step.state;
        for effect in step.effects {
            self.apply(effect);
        }
        step.disposition
    }

    fn log_input(&self, event: &InputEvent) {
        match event {
            InputEvent::EngineError {
                session,
                kind,
                detail,
            } => warn!(session = %session, ?kind, detail = %detail, "engine error"),
            InputEvent::ElementError { session, code } => {
                warn!(session = %session, code = ?code, "media element error")
            }
            InputEvent::PlayRejected {
                session,
                reason,
                message,
            } => warn!(
                session = %session,
                ?reason,
                message = %message,
                "play() rejected; manual play is still possible"
            ),
            _ => {}
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::ReportUnsupported => {
                warn!("mpegts is not supported in this browser; live playback disabled")
            }
            Effect::ArmWatchdog { delay } => {
                self.watchdog = Some(self.platform.schedule_timeout(
                    delay,
                    self.sink.clone(),
                    InputEvent::WatchdogElapsed,
                ));
            }
            Effect::StartSession { session } => self.start_player(session),
            Effect::ShowOverlay => self.platform.set_overlay_visible(true),
            Effect::HideOverlay => {
                info!(session = ?self.state.session, "stream ready");
                self.platform.set_overlay_visible(false);
            }
            Effect::SetStatus(status) => self.platform.set_status(status),
            Effect::Autoplay { session } => {
                self.platform
                    .play_element(session, PlayReason::Autoplay, self.sink.clone());
            }
            Effect::PlayDeferred { session } => {
                info!(session = %session, "honouring play request made before ready");
                self.platform
                    .play_element(session, PlayReason::Deferred, self.sink.clone());
            }
            Effect::VetoPlay => {
                debug!("play requested before ready; deferring");
                self.platform.pause_element();
            }
            Effect::ArmRetryTimer { period } => {
                info!(period_ms = period.as_millis() as u64, "stream unavailable, retrying");
                // cancel before arming so two timers never coexist
                self.retry_timer = None;
                self.retry_timer = Some(self.platform.schedule_interval(
                    period,
                    self.sink.clone(),
                    InputEvent::RetryTick,
                ));
            }
            Effect::CancelRetryTimer => {
                info!("reconnected, retry cycle stopped");
                self.retry_timer = None;
            }
        }
    }

    fn start_player(&mut self, id: SessionId) {
        self.teardown();
        info!(session = %id, url = %self.config.source.url, "starting player");

        let mut player = match self
            .platform
            .create_player(&self.config.source, &self.config.engine)
        {
            Ok(player) => player,
            Err(err) => {
                error!(session = %id, error = %err, "failed to create player");
                self.session = Some(ActiveSession {
                    id,
                    player: None,
                    listeners: None,
                });
                self.report_failure(id, err.to_string());
                return;
            }
        };

        if let Err(err) = prepare(&mut player, id, &self.sink) {
            self.session = Some(ActiveSession {
                id,
                player: Some(player),
                listeners: None,
            });
            self.report_failure(id, err.to_string());
            return;
        }

        let listeners = self.platform.watch_element(id, self.sink.clone());
        self.session = Some(ActiveSession {
            id,
            player: Some(player),
            listeners: Some(listeners),
        });
    }

    /// Feeds a synchronous failure back through the normal error path.
    fn report_failure(&self, session: SessionId, detail: String) {
        self.sink.send(InputEvent::EngineError {
            session,
            kind: EngineErrorKind::Other,
            detail,
        });
    }

    fn teardown(&mut self) {
        let Some(previous) = self.session.take() else {
            return;
        };
        drop(previous.listeners);
        if let Some(mut player) = previous.player {
            for warning in try_release(&mut player) {
                warn!(
                    session = %previous.id,
                    step = %warning.step,
                    error = %warning.error,
                    "player teardown step failed"
                );
            }
        }
        debug!(session = %previous.id, "session torn down");
    }
}

impl<P: Platform> Drop for PlaybackSessionController<P> {
    fn drop(&mut self) {
        self.retry_timer = None;
        self.watchdog = None;
        self.teardown();
    }
}

/// Attach, subscribe and load. The error listener goes on before `load()`.
fn prepare<T: Player>(player: &mut T, session: SessionId, sink: &EventSink) -> Result<()> {
    player.attach_media_element()?;
    player.subscribe_errors(session, sink.clone())?;
    player.load()
}
