//! End-to-end runs of the controller against the fake platform.

use std::rc::Rc;

use super::testing::FakePlatform;
use super::{Disposition, EngineErrorKind, EventBus, InputEvent, PlayReason, SessionId, StatusText};
use crate::config::PlayerConfig;

fn boot(platform: &FakePlatform) -> Rc<EventBus<FakePlatform>> {
    let bus = EventBus::new(platform.clone(), PlayerConfig::default());
    bus.dispatch(InputEvent::Initialize);
    bus
}

#[test]
fn network_error_retries_after_five_seconds_until_ready() {
    let platform = FakePlatform::new();
    let bus = boot(&platform);

    platform.engine_error(EngineErrorKind::Network);
    assert_eq!(platform.statuses(), vec![StatusText::ConnectionLostRetrying]);

    platform.advance(4_999);
    assert_eq!(platform.players_created(), 1);
    platform.advance(1);
    assert_eq!(platform.players_created(), 2);

    platform.can_play();
    assert_eq!(platform.overlay_visible(), Some(false));
    assert_eq!(platform.active_intervals(), 0);
    bus.with_controller(|c| {
        assert!(c.state().ready);
        assert!(!c.state().retrying);
    });

    platform.advance(30_000);
    assert_eq!(platform.players_created(), 2);
}

#[test]
fn media_error_shows_its_own_status() {
    let platform = FakePlatform::new();
    let _bus = boot(&platform);
    platform.engine_error(EngineErrorKind::Media);
    assert_eq!(platform.statuses(), vec![StatusText::MediaErrorRetrying]);
}

#[test]
fn unsupported_environment_never_builds_a_player() {
    let platform = FakePlatform::unsupported();
    let bus = boot(&platform);
    bus.dispatch(InputEvent::Initialize);
    platform.advance(60_000);

    assert_eq!(platform.players_created(), 0);
    assert_eq!(platform.active_timers(), 0);
    assert!(platform.calls().is_empty());
}

#[test]
fn early_play_starts_when_stream_becomes_ready() {
    let platform = FakePlatform::new();
    let _bus = boot(&platform);

    assert_eq!(platform.user_play(), vec![Disposition::Vetoed]);
    assert_eq!(platform.element_pauses(), 1);
    assert!(platform.plays().is_empty());

    platform.advance(2_000);
    platform.can_play();
    assert_eq!(
        platform.plays(),
        vec![(2_000, SessionId(1), PlayReason::Deferred)]
    );

    assert_eq!(platform.user_play(), vec![Disposition::Allowed]);
    assert_eq!(platform.element_pauses(), 1);
}

#[test]
fn watchdog_triggers_retry_exactly_once() {
    let platform = FakePlatform::new();
    let _bus = boot(&platform);

    platform.advance(5_000);
    assert_eq!(platform.statuses(), vec![StatusText::WaitingForStream]);
    assert_eq!(platform.active_intervals(), 1);
    assert_eq!(platform.players_created(), 1);

    platform.advance(5_000);
    assert_eq!(platform.players_created(), 2);
    assert_eq!(platform.statuses(), vec![StatusText::WaitingForStream]);
    assert_eq!(platform.timeouts_scheduled(), 1);
}

#[test]
fn watchdog_stays_quiet_when_stream_is_ready() {
    let platform = FakePlatform::new();
    let _bus = boot(&platform);
    platform.advance(1_000);
    platform.can_play();
    platform.advance(10_000);

    assert!(platform.statuses().is_empty());
    assert_eq!(platform.players_created(), 1);
}

#[test]
fn repeated_errors_keep_a_single_retry_timer() {
    let platform = FakePlatform::new();
    let _bus = boot(&platform);

    for _ in 0..5 {
        platform.engine_error(EngineErrorKind::Network);
        platform.element_error(2);
    }
    assert_eq!(platform.active_intervals(), 1);
    assert_eq!(platform.statuses().len(), 1);

    platform.advance(5_000);
    platform.engine_error(EngineErrorKind::Media);
    assert_eq!(platform.active_intervals(), 1);
    assert_eq!(platform.statuses().len(), 1);
}

#[test]
fn many_restarts_leave_one_player_and_one_timer() {
    let platform = FakePlatform::new();
    let bus = boot(&platform);

    for _ in 0..10 {
        platform.engine_error(EngineErrorKind::Network);
        platform.advance(5_000);
        assert_eq!(platform.live_players(), 1);
        assert_eq!(platform.active_listeners(), 1);
        assert!(platform.active_intervals() <= 1);
    }
    assert_eq!(platform.players_created(), 11);
    bus.with_controller(|c| assert_eq!(c.state().session, Some(SessionId(11))));
}

#[test]
fn autoplay_happens_once_per_session() {
    let platform = FakePlatform::new();
    let _bus = boot(&platform);

    platform.loaded_metadata();
    platform.loaded_metadata();
    platform.can_play();
    platform.loaded_metadata();
    assert_eq!(
        platform.plays(),
        vec![(0, SessionId(1), PlayReason::Autoplay)]
    );

    platform.engine_error(EngineErrorKind::Network);
    platform.advance(5_000);
    platform.loaded_metadata();
    assert_eq!(
        platform.plays().last(),
        Some(&(5_000, SessionId(2), PlayReason::Autoplay))
    );
}

#[test]
fn autoplay_before_ready_is_deferred_to_can_play() {
    let platform = FakePlatform::new();
    let _bus = boot(&platform);

    platform.loaded_metadata();
    // the element raises `play` for the autoplay call while still loading
    assert_eq!(platform.user_play(), vec![Disposition::Vetoed]);
    platform.advance(800);
    platform.can_play();

    assert_eq!(
        platform.plays(),
        vec![
            (0, SessionId(1), PlayReason::Autoplay),
            (800, SessionId(1), PlayReason::Deferred),
        ]
    );
}

#[test]
fn element_error_after_ready_reconnects_with_overlay() {
    let platform = FakePlatform::new();
    let _bus = boot(&platform);
    platform.can_play();
    assert_eq!(platform.overlay_visible(), Some(false));

    platform.element_error(2);
    assert_eq!(
        platform.statuses(),
        vec![StatusText::ConnectionLostReconnecting]
    );

    platform.advance(5_000);
    assert_eq!(platform.overlay_visible(), Some(true));
    assert_eq!(platform.live_players(), 1);
    platform.can_play();
    assert_eq!(platform.overlay_visible(), Some(false));
    assert_eq!(platform.active_intervals(), 0);
}

#[test]
fn errors_from_a_replaced_session_are_ignored() {
    let platform = FakePlatform::new();
    let bus = boot(&platform);
    platform.engine_error(EngineErrorKind::Network);
    platform.advance(5_000);
    platform.can_play();

    let stale = bus.sink().send(InputEvent::EngineError {
        session: SessionId(1),
        kind: EngineErrorKind::Network,
        detail: "late".into(),
    });
    assert_eq!(stale, Disposition::Ignored);
    assert_eq!(platform.active_intervals(), 0);
    assert_eq!(platform.statuses().len(), 1);
}
