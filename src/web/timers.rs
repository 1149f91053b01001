//! Browser timers. Dropping a handle cancels the underlying timer.

use std::time::Duration;

use gloo_timers::callback::{Interval, Timeout};

use crate::session::{EventSink, InputEvent};

#[allow(dead_code)]
pub enum WebTimer {
    Interval(Interval),
    Timeout(Timeout),
}

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

pub fn interval(period: Duration, sink: EventSink, event: InputEvent) -> WebTimer {
    WebTimer::Interval(Interval::new(millis(period), move || {
        sink.send(event.clone());
    }))
}

pub fn timeout(delay: Duration, sink: EventSink, event: InputEvent) -> WebTimer {
    WebTimer::Timeout(Timeout::new(millis(delay), move || {
        sink.send(event);
    }))
}
