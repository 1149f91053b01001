//! Single dispatch queue in front of the controller.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use super::controller::PlaybackSessionController;
use super::event::{Disposition, InputEvent};
use crate::config::PlayerConfig;
use crate::platform::Platform;

/// Cloneable handle listeners and timers use to feed inputs to the bus.
///
/// Holds the bus weakly, so an outstanding listener never keeps a dropped
/// controller alive.
#[derive(Clone)]
pub struct EventSink(Rc<dyn Fn(InputEvent) -> Disposition>);

impl EventSink {
    pub fn new(deliver: impl Fn(InputEvent) -> Disposition + 'static) -> Self {
        Self(Rc::new(deliver))
    }

    pub fn send(&self, event: InputEvent) -> Disposition {
        (self.0)(event)
    }

    fn for_bus<P: Platform + 'static>(bus: Weak<EventBus<P>>) -> Self {
        Self::new(move |event| match bus.upgrade() {
            Some(bus) => bus.dispatch(event),
            None => Disposition::Ignored,
        })
    }
}

impl fmt::Debug for EventSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSink").finish_non_exhaustive()
    }
}

pub struct EventBus<P: Platform> {
    controller: RefCell<PlaybackSessionController<P>>,
    pending: RefCell<VecDeque<InputEvent>>,
}

impl<P: Platform + 'static> EventBus<P> {
    pub fn new(platform: P, config: PlayerConfig) -> Rc<Self> {
        Rc::new_cyclic(|bus| {
            let sink = EventSink::for_bus(bus.clone());
            Self {
                controller: RefCell::new(PlaybackSessionController::new(platform, config, sink)),
                pending: RefCell::new(VecDeque::new()),
            }
        })
    }

    pub fn sink(self: &Rc<Self>) -> EventSink {
        EventSink::for_bus(Rc::downgrade(self))
    }

    /// Handles `event`, then everything raised while handling it.
    ///
    /// An input arriving while another is in flight is queued and reported
    /// as `Queued`; it is drained, in order, before the outer call returns.
    pub fn dispatch(&self, event: InputEvent) -> Disposition {
        let Ok(mut controller) = self.controller.try_borrow_mut() else {
            self.pending.borrow_mut().push_back(event);
            return Disposition::Queued;
        };

        let disposition = controller.handle(event);
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(next) = next else {
                break;
            };
            controller.handle(next);
        }
        disposition
    }

    /// Read access for status displays and tests. Must not be called from
    /// inside a dispatch.
    pub fn with_controller<R>(&self, inspect: impl FnOnce(&PlaybackSessionController<P>) -> R) -> R {
        inspect(&*self.controller.borrow())
    }
}
