//! DOM-free UI behavior.
//!
//! Each component owns its visible state and any pending timers. Timers run
//! on a logical clock: the host event loop calls `advance` with the elapsed
//! time, and `teardown` clears whatever is still pending.

mod form;
mod login;
mod logo;
mod modal;
mod notify;
mod slideshow;

use std::time::Duration;

pub use form::{FieldError, FormState, FormValidator, Input, InputKind};
pub use login::{LoginFlow, LoginOutcome, SubmitButton, DASHBOARD_URL, REDIRECT_DELAY};
pub use logo::{LogoAnimation, FADE_DURATION};
pub use modal::{ClickTarget, Modal, Visibility};
pub use notify::{
    Notification, NotificationCenter, NotificationId, NotificationKind, NotificationSink, Phase,
    AUTO_HIDE_AFTER, REMOVE_AFTER_HIDE, SHOW_AFTER,
};
pub use slideshow::{Slideshow, SLIDE_INTERVAL};

/// Keyboard keys the site reacts to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" => Self::Escape,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            _ => Self::Other,
        }
    }
}

/// One-shot or repeating deadline on a component's logical clock.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Timer {
    remaining: Option<Duration>,
    interval: Option<Duration>,
}

impl Timer {
    pub fn once(after: Duration) -> Self {
        Self {
            remaining: Some(after),
            interval: None,
        }
    }

    /// Fires every `interval`; a zero interval is treated as one millisecond.
    pub fn every(interval: Duration) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        Self {
            remaining: Some(interval),
            interval: Some(interval),
        }
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Moves the clock forward and returns how many times the timer fired.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let Some(remaining) = self.remaining else {
            return 0;
        };
        if elapsed < remaining {
            self.remaining = Some(remaining - elapsed);
            return 0;
        }

        let overshoot = elapsed - remaining;
        match self.interval {
            None => {
                self.remaining = None;
                1
            }
            Some(interval) => {
                let extra = overshoot.as_nanos() / interval.as_nanos();
                let into_period = overshoot.as_nanos() % interval.as_nanos();
                let left = interval.as_nanos() - into_period;
                self.remaining = Some(Duration::from_nanos(
                    u64::try_from(left).unwrap_or(u64::MAX),
                ));
                u32::try_from(extra + 1).unwrap_or(u32::MAX)
            }
        }
    }
}
