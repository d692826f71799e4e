use std::time::Duration;

use super::Timer;

/// Time the animated logo stays displayed while it fades out.
pub const FADE_DURATION: Duration = Duration::from_millis(300);

/// Hover swap between the static and the animated site logo.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LogoAnimation {
    animating: bool,
    animated_displayed: bool,
    hide: Timer,
}

impl LogoAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Whether the animated logo element is displayed (it lingers during fade-out).
    pub fn animated_displayed(&self) -> bool {
        self.animated_displayed
    }

    /// Opacity of the (static, animated) logos.
    pub fn opacity(&self) -> (f32, f32) {
        if self.animating {
            (0.0, 1.0)
        } else {
            (1.0, 0.0)
        }
    }

    pub fn show_animated(&mut self) {
        if self.animating {
            return;
        }
        self.animating = true;
        self.animated_displayed = true;
        // A hide still pending from the last fade-out would blank the logo.
        self.hide.clear();
    }

    pub fn show_static(&mut self) {
        if !self.animating {
            return;
        }
        self.animating = false;
        self.hide = Timer::once(FADE_DURATION);
    }

    pub fn on_pointer_enter(&mut self) {
        self.show_animated();
    }

    pub fn on_pointer_leave(&mut self) {
        self.show_static();
    }

    pub fn on_click(&mut self) {
        if self.animating {
            self.show_static();
        } else {
            self.show_animated();
        }
    }

    pub fn advance(&mut self, elapsed: Duration) {
        if self.hide.advance(elapsed) > 0 {
            self.animated_displayed = false;
        }
    }

    pub fn teardown(&mut self) {
        self.hide.clear();
    }
}
