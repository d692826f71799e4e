use std::time::Duration;

use super::{Key, Timer};

/// Auto-advance period of the hero slideshow.
pub const SLIDE_INTERVAL: Duration = Duration::from_millis(4_000);

/// Hero slideshow: one active slide out of `count`, cycled on a timer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Slideshow {
    count: usize,
    current: usize,
    timer: Timer,
}

impl Slideshow {
    /// Starts at slide 0 with autoplay running; `None` when there are no slides.
    pub fn new(count: usize) -> Option<Self> {
        if count == 0 {
            return None;
        }
        Some(Self {
            count,
            current: 0,
            timer: Timer::every(SLIDE_INTERVAL),
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Index of the active slide.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.timer.is_armed()
    }

    /// Activates `index`; out-of-range indexes are ignored.
    pub fn show(&mut self, index: usize) -> bool {
        if index >= self.count {
            return false;
        }
        self.current = index;
        true
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1) % self.count;
    }

    pub fn prev(&mut self) {
        self.current = (self.current + self.count - 1) % self.count;
    }

    /// (Re)starts autoplay with a full interval.
    pub fn start(&mut self) {
        self.timer = Timer::every(SLIDE_INTERVAL);
    }

    pub fn stop(&mut self) {
        self.timer.clear();
    }

    pub fn on_pointer_enter(&mut self) {
        self.stop();
    }

    pub fn on_pointer_leave(&mut self) {
        self.start();
    }

    /// Arrow keys navigate. Returns whether the key was handled.
    pub fn on_key(&mut self, key: Key) -> bool {
        match key {
            Key::ArrowLeft => self.prev(),
            Key::ArrowRight => self.next(),
            _ => return false,
        }
        true
    }

    /// Returns the number of automatic transitions that happened.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let fired = self.timer.advance(elapsed);
        let steps = usize::try_from(fired).unwrap_or(usize::MAX) % self.count;
        self.current = (self.current + steps) % self.count;
        fired
    }

    pub fn teardown(&mut self) {
        self.stop();
    }
}
