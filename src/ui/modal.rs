/// Whether a modal is on screen.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Visibility {
    #[default]
    Hidden,
    Shown,
}

/// Where a click landed relative to an open modal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClickTarget {
    /// The modal's backdrop, outside its content box.
    Backdrop,
    Inside,
}

/// Two-state modal dialog (admin login, privacy policy).
///
/// While shown, page scrolling is locked.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Modal {
    visibility: Visibility,
}

impl Modal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_shown(&self) -> bool {
        self.visibility == Visibility::Shown
    }

    pub fn scroll_locked(&self) -> bool {
        self.is_shown()
    }

    pub fn open(&mut self) {
        self.visibility = Visibility::Shown;
    }

    pub fn close(&mut self) {
        self.visibility = Visibility::Hidden;
    }

    /// Closes on a backdrop click. Returns whether the modal closed.
    pub fn on_click(&mut self, target: ClickTarget) -> bool {
        if target == ClickTarget::Backdrop && self.is_shown() {
            self.close();
            return true;
        }
        false
    }

    /// Closes on `Escape` while shown. Returns whether the modal closed.
    pub fn on_key(&mut self, key: super::Key) -> bool {
        if key == super::Key::Escape && self.is_shown() {
            self.close();
            return true;
        }
        false
    }
}
