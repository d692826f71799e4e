use std::time::Duration;

/// Delay before a new notification slides in.
pub const SHOW_AFTER: Duration = Duration::from_millis(100);
/// Time after creation at which a notification hides itself.
pub const AUTO_HIDE_AFTER: Duration = Duration::from_millis(5_000);
/// Time a hidden notification lingers before it is removed.
pub const REMOVE_AFTER_HIDE: Duration = Duration::from_millis(300);

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Error,
    Warning,
}

impl NotificationKind {
    /// CSS class used by the site stylesheet.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Info => "notification-info",
            Self::Success => "notification-success",
            Self::Error => "notification-error",
            Self::Warning => "notification-warning",
        }
    }
}

/// Receives user-facing messages.
pub trait NotificationSink {
    fn notify(&mut self, message: &str, kind: NotificationKind);
}

impl<N: NotificationSink + ?Sized> NotificationSink for &mut N {
    fn notify(&mut self, message: &str, kind: NotificationKind) {
        (**self).notify(message, kind);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Appended but not yet shown.
    Entering,
    Visible,
    /// Hidden, waiting to be removed.
    Leaving,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    id: NotificationId,
    message: String,
    kind: NotificationKind,
    created_at: Duration,
    hide_at: Duration,
    remove_at: Option<Duration>,
}

impl Notification {
    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    fn phase_at(&self, now: Duration) -> Phase {
        if now >= self.hide_at {
            Phase::Leaving
        } else if now >= self.created_at + SHOW_AFTER {
            Phase::Visible
        } else {
            Phase::Entering
        }
    }
}

/// Toast notifications with their show / auto-hide / remove lifecycle.
#[derive(Clone, Debug, Default)]
pub struct NotificationCenter {
    now: Duration,
    next_id: u64,
    items: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        self.items.push(Notification {
            id,
            message: message.into(),
            kind,
            created_at: self.now,
            hide_at: self.now + AUTO_HIDE_AFTER,
            remove_at: None,
        });
        id
    }

    /// Notifications still attached to the page, oldest first.
    pub fn active(&self) -> &[Notification] {
        &self.items
    }

    pub fn phase(&self, id: NotificationId) -> Option<Phase> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.phase_at(self.now))
    }

    /// Messages currently on screen.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.items
            .iter()
            .filter(|item| item.phase_at(self.now) == Phase::Visible)
    }

    /// Click on a notification: hide now, remove after the fade.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let now = self.now;
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) if item.remove_at.is_none() => {
                item.hide_at = item.hide_at.min(now);
                item.remove_at = Some(now + REMOVE_AFTER_HIDE);
                true
            }
            _ => false,
        }
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;
        let now = self.now;
        for item in &mut self.items {
            if item.remove_at.is_none() && now >= item.hide_at {
                item.remove_at = Some(item.hide_at + REMOVE_AFTER_HIDE);
            }
        }
        self.items
            .retain(|item| item.remove_at.map_or(true, |remove_at| now < remove_at));
    }

    /// Drops every notification and its pending timers.
    pub fn teardown(&mut self) {
        self.items.clear();
    }
}

impl NotificationSink for NotificationCenter {
    fn notify(&mut self, message: &str, kind: NotificationKind) {
        self.show(message, kind);
    }
}
