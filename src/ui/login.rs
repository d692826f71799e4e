use std::time::Duration;

use super::{ClickTarget, Key, Modal, NotificationKind, NotificationSink, Timer};
use crate::{
    classify::describe_error_in,
    retry::{DefaultSleeper, Sleeper},
    token::{TokenStore, ADMIN_TOKEN_KEY},
    ApiClient, ApiError, Result,
};

/// Page the browser is sent to after a successful login.
pub const DASHBOARD_URL: &str = "/admin/dashboard.html";
/// Delay between the success notification and the redirect.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1_000);

const IDLE_LABEL: &str = "Login";
const BUSY_LABEL: &str = "Logging in...";

/// State of the login form's submit button.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SubmitButton {
    disabled: bool,
    label: &'static str,
}

impl Default for SubmitButton {
    fn default() -> Self {
        Self {
            disabled: false,
            label: IDLE_LABEL,
        }
    }
}

impl SubmitButton {
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    fn busy(&mut self) {
        self.disabled = true;
        self.label = BUSY_LABEL;
    }

    fn idle(&mut self) {
        *self = Self::default();
    }
}

/// Result of one login submission.
#[derive(Clone, Debug, PartialEq)]
pub enum LoginOutcome {
    LoggedIn { token: Option<String> },
    Failed { message: String, error: ApiError },
}

/// Admin login modal and its submission flow.
#[derive(Debug)]
pub struct LoginFlow<T, S = DefaultSleeper> {
    client: ApiClient<S>,
    tokens: T,
    modal: Modal,
    button: SubmitButton,
    redirect: Timer,
}

impl<T: TokenStore, S: Sleeper> LoginFlow<T, S> {
    pub fn new(client: ApiClient<S>, tokens: T) -> Self {
        Self {
            client,
            tokens,
            modal: Modal::new(),
            button: SubmitButton::default(),
            redirect: Timer::default(),
        }
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn button(&self) -> SubmitButton {
        self.button
    }

    pub fn tokens(&self) -> &T {
        &self.tokens
    }

    pub fn redirect_pending(&self) -> bool {
        self.redirect.is_armed()
    }

    /// Admin button click.
    pub fn open(&mut self) {
        self.modal.open();
    }

    /// Close button click.
    pub fn close(&mut self) {
        self.modal.close();
    }

    pub fn on_click(&mut self, target: ClickTarget) -> bool {
        self.modal.on_click(target)
    }

    pub fn on_key(&mut self, key: Key) -> bool {
        self.modal.on_key(key)
    }

    /// Submits the credentials and reports the result through `notifications`.
    ///
    /// Missing username or password fails before any request is sent. The
    /// submit button is disabled for the duration and always re-enabled.
    pub async fn submit<N: NotificationSink>(
        &mut self,
        notifications: &mut N,
        username: &str,
        password: &str,
    ) -> LoginOutcome {
        self.button.busy();

        let outcome = match self.authenticate(username, password).await {
            Ok(token) => {
                notifications.notify("Login successful!", NotificationKind::Success);
                self.modal.close();
                if let Some(token) = &token {
                    self.tokens.set(ADMIN_TOKEN_KEY, token);
                }
                self.redirect = Timer::once(REDIRECT_DELAY);
                LoginOutcome::LoggedIn { token }
            }
            Err(error) => {
                let message = describe_error_in(&self.client.diagnostics(), "Admin Login", &error);
                notifications.notify(&message, NotificationKind::Error);
                LoginOutcome::Failed { message, error }
            }
        };

        self.button.idle();
        outcome
    }

    /// Moves the redirect timer; returns the target once it fires.
    pub fn advance(&mut self, elapsed: Duration) -> Option<&'static str> {
        (self.redirect.advance(elapsed) > 0).then_some(DASHBOARD_URL)
    }

    pub fn teardown(&mut self) {
        self.redirect.clear();
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<Option<String>> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ApiError::Validation(
                "Username and password are required".to_owned(),
            ));
        }
        let response = self.client.login(username, password).await?;
        Ok(response.token.filter(|token| !token.is_empty()))
    }
}
