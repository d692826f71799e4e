//! Page-level wiring of the UI components.

use std::time::Duration;

use crate::{
    page::PageAnchors,
    retry::{DefaultSleeper, Sleeper},
    token::TokenStore,
    ui::{
        ClickTarget, FormState, FormValidator, Key, LoginFlow, LoginOutcome, LogoAnimation, Modal,
        NotificationCenter, NotificationId, Slideshow,
    },
    ApiClient, Diagnostics,
};

pub const ADMIN_LOGIN_BUTTON_ID: &str = "admin-login-button";
pub const ADMIN_LOGIN_MODAL_ID: &str = "admin-login-modal";
pub const ADMIN_LOGIN_FORM_ID: &str = "admin-login-form";
pub const PRIVACY_MODAL_ID: &str = "privacy-policy-modal";
pub const PRIVACY_LINK_ID: &str = "privacy-policy-link";
pub const HERO_SLIDE_CLASS: &str = "hero-slide";
pub const HERO_SLIDESHOW_CLASS: &str = "hero-slideshow";
pub const LOGO_WRAPPER_CLASS: &str = "logo-wrapper";
pub const STATIC_LOGO_CLASS: &str = "static-logo";
pub const ANIMATED_LOGO_CLASS: &str = "animated-logo";

/// Element an event was dispatched on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Anchor {
    AdminLoginButton,
    AdminLoginClose,
    /// The login modal's backdrop (a click outside its content).
    AdminLoginBackdrop,
    PrivacyLink,
    PrivacyClose,
    PrivacyBackdrop,
    HeroSlideshow,
    LogoWrapper,
    Notification(NotificationId),
    Elsewhere,
}

/// Browser input routed to the components.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UiEvent {
    Click(Anchor),
    Key(Key),
    PointerEnter(Anchor),
    PointerLeave(Anchor),
}

/// Every component of a page, initialized from the anchors present.
///
/// Components whose markup is missing are skipped; that is never an error.
#[derive(Debug)]
pub struct Site<T, S = DefaultSleeper> {
    login: Option<LoginFlow<T, S>>,
    slideshow: Option<Slideshow>,
    slideshow_pausable: bool,
    privacy: Option<Modal>,
    logo: Option<LogoAnimation>,
    forms: Vec<FormState>,
    validator: FormValidator,
    notifications: NotificationCenter,
    diag: Diagnostics,
}

impl<T: TokenStore, S: Sleeper> Site<T, S> {
    pub fn init(page: &impl PageAnchors, client: ApiClient<S>, tokens: T) -> Self {
        let diag = client.diagnostics();
        let validator = FormValidator::new(client.config());

        let login = if page.has_id(ADMIN_LOGIN_BUTTON_ID)
            && page.has_id(ADMIN_LOGIN_MODAL_ID)
            && page.has_id(ADMIN_LOGIN_FORM_ID)
        {
            Some(LoginFlow::new(client, tokens))
        } else {
            diag.warn(format_args!("Admin login elements not found"));
            None
        };

        let slideshow = Slideshow::new(page.class_count(HERO_SLIDE_CLASS));
        if slideshow.is_none() {
            diag.log(format_args!("No hero slides found, slideshow skipped"));
        }

        let privacy = if page.has_id(PRIVACY_MODAL_ID) && page.has_id(PRIVACY_LINK_ID) {
            Some(Modal::new())
        } else {
            diag.log(format_args!("Privacy policy elements not found"));
            None
        };

        let logo = if page.has_class(LOGO_WRAPPER_CLASS)
            && page.has_class(STATIC_LOGO_CLASS)
            && page.has_class(ANIMATED_LOGO_CLASS)
        {
            Some(LogoAnimation::new())
        } else {
            diag.log(format_args!("Logo elements not found"));
            None
        };

        let forms = page.validated_forms();
        diag.log(format_args!("Main application initialized"));

        Self {
            login,
            slideshow,
            slideshow_pausable: page.has_class(HERO_SLIDESHOW_CLASS),
            privacy,
            logo,
            forms,
            validator,
            notifications: NotificationCenter::new(),
            diag,
        }
    }

    pub fn login(&self) -> Option<&LoginFlow<T, S>> {
        self.login.as_ref()
    }

    pub fn slideshow(&self) -> Option<&Slideshow> {
        self.slideshow.as_ref()
    }

    pub fn privacy(&self) -> Option<&Modal> {
        self.privacy.as_ref()
    }

    pub fn logo(&self) -> Option<&LogoAnimation> {
        self.logo.as_ref()
    }

    pub fn forms(&self) -> &[FormState] {
        &self.forms
    }

    pub fn form_mut(&mut self, id: &str) -> Option<&mut FormState> {
        self.forms.iter_mut().find(|form| form.id() == Some(id))
    }

    /// Form by document position, for forms without an `id`.
    pub fn form_at_mut(&mut self, index: usize) -> Option<&mut FormState> {
        self.forms.get_mut(index)
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    pub fn dispatch(&mut self, event: UiEvent) {
        match event {
            UiEvent::Click(anchor) => self.on_click(anchor),
            UiEvent::Key(key) => {
                if let Some(login) = &mut self.login {
                    login.on_key(key);
                }
                if let Some(privacy) = &mut self.privacy {
                    privacy.on_key(key);
                }
                if let Some(slideshow) = &mut self.slideshow {
                    slideshow.on_key(key);
                }
            }
            UiEvent::PointerEnter(Anchor::HeroSlideshow) if self.slideshow_pausable => {
                if let Some(slideshow) = &mut self.slideshow {
                    slideshow.on_pointer_enter();
                }
            }
            UiEvent::PointerLeave(Anchor::HeroSlideshow) if self.slideshow_pausable => {
                if let Some(slideshow) = &mut self.slideshow {
                    slideshow.on_pointer_leave();
                }
            }
            UiEvent::PointerEnter(Anchor::LogoWrapper) => {
                if let Some(logo) = &mut self.logo {
                    logo.on_pointer_enter();
                }
            }
            UiEvent::PointerLeave(Anchor::LogoWrapper) => {
                if let Some(logo) = &mut self.logo {
                    logo.on_pointer_leave();
                }
            }
            UiEvent::PointerEnter(_) | UiEvent::PointerLeave(_) => {}
        }
    }

    fn on_click(&mut self, anchor: Anchor) {
        match anchor {
            Anchor::AdminLoginButton => {
                if let Some(login) = &mut self.login {
                    login.open();
                }
            }
            Anchor::AdminLoginClose => {
                if let Some(login) = &mut self.login {
                    login.close();
                }
            }
            Anchor::AdminLoginBackdrop => {
                if let Some(login) = &mut self.login {
                    login.on_click(ClickTarget::Backdrop);
                }
            }
            Anchor::PrivacyLink => {
                if let Some(privacy) = &mut self.privacy {
                    privacy.open();
                }
            }
            Anchor::PrivacyClose => {
                if let Some(privacy) = &mut self.privacy {
                    privacy.close();
                }
            }
            Anchor::PrivacyBackdrop => {
                if let Some(privacy) = &mut self.privacy {
                    privacy.on_click(ClickTarget::Backdrop);
                }
            }
            Anchor::LogoWrapper => {
                if let Some(logo) = &mut self.logo {
                    logo.on_click();
                }
            }
            Anchor::Notification(id) => {
                self.notifications.dismiss(id);
            }
            Anchor::HeroSlideshow | Anchor::Elsewhere => {}
        }
    }

    /// Submits the admin login form; `None` when the page has no login.
    pub async fn submit_login(&mut self, username: &str, password: &str) -> Option<LoginOutcome> {
        let login = self.login.as_mut()?;
        Some(login.submit(&mut self.notifications, username, password).await)
    }

    /// Validates form `id` on submit. `Some(false)` means submission is blocked.
    pub fn submit_form(&mut self, id: &str) -> Option<bool> {
        let index = self.forms.iter().position(|form| form.id() == Some(id))?;
        self.submit_form_at(index)
    }

    /// Validates the `index`-th validated form on submit.
    pub fn submit_form_at(&mut self, index: usize) -> Option<bool> {
        let validator = self.validator;
        let form = self.forms.get_mut(index)?;
        let valid = form.validate(&validator);
        if !valid {
            let name = form.id().unwrap_or("<unnamed>").to_owned();
            self.diag
                .log(format_args!("Form {name} (#{index}) blocked by validation errors"));
        }
        Some(valid)
    }

    /// Moves every component's clock; returns a navigation target when one fires.
    pub fn advance(&mut self, elapsed: Duration) -> Option<&'static str> {
        if let Some(slideshow) = &mut self.slideshow {
            slideshow.advance(elapsed);
        }
        if let Some(logo) = &mut self.logo {
            logo.advance(elapsed);
        }
        self.notifications.advance(elapsed);
        self.login.as_mut().and_then(|login| login.advance(elapsed))
    }

    /// Clears every pending timer.
    pub fn teardown(&mut self) {
        if let Some(slideshow) = &mut self.slideshow {
            slideshow.teardown();
        }
        if let Some(logo) = &mut self.logo {
            logo.teardown();
        }
        if let Some(login) = &mut self.login {
            login.teardown();
        }
        self.notifications.teardown();
    }
}
