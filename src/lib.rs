//! `kosge-client` implements the client-side behavior of the KOSGE event site.
//!
//! - [`ApiClient`]: JSON requests against the site backend, single attempt
//!   ([`ApiClient::request`]) or with linear backoff ([`ApiClient::request_with_retry`])
//! - [`describe_error`]: user-facing messages for [`ApiError`]
//! - [`ui`]: DOM-free state machines for the modals, slideshow, logo, forms
//!   and notifications, wired per page by [`Site`]
//! - [`checks`]: consistency checks over the static language pages (native only)

mod classify;
mod client;
mod config;
mod diag;
mod error;
mod options;
mod page;
pub mod retry;
mod site;
mod token;
mod types;
pub mod ui;
mod wire;

#[cfg(not(target_arch = "wasm32"))]
pub mod checks;

pub use classify::{describe_error, describe_error_in};
pub use client::ApiClient;
pub use config::{
    Config, ConfigBuilder, Endpoint, Environment, EventLimits, ValidationRules,
    LOCAL_API_BASE_URL, PRODUCTION_API_BASE_URL,
};
pub use diag::Diagnostics;
pub use error::ApiError;
pub use options::RequestOptions;
pub use page::{HtmlPage, PageAnchors};
pub use site::{Anchor, Site, UiEvent};
#[cfg(target_arch = "wasm32")]
pub use token::LocalStorage;
pub use token::{MemoryTokenStore, TokenStore, ADMIN_TOKEN_KEY};
pub use types::{HealthStatus, LoginResponse, Participant, SectionContent, SectionSummary};

pub type Result<T> = std::result::Result<T, ApiError>;
