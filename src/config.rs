use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

/// API base URL used when the site is served from a local development host.
pub const LOCAL_API_BASE_URL: &str = "http://localhost:10000/api";
/// API base URL used everywhere else.
pub const PRODUCTION_API_BASE_URL: &str = "https://kosge-backend.onrender.com/api";

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// Deployment environment, resolved once from the page hostname.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// `localhost` and `127.0.0.1` are development; anything else is production.
    pub fn from_hostname(hostname: &str) -> Self {
        match hostname.trim() {
            "localhost" | "127.0.0.1" => Self::Development,
            _ => Self::Production,
        }
    }

    pub fn is_development(self) -> bool {
        self == Self::Development
    }

    pub fn api_base_url(self) -> &'static str {
        match self {
            Self::Development => LOCAL_API_BASE_URL,
            Self::Production => PRODUCTION_API_BASE_URL,
        }
    }
}

/// Named backend endpoint, appended to the configured base URL.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Endpoint {
    Health,
    Login,
    Banners,
    Uploads,
    Participants,
    CmsContent,
    CmsSections,
}

impl Endpoint {
    pub const ALL: [Endpoint; 7] = [
        Endpoint::Health,
        Endpoint::Login,
        Endpoint::Banners,
        Endpoint::Uploads,
        Endpoint::Participants,
        Endpoint::CmsContent,
        Endpoint::CmsSections,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Health => "/health",
            Self::Login => "/login",
            Self::Banners => "/banners",
            Self::Uploads => "/uploads",
            Self::Participants => "/participants",
            Self::CmsContent => "/cms/content",
            Self::CmsSections => "/cms/sections",
        }
    }
}

/// Limits enforced on event sign-ups.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EventLimits {
    pub max_participants: usize,
    /// Maximum banner upload size in bytes.
    pub max_file_size: u64,
    /// Maximum participant message length in characters.
    pub max_message_length: usize,
}

impl Default for EventLimits {
    fn default() -> Self {
        Self {
            max_participants: 100,
            max_file_size: 16 * 1024 * 1024,
            max_message_length: 1000,
        }
    }
}

/// Client-side form validation thresholds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ValidationRules {
    pub min_name_length: usize,
    pub max_name_length: usize,
    pub min_password_length: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_name_length: 2,
            max_name_length: 100,
            min_password_length: 8,
        }
    }
}

impl ValidationRules {
    /// Checks an address against the fixed site-wide email pattern.
    pub fn is_valid_email(&self, value: &str) -> bool {
        email_regex().is_match(value)
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

/// Immutable site configuration.
///
/// Built once at startup and handed to the components that need it. There is
/// no mutating API: every field is read through a getter, so a shared
/// `Config` cannot change underneath its holders.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    environment: Environment,
    api_base_url: String,
    max_retries: usize,
    retry_delay: Duration,
    timeout: Duration,
    limits: EventLimits,
    validation: ValidationRules,
    debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        ConfigBuilder::new(Environment::Production).build()
    }
}

impl Config {
    /// Resolves the environment from `hostname` and applies its defaults.
    pub fn for_hostname(hostname: &str) -> Self {
        Self::builder(Environment::from_hostname(hostname)).build()
    }

    pub fn builder(environment: Environment) -> ConfigBuilder {
        ConfigBuilder::new(environment)
    }

    /// Creates a configuration from environment variables.
    ///
    /// Reads:
    /// - `KOSGE_HOSTNAME`: hostname the site is served from (defaults to production)
    /// - `KOSGE_API_BASE_URL`: optional explicit API base URL override
    ///
    /// **Not available on `wasm32` targets**. Use [`Config::from_location`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> std::result::Result<Self, String> {
        let hostname = std::env::var("KOSGE_HOSTNAME").unwrap_or_default();
        let mut builder = Self::builder(Environment::from_hostname(&hostname));
        if let Ok(base_url) = std::env::var("KOSGE_API_BASE_URL") {
            if base_url.trim().is_empty() {
                return Err("KOSGE_API_BASE_URL is set but empty".to_owned());
            }
            builder = builder.api_base_url(base_url);
        }
        Ok(builder.build())
    }

    /// Creates a configuration from the hostname of the current browser page.
    #[cfg(target_arch = "wasm32")]
    pub fn from_location() -> Self {
        use wasm_bindgen::JsValue;

        let hostname = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("location"))
            .and_then(|location| js_sys::Reflect::get(&location, &JsValue::from_str("hostname")))
            .ok()
            .and_then(|value| value.as_string())
            .unwrap_or_default();
        Self::for_hostname(&hostname)
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Number of attempts the retry wrapper makes by default.
    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Base delay of the linear retry backoff.
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn limits(&self) -> &EventLimits {
        &self.limits
    }

    pub fn validation(&self) -> &ValidationRules {
        &self.validation
    }

    /// Whether diagnostic logging is enabled.
    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.api_base_url, endpoint.path())
    }
}

/// Builder for [`Config`]; the only way to deviate from environment defaults.
#[derive(Clone, Debug)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new(environment: Environment) -> Self {
        Self {
            config: Config {
                environment,
                api_base_url: environment.api_base_url().to_owned(),
                max_retries: 3,
                retry_delay: Duration::from_millis(1_000),
                timeout: Duration::from_millis(10_000),
                limits: EventLimits::default(),
                validation: ValidationRules::default(),
                debug: environment.is_development(),
            },
        }
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_base_url = url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn max_retries(mut self, retries: usize) -> Self {
        self.config.max_retries = retries;
        self
    }

    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_delay = delay;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn limits(mut self, limits: EventLimits) -> Self {
        self.config.limits = limits;
        self
    }

    pub fn validation(mut self, rules: ValidationRules) -> Self {
        self.config.validation = rules;
        self
    }

    pub fn debug(mut self, enabled: bool) -> Self {
        self.config.debug = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
