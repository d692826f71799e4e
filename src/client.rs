use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::{
    retry::{retry_with_backoff, DefaultSleeper, Sleeper},
    wire::{
        AddParticipantResponse, BannersResponse, ContentResponse, LoginRequest,
        ParticipantsResponse, SectionsResponse,
    },
    ApiError, Config, Diagnostics, Endpoint, HealthStatus, LoginResponse, Participant,
    RequestOptions, Result, SectionContent, SectionSummary,
};

/// JSON client for the site backend.
///
/// Wraps one `reqwest::Client` and the immutable [`Config`] it was built with.
/// [`ApiClient::request`] performs a single attempt; [`ApiClient::request_with_retry`]
/// repeats it with linear backoff.
#[derive(Clone)]
pub struct ApiClient<S = DefaultSleeper> {
    http: reqwest::Client,
    config: Arc<Config>,
    diag: Diagnostics,
    sleeper: S,
}

impl<S> fmt::Debug for ApiClient<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_base_url", &self.config.api_base_url())
            .field("config", &self.config)
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: impl Into<Arc<Config>>) -> Self {
        Self::with_http(reqwest::Client::new(), config)
    }

    /// Creates a client around an existing `reqwest::Client`.
    pub fn with_http(http: reqwest::Client, config: impl Into<Arc<Config>>) -> Self {
        let config = config.into();
        let diag = Diagnostics::from_config(&config);
        diag.log(format_args!("Configuration loaded: {config:?}"));
        Self {
            http,
            config,
            diag,
            sleeper: DefaultSleeper::default(),
        }
    }
}

impl<S: Sleeper> ApiClient<S> {
    /// Replaces the delay used between retry attempts.
    pub fn with_sleeper<T: Sleeper>(self, sleeper: T) -> ApiClient<T> {
        ApiClient {
            http: self.http,
            config: self.config,
            diag: self.diag,
            sleeper,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diag
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url(), path)
    }

    /// Performs one request against `base_url + path`.
    ///
    /// Failures are normalized, never recovered:
    /// - no response → [`ApiError::Network`]
    /// - non-success status → [`ApiError::Http`] with the body decoded
    ///   best-effort (empty object when absent, truncated or malformed)
    /// - success with an unreadable or undecodable body →
    ///   [`ApiError::MalformedResponse`]
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value> {
        let url = self.url_for(path);
        let timeout = options.timeout.unwrap_or_else(|| self.config.timeout());
        self.diag
            .log(format_args!("API Request: {} {url}", options.method));

        // On WASM, reqwest uses AbortController for the timeout.
        let mut builder = self
            .http
            .request(options.method, &url)
            .headers(options.headers)
            .timeout(timeout);
        if let Some(body) = &options.body {
            builder = builder.body(body.to_string());
        }

        let response = builder
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .bytes()
                .await
                .ok()
                .and_then(|bytes| serde_json::from_slice::<Value>(&bytes).ok())
                .unwrap_or_else(|| json!({}));
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|err| {
            ApiError::MalformedResponse(format!("failed to read response body: {err}"))
        })?;
        let data = serde_json::from_slice::<Value>(&bytes).map_err(|err| {
            ApiError::MalformedResponse(format!(
                "invalid response JSON: {err}; body: {}",
                String::from_utf8_lossy(&bytes)
            ))
        })?;
        self.diag.log(format_args!("API Response: {data}"));
        Ok(data)
    }

    /// Performs [`ApiClient::request`] up to `retries` times.
    ///
    /// `None` uses the configured attempt budget. Waits `retry_delay * n` after
    /// the n-th failure; the last failure is returned unchanged. Every failure
    /// kind is retried, client errors included.
    pub async fn request_with_retry(
        &self,
        path: &str,
        options: RequestOptions,
        retries: Option<usize>,
    ) -> Result<Value> {
        let budget = retries.unwrap_or_else(|| self.config.max_retries());
        retry_with_backoff(
            budget,
            self.config.retry_delay(),
            &self.sleeper,
            |attempt, err: &ApiError| {
                self.diag
                    .log(format_args!("Retry {attempt}/{budget} for {path}: {err}"));
            },
            move |_| self.request(path, options.clone()),
        )
        .await
    }

    /// `GET /health`, single attempt.
    pub async fn health(&self) -> Result<HealthStatus> {
        let value = self
            .request(Endpoint::Health.path(), RequestOptions::get())
            .await?;
        decode(value)
    }

    /// `POST /login` through the retry wrapper.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let body = serde_json::to_value(LoginRequest { username, password })
            .map_err(|err| ApiError::MalformedResponse(err.to_string()))?;
        let value = self
            .request_with_retry(Endpoint::Login.path(), RequestOptions::post(body), None)
            .await?;
        decode(value)
    }

    /// `GET /banners`: public URLs of uploaded banners.
    pub async fn banners(&self) -> Result<Vec<String>> {
        let value = self
            .request_with_retry(Endpoint::Banners.path(), RequestOptions::get(), None)
            .await?;
        Ok(decode::<BannersResponse>(value)?.banners)
    }

    /// Absolute URL of an uploaded file.
    pub fn upload_url(&self, filename: &str) -> String {
        self.url_for(&format!(
            "{}/{}",
            Endpoint::Uploads.path(),
            urlencoding::encode(filename)
        ))
    }

    pub async fn participants(&self) -> Result<Vec<Participant>> {
        let value = self
            .request_with_retry(Endpoint::Participants.path(), RequestOptions::get(), None)
            .await?;
        Ok(decode::<ParticipantsResponse>(value)?.participants)
    }

    /// Registers a participant after validating it locally.
    ///
    /// Invalid input fails with [`ApiError::Validation`] without a request.
    pub async fn add_participant(&self, participant: &Participant) -> Result<Participant> {
        let participant = self.prepare_participant(participant)?;
        let body = serde_json::to_value(&participant)
            .map_err(|err| ApiError::MalformedResponse(err.to_string()))?;
        let value = self
            .request_with_retry(
                Endpoint::Participants.path(),
                RequestOptions::post(body),
                None,
            )
            .await?;
        Ok(decode::<AddParticipantResponse>(value)?.participant)
    }

    pub async fn cms_sections(&self) -> Result<Vec<SectionSummary>> {
        let value = self
            .request_with_retry(Endpoint::CmsSections.path(), RequestOptions::get(), None)
            .await?;
        Ok(decode::<SectionsResponse>(value)?.sections)
    }

    pub async fn cms_content(&self, section: &str) -> Result<SectionContent> {
        let path = format!(
            "{}/{}",
            Endpoint::CmsContent.path(),
            urlencoding::encode(section.trim())
        );
        let value = self
            .request_with_retry(&path, RequestOptions::get(), None)
            .await?;
        let content = decode::<ContentResponse>(value)?;
        Ok(SectionContent {
            section: section.trim().to_owned(),
            content: content.content,
            metadata: content.metadata,
            html: content.html,
        })
    }

    /// Trims fields and applies the sign-up rules the backend enforces.
    fn prepare_participant(&self, participant: &Participant) -> Result<Participant> {
        let rules = self.config.validation();
        let limits = self.config.limits();
        let prepared = Participant {
            name: participant.name.trim().to_owned(),
            email: participant.email.trim().to_owned(),
            message: participant.message.trim().to_owned(),
            banner: participant.banner.clone(),
        };

        let mut errors = Vec::new();
        let name_len = prepared.name.chars().count();
        if name_len < rules.min_name_length {
            errors.push(format!(
                "Name must be at least {} characters long",
                rules.min_name_length
            ));
        } else if name_len > rules.max_name_length {
            errors.push(format!(
                "Name must be at most {} characters long",
                rules.max_name_length
            ));
        }
        if !prepared.email.is_empty() && !rules.is_valid_email(&prepared.email) {
            errors.push("Invalid email format".to_owned());
        }
        if prepared.message.chars().count() > limits.max_message_length {
            errors.push(format!(
                "Message must be less than {} characters",
                limits.max_message_length
            ));
        }

        if errors.is_empty() {
            Ok(prepared)
        } else {
            Err(ApiError::Validation(errors.join("; ")))
        }
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|err| ApiError::MalformedResponse(format!("unexpected response shape: {err}")))
}
