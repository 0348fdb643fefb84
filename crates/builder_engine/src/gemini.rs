use std::time::Duration;

use builder_logging::{builder_debug, builder_error, builder_info, builder_warn};
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::instruction::{MODEL, SYSTEM_INSTRUCTION, TEMPERATURE, TOP_P};
use crate::wire::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use crate::{Credential, GenerationError, ResourceGenerator};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const API_KEY_HEADER: &str = "x-goog-api-key";
const INVALID_KEY_REASON: &str = "API_KEY_INVALID";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid base url {url:?}: {reason}")]
pub struct InvalidBaseUrl {
    pub url: String,
    pub reason: String,
}

/// Parses a service base URL. Only absolute http(s) URLs with a host qualify.
pub fn parse_base_url(raw: &str) -> Result<Url, InvalidBaseUrl> {
    let raw = raw.trim();
    let invalid = |reason: String| InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_string()));
    }
    Ok(url)
}

#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub base_url: Url,
    /// `None` leaves the request unbounded.
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl GenerationSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

/// Generation client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    endpoint: Url,
    credential: Option<Credential>,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(
        settings: GenerationSettings,
        credential: Option<Credential>,
    ) -> Result<Self, GenerationError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|err| {
            GenerationError::service_unavailable().with_detail(err.to_string())
        })?;
        let endpoint = endpoint_for(&settings.base_url).map_err(|err| {
            GenerationError::service_unavailable().with_detail(err.to_string())
        })?;

        Ok(Self {
            endpoint,
            credential,
            http,
        })
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }
}

/// `{base}/v1beta/models/{MODEL}:generateContent`, keeping any path prefix of
/// the base (e.g. a proxy mounted under `/gemini`).
fn endpoint_for(base: &Url) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&format!("v1beta/models/{MODEL}:generateContent"))
}

#[async_trait::async_trait]
impl ResourceGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let Some(credential) = &self.credential else {
            builder_warn!("Generation requested without a configured API key");
            return Err(GenerationError::configuration_missing());
        };

        builder_info!(
            "Generating resource model={} prompt_len={}",
            MODEL,
            prompt.len()
        );

        let body = GenerateContentRequest::new(SYSTEM_INSTRUCTION, prompt, TEMPERATURE, TOP_P);
        let response = self
            .http
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, credential.expose())
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let raw = response.text().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let err = classify_failure(status, &raw);
            builder_error!(
                "Generation failed status={} kind={} detail={:?}",
                status,
                err.kind,
                err.detail
            );
            return Err(err);
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&raw).map_err(|err| {
            builder_error!("Could not decode generation response: {}", err);
            GenerationError::service_unavailable().with_detail(err.to_string())
        })?;

        let text = parsed.text();
        if text.is_empty() {
            builder_warn!("Generation returned no text");
            return Err(GenerationError::empty_response());
        }

        builder_debug!("Generation succeeded text_len={}", text.len());
        Ok(text)
    }
}

/// Maps a non-success response onto the error taxonomy using the service's
/// structured error body and the HTTP status, never the message wording.
fn classify_failure(status: StatusCode, body: &str) -> GenerationError {
    let service_error = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error);

    let detail = match &service_error {
        Some(err) => format!(
            "{} {}: {}",
            err.code.unwrap_or_else(|| status.as_u16()),
            err.status.as_deref().unwrap_or("UNKNOWN"),
            err.message.as_deref().unwrap_or("")
        ),
        None => status.to_string(),
    };

    let reason_invalid = service_error
        .as_ref()
        .is_some_and(|err| err.has_reason(INVALID_KEY_REASON));
    let auth_status = match status {
        StatusCode::UNAUTHORIZED => true,
        StatusCode::FORBIDDEN => service_error
            .as_ref()
            .and_then(|err| err.status.as_deref())
            .is_some_and(|s| s == "PERMISSION_DENIED" || s == "UNAUTHENTICATED"),
        _ => false,
    };

    if reason_invalid || auth_status {
        GenerationError::invalid_credential().with_detail(detail)
    } else {
        GenerationError::service_unavailable().with_detail(detail)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> GenerationError {
    builder_error!("Transport failure talking to the AI service: {}", err);
    GenerationError::service_unavailable().with_detail(err.to_string())
}
