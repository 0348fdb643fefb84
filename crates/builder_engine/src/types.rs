use std::fmt;

use thiserror::Error;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    GenerationCompleted {
        request_id: RequestId,
        result: Result<String, GenerationError>,
    },
}

/// The access key for the generation service. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for blank keys.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            None
        } else {
            Some(Self(key))
        }
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential")
            .field(&builder_logging::redact(&self.0))
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    ConfigurationMissing,
    InvalidCredential,
    EmptyResponse,
    ServiceUnavailable,
}

impl fmt::Display for GenerationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationErrorKind::ConfigurationMissing => write!(f, "configuration missing"),
            GenerationErrorKind::InvalidCredential => write!(f, "invalid credential"),
            GenerationErrorKind::EmptyResponse => write!(f, "empty response"),
            GenerationErrorKind::ServiceUnavailable => write!(f, "service unavailable"),
        }
    }
}

/// A failed generation. `message` is meant for display, `detail` for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GenerationError {
    pub kind: GenerationErrorKind,
    pub message: String,
    pub detail: Option<String>,
}

impl GenerationError {
    pub(crate) fn new(kind: GenerationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub(crate) fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn configuration_missing() -> Self {
        Self::new(
            GenerationErrorKind::ConfigurationMissing,
            "The AI service is not configured. Set the API_KEY environment variable and try again.",
        )
    }

    pub fn invalid_credential() -> Self {
        Self::new(
            GenerationErrorKind::InvalidCredential,
            "The configured API key is invalid. Please check and update it.",
        )
    }

    pub fn empty_response() -> Self {
        Self::new(
            GenerationErrorKind::EmptyResponse,
            "Received an empty response from the AI.",
        )
    }

    pub fn service_unavailable() -> Self {
        Self::new(
            GenerationErrorKind::ServiceUnavailable,
            "Failed to generate the resource. The AI service may be temporarily unavailable.",
        )
    }
}
