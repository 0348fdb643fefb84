use std::fmt;

/// Failure categories the controller can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    ConfigurationMissing,
    InvalidCredential,
    EmptyResponse,
    ServiceUnavailable,
}

impl FailureKind {
    /// The message shown when no more specific text accompanies the failure.
    pub fn default_message(self) -> &'static str {
        match self {
            FailureKind::Validation => {
                "Please enter a subject and a description for the resource you want to create."
            }
            FailureKind::ConfigurationMissing => {
                "The AI service is not configured. Set the API_KEY environment variable and try again."
            }
            FailureKind::InvalidCredential => {
                "The configured API key is invalid. Please check and update it."
            }
            FailureKind::EmptyResponse => "Received an empty response from the AI.",
            FailureKind::ServiceUnavailable => {
                "Failed to generate the resource. The AI service may be temporarily unavailable."
            }
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Validation => write!(f, "validation error"),
            FailureKind::ConfigurationMissing => write!(f, "configuration missing"),
            FailureKind::InvalidCredential => write!(f, "invalid credential"),
            FailureKind::EmptyResponse => write!(f, "empty response"),
            FailureKind::ServiceUnavailable => write!(f, "service unavailable"),
        }
    }
}

/// Result of one generation round trip, as seen by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Text(String),
    Failure { kind: FailureKind, message: String },
}

impl GenerationOutcome {
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }
}
