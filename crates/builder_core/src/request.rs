use std::fmt;

/// A validated subject/description pair, ready to be turned into a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    subject: String,
    description: String,
}

impl ResourceRequest {
    pub fn prompt(&self) -> String {
        compose_prompt(&self.subject, &self.description)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingSubject,
    MissingDescription,
    MissingBoth,
}

impl ValidationError {
    pub fn message(self) -> &'static str {
        match self {
            ValidationError::MissingSubject => {
                "Please enter a subject for the resource you want to create."
            }
            ValidationError::MissingDescription => {
                "Please enter a description for the resource you want to create."
            }
            ValidationError::MissingBoth => {
                "Please enter a subject and a description for the resource you want to create."
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Both fields must be non-empty after trimming. The stored values are trimmed.
pub fn validate_request(
    subject: &str,
    description: &str,
) -> Result<ResourceRequest, ValidationError> {
    let subject = subject.trim();
    let description = description.trim();
    match (subject.is_empty(), description.is_empty()) {
        (true, true) => Err(ValidationError::MissingBoth),
        (true, false) => Err(ValidationError::MissingSubject),
        (false, true) => Err(ValidationError::MissingDescription),
        (false, false) => Ok(ResourceRequest {
            subject: subject.to_string(),
            description: description.to_string(),
        }),
    }
}

pub fn compose_prompt(subject: &str, description: &str) -> String {
    format!("Subject: {subject}\n\nResource Description: {description}")
}
