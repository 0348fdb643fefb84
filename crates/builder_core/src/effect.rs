/// Side effects requested by [`crate::update`]; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the composed prompt to the generation client.
    Generate { request_id: u64, prompt: String },
    CopyToClipboard { text: String },
    OpenMailto { uri: String },
    Print { text: String },
    /// Hand the resource to the platform share sheet. Platforms without one
    /// fall back to a clipboard copy.
    Share { title: String, text: String },
}

/// Output actions offered once a resource is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Copy,
    Email,
    Print,
    Share,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Copy => "copy",
            Action::Email => "email",
            Action::Print => "print",
            Action::Share => "share",
        }
    }
}
