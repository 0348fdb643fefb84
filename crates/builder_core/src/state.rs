use crate::view_model::{AppViewModel, OutputView};

/// The single UI state object; mutated only through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    subject: String,
    description: String,
    generated_text: String,
    is_loading: bool,
    error: Option<String>,
    copied: bool,
    share_supported: bool,
    next_request_id: u64,
    in_flight: Option<u64>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State for a platform that does (or does not) offer a share sheet.
    pub fn with_share_support(share_supported: bool) -> Self {
        Self {
            share_supported,
            ..Self::default()
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn generated_text(&self) -> &str {
        &self.generated_text
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// Copy/email/print/share are offered only for a finished, error-free result.
    pub fn actions_enabled(&self) -> bool {
        !self.is_loading && self.error.is_none() && !self.generated_text.is_empty()
    }

    pub fn view(&self) -> AppViewModel {
        let output = if self.is_loading {
            OutputView::Loading
        } else if let Some(message) = &self.error {
            OutputView::Error(message.clone())
        } else if !self.generated_text.is_empty() {
            OutputView::Resource(self.generated_text.clone())
        } else {
            OutputView::Placeholder
        };

        AppViewModel {
            subject: self.subject.clone(),
            description: self.description.clone(),
            output,
            submit_enabled: !self.is_loading,
            actions_enabled: self.actions_enabled(),
            share_label: if self.share_supported {
                "Share"
            } else {
                "Copy to Clipboard"
            },
            copied: self.copied,
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_subject(&mut self, subject: String) {
        if self.subject != subject {
            self.subject = subject;
            self.dirty = true;
        }
    }

    pub(crate) fn set_description(&mut self, description: String) {
        if self.description != description {
            self.description = description;
            self.dirty = true;
        }
    }

    pub(crate) fn set_validation_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.dirty = true;
    }

    /// Enters the loading state and returns the id of the new request.
    pub(crate) fn begin_generation(&mut self) -> u64 {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.in_flight = Some(request_id);
        self.is_loading = true;
        self.error = None;
        self.generated_text.clear();
        self.copied = false;
        self.dirty = true;
        request_id
    }

    pub(crate) fn finish_with_text(&mut self, text: String) {
        self.generated_text = text;
        self.end_generation();
    }

    pub(crate) fn finish_with_error(&mut self, message: String) {
        self.error = Some(message);
        self.end_generation();
    }

    fn end_generation(&mut self) {
        self.in_flight = None;
        self.is_loading = false;
        self.dirty = true;
    }

    pub(crate) fn set_copied(&mut self, copied: bool) {
        if self.copied != copied {
            self.copied = copied;
            self.dirty = true;
        }
    }
}
