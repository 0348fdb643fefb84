pub const PLACEHOLDER_TITLE: &str = "Your generated resource will appear here.";
pub const PLACEHOLDER_HINT: &str = "Describe what you need and run \"Generate Resource\".";

/// What the output panel shows. Exactly one of these is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputView {
    #[default]
    Placeholder,
    /// Skeleton placeholder while the request is in flight.
    Loading,
    Error(String),
    /// Resource text, verbatim.
    Resource(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub subject: String,
    pub description: String,
    pub output: OutputView,
    pub submit_enabled: bool,
    pub actions_enabled: bool,
    pub share_label: &'static str,
    pub copied: bool,
    pub dirty: bool,
}
