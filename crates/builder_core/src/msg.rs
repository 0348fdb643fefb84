#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the subject field.
    SubjectChanged(String),
    /// User edited the resource description.
    DescriptionChanged(String),
    /// User pressed "Generate Resource".
    SubmitClicked,
    /// The generation client finished the request with the given id.
    GenerationFinished {
        request_id: u64,
        outcome: crate::GenerationOutcome,
    },
    CopyClicked,
    EmailClicked,
    PrintClicked,
    ShareClicked,
    /// The clipboard accepted the resource text.
    CopyConfirmed,
    /// The "copied" check mark should disappear again.
    CopyFeedbackExpired,
    /// A fire-and-forget platform action failed. Logged, never displayed.
    ActionFailed {
        action: crate::Action,
        reason: String,
    },
}
