//! Resource builder core: pure state machine and view-model helpers.
mod effect;
mod mailto;
mod msg;
mod outcome;
mod request;
mod state;
mod update;
mod view_model;

pub use effect::{Action, Effect};
pub use mailto::{compose_mailto, EMAIL_SUBJECT, SHARE_TITLE};
pub use msg::Msg;
pub use outcome::{FailureKind, GenerationOutcome};
pub use request::{compose_prompt, validate_request, ResourceRequest, ValidationError};
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, OutputView, PLACEHOLDER_HINT, PLACEHOLDER_TITLE};
