use crate::{
    compose_mailto, validate_request, Action, AppState, Effect, FailureKind, GenerationOutcome,
    Msg, SHARE_TITLE,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SubjectChanged(subject) => {
            state.set_subject(subject);
            Vec::new()
        }
        Msg::DescriptionChanged(description) => {
            state.set_description(description);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // The trigger is disabled while loading.
            if state.is_loading() {
                return (state, Vec::new());
            }
            match validate_request(state.subject(), state.description()) {
                Ok(request) => {
                    let request_id = state.begin_generation();
                    vec![Effect::Generate {
                        request_id,
                        prompt: request.prompt(),
                    }]
                }
                Err(err) => {
                    state.set_validation_error(err.message());
                    Vec::new()
                }
            }
        }
        Msg::GenerationFinished {
            request_id,
            outcome,
        } => {
            if state.in_flight() != Some(request_id) {
                return (state, Vec::new());
            }
            match outcome {
                GenerationOutcome::Text(text) if !text.is_empty() => state.finish_with_text(text),
                GenerationOutcome::Text(_) => state
                    .finish_with_error(FailureKind::EmptyResponse.default_message().to_string()),
                GenerationOutcome::Failure { message, .. } => state.finish_with_error(message),
            }
            Vec::new()
        }
        Msg::CopyClicked => action_effect(&state, Action::Copy),
        Msg::EmailClicked => action_effect(&state, Action::Email),
        Msg::PrintClicked => action_effect(&state, Action::Print),
        Msg::ShareClicked => action_effect(&state, Action::Share),
        Msg::CopyConfirmed => {
            state.set_copied(true);
            Vec::new()
        }
        Msg::CopyFeedbackExpired => {
            state.set_copied(false);
            Vec::new()
        }
        Msg::ActionFailed { .. } => Vec::new(),
    };

    (state, effects)
}

fn action_effect(state: &AppState, action: Action) -> Vec<Effect> {
    if !state.actions_enabled() {
        return Vec::new();
    }
    let text = state.generated_text().to_string();
    let effect = match action {
        Action::Copy => Effect::CopyToClipboard { text },
        Action::Email => Effect::OpenMailto {
            uri: compose_mailto(&text),
        },
        Action::Print => Effect::Print { text },
        Action::Share => Effect::Share {
            title: SHARE_TITLE.to_string(),
            text,
        },
    };
    vec![effect]
}
