use builder_core::{AppViewModel, OutputView, PLACEHOLDER_HINT, PLACEHOLDER_TITLE};

use super::constants::*;

/// Renders the whole screen as lines of text.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    let rule = "─".repeat(PANEL_WIDTH);

    lines.push(rule.clone());
    lines.push(format!("Subject:     {}", field_or(&view.subject, SUBJECT_PLACEHOLDER)));
    lines.push(format!(
        "Description: {}",
        field_or(&view.description, DESCRIPTION_PLACEHOLDER)
    ));
    lines.push(if view.submit_enabled {
        "[ Generate Resource ]".to_string()
    } else {
        "[ Generating... ]".to_string()
    });
    lines.push(rule.clone());
    lines.push("Generated Resource".to_string());
    if view.actions_enabled {
        lines.push(action_bar(view));
    }
    lines.push(rule.clone());

    match &view.output {
        OutputView::Placeholder => {
            lines.push(PLACEHOLDER_TITLE.to_string());
            lines.push(PLACEHOLDER_HINT.to_string());
        }
        OutputView::Loading => lines.extend(skeleton()),
        OutputView::Error(message) => lines.push(format!("! {message}")),
        // Verbatim; the resource's own line breaks and indentation are kept.
        OutputView::Resource(text) => lines.extend(text.split('\n').map(str::to_string)),
    }

    lines.push(rule);
    lines
}

fn field_or(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        format!("({placeholder})")
    } else {
        value.replace('\n', "\n             ")
    }
}

fn action_bar(view: &AppViewModel) -> String {
    let share = if view.copied && view.share_label != "Share" {
        "[✓ Copied]".to_string()
    } else {
        format!("[{}]", view.share_label)
    };
    let copy = if view.copied { "[✓ Copied]" } else { "[Copy]" };
    format!("{share} {copy} [Email] [Print]")
}

fn skeleton() -> Vec<String> {
    SKELETON_BARS
        .iter()
        .map(|eighths| "░".repeat(PANEL_WIDTH * eighths / 8))
        .collect()
}
