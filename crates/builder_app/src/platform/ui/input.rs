use builder_core::Msg;

/// One line typed at the prompt, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Msg(Msg),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Empty,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Err(InputError::Empty);
    }

    let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest),
        None => (trimmed, ""),
    };

    let command = match keyword.to_ascii_lowercase().as_str() {
        "subject" | "s" => Command::Msg(Msg::SubjectChanged(rest.to_string())),
        "description" | "describe" | "d" => {
            Command::Msg(Msg::DescriptionChanged(unescape_newlines(rest)))
        }
        "generate" | "g" => Command::Msg(Msg::SubmitClicked),
        "copy" => Command::Msg(Msg::CopyClicked),
        "email" => Command::Msg(Msg::EmailClicked),
        "print" => Command::Msg(Msg::PrintClicked),
        "share" => Command::Msg(Msg::ShareClicked),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(InputError::Unknown(other.to_string())),
    };
    Ok(command)
}

/// Turns the two-character sequence `\n` into a line break; `\\` stays a backslash.
fn unescape_newlines(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
