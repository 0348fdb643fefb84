//! OS integrations behind the copy, email, print and share actions.

use std::io::{self, Write};
use std::process::{Command, ExitStatus, Stdio};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use builder_logging::builder_debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("`{command}` exited with {status}")]
    CommandFailed { command: String, status: ExitStatus },
}

/// Capabilities the output actions need from the host platform.
pub trait Platform: Send + Sync {
    fn copy_to_clipboard(&self, text: &str) -> Result<(), PlatformError>;
    fn open_mailto(&self, uri: &str) -> Result<(), PlatformError>;
    fn print(&self, document: &str) -> Result<(), PlatformError>;

    /// The native share sheet, if the platform has one.
    fn share_sheet(&self) -> Option<&dyn ShareSheet> {
        None
    }
}

pub trait ShareSheet: Send + Sync {
    fn share(&self, title: &str, text: &str) -> Result<(), PlatformError>;
}

/// Platform for a plain terminal session. It has no share sheet.
#[derive(Debug, Default)]
pub struct TerminalPlatform;

impl TerminalPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Platform for TerminalPlatform {
    /// Uses the OSC 52 escape sequence, which most terminal emulators
    /// (including over SSH) forward to the system clipboard.
    fn copy_to_clipboard(&self, text: &str) -> Result<(), PlatformError> {
        let sequence = osc52_sequence(text);
        let mut stdout = io::stdout().lock();
        stdout.write_all(sequence.as_bytes())?;
        stdout.flush()?;
        builder_debug!("Wrote {} bytes to the clipboard via OSC 52", text.len());
        Ok(())
    }

    fn open_mailto(&self, uri: &str) -> Result<(), PlatformError> {
        let (program, args) = url_opener(uri);
        run_command(program, &args, None)
    }

    fn print(&self, document: &str) -> Result<(), PlatformError> {
        run_command("lpr", &[], Some(document))
    }
}

pub(crate) fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

#[cfg(target_os = "windows")]
fn url_opener(uri: &str) -> (&'static str, Vec<String>) {
    (
        "cmd",
        vec![
            "/C".to_string(),
            "start".to_string(),
            String::new(),
            uri.to_string(),
        ],
    )
}

#[cfg(target_os = "macos")]
fn url_opener(uri: &str) -> (&'static str, Vec<String>) {
    ("open", vec![uri.to_string()])
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn url_opener(uri: &str) -> (&'static str, Vec<String>) {
    ("xdg-open", vec![uri.to_string()])
}

fn run_command(program: &str, args: &[String], stdin: Option<&str>) -> Result<(), PlatformError> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });

    let mut child = command.spawn()?;
    if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
        if let Err(err) = pipe.write_all(input.as_bytes()) {
            drop(pipe);
            // Reap the child before reporting the write failure.
            let _ = child.kill();
            let _ = child.wait();
            return Err(err.into());
        }
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(PlatformError::CommandFailed {
            command: program.to_string(),
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn osc52_wraps_base64_payload() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn terminal_has_no_share_sheet() {
        assert!(TerminalPlatform::new().share_sheet().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn command_receives_stdin_and_reports_success() {
        assert!(run_command("cat", &[], Some("hello")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn command_that_stops_reading_is_reported_and_reaped() {
        // `true` exits without reading, so writing more than a pipe buffer fails.
        let document = "x".repeat(4 * 1024 * 1024);
        let err = run_command("true", &[], Some(&document)).unwrap_err();
        assert!(matches!(err, PlatformError::Io(_)));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_command_failed() {
        let err = run_command("false", &[], None).unwrap_err();
        assert!(matches!(err, PlatformError::CommandFailed { .. }));
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    #[test]
    fn url_opener_passes_uri_through() {
        let (program, args) = url_opener("mailto:?subject=x");
        assert_eq!(program, "xdg-open");
        assert_eq!(args, vec!["mailto:?subject=x".to_string()]);
    }
}
