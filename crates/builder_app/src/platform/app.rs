use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use builder_core::{update, AppState, Msg};
use builder_engine::GeminiClient;
use builder_logging::{builder_debug, builder_info, builder_warn};

use super::config::AppConfig;
use super::desktop::{Platform, TerminalPlatform};
use super::effects::EffectRunner;
use super::logging;
use super::ui::constants::{APP_TAGLINE, APP_TITLE, DESCRIPTION_HINT, HELP_TEXT};
use super::ui::input::{parse_command, Command, InputError};
use super::ui::render;

/// Everything the event loop reacts to.
#[derive(Debug)]
pub enum LoopEvent {
    Msg(Msg),
    Help,
    Unknown(String),
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::load(Path::new(".")).context("failed to load configuration")?;
    logging::initialize(config.log_destination, config.log_level);
    builder_info!("Starting resource builder {}", startup_summary(&config));

    let platform: Arc<dyn Platform> = Arc::new(TerminalPlatform::new());
    let client = GeminiClient::new(config.generation_settings(), config.credential.clone())
        .context("failed to build the generation client")?;
    if !client.has_credential() {
        builder_warn!("No API key configured; generation will fail until one is set");
    }

    let (loop_tx, loop_rx) = mpsc::channel::<LoopEvent>();
    let runner = EffectRunner::new(Arc::new(client), platform.clone(), loop_tx.clone())
        .context("failed to start the generation engine")?;

    spawn_input_reader(loop_tx);

    let mut stdout = io::stdout();
    writeln!(stdout, "{APP_TITLE}\n{APP_TAGLINE}\n\n{DESCRIPTION_HINT}\n\n{HELP_TEXT}")?;

    let mut state = AppState::with_share_support(platform.share_sheet().is_some());
    print_view(&mut stdout, &state)?;

    while let Ok(event) = loop_rx.recv() {
        match event {
            LoopEvent::Msg(msg) => {
                builder_debug!("dispatch {}", msg_name(&msg));
                let (next, effects) = update(state, msg);
                state = next;
                runner.enqueue(effects);
                if state.consume_dirty() {
                    print_view(&mut stdout, &state)?;
                }
            }
            LoopEvent::Help => writeln!(stdout, "{HELP_TEXT}")?,
            LoopEvent::Unknown(word) => {
                writeln!(stdout, "Unknown command {word:?}. Type `help` for a list.")?
            }
            LoopEvent::Quit => break,
        }
    }

    builder_info!("Resource builder exiting");
    Ok(())
}

/// Startup settings for the log. The key itself never appears, only whether one is set.
fn startup_summary(config: &AppConfig) -> String {
    format!(
        "api_key_configured={} base_url={} timeout={:?}",
        config.credential.is_some(),
        config.base_url,
        config.request_timeout
    )
}

fn spawn_input_reader(tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        forward_input(stdin.lock(), &tx);
        // End of input behaves like `quit`.
        let _ = tx.send(LoopEvent::Quit);
    });
}

/// Forwards one event per input line until end of input, a read error, or a
/// closed loop. Lines that are not valid UTF-8 are decoded lossily.
fn forward_input(input: impl BufRead, tx: &mpsc::Sender<LoopEvent>) {
    for line in input.split(b'\n') {
        let bytes = match line {
            Ok(bytes) => bytes,
            Err(err) => {
                builder_warn!("Stopped reading input: {}", err);
                return;
            }
        };
        let line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(err) => {
                builder_warn!("Input line is not valid UTF-8; replacing invalid bytes");
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };
        let event = match parse_command(&line) {
            Ok(Command::Msg(msg)) => LoopEvent::Msg(msg),
            Ok(Command::Help) => LoopEvent::Help,
            Ok(Command::Quit) => LoopEvent::Quit,
            Err(InputError::Empty) => continue,
            Err(InputError::Unknown(word)) => LoopEvent::Unknown(word),
        };
        if tx.send(event).is_err() {
            return;
        }
    }
}

fn print_view(out: &mut impl Write, state: &AppState) -> io::Result<()> {
    for line in render::render(&state.view()) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

// Message names only; field contents may be a whole resource.
fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::SubjectChanged(_) => "SubjectChanged",
        Msg::DescriptionChanged(_) => "DescriptionChanged",
        Msg::SubmitClicked => "SubmitClicked",
        Msg::GenerationFinished { .. } => "GenerationFinished",
        Msg::CopyClicked => "CopyClicked",
        Msg::EmailClicked => "EmailClicked",
        Msg::PrintClicked => "PrintClicked",
        Msg::ShareClicked => "ShareClicked",
        Msg::CopyConfirmed => "CopyConfirmed",
        Msg::CopyFeedbackExpired => "CopyFeedbackExpired",
        Msg::ActionFailed { .. } => "ActionFailed",
    }
}
