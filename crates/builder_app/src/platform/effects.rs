use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use builder_core::{Action, Effect, FailureKind, GenerationOutcome, Msg};
use builder_engine::{
    EngineEvent, EngineHandle, EventSink, GenerationError, GenerationErrorKind, ResourceGenerator,
};
use builder_logging::{builder_info, builder_warn};
use chrono::{DateTime, Local};

use super::app::LoopEvent;
use super::desktop::{Platform, PlatformError};

/// How long the "copied" check mark stays visible.
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

/// Executes effects produced by `update` and feeds their outcomes back into
/// the event loop as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    platform: Arc<dyn Platform>,
    loop_tx: mpsc::Sender<LoopEvent>,
    copy_feedback: Duration,
}

impl EffectRunner {
    pub fn new(
        generator: Arc<dyn ResourceGenerator>,
        platform: Arc<dyn Platform>,
        loop_tx: mpsc::Sender<LoopEvent>,
    ) -> std::io::Result<Self> {
        let sink = Arc::new(LoopSink {
            tx: loop_tx.clone(),
        });
        let engine = EngineHandle::new(generator, sink)?;
        Ok(Self {
            engine,
            platform,
            loop_tx,
            copy_feedback: COPY_FEEDBACK,
        })
    }

    #[cfg(test)]
    fn with_copy_feedback(mut self, copy_feedback: Duration) -> Self {
        self.copy_feedback = copy_feedback;
        self
    }

    /// Generation goes to the engine. Each platform action runs on its own
    /// thread and reports back through the loop channel.
    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Generate { request_id, prompt } => {
                    builder_info!(
                        "Generate request_id={} prompt_len={}",
                        request_id,
                        prompt.len()
                    );
                    self.engine.generate(request_id, prompt);
                }
                Effect::CopyToClipboard { text } => {
                    self.spawn_action(Action::Copy, move |ctx| ctx.copy(Action::Copy, &text))
                }
                Effect::OpenMailto { uri } => self.spawn_action(Action::Email, move |ctx| {
                    let result = ctx.platform.open_mailto(&uri);
                    ctx.report(Action::Email, result);
                }),
                Effect::Print { text } => self.spawn_action(Action::Print, move |ctx| {
                    let document = printable_document(&text, Local::now());
                    let result = ctx.platform.print(&document);
                    ctx.report(Action::Print, result);
                }),
                Effect::Share { title, text } => self.spawn_action(Action::Share, move |ctx| {
                    match ctx.platform.share_sheet() {
                        Some(sheet) => {
                            let result = sheet.share(&title, &text);
                            ctx.report(Action::Share, result);
                        }
                        None => {
                            builder_info!("No share sheet available; copying instead");
                            ctx.copy(Action::Share, &text);
                        }
                    }
                }),
            }
        }
    }

    fn spawn_action(&self, action: Action, job: impl FnOnce(ActionContext) + Send + 'static) {
        let ctx = ActionContext {
            platform: self.platform.clone(),
            loop_tx: self.loop_tx.clone(),
            copy_feedback: self.copy_feedback,
        };
        let spawned = thread::Builder::new()
            .name(format!("action-{}", action.label()))
            .spawn(move || job(ctx));
        if let Err(err) = spawned {
            builder_warn!("{} could not start: {}", action.label(), err);
            let _ = self.loop_tx.send(LoopEvent::Msg(Msg::ActionFailed {
                action,
                reason: err.to_string(),
            }));
        }
    }
}

/// What an action thread needs to reach the platform and report back.
struct ActionContext {
    platform: Arc<dyn Platform>,
    loop_tx: mpsc::Sender<LoopEvent>,
    copy_feedback: Duration,
}

impl ActionContext {
    fn copy(&self, action: Action, text: &str) {
        match self.platform.copy_to_clipboard(text) {
            Ok(()) => {
                builder_info!("{} completed", action.label());
                let _ = self.loop_tx.send(LoopEvent::Msg(Msg::CopyConfirmed));
                thread::sleep(self.copy_feedback);
                let _ = self.loop_tx.send(LoopEvent::Msg(Msg::CopyFeedbackExpired));
            }
            Err(err) => self.report(action, Err(err)),
        }
    }

    fn report(&self, action: Action, result: Result<(), PlatformError>) {
        match result {
            Ok(()) => builder_info!("{} completed", action.label()),
            Err(err) => {
                builder_warn!("{} failed: {}", action.label(), err);
                let _ = self.loop_tx.send(LoopEvent::Msg(Msg::ActionFailed {
                    action,
                    reason: err.to_string(),
                }));
            }
        }
    }
}

struct LoopSink {
    tx: mpsc::Sender<LoopEvent>,
}

impl EventSink for LoopSink {
    fn emit(&self, event: EngineEvent) {
        match event {
            EngineEvent::GenerationCompleted { request_id, result } => {
                let outcome = map_result(result);
                let _ = self.tx.send(LoopEvent::Msg(Msg::GenerationFinished {
                    request_id,
                    outcome,
                }));
            }
        }
    }
}

fn map_result(result: Result<String, GenerationError>) -> GenerationOutcome {
    match result {
        Ok(text) => GenerationOutcome::Text(text),
        Err(err) => {
            builder_warn!(
                "Generation failed kind={} detail={}",
                err.kind,
                err.detail.as_deref().unwrap_or("-")
            );
            GenerationOutcome::failure(map_kind(err.kind), err.message)
        }
    }
}

fn map_kind(kind: GenerationErrorKind) -> FailureKind {
    match kind {
        GenerationErrorKind::ConfigurationMissing => FailureKind::ConfigurationMissing,
        GenerationErrorKind::InvalidCredential => FailureKind::InvalidCredential,
        GenerationErrorKind::EmptyResponse => FailureKind::EmptyResponse,
        GenerationErrorKind::ServiceUnavailable => FailureKind::ServiceUnavailable,
    }
}

fn printable_document(text: &str, printed_at: DateTime<Local>) -> String {
    format!(
        "Educational Resource\nPrinted {}\n\n{}",
        printed_at.format("%Y-%m-%d %H:%M"),
        text
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Instant;

    use chrono::TimeZone;

    use crate::platform::desktop::ShareSheet;
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Copy(String),
        Mail(String),
        Print(String),
        Share(String, String),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<Call>>,
    }

    impl Recorder {
        fn push(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        /// Waits until at least `count` calls arrived; actions run on their own threads.
        fn wait_for(&self, count: usize) -> Vec<Call> {
            let deadline = Instant::now() + Duration::from_secs(5);
            loop {
                let calls = self.calls();
                if calls.len() >= count || Instant::now() > deadline {
                    return calls;
                }
                thread::sleep(Duration::from_millis(5));
            }
        }
    }

    struct FakePlatform {
        recorder: Arc<Recorder>,
        sheet: Option<FakeSheet>,
        fail_copy: bool,
        print_delay: Duration,
    }

    struct FakeSheet {
        recorder: Arc<Recorder>,
    }

    impl ShareSheet for FakeSheet {
        fn share(&self, title: &str, text: &str) -> Result<(), PlatformError> {
            self.recorder
                .push(Call::Share(title.to_string(), text.to_string()));
            Ok(())
        }
    }

    impl Platform for FakePlatform {
        fn copy_to_clipboard(&self, text: &str) -> Result<(), PlatformError> {
            if self.fail_copy {
                return Err(PlatformError::Io(std::io::Error::other("no clipboard")));
            }
            self.recorder.push(Call::Copy(text.to_string()));
            Ok(())
        }

        fn open_mailto(&self, uri: &str) -> Result<(), PlatformError> {
            self.recorder.push(Call::Mail(uri.to_string()));
            Ok(())
        }

        fn print(&self, document: &str) -> Result<(), PlatformError> {
            thread::sleep(self.print_delay);
            self.recorder.push(Call::Print(document.to_string()));
            Ok(())
        }

        fn share_sheet(&self) -> Option<&dyn ShareSheet> {
            self.sheet.as_ref().map(|sheet| sheet as &dyn ShareSheet)
        }
    }

    struct CannedGenerator;

    #[async_trait::async_trait]
    impl ResourceGenerator for CannedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            if prompt.is_empty() {
                Err(GenerationError::invalid_credential())
            } else {
                Ok(format!("resource for {prompt}"))
            }
        }
    }

    fn runner(
        share: bool,
        fail_copy: bool,
    ) -> (EffectRunner, Arc<Recorder>, mpsc::Receiver<LoopEvent>) {
        runner_with_print_delay(share, fail_copy, Duration::ZERO)
    }

    fn runner_with_print_delay(
        share: bool,
        fail_copy: bool,
        print_delay: Duration,
    ) -> (EffectRunner, Arc<Recorder>, mpsc::Receiver<LoopEvent>) {
        let recorder = Arc::new(Recorder::default());
        let platform = FakePlatform {
            recorder: recorder.clone(),
            sheet: share.then(|| FakeSheet {
                recorder: recorder.clone(),
            }),
            fail_copy,
            print_delay,
        };
        let (tx, rx) = mpsc::channel();
        let runner = EffectRunner::new(Arc::new(CannedGenerator), Arc::new(platform), tx)
            .unwrap()
            .with_copy_feedback(Duration::from_millis(10));
        (runner, recorder, rx)
    }

    fn next_msg(rx: &mpsc::Receiver<LoopEvent>) -> Msg {
        match rx.recv_timeout(Duration::from_secs(5)).expect("loop event") {
            LoopEvent::Msg(msg) => msg,
            _ => panic!("expected a message"),
        }
    }

    #[test]
    fn share_without_sheet_falls_back_to_copy() {
        let (runner, recorder, rx) = runner(false, false);

        runner.enqueue(vec![Effect::Share {
            title: "Educational Resource".to_string(),
            text: "body".to_string(),
        }]);

        assert_eq!(next_msg(&rx), Msg::CopyConfirmed);
        assert_eq!(recorder.calls(), vec![Call::Copy("body".to_string())]);
        assert_eq!(next_msg(&rx), Msg::CopyFeedbackExpired);
    }

    #[test]
    fn share_with_sheet_uses_it() {
        let (runner, recorder, _rx) = runner(true, false);

        runner.enqueue(vec![Effect::Share {
            title: "Educational Resource".to_string(),
            text: "body".to_string(),
        }]);

        assert_eq!(
            recorder.wait_for(1),
            vec![Call::Share(
                "Educational Resource".to_string(),
                "body".to_string()
            )]
        );
    }

    #[test]
    fn mail_and_print_reach_the_platform() {
        let (runner, recorder, _rx) = runner(false, false);

        runner.enqueue(vec![
            Effect::OpenMailto {
                uri: "mailto:?subject=x".to_string(),
            },
            Effect::Print {
                text: "# Plan".to_string(),
            },
        ]);

        let calls = recorder.wait_for(2);
        assert_eq!(calls.len(), 2);
        assert!(calls.contains(&Call::Mail("mailto:?subject=x".to_string())));
        assert!(calls
            .iter()
            .any(|call| matches!(call, Call::Print(doc) if doc.ends_with("\n\n# Plan"))));
    }

    #[test]
    fn slow_print_does_not_block_the_caller() {
        let (runner, recorder, _rx) =
            runner_with_print_delay(false, false, Duration::from_millis(500));

        let started = Instant::now();
        runner.enqueue(vec![Effect::Print {
            text: "# Plan".to_string(),
        }]);
        assert!(started.elapsed() < Duration::from_millis(250));
        assert!(recorder.calls().is_empty());

        assert_eq!(recorder.wait_for(1).len(), 1);
    }

    #[test]
    fn copy_failure_is_reported_not_confirmed() {
        let (runner, _recorder, rx) = runner(false, true);

        runner.enqueue(vec![Effect::CopyToClipboard {
            text: "body".to_string(),
        }]);

        assert!(matches!(
            next_msg(&rx),
            Msg::ActionFailed {
                action: Action::Copy,
                ..
            }
        ));
    }

    #[test]
    fn generation_outcomes_come_back_as_messages() {
        let (runner, _recorder, rx) = runner(false, false);

        runner.enqueue(vec![Effect::Generate {
            request_id: 3,
            prompt: "Math".to_string(),
        }]);
        assert_eq!(
            next_msg(&rx),
            Msg::GenerationFinished {
                request_id: 3,
                outcome: GenerationOutcome::Text("resource for Math".to_string()),
            }
        );

        runner.enqueue(vec![Effect::Generate {
            request_id: 4,
            prompt: String::new(),
        }]);
        assert_eq!(
            next_msg(&rx),
            Msg::GenerationFinished {
                request_id: 4,
                outcome: GenerationOutcome::failure(
                    FailureKind::InvalidCredential,
                    "The configured API key is invalid. Please check and update it."
                ),
            }
        );
    }

    #[test]
    fn printable_document_has_header() {
        let printed_at = Local
            .with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
            .single()
            .unwrap();
        assert_eq!(
            printable_document("Body", printed_at),
            "Educational Resource\nPrinted 2024-03-01 09:30\n\nBody"
        );
    }
}
