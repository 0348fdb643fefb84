use std::sync::{mpsc, Arc};
use std::thread;

use builder_logging::{builder_debug, builder_info};

use crate::{EngineEvent, GenerationError, RequestId, ResourceGenerator};

/// Receives engine events; called from the engine's runtime threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Generate { request_id: RequestId, prompt: String },
}

/// Runs generations on a background tokio runtime so the caller's event loop
/// never blocks. Dropping the handle stops the worker thread.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        generator: Arc<dyn ResourceGenerator>,
        sink: Arc<dyn EventSink>,
    ) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("builder-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let generator = generator.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(generator.as_ref(), command, sink.as_ref()).await;
                    });
                }
                builder_debug!("Engine command channel closed; worker exiting");
            })?;

        Ok(Self { cmd_tx })
    }

    /// Convenience constructor delivering events over a plain channel.
    pub fn with_channel(
        generator: Arc<dyn ResourceGenerator>,
    ) -> std::io::Result<(Self, mpsc::Receiver<EngineEvent>)> {
        let (event_tx, event_rx) = mpsc::channel();
        let handle = Self::new(generator, Arc::new(ChannelEventSink::new(event_tx)))?;
        Ok((handle, event_rx))
    }

    pub fn generate(&self, request_id: RequestId, prompt: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Generate {
            request_id,
            prompt: prompt.into(),
        });
    }
}

async fn handle_command(
    generator: &dyn ResourceGenerator,
    command: EngineCommand,
    sink: &dyn EventSink,
) {
    match command {
        EngineCommand::Generate { request_id, prompt } => {
            builder_info!("Generation started request_id={}", request_id);
            let result: Result<String, GenerationError> = generator.generate(&prompt).await;
            sink.emit(EngineEvent::GenerationCompleted { request_id, result });
        }
    }
}
