//! Resource builder engine: generation client and background execution.
mod engine;
mod gemini;
mod generator;
mod instruction;
mod types;
mod wire;

pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use gemini::{
    parse_base_url, GeminiClient, GenerationSettings, InvalidBaseUrl, DEFAULT_BASE_URL,
};
pub use generator::ResourceGenerator;
pub use instruction::{MODEL, SYSTEM_INSTRUCTION, TEMPERATURE, TOP_P};
pub use types::{Credential, EngineEvent, GenerationError, GenerationErrorKind, RequestId};
pub use url::Url;
