use crate::GenerationError;

/// Anything that turns a prompt into resource text.
#[async_trait::async_trait]
pub trait ResourceGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
