pub mod deepseek;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::error::Error as StdError;
use std::sync::Arc;
use super::LlmConfig;
use self::deepseek::DeepSeekChatClient;

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// One blocking round trip. Returns the first choice's message exactly as upstream sent it.
    async fn complete(
        &self,
        messages: &[JsonValue]
    ) -> Result<JsonValue, Box<dyn StdError + Send + Sync>>;

    fn get_model(&self) -> String;
}

pub fn new_client(
    config: &LlmConfig
) -> Result<Arc<dyn ChatClient>, Box<dyn StdError + Send + Sync>> {
    let client = DeepSeekChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
