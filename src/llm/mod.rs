pub mod chat;

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
pub const COMPLETION_MODEL: &str = "deepseek-chat";
pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 2000;

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub completion_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl LlmConfig {
    /// Fixed model and sampling parameters; only the credential and endpoint vary.
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            completion_model: COMPLETION_MODEL.to_string(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}
