use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, header::{HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION}};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::error::Error as StdError;

use super::ChatClient;
use crate::llm::LlmConfig;

pub struct DeepSeekChatClient {
    http: HttpClient,
    model: String,
    base_url: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct DeepSeekChatRequest<'a> {
    model: &'a str,
    messages: &'a [JsonValue],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct DeepSeekResponse {
    choices: Vec<DeepSeekChoice>,
}

#[derive(Deserialize)]
struct DeepSeekChoice {
    message: JsonValue,
}

impl DeepSeekChatClient {
    pub fn new(
        api_key: &str,
        model: String,
        base_url: String,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| format!("Invalid API key format: {}", e))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| Box::new(e) as Box<dyn StdError + Send + Sync>)?;

        Ok(Self {
            http,
            model,
            base_url,
            temperature,
            max_tokens,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        if config.api_key.trim().is_empty() {
            return Err("DeepSeek API key is required".into());
        }
        Self::new(
            &config.api_key,
            config.completion_model.clone(),
            config.base_url.clone(),
            config.temperature,
            config.max_tokens,
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatClient for DeepSeekChatClient {
    async fn complete(
        &self,
        messages: &[JsonValue]
    ) -> Result<JsonValue, Box<dyn StdError + Send + Sync>> {
        let req = DeepSeekChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let resp = self.http.post(self.endpoint())
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(format!("Provider error {}: {}", status, text).into());
        }

        let body = resp.json::<DeepSeekResponse>().await?;
        debug!("DeepSeek returned {} choice(s)", body.choices.len());

        let message = body.choices
            .into_iter()
            .next()
            .ok_or_else(|| "No response from DeepSeek API".to_string())?
            .message;

        Ok(message)
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }
}
