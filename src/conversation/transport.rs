use async_trait::async_trait;
use log::debug;
use reqwest::{ Client as HttpClient, StatusCode };
use thiserror::Error;

use crate::models::chat::{ ChatMessage, ChatRequest, RelayReply };

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Relay request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Relay answered with status {0}")]
    Status(StatusCode),
}

/// Carries the full history to the relay and brings back a single reply.
#[async_trait]
pub trait RelayTransport: Send + Sync {
    async fn send(&self, messages: &[ChatMessage]) -> Result<RelayReply, TransportError>;
}

pub struct HttpRelayTransport {
    http: HttpClient,
    endpoint: String,
}

impl HttpRelayTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RelayTransport for HttpRelayTransport {
    async fn send(&self, messages: &[ChatMessage]) -> Result<RelayReply, TransportError> {
        debug!("POST {} with {} message(s)", self.endpoint, messages.len());
        let resp = self.http.post(&self.endpoint)
            .json(&ChatRequest { messages })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        Ok(resp.json::<RelayReply>().await?)
    }
}
