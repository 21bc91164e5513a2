pub mod api;

use crate::config::RelayConfig;
use crate::llm::chat::ChatClient;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use axum::Router;
use log::{ info, warn };

pub struct Server {
    config: RelayConfig,
    chat_client: Arc<dyn ChatClient>,
}

impl Server {
    pub fn new(config: RelayConfig, chat_client: Arc<dyn ChatClient>) -> Self {
        if config.enable_cors {
            warn!("CORS enabled: the relay accepts cross-origin requests.");
        }
        Self { config, chat_client }
    }

    pub fn router(&self) -> Router {
        api::router(api::AppState::new(self.chat_client.clone()), self.config.enable_cors)
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let addr = self.config.addr.parse::<SocketAddr>()?;
        let app = self.router();

        match &self.config.tls {
            Some(tls) => {
                info!(
                    "TLS enabled. Loading certificate from '{}' and key from '{}'",
                    tls.cert_path,
                    tls.key_path
                );
                let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                    &tls.cert_path,
                    &tls.key_path
                ).await?;

                info!("Relay listening on: https://{}{}", addr, api::CHAT_ROUTE);
                axum_server::bind_rustls(addr, tls_config)
                    .serve(app.into_make_service())
                    .await?;
            }
            None => {
                let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
                    format!("Failed to bind relay to {}: {}. Try a different port.", addr, e)
                })?;
                info!("Relay listening on: http://{}{}", listener.local_addr()?, api::CHAT_ROUTE);
                axum::serve(listener, app.into_make_service()).await?;
            }
        }

        Ok(())
    }
}
