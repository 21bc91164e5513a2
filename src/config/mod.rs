use crate::cli::ServeArgs;
use crate::llm::LlmConfig;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing DEEPSEEK_API_KEY environment variable")]
    MissingCredential,
    #[error("Upstream base URL must not be empty")]
    EmptyBaseUrl,
    #[error("Both --tls-cert-path and --tls-key-path must be provided to enable TLS")]
    IncompleteTls,
}

#[derive(Debug, Clone)]
pub struct TlsPaths {
    pub cert_path: String,
    pub key_path: String,
}

/// Validated relay configuration. Built once at startup and handed to the server.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub addr: String,
    pub llm: LlmConfig,
    pub enable_cors: bool,
    pub tls: Option<TlsPaths>,
}

impl RelayConfig {
    pub fn from_args(args: &ServeArgs) -> Result<Self, ConfigError> {
        let api_key = args.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingCredential)?;

        let base_url = args.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        let tls = if args.enable_tls {
            match (&args.tls_cert_path, &args.tls_key_path) {
                (Some(cert_path), Some(key_path)) =>
                    Some(TlsPaths { cert_path: cert_path.clone(), key_path: key_path.clone() }),
                _ => {
                    return Err(ConfigError::IncompleteTls);
                }
            }
        } else {
            None
        };

        Ok(Self {
            addr: args.server_addr.clone(),
            llm: LlmConfig::new(api_key.to_string(), base_url.to_string()),
            enable_cors: args.enable_cors,
            tls,
        })
    }
}
