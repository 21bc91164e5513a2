pub mod chat;

use clap::{ Parser, Subcommand };

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the completion relay HTTP server.
    Serve(ServeArgs),
    /// Chat with the assistant through a running relay.
    Chat(ChatArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Host address and port for the relay to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:3000")]
    pub server_addr: String,

    /// API key for the upstream completion provider. Required.
    #[arg(long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the upstream OpenAI-compatible API.
    #[arg(long, env = "DEEPSEEK_BASE_URL", default_value = crate::llm::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Allow cross-origin requests to the relay endpoint.
    #[arg(long, env = "ENABLE_CORS", default_value = "false")]
    pub enable_cors: bool,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,

    /// Path to the TLS certificate file (PEM format). Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Path to the TLS private key file (PEM format). Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ChatArgs {
    /// Full URL of the relay's chat endpoint.
    #[arg(long, env = "RELAY_URL", default_value = "http://127.0.0.1:3000/api/chat")]
    pub relay_url: String,

    /// Print assistant replies as rendered HTML instead of raw Markdown.
    #[arg(long = "html", env = "RENDER_HTML", default_value = "false")]
    pub render_html: bool,
}
