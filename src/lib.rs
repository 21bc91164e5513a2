pub mod cli;
pub mod config;
pub mod conversation;
pub mod llm;
pub mod models;
pub mod render;
pub mod server;

use cli::{ Args, Command, ServeArgs };
use config::RelayConfig;
use llm::chat::new_client as new_chat_client;
use log::info;
use server::Server;
use std::error::Error;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    match args.command {
        Command::Serve(serve_args) => serve(serve_args).await,
        Command::Chat(chat_args) => cli::chat::run(chat_args).await,
    }
}

async fn serve(args: ServeArgs) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = RelayConfig::from_args(&args)?;

    info!("--- Relay Configuration ---");
    info!("Server Address: {}", config.addr);
    info!("Upstream Base URL: {}", config.llm.base_url);
    info!("Model: {}", config.llm.completion_model);
    info!("Temperature: {}", config.llm.temperature);
    info!("Max Tokens: {}", config.llm.max_tokens);
    info!("CORS Enabled: {}", config.enable_cors);
    info!("TLS Enabled: {}", config.tls.is_some());
    info!("---------------------------");

    let chat_client = new_chat_client(&config.llm)?;
    let server = Server::new(config, chat_client);
    server.run().await
}
