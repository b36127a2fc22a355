//! claude-query binary entry point

use std::io::Write;

use color_eyre::Result;
use futures::StreamExt;

use claude_query_rs::{
    cli::{Cli, Commands},
    config::{Config, GlobalConfig},
    messages::Message,
    services::{
        claude::ClaudeClient,
        streaming::{ContentDelta, StreamEvent},
    },
    QueryError,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("claude_query_rs=debug")
            .init();
    }

    match cli.command {
        Some(Commands::Query {
            query,
            model,
            system,
        }) => {
            run_query(&query, model.as_deref(), &system).await?;
        }
        Some(Commands::Models) => {
            let config = Config::load()?;
            for profile in &config.global.model_profiles {
                let caching = if profile.supports_prompt_caching() {
                    "prompt caching"
                } else {
                    "no caching"
                };
                println!("{}\t{}\t{}", profile.name, profile.model_name, caching);
            }
        }
        Some(Commands::Version) => {
            println!("claude-query version {}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            println!("Use --help for available commands");
        }
    }

    Ok(())
}

async fn run_query(query: &str, model: Option<&str>, system: &str) -> Result<()> {
    let config = Config::load()?;
    let profile = config.resolve_model(model)?.clone();
    let api_key = GlobalConfig::resolve_api_key(&profile).ok_or(QueryError::MissingApiKey)?;

    let client = ClaudeClient::new(profile, &api_key)?;
    let messages = vec![Message::user(query)];

    let mut stream = client.create_message(system, &messages).await?;
    let mut stdout = std::io::stdout();

    while let Some(event) = stream.next().await {
        match event? {
            StreamEvent::MessageStart { message } => {
                tracing::debug!(
                    input_tokens = message.usage.input_tokens,
                    cache_creation = message.usage.cache_creation_input_tokens,
                    cache_read = message.usage.cache_read_input_tokens,
                    "message started"
                );
            }
            StreamEvent::ContentBlockDelta {
                delta: ContentDelta::TextDelta { text },
                ..
            } => {
                print!("{text}");
                stdout.flush()?;
            }
            StreamEvent::MessageDelta { delta, usage } => {
                tracing::debug!(
                    stop_reason = delta.stop_reason.as_deref(),
                    output_tokens = usage.and_then(|u| u.output_tokens),
                    "message finished"
                );
            }
            StreamEvent::Error { error } => {
                return Err(QueryError::Api(format!(
                    "{}: {}",
                    error.error_type, error.message
                ))
                .into());
            }
            _ => {}
        }
    }

    println!();
    Ok(())
}
