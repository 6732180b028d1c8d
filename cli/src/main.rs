//! CLI entrypoint for toolbridge
//!
//! Wires the layers together: loads configuration, registers the bundled
//! tools during a bootstrap phase, renders the system prompt with the
//! generated schema markup, and then dispatches either a one-shot prompt or
//! an interactive chat session.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use toolbridge_application::{ConversationDispatcher, register_tool};
use toolbridge_domain::{Tool, ToolRegistry};
use toolbridge_infrastructure::{
    AppConfig, ChatClient, ConfigLoader, LlmDocExtractor, WeatherForecastTool,
    render_assistant_prompt,
};

#[derive(Parser)]
#[command(name = "toolbridge", version, about = "Expose local tools to a chat model")]
struct Cli {
    /// One-shot prompt; omit and pass --chat for interactive mode
    prompt: Option<String>,

    /// Interactive chat mode
    #[arg(long)]
    chat: bool,

    /// Path to a configuration file (highest priority source)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = ConfigLoader::load(cli.config.as_ref())
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to load configuration")?;

    // === Bootstrap: validate and register tools before serving ===
    let registry = Arc::new(bootstrap_registry(&config).await);
    info!(tools = registry.len(), "registry initialized");

    let system_prompt =
        render_assistant_prompt(chrono::Local::now().date_naive(), &registry.markup_json());
    let endpoint = Arc::new(chat_client(&config, &config.endpoint.model, Some(system_prompt)));

    let dispatcher = ConversationDispatcher::new(endpoint, registry)
        .with_max_turns(config.dispatch.max_turns)
        .with_call_timeout(Duration::from_secs(config.dispatch.request_timeout_secs));

    if cli.chat {
        return run_chat(&dispatcher).await;
    }

    let Some(prompt) = cli.prompt else {
        bail!("A prompt is required. Use --chat for interactive mode.");
    };

    let answer = dispatcher.handle(&prompt).await?;
    println!("{answer}");
    Ok(())
}

/// Build a chat client from the endpoint configuration.
fn chat_client(config: &AppConfig, model: &str, system_prompt: Option<String>) -> ChatClient {
    let mut client = ChatClient::new(&config.endpoint.url, model)
        .with_temperature(config.endpoint.temperature);
    if let Some(key) = &config.endpoint.api_key {
        client = client.with_bearer_token(key);
    }
    if let Some(prompt) = system_prompt {
        client = client.with_system_message(prompt);
    }
    client
}

/// Validate and register the bundled tools. Rejections are reported and
/// skipped; the process continues with a smaller tool set.
async fn bootstrap_registry(config: &AppConfig) -> ToolRegistry {
    let extractor = LlmDocExtractor::new(chat_client(
        config,
        &config.endpoint.extractor_model,
        None,
    ));

    let tools: Vec<Arc<dyn Tool>> = vec![Arc::new(WeatherForecastTool::new())];

    let mut registry = ToolRegistry::new();
    for tool in tools {
        if let Err(rejection) = register_tool(&mut registry, &extractor, tool).await {
            eprintln!("{rejection}");
        }
    }
    registry
}

/// Interactive loop: one dispatcher, one accumulated conversation.
async fn run_chat(dispatcher: &ConversationDispatcher) -> Result<()> {
    let stdin = io::stdin();
    loop {
        print!("Enter message (blank line to exit): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            break;
        }

        match dispatcher.handle(message).await {
            Ok(answer) => println!("{answer}"),
            Err(e) => eprintln!("Error: {e}"),
        }
    }
    Ok(())
}
