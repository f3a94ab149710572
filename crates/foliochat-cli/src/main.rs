use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use foliochat_core::{ChatWidget, KnowledgeBase, KnowledgeStore, RelayClient, WidgetConfig};
use foliochat_server::{AppState, ServerConfig};

#[derive(Parser)]
#[command(name = "foliochat", version, about = "portfolio chat assistant")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the relay server")]
    Serve {
        #[arg(long, help = "Listen port (overrides PORT)")]
        port: Option<u16>,
    },
    #[command(about = "Open the chat widget")]
    Chat {
        #[arg(
            long,
            default_value = "portfolio-data.json",
            help = "Knowledge document path"
        )]
        knowledge: PathBuf,
        #[arg(
            long,
            default_value = "http://localhost:5000",
            help = "Relay server base URL"
        )]
        relay_url: String,
        #[arg(long, default_value = "600", help = "Simulated typing delay in ms")]
        reply_delay_ms: u64,
    },
    #[command(about = "Validate a knowledge document")]
    Validate {
        #[arg(default_value = "portfolio-data.json", help = "Knowledge document path")]
        knowledge: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Serve { port } => {
            let mut config = ServerConfig::from_env()?;
            if let Some(port) = port {
                config.port = port;
            }

            let provider = foliochat_provider::groq(config.api_key.clone());
            let state = AppState::new(Arc::new(provider), config.model.clone());
            foliochat_server::serve(state, &format!("0.0.0.0:{}", config.port)).await
        }
        Commands::Chat {
            knowledge,
            relay_url,
            reply_delay_ms,
        } => {
            let handle = ChatWidget::spawn(
                WidgetConfig {
                    reply_delay: Duration::from_millis(reply_delay_ms),
                },
                KnowledgeStore::spawn_load(knowledge),
                RelayClient::new(relay_url),
            );
            foliochat_tui::run_tui(handle).await
        }
        Commands::Validate { knowledge } => {
            let raw = std::fs::read_to_string(&knowledge)
                .with_context(|| format!("reading {}", knowledge.display()))?;
            let doc: serde_json::Value = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", knowledge.display()))?;
            let base = KnowledgeBase::from_json(doc);
            println!(
                "Knowledge valid. {} entries, {} intents.",
                base.entries.len(),
                base.intents.len()
            );
            Ok(())
        }
    }
}
