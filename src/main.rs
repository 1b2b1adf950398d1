mod dispatch;

use atende_core::config;
use atende_transport::wa::WhatsAppTransport;
use atende_transport::{ConnectionManager, SessionStore};
use clap::{Parser, Subcommand};
use dispatch::Dispatcher;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "atende",
    version,
    about = "atende — WhatsApp storefront auto-attendant"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to WhatsApp and start answering messages.
    Start,
    /// Check configuration and pairing state.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Start => {
            let cfg = config::load(&cli.config)?;

            let session_dir = cfg.bot.session_dir();
            let store = SessionStore::new(&session_dir)?;
            let transport = Arc::new(WhatsAppTransport::new(
                &session_dir,
                &cfg.connection.device_name,
            ));

            let manager = Arc::new(ConnectionManager::new(
                transport,
                store,
                Duration::from_secs(cfg.connection.reconnect_delay_secs),
            ));
            let handle = manager.handle();

            println!("atende — starting attendant...");
            // A failure here (bad config, unreachable server) is fatal;
            // steady-state reconnects are the manager's job.
            let envelopes = manager.start().await?;

            let dispatcher = Dispatcher::new(handle, cfg.catalog);
            dispatcher.run(envelopes).await;
        }
        Commands::Status => {
            let cfg = config::load(&cli.config)?;
            println!("atende — status\n");
            println!("Config: {}", cli.config);
            println!("Data dir: {}", cfg.bot.data_dir);

            let store = SessionStore::new(cfg.bot.session_dir())?;
            println!(
                "  session: {}",
                if store.has_credentials() {
                    "paired"
                } else {
                    "not paired (QR pairing will run on start)"
                }
            );
            println!(
                "  catalog: {} menu options, {} replies, {} triggers",
                cfg.catalog.menu.options.len(),
                cfg.catalog.replies.len(),
                cfg.catalog.triggers.len()
            );
        }
    }

    Ok(())
}
