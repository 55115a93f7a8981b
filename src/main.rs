use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use minichat::{chat, web_server};

// Define the command-line interface structure using clap
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

// Define the available subcommands
#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Start the relay web server.
    Serve {
        #[arg(long, default_value_t = 3000, help = "Port for the web server.")]
        port: u16,
    },
    /// Chat with the assistant from the terminal.
    Chat {
        #[arg(
            long,
            default_value = "http://localhost:3000",
            help = "Base URL of a running relay server."
        )]
        relay: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (for environment variables like BACKEND_URL)
    dotenvy::dotenv().ok();

    // Initialize tracing (logging) subscriber
    // Reads log level from RUST_LOG environment variable (e.g., RUST_LOG=info,minichat=debug)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            info!("Starting relay server on port {}...", port);

            let mut server_handle = tokio::spawn(web_server::start_web_server(port));

            // Keep the main thread alive and wait for shutdown signals or task completion
            let ctrl_c = tokio::signal::ctrl_c();
            tokio::pin!(ctrl_c);

            tokio::select! {
                _ = &mut ctrl_c => {
                    info!("Ctrl-C received, initiating shutdown...");
                }
                res = &mut server_handle => {
                    // A failed bind or serve error must surface as a non-zero exit
                    match res {
                        Ok(Ok(())) => info!("Web server task completed unexpectedly."),
                        Ok(Err(e)) => {
                            error!("Web server failed: {:?}", e);
                            return Err(e);
                        }
                        Err(e) if e.is_panic() => {
                            return Err(anyhow::anyhow!("Web server task panicked: {:?}", e));
                        }
                        Err(e) => {
                            return Err(anyhow::anyhow!("Web server task failed: {:?}", e));
                        }
                    }
                }
            }

            if !server_handle.is_finished() {
                server_handle.abort();
            }
            info!("Shutdown complete.");
        }
        Commands::Chat { relay } => {
            chat::run_chat(&relay).await.context("Chat session failed")?;
        }
    }

    Ok(())
}
