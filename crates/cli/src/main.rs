use clap::{Parser, Subcommand};
use depot_config::SettingsLoader;
use depot_console::Console;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod bootstrap;
mod interactive;
mod server;

#[derive(Parser)]
#[command(name = "depot")]
#[command(about = "Self-hosted artifact repository server", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file
    #[arg(long, global = true, default_value = "depot.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the repository server with its admin console on stdin
    Serve {
        /// Listen address override
        #[arg(long)]
        listen: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = SettingsLoader::new().path(&cli.config).load()?;

    match cli.command {
        Commands::Serve { listen } => {
            let listen = listen.unwrap_or_else(|| settings.listen.clone());
            let depot = bootstrap::bootstrap(&settings)?;

            let console = Console::new(depot.tokens.clone());
            tokio::spawn(interactive::run(console));

            server::serve(depot, &listen).await
        }
    }
}
