use anyhow::Result;
use clap::{Parser, Subcommand};
use nbrates::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service (default)
    Serve {
        /// Address to listen on, overrides the configuration file
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Create default configuration
    Setup,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command.unwrap_or(Commands::Serve { bind: None }) {
        Commands::Setup => setup(),
        Commands::Serve { bind } => serve(cli.config_path.as_deref(), bind).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

async fn serve(config_path: Option<&str>, bind: Option<String>) -> Result<()> {
    let mut config = nbrates::load_config(config_path)?;
    if let Some(bind) = bind {
        config.bind = bind;
    }
    nbrates::serve(config).await
}

fn setup() -> Result<()> {
    use anyhow::Context;

    let path = nbrates::core::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = nbrates::core::config::AppConfig::default().to_yaml()?;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
