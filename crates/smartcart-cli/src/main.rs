use clap::{Parser, Subcommand};

mod normalize;

#[derive(Debug, Parser)]
#[command(name = "smartcart")]
#[command(about = "Normalize Israeli government retail price feeds")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize feed XML files and emit a batch report.
    Normalize(normalize::NormalizeArgs),
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = smartcart_core::load_app_config_from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Normalize(args) => normalize::run(&args, &config),
    }
}
