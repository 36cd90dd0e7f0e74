use clap::{Parser, Subcommand};

mod scrape;

#[derive(Debug, Parser)]
#[command(name = "scex")]
#[command(about = "Storefront catalog exporter: scrape Shopify and WooCommerce stores into an import-ready flat table")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Detect the storefront platform behind a URL
    Detect {
        /// Storefront URL, with or without scheme
        url: String,
    },
    /// Scrape a storefront and export its catalog
    Scrape(scrape::ScrapeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = scex_core::load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Detect { url } => scrape::detect(&config, &url).await,
        Commands::Scrape(args) => scrape::run(&config, args).await,
    }
}
