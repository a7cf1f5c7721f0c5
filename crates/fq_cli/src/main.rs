use clap::Parser;
use fq_core::Result;
use fq_scrapers::logging::init_logging;
use fq_scrapers::ScrapeArgs;
use fq_storage::cli::UploadArgs;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scrape the Fique blog and publish it to blob storage", long_about = None)]
pub struct Cli {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Crawl the blog listing and write one JSON line per article
    Scrape(ScrapeArgs),
    /// Upload the JSON lines file to the blob container
    Upload(UploadArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Scrape(args) => {
            let report = fq_scrapers::handle_command(args).await?;
            for (url, reason) in &report.skipped {
                tracing::debug!("skipped {} ({})", url, reason);
            }
        }
        Commands::Upload(args) => {
            let report = fq_storage::cli::handle_command(args).await?;
            info!(
                "✨ Upload successful ({} records, {} bytes as {}).",
                report.records, report.bytes, report.blob_name
            );
        }
    }

    Ok(())
}
