use std::path::PathBuf;

use anyhow::Result;
use block_ancestry::esplora::EsploraClient;
use block_ancestry::fetcher::BlockDataFetcher;
use block_ancestry::report;
use block_ancestry::settings::Settings;
use clap::Parser;
use log::{error, info};

/// Rank the transactions of a block by how many outputs they spend.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Esplora API root, e.g. https://blockstream.info/api
    #[arg(long)]
    endpoint: Option<String>,

    /// Height of the block to inspect
    #[arg(long)]
    height: Option<u64>,

    /// Transaction offset to start paging from
    #[arg(long)]
    start_index: Option<u64>,

    /// Number of transactions to report
    #[arg(long)]
    top: Option<usize>,

    /// Settings file (defaults to ./Settings.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn apply(self, mut settings: Settings) -> Settings {
        if let Some(endpoint) = self.endpoint {
            settings.endpoint = endpoint;
        }
        if let Some(height) = self.height {
            settings.block_height = height;
        }
        if let Some(start_index) = self.start_index {
            settings.start_index = start_index;
        }
        if let Some(top) = self.top {
            settings.top = top;
        }
        settings
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();
    let settings = Settings::load(args.config.as_deref())?;
    let settings = args.apply(settings);
    info!("Loaded configuration: {:?}", settings);

    let fetcher = BlockDataFetcher::new(EsploraClient::new(settings.endpoint.clone()));
    let ranked = block_ancestry::run(
        &fetcher,
        settings.block_height,
        settings.start_index,
        settings.top,
    )
    .await
    .inspect_err(|e| error!("Run aborted: {}", e))?;

    for line in report::format_lines(&ranked) {
        println!("{line}");
    }
    Ok(())
}
