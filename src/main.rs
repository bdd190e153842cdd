use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use toolshelf::core::config;
use toolshelf::tui;

#[derive(Parser)]
#[command(name = "toolshelf", about = "Browse a catalog of tools by category")]
struct Args {
    /// Catalog location: a JSON file path or an http(s) URL
    #[arg(short, long)]
    catalog: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to toolshelf.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("toolshelf.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}; using defaults", e);
        config::ShelfConfig::default()
    });
    let resolved = config::resolve(&file_config, args.catalog.as_deref());

    log::info!("Toolshelf starting up with catalog: {}", resolved.catalog_source);

    tui::run(resolved)
}
