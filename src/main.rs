use atlas::core::config::{self, CliOverrides};
use atlas::core::theme::ThemeMode;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "atlas", about = "Browse the countries of the world from your terminal")]
struct Args {
    /// Color theme to start with
    #[arg(short, long, value_enum)]
    theme: Option<ThemeMode>,

    /// Base URL of the countries API
    #[arg(long)]
    base_url: Option<String>,

    /// Keep favorites in memory only
    #[arg(long)]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to atlas.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("atlas.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, using defaults", e);
        Default::default()
    });
    let cli = CliOverrides {
        base_url: args.base_url,
        theme: args.theme,
        ephemeral: args.ephemeral,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Atlas starting up against {} (theme: {:?})",
        resolved.base_url,
        resolved.theme
    );

    atlas::tui::run(resolved)
}
