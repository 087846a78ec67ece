use clap::Parser;
use recipe_search::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "recipe-search", about = "Search recipes from the terminal")]
struct Args {
    /// Recipe API endpoint (overrides config file and RECIPE_API_BASE_URL)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Search for this right away
    #[arg(short, long)]
    query: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The terminal belongs to the TUI, so logs go to recipe-search.log
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("recipe-search.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}; falling back to defaults", e);
        config::RecipeSearchConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            timeout_secs: args.timeout,
            query: args.query,
        },
    );

    log::info!(
        "recipe-search starting up against {} (timeout {:?})",
        resolved.base_url,
        resolved.timeout
    );

    recipe_search::tui::run(resolved)
}
