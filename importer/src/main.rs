//! Sheet Import CLI - import a TSV export into the Sheet Database API
//!
//! ```bash
//! sheet-import                                  # input.tsv → API on :3005 → output.json
//! sheet-import --input noten.tsv                # other input file
//! SHEETDB_API_URL=http://noten:3005 sheet-import
//! ```
//!
//! Every flag is optional; without any the fixed defaults apply.

use clap::Parser;
use sheet_import::config::{
    DEFAULT_BASE_URL, DEFAULT_INPUT, DEFAULT_OUTPUT, ENV_BASE_URL, ENV_INPUT, ENV_OUTPUT,
};
use sheet_import::{run_import, ImportConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheet-import")]
#[command(about = "Import pieces, composers and arrangers from a TSV file into the Sheet Database", long_about = None)]
struct Cli {
    /// Input TSV file (header row + name, composers, arrangers, genre, digitized)
    #[arg(short, long, env = ENV_INPUT, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output file for the action log
    #[arg(short, long, env = ENV_OUTPUT, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Base URL of the Sheet Database API
    #[arg(long, env = ENV_BASE_URL, default_value = DEFAULT_BASE_URL)]
    api_url: String,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match ImportConfig::new(&cli.api_url, cli.input, cli.output) {
        Ok(config) => run_import(&config).await.map(|_| ()),
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }

    eprintln!("\n✨ Done!");
}
