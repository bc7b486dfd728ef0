use clap::Parser;

use matchedge::cli::{self, Cli};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = cli::dispatch(cli).await {
        matchedge::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
