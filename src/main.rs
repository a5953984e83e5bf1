use clap::Parser;

use trackscan::cli::{self, Cli};
use trackscan::shared::utils::init_logger;

#[tokio::main]
async fn main() {
    init_logger();
    let args = Cli::parse();
    if let Err(e) = cli::run(args).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
