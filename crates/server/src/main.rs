use anyhow::Result;
use clap::Parser;
use tracing::error;

use profit_api_server::{app, args::Args, logging};

#[rocket::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let debug = args.bind.debug;
    match app::run(args).await {
        Ok(()) => Ok(()),
        Err(err) => {
            // No-op when `run` already installed the subscriber.
            logging::init(debug);
            error!(error = %err, "Server failed");
            Err(err)
        }
    }
}
