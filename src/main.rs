// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! Multiverse CLI
//!
//! Command-line browser for the character catalog

use clap::Parser;
use multiverse_catalog::cli::{Cli, Runner};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let runner = Runner::new(cli);

    let config = match runner.config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Initialize logging on stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(runner.log_level(&config).into()),
        )
        .init();

    if let Err(e) = runner.run(config).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
