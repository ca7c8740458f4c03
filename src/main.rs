use std::env;
use std::path::Path;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use windfall::core::TaxConfig;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let raw_args: Vec<String> = env::args().collect();
    match raw_args.get(1).map(|s| s.as_str()) {
        Some("serve") => {
            let port = raw_args
                .get(2)
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(8080);
            let tax = match raw_args.get(3) {
                Some(path) => match TaxConfig::from_file(Path::new(path)) {
                    Ok(tax) => tax,
                    Err(e) => {
                        eprintln!("Config error: {e}");
                        std::process::exit(1);
                    }
                },
                None => TaxConfig::default(),
            };
            if let Err(e) = windfall::api::run_http_server(port, tax).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Some("estimate") => match windfall::api::run_cli_estimate(&raw_args) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
        _ => {
            eprintln!("Usage: cargo run -- serve [port] [tax-config.toml]");
            eprintln!("       cargo run -- estimate [--jackpot N] [--state NAME] [--payout lump-sum|annuity] ...");
            std::process::exit(1);
        }
    }
}
