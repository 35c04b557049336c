// pow-ledger CLI

use pow_ledger::{Cli, CliHandler, LedgerConfig};
use clap::Parser;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match LedgerConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => LedgerConfig::default(),
    };

    let mut handler = match CliHandler::new(config) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("Error initializing: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = handler.handle(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
