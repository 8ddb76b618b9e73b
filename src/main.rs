use clap::Parser;
use colored::Colorize;
use ipv4_network_calculator::cmd::{self, Cli};
use ipv4_network_calculator::config::Settings;
use ipv4_network_calculator::logging;
use std::error::Error;
use std::process::ExitCode;

fn main() -> Result<ExitCode, Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref())?;
    logging::init(&settings.log_config, cli.log_level)?;
    log::info!("#Start main() command={:?}", cli.command);

    match cmd::run(&cli, settings) {
        Ok(out) => {
            print!("{out}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            if e.is_validation() {
                log::warn!("Rejected input: {e}");
            } else {
                log::error!("{e}");
            }
            eprintln!("{} {e}", "error:".on_red());
            Ok(ExitCode::FAILURE)
        }
    }
}
