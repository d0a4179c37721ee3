mod app;
mod batch;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod search;
mod utils;

use clap::Parser;

use cli::Cli;
use config::Config;
use utils::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug, cli.quiet);

    let config = Config::load(cli.config.as_deref());
    let cli = cli.with_config(&config);

    if let Err(e) = app::run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
