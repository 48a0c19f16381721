mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod logging;
mod output;
mod source;
mod utils;

use clap::{CommandFactory, Parser};

use cli::{Cli, parse_command};
use config::Config;

fn main() {
    let loaded = Config::load();
    let mut cli = Cli::parse().with_config(&loaded.config);

    logging::init(cli.debug, cli.log_color());
    loaded.report();

    let command = parse_command(cli.command.take(), cli.file.take());
    match app::run(&cli, command) {
        Ok(Some(output)) => {
            print!("{output}");
            if !output.ends_with('\n') {
                println!();
            }
        }
        Ok(None) => {
            let _ = Cli::command().print_help();
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
