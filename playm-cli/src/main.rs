//! # playm
//!
//! A console MP3 playlist player.

use log::error;

mod cli;
mod commands;
mod controls;
mod logging;
mod runner;

fn main() {
    dotenv::dotenv().ok();
    let args = cli::args::build_cli().get_matches();
    let log_buffer = logging::init();

    let code = match runner::run(&args, log_buffer) {
        Ok(code) => code,
        Err(err) => {
            error!("{}", err);
            eprintln!("playm: {}", err.to_string().to_lowercase());
            -1
        }
    };

    std::process::exit(code)
}
