//! CLI argument definitions for `playm`.

use clap::{value_parser, Arg, ArgAction, Command};
use playm_lib::constants::DEFAULT_MUSIC_DIR;

fn dir_arg() -> Arg {
    Arg::new("DIR")
        .help("Directory to scan for .mp3 files")
        .default_value(DEFAULT_MUSIC_DIR)
        .index(1)
}

/// Build the CLI argument parser and command definitions.
pub fn build_cli() -> Command {
    Command::new("playm")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Play a directory of MP3 files from a line-oriented console")
        .arg(dir_arg())
        .arg(
            Arg::new("GAIN")
                .long("gain")
                .short('g')
                .value_name("GAIN")
                .default_value("100")
                .value_parser(value_parser!(f32))
                .help("Playback volume in percent (0-100)"),
        )
        .arg(
            Arg::new("shuffle")
                .long("shuffle")
                .action(ArgAction::SetTrue)
                .help("Shuffle the playlist once at startup"),
        )
        .arg(
            Arg::new("no-audio")
                .long("no-audio")
                .action(ArgAction::SetTrue)
                .help("Run without opening a sound device; playback is silent"),
        )
        .subcommand(
            Command::new("list")
                .about("Print the playlist with track durations, then exit")
                .arg(dir_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the playlist as JSON"),
                ),
        )
}
