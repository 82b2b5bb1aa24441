use std::{
    io::{self, BufRead, BufReader, Write},
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    thread,
    time::Duration,
};

use clap::ArgMatches;
use log::{info, warn};
use playm_lib::constants::{DEFAULT_MUSIC_DIR, DEFAULT_VOLUME_PERCENT};
use playm_lib::playback::output::{AudioOutput, NullOutput, RodioOutput};
use playm_lib::playback::player::Player;
use playm_lib::playlist::Playlist;
use playm_lib::PlaymError;

use crate::controls::{format_time, Console};
use crate::logging::{self, LogBuffer};

/// How long the console waits for input before checking for finished tracks.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn run(args: &ArgMatches, log_buffer: LogBuffer) -> Result<i32, PlaymError> {
    if let Some(("list", list_args)) = args.subcommand() {
        return list(list_args);
    }

    let dir = dir_arg(args);
    let gain = args
        .get_one::<f32>("GAIN")
        .copied()
        .unwrap_or(DEFAULT_VOLUME_PERCENT);

    let mut playlist = Playlist::scan(dir)?;
    if args.get_flag("shuffle") {
        playlist = playlist.shuffled();
    }
    if playlist.is_empty() {
        warn!("no .mp3 files found in {}", dir);
    }

    // Audio back-ends print to stderr while opening the device and playing.
    let _stderr_capture = if logging::echo_stderr() {
        None
    } else {
        logging::capture_stderr(log_buffer.clone())
    };

    let output: Box<dyn AudioOutput> = if args.get_flag("no-audio") {
        info!("running without a sound device");
        Box::new(NullOutput::new())
    } else {
        Box::new(RodioOutput::open()?)
    };

    let mut player = Player::new(playlist, output);
    player.set_volume(gain);

    let mut console = Console::new(player, io::stdout(), log_buffer);
    let lines = spawn_line_reader(BufReader::new(io::stdin()));
    run_console(&mut console, lines)?;

    Ok(0)
}

/// Drive the console until `exit` or end of input.
///
/// Finished tracks are handled on every wake-up, whether or not a line arrived.
pub fn run_console<O: AudioOutput, W: Write>(
    console: &mut Console<O, W>,
    lines: Receiver<String>,
) -> io::Result<()> {
    console.prompt()?;
    loop {
        console.poll();
        match lines.recv_timeout(POLL_INTERVAL) {
            Ok(line) => {
                if !console.handle_line(&line)? {
                    break;
                }
                console.prompt()?;
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                info!("input closed");
                console.handle_line("exit")?;
                break;
            }
        }
    }
    Ok(())
}

/// Read lines on a background thread and forward them over a channel.
///
/// The channel disconnects at end of input or on a read error.
pub fn spawn_line_reader<R: BufRead + Send + 'static>(reader: R) -> Receiver<String> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!("failed to read input: {}", err);
                    break;
                }
            };
            if sender.send(line).is_err() {
                break;
            }
        }
    });
    receiver
}

fn list(args: &ArgMatches) -> Result<i32, PlaymError> {
    let playlist = Playlist::scan(dir_arg(args))?;

    let mut stdout = io::stdout();
    if args.get_flag("json") {
        writeln!(stdout, "{}", playlist.to_json()?)?;
        return Ok(0);
    }

    for summary in playlist.summaries() {
        let duration = summary
            .duration_secs
            .map(format_time)
            .unwrap_or_else(|| "--:--:--".to_string());
        writeln!(stdout, "{}. {} [{}]", summary.index + 1, summary.name, duration)?;
    }

    Ok(0)
}

fn dir_arg(args: &ArgMatches) -> &str {
    args.get_one::<String>("DIR")
        .map(String::as_str)
        .unwrap_or(DEFAULT_MUSIC_DIR)
}
