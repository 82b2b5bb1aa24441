use std::io::{self, Write};

use log::debug;
use playm_lib::playback::output::AudioOutput;
use playm_lib::playback::player::Player;

use crate::commands::{self, Command, HELP_TEXT};
use crate::logging::{self, LogBuffer};

/// Console session: a player plus the writer command output goes to.
pub struct Console<O: AudioOutput, W: Write> {
    player: Player<O>,
    out: W,
    log_buffer: LogBuffer,
}

impl<O: AudioOutput, W: Write> Console<O, W> {
    pub fn new(player: Player<O>, out: W, log_buffer: LogBuffer) -> Self {
        Self {
            player,
            out,
            log_buffer,
        }
    }

    #[cfg(test)]
    pub fn player(&self) -> &Player<O> {
        &self.player
    }

    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut Player<O> {
        &mut self.player
    }

    #[cfg(test)]
    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()
    }

    /// Let the player react to a finished track.
    pub fn poll(&mut self) {
        self.player.poll_events();
    }

    /// Parse and run one input line. Returns `false` once the session should end.
    pub fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        match commands::parse(line) {
            Ok(Some(command)) => self.dispatch(command),
            Ok(None) => {
                debug!("ignoring input {:?}", line.trim());
                Ok(true)
            }
            Err(err) => {
                writeln!(self.out, "{}", err)?;
                Ok(true)
            }
        }
    }

    fn dispatch(&mut self, command: Command) -> io::Result<bool> {
        match command {
            Command::Pause => self.player.pause(),
            Command::Play => {
                if self.player.is_paused() || !self.player.is_busy() {
                    self.player.play();
                }
            }
            Command::Stop => self.player.stop(),
            Command::Next => self.player.next(),
            Command::Unnext => self.player.unnext(),
            Command::Track(index) => match usize::try_from(index) {
                Ok(index) => self.player.track(index),
                Err(_) => debug!("ignoring negative track {}", index),
            },
            Command::All => {
                let playlist = self.player.playlist();
                for index in 0..playlist.len() {
                    if let Some(name) = playlist.name(index) {
                        writeln!(self.out, "{}. {}", index + 1, name)?;
                    }
                }
            }
            Command::Seek(seconds) => self.player.seek(seconds),
            Command::Time => {
                let text = time_text(
                    self.player.get_total_time(),
                    self.player.get_elapsed_time(),
                    self.player.get_remaining_time(),
                );
                writeln!(self.out, "{}", text)?;
            }
            Command::Volume(percent) => self.player.set_volume(percent),
            Command::Help => writeln!(self.out, "{}", HELP_TEXT)?,
            Command::Logs => {
                for line in logging::snapshot(&self.log_buffer) {
                    writeln!(self.out, "{}", line)?;
                }
            }
            Command::Exit => {
                self.player.stop();
                return Ok(false);
            }
        }

        Ok(true)
    }
}

/// Three-line report for the `time` command, in whole seconds.
pub fn time_text(total: f64, elapsed: f64, remaining: f64) -> String {
    format!(
        "Track length: {} s\nElapsed: {} s\nRemaining: {} s",
        total.floor() as u64,
        elapsed.floor() as u64,
        remaining.floor() as u64
    )
}

/// `hh:mm:ss` rendering of a duration in seconds.
pub fn format_time(seconds: f64) -> String {
    let seconds = seconds.max(0.0).round() as u64;
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    let hours = minutes / 60;
    let minutes = minutes % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
