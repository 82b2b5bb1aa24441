use log::{LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, OnceLock};

const LOG_CAPACITY: usize = 500;

/// Ring buffer of the most recent log lines.
pub type LogBuffer = Arc<Mutex<VecDeque<String>>>;

struct SharedLogger {
    level: LevelFilter,
    buffer: LogBuffer,
    echo_stderr: bool,
}

impl Log for SharedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!("[{}] {}", record.level(), record.args());
        if self.echo_stderr {
            eprintln!("{}", line);
        }
        push_line(&self.buffer, line);
    }

    fn flush(&self) {}
}

static LOG_BUFFER: OnceLock<LogBuffer> = OnceLock::new();
static LOGGER: OnceLock<SharedLogger> = OnceLock::new();

/// Install the process logger and return its line buffer.
///
/// The level comes from `RUST_LOG`; lines are echoed to stderr when
/// `PLAYM_LOG_STDERR` is set to anything but `0`.
pub fn init() -> LogBuffer {
    let buffer = LOG_BUFFER
        .get_or_init(|| Arc::new(Mutex::new(VecDeque::with_capacity(LOG_CAPACITY))))
        .clone();

    let level = level_from(std::env::var("RUST_LOG").ok().as_deref());

    let logger = SharedLogger {
        level,
        buffer: buffer.clone(),
        echo_stderr: echo_stderr(),
    };

    let logger_ref = LOGGER.get_or_init(|| logger);
    if log::set_logger(logger_ref).is_ok() {
        log::set_max_level(level);
    }

    buffer
}

/// Whether log lines go to stderr as well as the buffer.
pub fn echo_stderr() -> bool {
    std::env::var("PLAYM_LOG_STDERR")
        .map(|value| value != "0")
        .unwrap_or(false)
}

fn level_from(value: Option<&str>) -> LevelFilter {
    match value.map(str::to_lowercase).as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn push_line(buffer: &LogBuffer, line: String) {
    let mut buffer = match buffer.lock() {
        Ok(buffer) => buffer,
        Err(poisoned) => poisoned.into_inner(),
    };
    if buffer.len() >= LOG_CAPACITY {
        buffer.pop_front();
    }
    buffer.push_back(line);
}

pub fn snapshot(buffer: &LogBuffer) -> Vec<String> {
    match buffer.lock() {
        Ok(buffer) => buffer.iter().cloned().collect(),
        Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
    }
}

#[cfg(unix)]
pub use capture::capture_stderr;

/// Redirects the process stderr into the log buffer so audio back-end
/// chatter does not land in the middle of the console prompt.
#[cfg(unix)]
mod capture {
    use std::fs::File;
    use std::io::{BufRead, BufReader};
    use std::os::fd::{AsFd, AsRawFd, FromRawFd, OwnedFd};
    use std::thread::{self, JoinHandle};

    use super::{push_line, LogBuffer};

    /// Points fd 2 back at the saved stderr when dropped.
    pub struct StderrCaptureGuard {
        saved: OwnedFd,
        reader: Option<JoinHandle<()>>,
    }

    impl Drop for StderrCaptureGuard {
        fn drop(&mut self) {
            // Replacing fd 2 releases the last write end of the pipe, so the
            // reader sees end of file.
            unsafe {
                libc::dup2(self.saved.as_raw_fd(), libc::STDERR_FILENO);
            }
            if let Some(reader) = self.reader.take() {
                let _ = reader.join();
            }
        }
    }

    fn pipe() -> Option<(File, OwnedFd)> {
        let mut fds = [0; 2];
        if unsafe { libc::pipe(fds.as_mut_ptr()) } != 0 {
            return None;
        }
        // Both descriptors are fresh and owned by nobody else.
        unsafe { Some((File::from_raw_fd(fds[0]), OwnedFd::from_raw_fd(fds[1]))) }
    }

    pub fn capture_stderr(buffer: LogBuffer) -> Option<StderrCaptureGuard> {
        let (read_end, write_end) = pipe()?;
        let saved = std::io::stderr().as_fd().try_clone_to_owned().ok()?;
        if unsafe { libc::dup2(write_end.as_raw_fd(), libc::STDERR_FILENO) } < 0 {
            return None;
        }
        drop(write_end);

        let reader = thread::spawn(move || {
            BufReader::new(read_end)
                .split(b'\n')
                .map_while(Result::ok)
                .map(|bytes| String::from_utf8_lossy(&bytes).trim_end().to_string())
                .filter(|line| !line.is_empty())
                .for_each(|line| push_line(&buffer, format!("[STDERR] {}", line)));
        });

        Some(StderrCaptureGuard {
            saved,
            reader: Some(reader),
        })
    }
}

#[cfg(not(unix))]
pub struct StderrCaptureGuard;

#[cfg(not(unix))]
pub fn capture_stderr(_buffer: LogBuffer) -> Option<StderrCaptureGuard> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_defaults_to_info() {
        assert_eq!(level_from(None), LevelFilter::Info);
        assert_eq!(level_from(Some("bogus")), LevelFilter::Info);
        assert_eq!(level_from(Some("DEBUG")), LevelFilter::Debug);
        assert_eq!(level_from(Some("off")), LevelFilter::Off);
    }

    #[test]
    fn buffer_keeps_only_the_newest_lines() {
        let buffer: LogBuffer = Arc::new(Mutex::new(VecDeque::new()));
        for i in 0..(LOG_CAPACITY + 3) {
            push_line(&buffer, format!("line {}", i));
        }
        let lines = snapshot(&buffer);
        assert_eq!(lines.len(), LOG_CAPACITY);
        assert_eq!(lines[0], "line 3");
        assert_eq!(lines[LOG_CAPACITY - 1], format!("line {}", LOG_CAPACITY + 2));
    }

    #[cfg(unix)]
    #[test]
    fn captured_stderr_lands_in_the_buffer() {
        use std::io::Write;

        let buffer: LogBuffer = Arc::new(Mutex::new(VecDeque::new()));
        let guard = capture_stderr(buffer.clone()).expect("capture");
        std::io::stderr()
            .write_all(b"device busy\n\n")
            .expect("write");
        drop(guard);

        let lines = snapshot(&buffer);
        assert!(lines.contains(&"[STDERR] device busy".to_string()), "{:?}", lines);
        assert!(lines.iter().all(|line| line != "[STDERR]"));
    }
}
