//! Audio output on the default sound device.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use log::{debug, error, info, warn};
use rodio::source::EmptyCallback;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::AudioOutput;
use crate::constants::{OUTPUT_STREAM_OPEN_RETRIES, OUTPUT_STREAM_OPEN_RETRY_MS};
use crate::error::PlaymError;

/// [`AudioOutput`] backed by a rodio stream on the default device.
///
/// Every loaded file gets a fresh [`Sink`]. Behind the decoder an
/// [`EmptyCallback`] is queued that sends the load's generation number down
/// a channel once the decoder is exhausted; notifications from earlier
/// generations are discarded by [`take_finished`](AudioOutput::take_finished).
pub struct RodioOutput {
    stream: OutputStream,
    sink: Option<Sink>,
    volume: f32,
    generation: u64,
    finished_tx: Sender<u64>,
    finished_rx: Receiver<u64>,
}

impl RodioOutput {
    /// Open the default output device.
    pub fn open() -> Result<Self, PlaymError> {
        let stream = open_output_stream_with_retry()?;
        let (finished_tx, finished_rx) = mpsc::channel();

        Ok(Self {
            stream,
            sink: None,
            volume: 1.0,
            generation: 0,
            finished_tx,
            finished_rx,
        })
    }
}

impl AudioOutput for RodioOutput {
    fn play_file(&mut self, path: &Path, start_secs: f64) -> Result<f64, PlaymError> {
        self.stop();

        let file = File::open(path)?;
        let mut source =
            Decoder::new(BufReader::new(file)).map_err(|err| PlaymError::Decode(err.to_string()))?;

        let mut started_at = 0.0;
        if start_secs > 0.0 {
            match source.try_seek(Duration::from_secs_f64(start_secs)) {
                Ok(()) => started_at = start_secs,
                Err(err) => warn!(
                    "seek to {:.1}s in {} failed, playing from the start: {}",
                    start_secs,
                    path.display(),
                    err
                ),
            }
        }

        self.generation += 1;
        let generation = self.generation;
        let finished_tx = self.finished_tx.clone();

        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume);
        sink.append(source);
        sink.append(EmptyCallback::new(Box::new(move || {
            let _ = finished_tx.send(generation);
        })));
        self.sink = Some(sink);

        info!("playing {} from {:.1}s", path.display(), started_at);
        Ok(started_at)
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn resume(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        // Invalidate any completion still in flight for the stopped sink.
        self.generation += 1;
    }

    fn is_busy(&self) -> bool {
        self.sink.as_ref().map(|sink| !sink.empty()).unwrap_or(false)
    }

    fn position(&self) -> f64 {
        self.sink
            .as_ref()
            .map(|sink| sink.get_pos().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.max(0.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }

    fn take_finished(&mut self) -> bool {
        let mut finished = false;
        while let Ok(generation) = self.finished_rx.try_recv() {
            if generation == self.generation {
                finished = true;
            } else {
                debug!("ignoring completion of stale load {}", generation);
            }
        }
        finished
    }
}

/// Open the default output stream with bounded retry behavior.
fn open_output_stream_with_retry() -> Result<OutputStream, PlaymError> {
    let mut attempt = 1;
    loop {
        match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => return Ok(stream),
            Err(err) => {
                if attempt == OUTPUT_STREAM_OPEN_RETRIES {
                    error!(
                        "failed to open default output stream after {} attempts: {}",
                        OUTPUT_STREAM_OPEN_RETRIES, err
                    );
                    return Err(PlaymError::Output(err.to_string()));
                }
                warn!(
                    "open_default_stream attempt {}/{} failed: {}",
                    attempt, OUTPUT_STREAM_OPEN_RETRIES, err
                );
                thread::sleep(Duration::from_millis(OUTPUT_STREAM_OPEN_RETRY_MS));
                attempt += 1;
            }
        }
    }
}
