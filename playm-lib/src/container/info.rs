//! Track duration probing.

use std::{fs::File, path::Path};

use log::debug;

use symphonia::core::{
    codecs::CodecParameters,
    errors::Error,
    formats::FormatOptions,
    io::{MediaSource, MediaSourceStream},
    meta::MetadataOptions,
    probe::{Hint, ProbeResult},
};

use crate::constants::TRACK_EXTENSION;
use crate::error::PlaymError;

/// Convert Symphonia codec parameters to seconds using time base and frames.
///
/// Returns `None` when the stream header carries no frame count or time base.
pub fn get_time_from_frames(codec_params: &CodecParameters) -> Option<f64> {
    let tb = codec_params.time_base?;
    let frames = codec_params.n_frames?;
    let time = tb.calc_time(codec_params.start_ts + frames);

    Some(time.seconds as f64 + time.frac)
}

/// Probe a media file and return the Symphonia probe result.
pub fn get_probe_result(file_path: &Path) -> Result<ProbeResult, PlaymError> {
    let source = Box::new(File::open(file_path)?) as Box<dyn MediaSource>;

    let mut hint = Hint::new();
    hint.with_extension(TRACK_EXTENSION);

    let mss = MediaSourceStream::new(source, Default::default());
    let format_opts = FormatOptions {
        ..Default::default()
    };
    let metadata_opts: MetadataOptions = Default::default();

    Ok(symphonia::default::get_probe().format(&hint, mss, &format_opts, &metadata_opts)?)
}

/// Duration of a track in seconds.
///
/// Uses the frame count from the stream header when present, otherwise scans
/// every packet of the default track.
pub fn get_duration(file_path: &Path) -> Result<f64, PlaymError> {
    let probed = get_probe_result(file_path)?;

    let track = probed
        .format
        .default_track()
        .ok_or_else(|| PlaymError::Probe(format!("no audio track in {}", file_path.display())))?;

    if let Some(seconds) = get_time_from_frames(&track.codec_params) {
        return Ok(seconds);
    }

    debug!(
        "{} has no frame count in its header, scanning packets",
        file_path.display()
    );
    get_duration_by_scan(probed)
}

/// Scan all packets of the default track to compute its duration.
fn get_duration_by_scan(mut probed: ProbeResult) -> Result<f64, PlaymError> {
    let (track_id, time_base, sample_rate) = match probed.format.default_track() {
        Some(track) => (
            track.id,
            track.codec_params.time_base,
            track.codec_params.sample_rate,
        ),
        None => return Err(PlaymError::Probe("no audio track".to_string())),
    };

    let mut end_ts: u64 = 0;
    loop {
        match probed.format.next_packet() {
            Ok(packet) => {
                if packet.track_id() != track_id {
                    continue;
                }
                end_ts = end_ts.max(packet.ts() + packet.dur());
            }
            Err(Error::IoError(err)) if err.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(Error::ResetRequired) => break,
            Err(err) => return Err(err.into()),
        }
    }

    let seconds = if let Some(time_base) = time_base {
        let time = time_base.calc_time(end_ts);
        time.seconds as f64 + time.frac
    } else if let Some(sample_rate) = sample_rate {
        end_ts as f64 / sample_rate as f64
    } else {
        0.0
    };

    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use symphonia::core::units::TimeBase;

    #[test]
    fn time_from_frames_uses_time_base() {
        let mut params = CodecParameters::new();
        params.with_time_base(TimeBase::new(1, 44_100));
        params.with_n_frames(44_100 * 3 + 22_050);
        let seconds = get_time_from_frames(&params).expect("duration");
        assert!((seconds - 3.5).abs() < 1e-9);
    }

    #[test]
    fn time_from_frames_needs_frame_count() {
        let mut params = CodecParameters::new();
        params.with_time_base(TimeBase::new(1, 44_100));
        assert!(get_time_from_frames(&params).is_none());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = get_duration(&dir.path().join("absent.mp3")).unwrap_err();
        assert!(matches!(err, PlaymError::Io(_)));
    }

    #[test]
    fn garbage_file_fails_to_probe() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("noise.mp3");
        std::fs::write(&path, b"definitely not an mpeg stream").expect("write");
        assert!(get_duration(&path).is_err());
    }
}
