//! Transport operations for `Player`.
//!
//! Every operation that changes track (play, track, next, unnext, seek)
//! clears the pause flag. Operations that have nothing to act on (empty
//! playlist, no current track, index out of range) do nothing.

use log::{debug, info};

use super::{clamp_seek, Player};
use crate::playback::output::AudioOutput;

impl<O: AudioOutput> Player<O> {
    /// Resume if paused, otherwise start the next track.
    ///
    /// From a stopped player this starts the first track. On the last track
    /// it restarts the last track.
    pub fn play(&mut self) {
        if self.paused {
            self.output.resume();
            self.paused = false;
            info!("resumed");
            return;
        }

        let len = self.playlist.len();
        if len == 0 {
            return;
        }

        let index = match self.current {
            None => 0,
            Some(index) if index + 1 < len => index + 1,
            Some(index) => index,
        };
        self.current = Some(index);
        self.load_current(0.0);
    }

    /// Toggle pause. Does nothing when idle.
    pub fn pause(&mut self) {
        if self.paused {
            self.output.resume();
            self.paused = false;
            info!("resumed");
        } else if self.output.is_busy() {
            self.output.pause();
            self.paused = true;
            info!("paused");
        }
    }

    /// Stop playback and forget the current track.
    pub fn stop(&mut self) {
        self.output.stop();
        self.current = None;
        self.paused = false;
        self.seek_offset = 0.0;
        info!("stopped");
    }

    /// Play the track at zero-based `index` from the start.
    pub fn track(&mut self, index: usize) {
        if index >= self.playlist.len() {
            debug!(
                "track {} out of range (playlist has {})",
                index,
                self.playlist.len()
            );
            return;
        }
        self.current = Some(index);
        self.load_current(0.0);
    }

    /// Advance to the following track. Does nothing on the last track.
    pub fn next(&mut self) {
        let index = self.current.map_or(0, |index| index + 1);
        if index < self.playlist.len() {
            self.current = Some(index);
            self.load_current(0.0);
        }
    }

    /// Go back to the preceding track. Does nothing on the first track.
    pub fn unnext(&mut self) {
        match self.current {
            Some(index) if index > 0 => {
                self.current = Some(index - 1);
                self.load_current(0.0);
            }
            _ => {}
        }
    }

    /// Restart the current track `seconds` into the file.
    ///
    /// The target is clamped so that at least the end guard remains. When
    /// clamped, the track does not auto-advance when it runs out.
    pub fn seek(&mut self, seconds: f64) {
        let index = match self.current {
            Some(index) => index,
            None => return,
        };

        let (target, clamped) = clamp_seek(seconds, self.duration_of(index));
        self.load_current(target);
        if clamped {
            debug!("seek clamped to {:.1}s, auto-advance off", target);
            self.auto_advance = false;
        }
    }

    /// Set the playback volume in percent (0-100).
    pub fn set_volume(&mut self, percent: f32) {
        let percent = percent.clamp(0.0, 100.0);
        self.volume_percent = percent;
        self.output.set_volume(percent / 100.0);
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use tempfile::TempDir;

    use crate::error::PlaymError;
    use crate::playback::output::{AudioOutput, NullOutput};
    use crate::playback::player::Player;
    use crate::playlist::Playlist;

    const TRACK_SECS: f64 = 180.0;

    fn player_with(count: usize) -> (TempDir, Player<NullOutput>) {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths: Vec<PathBuf> = (0..count)
            .map(|i| {
                let path = dir.path().join(format!("{:02}.mp3", i));
                std::fs::write(&path, b"").expect("write");
                path
            })
            .collect();
        let player = Player::with_probe(
            Playlist::from_paths(paths),
            NullOutput::new(),
            Box::new(|_: &Path| Ok(TRACK_SECS)),
        );
        (dir, player)
    }

    #[test]
    fn next_walks_to_the_last_track_then_stops_moving() {
        let (_dir, mut player) = player_with(4);
        player.track(0);
        for _ in 0..3 {
            player.next();
        }
        assert_eq!(player.current_index(), Some(3));

        player.next();
        assert_eq!(player.current_index(), Some(3));
    }

    #[test]
    fn next_from_stopped_starts_the_first_track() {
        let (_dir, mut player) = player_with(2);
        player.next();
        assert_eq!(player.current_index(), Some(0));
        assert!(player.is_busy());
    }

    #[test]
    fn unnext_on_first_track_is_a_no_op() {
        let (_dir, mut player) = player_with(3);
        player.track(0);
        player.unnext();
        assert_eq!(player.current_index(), Some(0));

        player.track(2);
        player.unnext();
        assert_eq!(player.current_index(), Some(1));
    }

    #[test]
    fn play_advances_and_replays_the_last_track() {
        let (_dir, mut player) = player_with(2);
        player.play();
        assert_eq!(player.current_index(), Some(0));
        player.play();
        assert_eq!(player.current_index(), Some(1));
        player.play();
        assert_eq!(player.current_index(), Some(1));
    }

    #[test]
    fn play_resumes_when_paused() {
        let (_dir, mut player) = player_with(2);
        player.track(1);
        player.pause();
        assert!(player.is_paused());
        assert!(player.output().is_paused());

        player.play();
        assert!(!player.is_paused());
        assert_eq!(player.current_index(), Some(1));
    }

    #[test]
    fn pause_toggles_and_ignores_idle_output() {
        let (_dir, mut player) = player_with(1);
        player.pause();
        assert!(!player.is_paused());

        player.track(0);
        player.pause();
        assert!(player.is_paused());
        player.pause();
        assert!(!player.is_paused());
    }

    #[test]
    fn changing_track_clears_pause() {
        let (_dir, mut player) = player_with(2);
        player.track(0);
        player.pause();
        player.next();
        assert!(!player.is_paused());
        assert_eq!(player.current_index(), Some(1));
    }

    #[test]
    fn stop_resets_position_and_state() {
        let (_dir, mut player) = player_with(2);
        player.track(1);
        player.seek(30.0);
        player.stop();
        assert_eq!(player.current_index(), None);
        assert!(!player.is_busy());
        assert_eq!(player.get_elapsed_time(), 0.0);
    }

    #[test]
    fn track_out_of_range_is_ignored() {
        let (_dir, mut player) = player_with(2);
        player.track(0);
        player.track(7);
        assert_eq!(player.current_index(), Some(0));
    }

    #[test]
    fn empty_playlist_ignores_everything() {
        let (_dir, mut player) = player_with(0);
        player.play();
        player.next();
        player.unnext();
        player.seek(10.0);
        player.track(0);
        player.pause();
        assert_eq!(player.current_index(), None);
        assert_eq!(player.get_remaining_time(), 0.0);
    }

    #[test]
    fn finished_track_advances_to_the_next() {
        let (_dir, mut player) = player_with(2);
        player.track(0);
        player.output_mut().finish_current();
        assert!(player.poll_events());
        assert_eq!(player.current_index(), Some(1));
        assert!(player.is_busy());
    }

    #[test]
    fn seek_to_the_end_guard_disables_auto_advance() {
        let (_dir, mut player) = player_with(2);
        player.track(0);
        player.seek(10_000.0);
        player.output_mut().finish_current();
        assert!(player.poll_events());
        assert_eq!(player.current_index(), Some(0));

        player.next();
        player.output_mut().finish_current();
        player.poll_events();
        assert_eq!(player.current_index(), Some(1));
    }

    #[test]
    fn failed_load_leaves_the_player_stopped_on_that_index() {
        let (dir, mut player) = player_with(3);
        player.track(0);
        player.seek(40.0);
        std::fs::remove_file(dir.path().join("01.mp3")).expect("remove");

        player.next();
        assert_eq!(player.current_index(), Some(1));
        assert_eq!(player.current_path(), Some(dir.path().join("01.mp3").as_path()));
        assert!(!player.is_busy());
        assert_eq!(player.output().loaded(), None);
        assert_eq!(player.get_elapsed_time(), 0.0);

        // Nothing is playing, so no completion can skip past the bad track.
        assert!(!player.poll_events());
        player.next();
        assert_eq!(player.current_index(), Some(2));
        assert!(player.is_busy());
    }

    /// Output that plays every file from the start, whatever was asked for.
    struct UnseekableOutput(NullOutput);

    impl AudioOutput for UnseekableOutput {
        fn play_file(&mut self, path: &Path, _start_secs: f64) -> Result<f64, PlaymError> {
            self.0.play_file(path, 0.0)
        }

        fn pause(&mut self) {
            self.0.pause()
        }

        fn resume(&mut self) {
            self.0.resume()
        }

        fn stop(&mut self) {
            self.0.stop()
        }

        fn is_busy(&self) -> bool {
            self.0.is_busy()
        }

        fn position(&self) -> f64 {
            self.0.position()
        }

        fn set_volume(&mut self, volume: f32) {
            self.0.set_volume(volume)
        }

        fn take_finished(&mut self) -> bool {
            self.0.take_finished()
        }
    }

    #[test]
    fn elapsed_follows_where_playback_really_started() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("00.mp3");
        std::fs::write(&path, b"").expect("write");
        let mut player = Player::with_probe(
            Playlist::from_paths(vec![path]),
            UnseekableOutput(NullOutput::new()),
            Box::new(|_: &Path| Ok(TRACK_SECS)),
        );

        player.track(0);
        player.seek(100.0);
        assert!(player.is_busy());
        assert!(player.get_elapsed_time() < 1.0);
        assert!(player.get_remaining_time() > TRACK_SECS - 1.0);
    }

    #[test]
    fn volume_is_clamped_and_forwarded() {
        let (_dir, mut player) = player_with(1);
        assert_eq!(player.volume_percent(), 100.0);
        player.set_volume(150.0);
        assert_eq!(player.volume_percent(), 100.0);
        assert!((player.output().volume() - 1.0).abs() < 1e-6);
        player.set_volume(25.0);
        assert!((player.output().volume() - 0.25).abs() < 1e-6);
    }
}
