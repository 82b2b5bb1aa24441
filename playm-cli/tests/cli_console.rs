use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn music_dir(names: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    for name in names {
        std::fs::write(dir.path().join(name), b"").expect("create track");
    }
    dir
}

fn playm(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("playm"));
    cmd.env("PLAYM_LOG_STDERR", "0")
        .arg("--no-audio")
        .arg(dir);
    cmd
}

#[test]
fn all_lists_mp3_files_in_name_order() {
    let dir = music_dir(&["b.mp3", "a.mp3", "cover.png"]);
    playm(dir.path())
        .write_stdin("all\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. a.mp3\n2. b.mp3\n"))
        .stdout(predicate::str::contains("cover.png").not());
}

#[test]
fn non_numeric_arguments_are_reported() {
    let dir = music_dir(&["a.mp3"]);
    playm(dir.path())
        .write_stdin("track one\nseek later\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("invalid track number: one"))
        .stdout(predicate::str::contains("invalid number of seconds: later"));
}

#[test]
fn time_after_track_starts_at_zero() {
    let dir = music_dir(&["a.mp3", "b.mp3"]);
    playm(dir.path())
        .write_stdin("track 1\ntime\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Elapsed: 0 s"))
        .stdout(predicate::str::contains("Remaining: 0 s"));
}

#[test]
fn end_of_input_exits_cleanly() {
    let dir = music_dir(&["a.mp3"]);
    playm(dir.path())
        .write_stdin("play\nnext\nunnext\npause\nstop\n")
        .assert()
        .success();
}

#[test]
fn empty_directory_ignores_transport_commands() {
    let dir = music_dir(&[]);
    playm(dir.path())
        .write_stdin("play\nnext\nseek 10\ntime\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Track length: 0 s"));
}

#[test]
fn missing_directory_fails() {
    let dir = music_dir(&[]);
    playm(&dir.path().join("nowhere"))
        .write_stdin("exit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("io error"));
}

#[test]
fn list_json_prints_every_track() {
    let dir = music_dir(&["one.mp3", "two.mp3"]);
    Command::new(assert_cmd::cargo::cargo_bin!("playm"))
        .arg("list")
        .arg("--json")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"one.mp3\""))
        .stdout(predicate::str::contains("\"name\": \"two.mp3\""))
        .stdout(predicate::str::contains("\"duration_secs\": null"));
}

#[test]
fn list_marks_unknown_durations() {
    let dir = music_dir(&["one.mp3"]);
    Command::new(assert_cmd::cargo::cargo_bin!("playm"))
        .arg("list")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1. one.mp3 [--:--:--]"));
}
