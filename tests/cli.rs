use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn inkframe_cmd() -> Command {
    Command::cargo_bin("inkframe").expect("binary exists")
}

fn small_config(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[display]\nwidth = 64\nheight = 48\n").unwrap();
    path
}

#[test]
fn inkframe_help_prints_usage() {
    inkframe_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1-bit dashboard renderer for e-paper displays",
        ));
}

#[test]
fn previous_requires_packet() {
    inkframe_cmd()
        .args(["--previous", "frame.bin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required arguments were not provided",
        ));
}

#[test]
fn init_config_writes_example_once() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("inkframe").join("config.toml");

    inkframe_cmd()
        .arg("--init-config")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote example config"));
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("max_partial_pixels"));

    inkframe_cmd()
        .arg("--init-config")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn renders_frame_and_full_packet() {
    let temp = TempDir::new().unwrap();
    let config = small_config(&temp);
    let frame = temp.path().join("frame.bin");
    let packet = temp.path().join("packet.bin");

    inkframe_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--text", "12:00", "--client", "hall"])
        .arg("--frame-out")
        .arg(&frame)
        .arg("--packet")
        .arg(&packet)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 64x48 frame (384 bytes)"))
        .stdout(predicate::str::contains("Packet for 'hall': Full, 386 bytes"));

    assert_eq!(std::fs::read(&frame).unwrap().len(), 384);
    assert_eq!(std::fs::read(&packet).unwrap()[0] & 0b111, 1);
}

#[test]
fn identical_previous_frame_yields_noop() {
    let temp = TempDir::new().unwrap();
    let config = small_config(&temp);
    let frame = temp.path().join("frame.bin");
    let packet = temp.path().join("packet.bin");

    inkframe_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--text", "12:00"])
        .arg("--frame-out")
        .arg(&frame)
        .assert()
        .success();

    inkframe_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--text", "12:00"])
        .arg("--previous")
        .arg(&frame)
        .arg("--packet")
        .arg(&packet)
        .assert()
        .success()
        .stdout(predicate::str::contains("NoOp, 2 bytes"));
}

#[test]
fn previous_frame_of_wrong_size_is_rejected() {
    let temp = TempDir::new().unwrap();
    let config = small_config(&temp);
    let previous = temp.path().join("previous.bin");
    std::fs::write(&previous, [0u8; 10]).unwrap();

    inkframe_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--text", "12:00"])
        .arg("--previous")
        .arg(&previous)
        .arg("--packet")
        .arg(temp.path().join("packet.bin"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not match the display size"));
}

#[test]
fn inspect_prints_partial_header() {
    let temp = TempDir::new().unwrap();
    let packet = temp.path().join("packet.bin");
    let mut bytes = vec![0b1010_1010, 30, 0, 48, 0, 8, 0, 8, 0, 8, 0, 2, 0xAA, 0xBB];
    bytes.extend([0u8; 8]);
    std::fs::write(&packet, &bytes).unwrap();

    inkframe_cmd()
        .arg("--inspect")
        .arg(&packet)
        .assert()
        .success()
        .stdout(predicate::str::contains("opcode: Partial"))
        .stdout(predicate::str::contains("sleep: 30 min"))
        .stdout(predicate::str::contains("bounds: x=48 y=8 w=8 h=8"))
        .stdout(predicate::str::contains("previous: 2 bytes"));
}

#[test]
fn inspect_rejects_garbage() {
    let temp = TempDir::new().unwrap();
    let packet = temp.path().join("packet.bin");
    std::fs::write(&packet, [0x00, 0x00]).unwrap();

    inkframe_cmd()
        .arg("--inspect")
        .arg(&packet)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown protocol tag"));
}
