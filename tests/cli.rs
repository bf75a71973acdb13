use assert_cmd::Command;
use predicates::prelude::*;

fn bin() -> Command {
    Command::cargo_bin("chartify_fx").unwrap()
}

#[test]
fn export_writes_a_png() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("parabola.png");

    bin()
        .args(["--expr", "x**2 + 3*x - 5", "--x-min=-10", "--x-max", "10"])
        .arg("--export")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("801 points"));

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn malformed_expression_fails_export() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("bad.png");

    bin()
        .args(["--expr", "x +++ * 2"])
        .arg("--export")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid function"));

    assert!(!out.exists());
}

#[test]
fn inverted_range_fails_export() {
    let dir = tempfile::tempdir().unwrap();

    bin()
        .args(["--x-min", "5", "--x-max", "1", "--export"])
        .arg(dir.path().join("range.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be less than"));
}

#[test]
fn config_file_changes_the_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("plot.json");
    std::fs::write(&config, r#"{ "width": 400, "height": 300 }"#).unwrap();
    let out = dir.path().join("small.png");

    bin()
        .arg("--config")
        .arg(&config)
        .arg("--export")
        .arg(&out)
        .assert()
        .success();

    let image = image::open(&out).unwrap();
    assert_eq!((image.width(), image.height()), (400, 300));
}
