use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("dxlshark"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn fixture(name: &str) -> std::path::PathBuf {
    repo_root().join("tests").join("fixtures").join(name)
}

#[test]
fn help_supports_decode_and_analyze() {
    cmd().arg("decode").arg("--help").assert().success();
    cmd().arg("analyze").arg("--help").assert().success();
}

#[test]
fn long_version_embeds_build_metadata() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")).and(contains(" (")));
}

#[test]
fn text_output_renders_one_line_per_frame() {
    let output = cmd()
        .arg("decode")
        .arg(fixture("bus.csv"))
        .arg("--text")
        .arg("--quiet")
        .output()
        .expect("run dxlshark");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 8);
    assert!(lines[0].ends_with(" Ping ID:1"));
    assert!(lines[2].ends_with(" Read ID:1 R:PPOS #:2"));
    assert!(lines[3].ends_with(" R:PPOS #:2 512"));
    assert!(lines[5].contains("!chk"));
}

#[test]
fn hex_base_flag_changes_rendering() {
    cmd()
        .arg("decode")
        .arg(fixture("bus.csv"))
        .arg("--text")
        .arg("--quiet")
        .arg("--base")
        .arg("hex")
        .assert()
        .success()
        .stdout(contains("R:PPOS #:0x2 0x200"));
}

#[test]
fn raw_format_is_inferred_from_extension() {
    let output = cmd()
        .arg("decode")
        .arg(fixture("bus.bin"))
        .arg("--stdout")
        .output()
        .expect("run dxlshark");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["report_version"], 1);
    assert_eq!(json["frames"].as_array().map(|f| f.len()), Some(8));
    assert_eq!(json["integrity"]["discarded_partials"], 0);
}

#[test]
fn report_file_is_written() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("out").join("report.json");

    cmd()
        .arg("decode")
        .arg(fixture("bus.csv"))
        .arg("-o")
        .arg(&report)
        .arg("--pretty")
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let data = std::fs::read_to_string(&report).expect("read report");
    let json: Value = serde_json::from_str(&data).expect("json");
    assert_eq!(json["tool"]["name"], "dxlshark");
    assert_eq!(json["integrity"]["checksum_mismatches"], 1);
    assert_eq!(json["servos"][0]["id"], 1);
}

#[test]
fn strict_fails_on_checksum_errors() {
    cmd()
        .arg("decode")
        .arg(fixture("bus.csv"))
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .code(2)
        .stderr(contains("error:").and(contains("integrity errors")));
}

#[test]
fn config_file_sets_decoder_options() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("dxl.toml");
    std::fs::write(&config, "[decoder]\ndisplay_base = \"hex\"\n").expect("write config");

    cmd()
        .arg("decode")
        .arg(fixture("bus.csv"))
        .arg("--text")
        .arg("--quiet")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(contains("0x200"));
}

#[test]
fn invalid_config_shows_error() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("dxl.toml");
    std::fs::write(&config, "[decoder]\nfamily = \"ax\"\n").expect("write config");

    cmd()
        .arg("decode")
        .arg(fixture("bus.csv"))
        .arg("--text")
        .arg("--config")
        .arg(&config)
        .assert()
        .code(2)
        .stderr(contains("error:").and(contains("Invalid config file")));
}

#[test]
fn unknown_family_is_rejected() {
    cmd()
        .arg("decode")
        .arg(fixture("bus.csv"))
        .arg("--text")
        .arg("--p2-family")
        .arg("ax")
        .assert()
        .failure();
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.csv");

    cmd()
        .arg("decode")
        .arg(missing)
        .arg("--stdout")
        .assert()
        .code(2)
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn unknown_extension_needs_format() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("capture.log");
    std::fs::write(&input, [0xFF, 0xFF, 0x01, 0x02, 0x01, 0xFB]).expect("write input");

    cmd()
        .arg("decode")
        .arg(&input)
        .arg("--stdout")
        .assert()
        .code(2)
        .stderr(contains("--format"));

    cmd()
        .arg("decode")
        .arg(&input)
        .arg("--format")
        .arg("raw")
        .arg("--text")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(contains("Ping ID:1"));
}

#[test]
fn glob_with_multiple_matches_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let source = std::fs::read(fixture("bus.csv")).expect("read fixture");
    std::fs::write(temp.path().join("a.csv"), &source).expect("write a");
    std::fs::write(temp.path().join("b.csv"), &source).expect("write b");
    let pattern = temp.path().join("*.csv");

    cmd()
        .arg("decode")
        .arg(pattern)
        .arg("--stdout")
        .assert()
        .code(2)
        .stderr(contains("multiple files match").and(contains("hint:")));
}

#[test]
fn glob_with_single_match_is_resolved() {
    let temp = TempDir::new().expect("tempdir");
    let source = std::fs::read(fixture("bus.csv")).expect("read fixture");
    std::fs::write(temp.path().join("only.csv"), &source).expect("write capture");
    let pattern = temp.path().join("on*.csv");

    cmd()
        .arg("decode")
        .arg(pattern)
        .arg("--text")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(contains("Ping ID:1"));
}

#[test]
fn report_path_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("capture.csv");
    std::fs::copy(fixture("bus.csv"), &input).expect("copy fixture");

    cmd()
        .arg("decode")
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .code(2)
        .stderr(contains("report path must differ"));
}

#[test]
fn report_is_required_without_stdout_or_text() {
    cmd()
        .arg("decode")
        .arg(fixture("bus.csv"))
        .assert()
        .failure();
}
