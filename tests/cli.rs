use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn write_arguments(json: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().expect("temp arguments file");
    tmp.write_all(json.as_bytes()).expect("write arguments");
    tmp
}

#[test]
fn cli_prints_resolved_defaults_for_minimal_arguments() {
    let file = write_arguments(
        r#"{"dataUrl": "build.data", "frameworkUrl": "build.framework.js", "codeUrl": "build.wasm"}"#,
    );
    let mut cmd = Command::cargo_bin("webgl-loader-args").expect("binary exists");
    cmd.arg(file.path());
    cmd.assert()
        .success()
        .stdout(contains("Data: build.data"))
        .stdout(contains("Framework: build.framework.js"))
        .stdout(contains("Code: build.wasm"))
        .stdout(contains("Streaming assets: StreamingAssets"))
        .stdout(contains("Device pixel ratio: 1"))
        .stdout(contains("Match WebGL to canvas size: true"))
        .stdout(contains("Disabled canvas events: contextmenu, dragstart"))
        .stdout(contains("Memory:").not());
}

#[test]
fn cli_reports_metadata_and_cache_policy() {
    let file = write_arguments(
        r#"{
  "dataUrl": "Build/game.data",
  "frameworkUrl": "Build/game.framework.js",
  "codeUrl": "Build/game.wasm",
  "companyName": "Acme",
  "productName": "Rocket",
  "productVersion": "1.2.0",
  "disabledCanvasEvents": ["wheel"]
}"#,
    );
    let mut cmd = Command::cargo_bin("webgl-loader-args").expect("binary exists");
    cmd.arg(file.path())
        .args(["--cache-policy", "Build/game.data"])
        .args(["--cache-policy", "Build/game.wasm"]);
    cmd.assert()
        .success()
        .stdout(contains("Product: Acme / Rocket 1.2.0"))
        .stdout(contains("Disabled canvas events: wheel"))
        .stdout(contains("cache Build/game.data: must-revalidate"))
        .stdout(contains("cache Build/game.wasm: no-store"));
}

#[test]
fn cli_revalidates_compressed_data_file() {
    let file = write_arguments(
        r#"{"dataUrl": "Build/game.data.gz", "frameworkUrl": "Build/game.framework.js.gz", "codeUrl": "Build/game.wasm.gz"}"#,
    );
    let mut cmd = Command::cargo_bin("webgl-loader-args").expect("binary exists");
    cmd.arg(file.path())
        .args(["--cache-policy", "Build/game.data.gz"])
        .args(["--cache-policy", "Build/game.wasm.gz"]);
    cmd.assert()
        .success()
        .stdout(contains("cache Build/game.data.gz: must-revalidate"))
        .stdout(contains("cache Build/game.wasm.gz: no-store"));
}

#[test]
fn cli_echoes_json_without_adding_defaults() {
    let file = write_arguments(
        r#"{"dataUrl": "a.data", "frameworkUrl": "a.js", "codeUrl": "a.wasm", "matchWebGLToCanvasSize": false}"#,
    );
    let mut cmd = Command::cargo_bin("webgl-loader-args").expect("binary exists");
    cmd.arg(file.path()).arg("--json");
    cmd.assert()
        .success()
        .stdout(contains("\"matchWebGLToCanvasSize\": false"))
        .stdout(contains("disabledCanvasEvents").not());
}

#[test]
fn cli_rejects_empty_mandatory_url() {
    let file = write_arguments(r#"{"dataUrl": "", "frameworkUrl": "a.js", "codeUrl": "a.wasm"}"#);
    let mut cmd = Command::cargo_bin("webgl-loader-args").expect("binary exists");
    cmd.arg(file.path());
    cmd.assert()
        .failure()
        .stderr(contains("required argument `dataUrl` is missing or empty"));
}

#[test]
fn cli_rejects_missing_mandatory_field() {
    let file = write_arguments(r#"{"dataUrl": "a.data", "codeUrl": "a.wasm"}"#);
    let mut cmd = Command::cargo_bin("webgl-loader-args").expect("binary exists");
    cmd.arg(file.path());
    cmd.assert()
        .failure()
        .stderr(contains("missing field `frameworkUrl`"));
}

#[test]
fn cli_requires_a_path() {
    let mut cmd = Command::cargo_bin("webgl-loader-args").expect("binary exists");
    cmd.assert().failure().stderr(contains("Usage: webgl-loader-args"));
}
