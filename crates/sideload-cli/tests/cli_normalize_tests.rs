//! CLI integration tests
//!
//! These drive the built `sideload` binary against fixture files.

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const SCHEMA: &str = r#"
associations:
  - alias: author
    model: user
  - alias: tags
    collection: tag
"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn posts_fixture(dir: &Path) -> PathBuf {
    let posts = json!([
        {"id": 1, "author": {"id": 9, "name": "ann"}, "tags": [{"id": 5}, {"id": 6}]},
        {"id": 2, "author": {"id": 9, "name": "ann"}, "tags": [{"id": 6}]}
    ]);
    write(dir, "posts.json", &posts.to_string())
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sideload"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run sideload binary")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "sideload failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_normalize_sideloads_and_dedups() {
    let temp_dir = TempDir::new().unwrap();
    let input = posts_fixture(temp_dir.path());
    let schema = write(temp_dir.path(), "schema.yaml", SCHEMA);

    let output = run(&[
        "normalize",
        "--type",
        "post",
        "--input",
        input.to_str().unwrap(),
        "--schema",
        schema.to_str().unwrap(),
    ]);

    assert_eq!(
        stdout_json(&output),
        json!({
            "post": [
                {"id": 1, "author": 9, "tags": [5, 6]},
                {"id": 2, "author": 9, "tags": [6]}
            ],
            "user": [{"id": 9, "name": "ann"}],
            "tag": [{"id": 5}, {"id": 6}]
        })
    );
}

#[test]
fn test_normalize_with_meta_and_no_related_model() {
    let temp_dir = TempDir::new().unwrap();
    let input = posts_fixture(temp_dir.path());
    let schema = write(temp_dir.path(), "schema.yaml", SCHEMA);
    let meta = write(temp_dir.path(), "meta.json", r#"{"total": 2}"#);

    let output = run(&[
        "normalize",
        "-t",
        "post",
        "-i",
        input.to_str().unwrap(),
        "-s",
        schema.to_str().unwrap(),
        "-m",
        meta.to_str().unwrap(),
        "--no-related-model",
    ]);

    let doc = stdout_json(&output);
    assert_eq!(doc["user"], json!([]));
    assert_eq!(doc["meta"], json!({"total": 2}));
}

#[test]
fn test_normalize_list_without_schema_rejected_by_config() {
    let temp_dir = TempDir::new().unwrap();
    let input = posts_fixture(temp_dir.path());
    let config = write(
        temp_dir.path(),
        "config.yaml",
        "list_without_associations: reject\n",
    );

    let output = run(&[
        "normalize",
        "--type",
        "post",
        "--input",
        input.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("without association descriptors"));
}

#[test]
fn test_normalize_writes_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = posts_fixture(temp_dir.path());
    let out = temp_dir.path().join("doc.json");

    let output = run(&[
        "normalize",
        "--type",
        "post",
        "--input",
        input.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
        "--pretty",
    ]);

    assert!(output.status.success());
    let doc: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(doc["post"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_bad_schema_reports_alias() {
    let temp_dir = TempDir::new().unwrap();
    let input = posts_fixture(temp_dir.path());
    let schema = write(
        temp_dir.path(),
        "schema.yaml",
        "associations:\n  - alias: editor\n",
    );

    let output = run(&[
        "normalize",
        "--type",
        "post",
        "--input",
        input.to_str().unwrap(),
        "--schema",
        schema.to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("'editor'"));
}

#[test]
fn test_ok_embeds_records_unflattened() {
    let temp_dir = TempDir::new().unwrap();
    let input = write(temp_dir.path(), "post.json", r#"{"id": 1, "author": {"id": 9}}"#);

    let output = run(&["ok", "--type", "post", "--input", input.to_str().unwrap()]);

    assert_eq!(
        stdout_json(&output),
        json!({"post": {"id": 1, "author": {"id": 9}}})
    );
}

#[test]
fn test_log_json_writes_json_lines_to_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let input = posts_fixture(temp_dir.path());
    let schema = write(temp_dir.path(), "schema.yaml", SCHEMA);
    let args = [
        "normalize",
        "--type",
        "post",
        "--input",
        input.to_str().unwrap(),
        "--schema",
        schema.to_str().unwrap(),
    ];

    let mut json_args = args.to_vec();
    json_args.push("--log-json");
    let output = run(&json_args);
    let body = stdout_json(&output);
    assert_eq!(body["user"], json!([{"id": 9, "name": "ann"}]));

    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<Value> = stderr
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("log line is JSON"))
        .collect();
    assert!(lines
        .iter()
        .any(|line| line["fields"]["op"] == "assemble" && line["fields"]["event"] == "end"));

    let output = run(&args);
    stdout_json(&output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("assemble"));
    assert!(stderr
        .lines()
        .all(|line| serde_json::from_str::<Value>(line).is_err()));
}
