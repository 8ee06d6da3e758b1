use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const POST: &str = "# Title\n\nPara A\n\nPara B\n";

#[allow(deprecated)]
fn margin() -> Command {
    let mut cmd = Command::cargo_bin("margin").expect("binary");
    cmd.arg("--quiet");
    cmd
}

fn run_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn segment_prints_ordinal_ids() {
    let temp = tempdir().unwrap();
    let post = write(temp.path(), "post.md", POST);

    let body = run_json(margin().arg("segment").arg(&post));
    let segments = body.as_array().expect("array");
    let ids: Vec<_> = segments
        .iter()
        .map(|s| s["paragraphId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["p-0", "p-1", "p-2"]);
    assert_eq!(segments[0]["rawText"], "# Title");
    assert_eq!(segments[0]["kind"], "heading");
}

#[test]
fn replay_aggregates_and_persists() {
    let temp = tempdir().unwrap();
    let post = write(temp.path(), "hello-world.md", POST);
    let events = write(
        temp.path(),
        "events.jsonl",
        r#"{"kind":"confused","paragraphId":"p-1"}
{"kind":"inspired","paragraphId":"p-1"}

{"kind":"confused","paragraphId":"p-2"}
"#,
    );
    let store = temp.path().join("store");

    let body = run_json(
        margin()
            .arg("replay")
            .arg("--content")
            .arg(&post)
            .arg("--events")
            .arg(&events)
            .arg("--store")
            .arg(&store),
    );
    assert_eq!(body["articleId"], "hello-world");
    assert_eq!(body["applied"], 3);
    assert_eq!(body["segments"], 3);
    assert_eq!(body["aggregate"]["totalFeedbacks"], 3);
    assert_eq!(body["heatmap"]["hotParagraphs"][0]["paragraphId"], "p-1");
    assert_eq!(body["heatmap"]["hotParagraphs"][0]["hotness"], 2);
    assert_eq!(body["heatmap"]["distribution"][0]["kind"], "confused");
    assert_eq!(
        body["aggregate"]["paragraphs"][0]["records"][0]["textSnippet"],
        "Para A"
    );

    // Second replay resumes from the stored snapshot
    let body = run_json(
        margin()
            .arg("replay")
            .arg("--content")
            .arg(&post)
            .arg("--events")
            .arg(&events)
            .arg("--store")
            .arg(&store),
    );
    assert_eq!(body["aggregate"]["totalFeedbacks"], 6);

    let snapshot = store.join("hello-world.json");
    let body = run_json(margin().arg("heatmap").arg(&snapshot).arg("--top").arg("1"));
    let hot = body["hotParagraphs"].as_array().unwrap();
    assert_eq!(hot.len(), 1);
    assert_eq!(hot[0]["hotness"], 4);
    assert_eq!(hot[0]["tier"], 4);
}

#[test]
fn replay_rejects_malformed_event_line() {
    let temp = tempdir().unwrap();
    let post = write(temp.path(), "post.md", POST);
    let events = write(
        temp.path(),
        "events.jsonl",
        "{\"kind\":\"agree\",\"paragraphId\":\"p-0\"}\n{\"kind\":\"shrug\"}\n",
    );

    margin()
        .arg("replay")
        .arg("--content")
        .arg(&post)
        .arg("--events")
        .arg(&events)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn config_file_changes_tiers() {
    let temp = tempdir().unwrap();
    let config = write(temp.path(), "margin.toml", "[heatmap]\ntiers = 2\ntop_n = 3\n");

    let output = margin()
        .arg("--config")
        .arg(&config)
        .arg("show-config")
        .output()
        .expect("command run");
    assert!(output.status.success());
    let rendered = String::from_utf8_lossy(&output.stdout);
    assert!(rendered.contains("tiers = 2"), "{rendered}");
    assert!(rendered.contains("highlight_ms = 3000"), "{rendered}");

    let bad = write(temp.path(), "bad.toml", "[heatmap]\ntiers = 0\n");
    margin()
        .arg("--config")
        .arg(&bad)
        .arg("show-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("tiers must be > 0"));
}
