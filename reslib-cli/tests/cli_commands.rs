use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const METADATA: &str = r#"{"knowledge_blocks":{
    "kickoff":{"id":1,"title":"Project kickoff","summary":"Agenda and roles","tags":["planning"],"category":"Project Management","difficulty":"Beginner","content_files":["template.md","kickoff.PNG"]},
    "risks":{"id":2,"title":"Risk register","category":"Project Management"},
    "adr":{"id":"adr-3","title":"Architecture decision record","category":"Engineering"}
}}"#;

fn reslib_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("reslib"));
    cmd.current_dir(dir).env_remove("RUST_LOG");
    for (key, _) in std::env::vars_os() {
        if key.to_str().is_some_and(|k| k.starts_with("CRL_")) {
            cmd.env_remove(key);
        }
    }
    cmd
}

fn library(metadata: &str) -> TempDir {
    let dir = TempDir::new().expect("tmp");
    fs::write(dir.path().join("metadata.json"), metadata).expect("metadata");
    fs::write(
        dir.path().join("reslib.yaml"),
        "page_title: Team Library\noutput: public/index.html\n",
    )
    .expect("config");
    dir
}

#[test]
fn render_prints_tabbed_page_to_stdout() {
    let dir = library(METADATA);
    let assert = reslib_cmd(dir.path()).arg("render").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");

    assert!(stdout.contains("<title>Team Library</title>"));
    assert_eq!(stdout.matches(r#"class="template-card""#).count(), 3);
    assert!(stdout.contains(r#"data-tab="Project-Management""#));
    assert!(stdout.contains(r#"href="&#x2F;templates&#x2F;adr-3&#x2F;template.md""#));
    assert!(stdout.contains(r#"src="kickoff.PNG""#));
    assert!(!dir.path().join("public").exists(), "render must not publish");
}

#[test]
fn render_fragment_with_tab_activates_requested_panel() {
    let dir = library(METADATA);
    let assert = reslib_cmd(dir.path())
        .args(["render", "--fragment", "--tab", "Engineering"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");

    assert!(!stdout.contains("<html"));
    assert!(stdout.contains(r#"class="tab-button active" data-tab="Engineering""#));
    assert!(stdout.contains(r#"class="tab-content active" data-tab-content="Engineering""#));
    assert_eq!(stdout.matches(" active\"").count(), 2);
}

#[test]
fn render_unknown_tab_fails() {
    let dir = library(METADATA);
    reslib_cmd(dir.path())
        .args(["render", "--tab", "Marketing"])
        .assert()
        .failure()
        .stderr(contains("Marketing"));
}

#[test]
fn render_to_file_with_overrides() {
    let dir = library(METADATA);
    let other = dir.path().join("single.json");
    fs::write(
        &other,
        r#"{"knowledge_blocks":{"x":{"id":9,"title":"Solo","category":"Only"}}}"#,
    )
    .expect("write");

    reslib_cmd(dir.path())
        .args(["render", "--container", "gallery", "--output", "out/page.html"])
        .arg("--metadata")
        .arg(&other)
        .assert()
        .success()
        .stdout(contains("1 template(s) in 1 category"));

    let html = fs::read_to_string(dir.path().join("out").join("page.html")).expect("read");
    assert!(html.contains(r#"<div id="gallery">"#));
    assert!(!html.contains("tab-button"));
    assert!(!html.contains("<script>"));
}

#[test]
fn missing_metadata_is_reported() {
    let dir = TempDir::new().expect("tmp");
    reslib_cmd(dir.path())
        .arg("render")
        .assert()
        .failure()
        .stderr(contains("failed to load metadata"));
}

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = library(METADATA);
    reslib_cmd(dir.path())
        .args(["--config", "nope.yaml", "render"])
        .assert()
        .failure()
        .stderr(contains("config file not found"));
}

#[test]
fn env_override_disables_previews() {
    let dir = library(METADATA);
    reslib_cmd(dir.path())
        .env("CRL_SHOW_PREVIEWS", "false")
        .args(["render", "--fragment"])
        .assert()
        .success()
        .stdout(contains("template-preview").not());
}

#[test]
fn publish_then_status_and_diff() {
    let dir = library(METADATA);
    let page = dir.path().join("public").join("index.html");

    reslib_cmd(dir.path())
        .args(["publish", "--dry-run"])
        .assert()
        .success()
        .stdout(contains("[dry-run]"));
    assert!(!page.exists(), "dry-run must not write");

    reslib_cmd(dir.path())
        .arg("publish")
        .assert()
        .success()
        .stdout(contains("3 template(s), 2 categories (tabbed)"));
    assert!(page.exists());

    reslib_cmd(dir.path())
        .arg("publish")
        .assert()
        .success()
        .stdout(contains("(unchanged)"));

    reslib_cmd(dir.path())
        .arg("diff")
        .assert()
        .success()
        .stdout(contains("No differences"));

    let assert = reslib_cmd(dir.path())
        .args(["status", "--json"])
        .assert()
        .success();
    let report: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("status json");
    assert!(matches!(
        report["status"].as_str(),
        Some("current") | Some("stale")
    ));

    fs::write(&page, "<p>edited</p>\n").expect("edit");
    reslib_cmd(dir.path())
        .arg("diff")
        .assert()
        .success()
        .stdout(contains("-<p>edited</p>"))
        .stdout(contains("+++ b/index.html"));
}

#[test]
fn status_before_publish_is_never_published() {
    let dir = library(METADATA);
    let assert = reslib_cmd(dir.path())
        .args(["status", "--json"])
        .assert()
        .success();
    let report: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("status json");
    assert_eq!(report["status"], "never_published");
    assert_eq!(report["last_publish_age"], "never");
}

#[test]
fn categories_json_lists_tabs_in_order() {
    let dir = library(METADATA);
    let assert = reslib_cmd(dir.path())
        .args(["categories", "--json"])
        .assert()
        .success();
    let rows: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("categories json");
    assert_eq!(
        rows,
        serde_json::json!([
            {"category": "Project Management", "slug": "Project-Management", "templates": 2},
            {"category": "Engineering", "slug": "Engineering", "templates": 1}
        ])
    );
}

#[test]
fn validate_passes_clean_document() {
    let dir = library(METADATA);
    reslib_cmd(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(contains("no issues"));
}

#[test]
fn validate_fails_on_duplicate_ids() {
    let dir = library(
        r#"{"knowledge_blocks":{
            "a":{"id":1,"title":"A","category":"C"},
            "b":{"id":"1","title":"B","category":"C"}
        }}"#,
    );
    reslib_cmd(dir.path())
        .arg("validate")
        .assert()
        .failure()
        .stdout(contains("share id '1'"))
        .stderr(contains("1 issue(s) found"));
}

#[cfg(unix)]
#[test]
fn non_unicode_environment_does_not_abort() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let dir = library(METADATA);
    reslib_cmd(dir.path())
        .env("RESLIB_UNRELATED_BYTES", OsString::from_vec(vec![0x66, 0xff, 0x6f]))
        .arg("categories")
        .assert()
        .success()
        .stdout(contains("Project Management"));
}

#[cfg(unix)]
#[test]
fn non_unicode_override_value_is_reported() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let dir = library(METADATA);
    reslib_cmd(dir.path())
        .env("CRL_PAGE_TITLE", OsString::from_vec(vec![b'T', 0xfe]))
        .arg("render")
        .assert()
        .failure()
        .stderr(contains("CRL_PAGE_TITLE").and(contains("UTF-8")));
}

#[test]
fn debug_verbosity_logs_resolved_config() {
    let dir = library(METADATA);
    reslib_cmd(dir.path())
        .env("NO_COLOR", "1")
        .args(["-vv", "categories"])
        .assert()
        .success()
        .stderr(contains("resolved config").and(contains("template-library")));
}
