use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use filetime::{set_file_mtime, FileTime};
use reslib_core::LibraryConfig;
use reslib_publish::{
    diff_site, publish,
    status::{check, PublishStatus},
    WriteResult,
};
use tempfile::TempDir;

const METADATA: &str = r#"{"knowledge_blocks":{
    "onboarding":{"id":1,"title":"Onboarding checklist","summary":"First week plan","tags":["hr","people"],"category":"People Ops","difficulty":"Beginner","content_files":["template.md","preview.png"]},
    "retro":{"id":"retro-2","title":"Sprint retro","category":"Engineering"},
    "postmortem":{"id":3,"title":"Incident postmortem","summary":"","tags":[],"category":"Engineering"}
}}"#;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn site(root: &Path) -> LibraryConfig {
    let metadata = root.join("metadata.json");
    fs::write(&metadata, METADATA).expect("write metadata");
    let old = FileTime::from_system_time(SystemTime::now() - Duration::from_secs(60 * 60));
    set_file_mtime(&metadata, old).expect("age metadata");
    LibraryConfig {
        metadata: metadata.display().to_string(),
        page_title: "Team Templates".to_string(),
        description: Some("Reusable documents".to_string()),
        stylesheets: vec!["/assets/library.css".to_string()],
        output: root.join("public").join("templates.html"),
        ..LibraryConfig::default()
    }
}

#[test]
fn publish_writes_complete_page() {
    init_logging();
    let tmp = TempDir::new().expect("tmp");
    let config = site(tmp.path());

    let result = publish(&config, false).expect("publish");
    assert!(matches!(result.write, WriteResult::Written { .. }));
    assert_eq!(result.summary.categories, 2);
    assert_eq!(result.summary.cards, 3);
    assert_eq!(result.summary.active_tab.as_deref(), Some("People-Ops"));

    let html = fs::read_to_string(&config.output).expect("read page");
    assert!(html.contains("<title>Team Templates</title>"));
    assert!(html.contains(r#"content="Reusable documents""#));
    assert!(html.contains(r#"href="&#x2F;assets&#x2F;library.css""#));
    assert!(html.contains(r#"href="&#x2F;templates&#x2F;1&#x2F;template.md""#));
    assert!(html.contains(r#"href="&#x2F;templates&#x2F;retro-2&#x2F;template.md""#));
    assert!(html.contains("No description provided"));
    assert!(html.contains("hr, people"));
    assert!(html.contains(r#"<span class="template-keywords"></span>"#));
    assert!(html.contains(r#"src="preview.png""#));
    assert_eq!(html.matches("<script>").count(), 1);
}

#[test]
fn lifecycle_status_tracks_publish_and_edits() {
    init_logging();
    let tmp = TempDir::new().expect("tmp");
    let config = site(tmp.path());

    assert_eq!(check(&config).expect("status"), PublishStatus::NeverPublished);

    publish(&config, false).expect("publish");
    assert_eq!(check(&config).expect("status"), PublishStatus::Current);
    assert!(diff_site(&config).expect("diff").is_none());

    fs::write(&config.output, "<html></html>\n").expect("hand edit");
    assert_eq!(check(&config).expect("status"), PublishStatus::Modified);
    let diff = diff_site(&config).expect("diff").expect("pending change");
    assert!(diff.unified_diff.contains("-<html></html>"));

    let repaired = publish(&config, false).expect("republish");
    assert!(matches!(repaired.write, WriteResult::Written { .. }));
    assert_eq!(check(&config).expect("status"), PublishStatus::Current);
}

#[test]
fn metadata_edit_marks_page_stale() {
    init_logging();
    let tmp = TempDir::new().expect("tmp");
    let config = site(tmp.path());
    publish(&config, false).expect("publish");

    let newer = FileTime::from_system_time(SystemTime::now() + Duration::from_secs(120));
    set_file_mtime(&config.metadata, newer).expect("touch metadata");

    match check(&config).expect("status") {
        PublishStatus::Stale { reason } => assert!(reason.starts_with("metadata changed")),
        other => panic!("expected stale, got {other:?}"),
    }
}

#[test]
fn failed_load_publishes_nothing() {
    init_logging();
    let tmp = TempDir::new().expect("tmp");
    let mut config = site(tmp.path());
    fs::write(&config.metadata, "{ not json").expect("corrupt metadata");

    assert!(publish(&config, false).is_err());
    assert!(!config.output.exists());

    config.metadata = tmp.path().join("missing.json").display().to_string();
    assert!(publish(&config, false).is_err());
    assert!(!config.output.exists());
}
