//! Scenario: Publishing to and pulling from a local folder
//!
//! Journey: a site owner mirrors the rendered site into a web root, later
//! switches the target to source scope, and finally pulls edits made in
//! the folder back into the site.

use std::fs;

use serde_json::Value;
use sitesync::application::GitSettings;
use sitesync::domain::entities::{FolderConfig, PublishConfig, SyncConfig};
use sitesync::domain::value_objects::PublishScope;
use sitesync::SyncError;

use crate::common::*;

fn folder_target(fixture: &SiteFixture, scope: PublishScope) -> PublishConfig {
    PublishConfig {
        key: "webroot".to_string(),
        config: SyncConfig::Folder(FolderConfig {
            path: fixture.out_dir().display().to_string(),
            publish_scope: scope,
            ..FolderConfig::default()
        }),
    }
}

/// SCENARIO: build output lands in the folder without tooling artifacts
#[test]
fn scenario_build_scope_publishes_rendered_site() {
    let fixture = SiteFixture::new();
    write_files(&fixture.out_dir(), &[("stale.html", "old")]);
    let (factory, progress) = fixture.factory(GitSettings::default());

    let service = factory
        .get_serialized_publisher(&folder_target(&fixture, PublishScope::Build), SITE_KEY, WORKSPACE_KEY)
        .unwrap();
    let result = service.action_dispatcher("pushToRemote", None).unwrap();

    assert_eq!(result, Value::Bool(true));
    assert_eq!(
        list_files(&fixture.out_dir()),
        vec!["css/site.css".to_string(), "index.html".to_string()]
    );
    let last = progress.last().unwrap();
    assert!(last.complete, "final event should be complete: {:?}", last);
}

/// SCENARIO: source scope ships sources without the rendered `public/`
#[test]
fn scenario_source_scope_publishes_sources() {
    let fixture = SiteFixture::new();
    let (factory, _) = fixture.factory(GitSettings::default());

    let service = factory
        .get_serialized_publisher(&folder_target(&fixture, PublishScope::Source), SITE_KEY, WORKSPACE_KEY)
        .unwrap();
    service.action_dispatcher("pushToRemote", None).unwrap();

    let out = fixture.out_dir();
    assert!(out.join("config.toml").is_file());
    assert!(out.join("content/post.md").is_file());
    assert!(out.join("static").is_dir());
    assert!(!out.join("public").exists());
    assert!(!out.join(".hugo_build.lock").exists());
    assert!(!out.join(".quiqr-cache").exists());
}

/// SCENARIO: edits made in the folder come back into the site source
#[test]
fn scenario_pull_brings_remote_edits_home() {
    let fixture = SiteFixture::new();
    write_files(
        &fixture.out_dir(),
        &[
            ("content/post.md", "# Edited remotely\n"),
            ("content/new.md", "# New\n"),
            (".gitignore", "public/\n"),
        ],
    );
    write_files(&fixture.source_dir(), &[("drafts/local.md", "wip")]);
    let (factory, _) = fixture.factory(GitSettings::default());

    let service = factory
        .get_serialized_publisher(&folder_target(&fixture, PublishScope::Source), SITE_KEY, WORKSPACE_KEY)
        .unwrap();
    let result = service.action_dispatcher("pullFromRemote", None).unwrap();

    assert_eq!(result, Value::String("reset-and-pulled-from-remote".to_string()));
    let src = fixture.source_dir();
    assert_eq!(
        fs::read_to_string(src.join("content/post.md")).unwrap(),
        "# Edited remotely\n"
    );
    assert!(src.join("content/new.md").is_file());
    assert!(src.join("drafts/local.md").is_file());
    assert!(!src.join(".gitignore").exists());
}

/// SCENARIO: publishing before the first build fails cleanly
#[test]
fn scenario_publish_without_build_reports_error() {
    let fixture = SiteFixture::new();
    fs::remove_dir_all(fixture.build_dir()).unwrap();
    let (factory, progress) = fixture.factory(GitSettings::default());

    let service = factory
        .get_serialized_publisher(&folder_target(&fixture, PublishScope::Build), SITE_KEY, WORKSPACE_KEY)
        .unwrap();
    let err = service.action_dispatcher("pushToRemote", None).unwrap_err();

    assert!(matches!(err, SyncError::NoBuildAvailable { .. }));
    assert!(!fixture.out_dir().exists());
    assert!(progress.last().unwrap().error.is_some());
}

/// SCENARIO: a build without rendered output leaves the live folder alone
#[test]
fn scenario_unrendered_build_keeps_live_folder() {
    let fixture = SiteFixture::new();
    fs::remove_dir_all(fixture.build_dir().join("public")).unwrap();
    write_files(&fixture.out_dir(), &[("keep.html", "live")]);
    let (factory, _) = fixture.factory(GitSettings::default());

    let service = factory
        .get_serialized_publisher(&folder_target(&fixture, PublishScope::Build), SITE_KEY, WORKSPACE_KEY)
        .unwrap();
    let err = service.action_dispatcher("pushToRemote", None).unwrap_err();

    assert!(matches!(err, SyncError::NoBuildAvailable { .. }));
    assert_eq!(list_files(&fixture.out_dir()), vec!["keep.html".to_string()]);
}
