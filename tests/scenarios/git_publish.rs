//! Scenario: Publishing to a git host
//!
//! Journey: a site owner publishes to GitHub with a deploy key, publishes
//! again incrementally, then inspects and pulls the remote. The embedded
//! git binary is replaced by a recording shell script.

use std::fs;
use std::sync::Arc;

use serde_json::{json, Value};
use sitesync::application::GitSettings;
use sitesync::domain::entities::{GitConfig, PublishConfig, SyncConfig};
use sitesync::domain::value_objects::{GitProvider, PublishScope};
use sitesync::infrastructure::events::RecordingConsole;
use sitesync::infrastructure::git::DEFAULT_GIT_TIMEOUT;
use sitesync::SyncError;

use crate::common::*;

fn github_target(scope: PublishScope) -> PublishConfig {
    PublishConfig {
        key: "prod".to_string(),
        config: SyncConfig::Git(GitConfig {
            git_provider: GitProvider::Github,
            git_base_url: "github.com".to_string(),
            username: "acme".to_string(),
            repository: "blog".to_string(),
            email: "ops@acme.test".to_string(),
            deploy_private_key: "-----BEGIN KEY-----\nabc\n-----END KEY-----\n".to_string(),
            publish_scope: scope,
            set_ci_workflow: true,
            cname_switch: true,
            cname: "www.acme.test".to_string(),
            ..GitConfig::default()
        }),
    }
}

fn settings(fixture: &SiteFixture, fail_push: bool) -> GitSettings {
    GitSettings {
        binary: Some(fake_git(&fixture.path("bin"), fail_push)),
        timeout: DEFAULT_GIT_TIMEOUT,
    }
}

/// SCENARIO: a full-clone publish of the rendered site
#[test]
fn scenario_hard_push_publishes_build_output() {
    let fixture = SiteFixture::new();
    let (factory, progress) = fixture.factory(settings(&fixture, false));

    let service = factory
        .get_serialized_publisher(&github_target(PublishScope::Build), SITE_KEY, WORKSPACE_KEY)
        .unwrap();
    let result = service.action_dispatcher("hardPush", None).unwrap();
    assert_eq!(result, Value::Bool(true));

    let calls = git_calls(&fixture.path("bin"));
    let subcommands: Vec<&str> = calls.iter().filter_map(|c| c.split(' ').next()).collect();
    assert_eq!(subcommands, vec!["clone", "checkout", "alladd", "commit", "push"]);
    assert!(calls[0].contains("git@github.com:acme/blog.git"));
    assert!(calls[1].starts_with("checkout -r main "));
    assert!(calls[3].starts_with("commit -s -n acme -e ops@acme.test -m Publish from sitesync ("));

    let staging = fixture.data_dir().join("sites/blog/githubSyncRepo");
    assert!(staging.join(".git/HEAD").is_file());
    assert!(staging.join("index.html").is_file());
    assert!(!staging.join("README.md").exists(), "remote tree is replaced");
    assert_eq!(
        fs::read_to_string(staging.join("CNAME")).unwrap(),
        "www.acme.test\n"
    );
    assert!(!staging.join(".github").exists(), "no workflow for build scope");

    assert!(dir_is_empty(&fixture.data_dir().join("temp/keys")));
    assert!(!fixture.data_dir().join("temp/blog/clone").exists());
    assert!(progress.last().unwrap().complete);
}

/// SCENARIO: source scope ships sources plus a CI workflow
#[test]
fn scenario_source_publish_adds_workflow() {
    let fixture = SiteFixture::new();
    let console = Arc::new(RecordingConsole::new());
    let (factory, _) = fixture.factory_with_console(settings(&fixture, false), console.clone());

    let service = factory
        .get_serialized_publisher(&github_target(PublishScope::Source), SITE_KEY, WORKSPACE_KEY)
        .unwrap();
    service.action_dispatcher("hardPush", None).unwrap();

    let staging = fixture.data_dir().join("sites/blog/githubSyncRepo");
    let workflow = fs::read_to_string(staging.join(".github/workflows/hugo-build.yml")).unwrap();
    assert!(workflow.contains("branches:"));
    assert!(workflow.contains("- main"));
    assert!(staging.join("static/CNAME").is_file());
    assert!(staging.join("content/post.md").is_file());
    assert!(!staging.join("public").exists());
    assert!(console
        .lines()
        .iter()
        .any(|line| line.starts_with("Wrote CI workflow")));
}

/// SCENARIO: the second publish reuses the cached checkout
#[test]
fn scenario_soft_merge_reuses_checkout() {
    let fixture = SiteFixture::new();
    let (factory, _) = fixture.factory(settings(&fixture, false));
    let service = factory
        .get_serialized_publisher(&github_target(PublishScope::Build), SITE_KEY, WORKSPACE_KEY)
        .unwrap();

    service.action_dispatcher("pushWithSoftMerge", None).unwrap();
    let first: Vec<String> = git_calls(&fixture.path("bin"));
    assert!(first[0].starts_with("clone"), "no checkout yet: {:?}", first);

    service.action_dispatcher("pushWithSoftMerge", None).unwrap();
    let second: Vec<String> = git_calls(&fixture.path("bin"))[first.len()..].to_vec();
    let subcommands: Vec<&str> = second.iter().filter_map(|c| c.split(' ').next()).collect();
    assert_eq!(
        subcommands,
        vec!["reset_hard", "checkout", "pull", "alladd", "commit", "push"]
    );
    assert!(second[1].starts_with("checkout -r main "));
}

/// SCENARIO: remote history and refs
#[test]
fn scenario_read_remote_and_checkout_ref() {
    let fixture = SiteFixture::new();
    let (factory, _) = fixture.factory(settings(&fixture, false));
    let service = factory
        .get_serialized_publisher(&github_target(PublishScope::Source), SITE_KEY, WORKSPACE_KEY)
        .unwrap();

    let log = service.action_dispatcher("readRemote", None).unwrap();
    assert_eq!(log, json!([{"hash": "abc123", "message": "initial"}]));

    let result = service
        .action_dispatcher("checkoutRef", Some(&json!({"ref": "abc123"})))
        .unwrap();
    assert_eq!(result, json!({"ref": "abc123"}));
    assert!(fixture.source_dir().join("README.md").is_file());
    assert!(!fixture.source_dir().join(".git").exists());

    let err = service.action_dispatcher("checkoutRef", None).unwrap_err();
    assert!(matches!(err, SyncError::InvalidParameters { .. }));
}

/// SCENARIO: a rejected push surfaces the binary's stderr
#[test]
fn scenario_rejected_push_reports_stderr() {
    let fixture = SiteFixture::new();
    let (factory, progress) = fixture.factory(settings(&fixture, true));
    let service = factory
        .get_serialized_publisher(&github_target(PublishScope::Build), SITE_KEY, WORKSPACE_KEY)
        .unwrap();

    let err = service.action_dispatcher("hardPush", None).unwrap_err();
    match err {
        SyncError::ExternalProcessFailure { command, code, stderr } => {
            assert_eq!(command, "embgit push");
            assert_eq!(code, Some(1));
            assert_eq!(stderr, "remote rejected");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(dir_is_empty(&fixture.data_dir().join("temp/keys")));
    assert!(progress.last().unwrap().error.is_some());
}
