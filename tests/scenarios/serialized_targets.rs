//! Scenario: Concurrent publishes
//!
//! Several threads publish at once, either the same folder target or two
//! git targets of one site. Each action runs to completion before another
//! one touching the same staging state starts, so every destination ends
//! up with exactly one full copy of the site.

use std::sync::Arc;
use std::thread;

use sitesync::application::GitSettings;
use sitesync::domain::entities::{FolderConfig, GitConfig, PublishConfig, SyncConfig};

use crate::common::*;

#[test]
fn scenario_parallel_publishes_do_not_interleave() {
    let fixture = SiteFixture::new();
    let (factory, _) = fixture.factory(GitSettings::default());
    let factory = Arc::new(factory);
    let target = PublishConfig {
        key: "webroot".to_string(),
        config: SyncConfig::Folder(FolderConfig {
            path: fixture.out_dir().display().to_string(),
            ..FolderConfig::default()
        }),
    };

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let factory = factory.clone();
            let target = target.clone();
            thread::spawn(move || {
                let service = factory
                    .get_serialized_publisher(&target, SITE_KEY, WORKSPACE_KEY)
                    .unwrap();
                service.action_dispatcher("pushToRemote", None).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(
        list_files(&fixture.out_dir()),
        vec!["css/site.css".to_string(), "index.html".to_string()]
    );
    assert!(fixture
        .data_dir()
        .join("locks")
        .read_dir()
        .unwrap()
        .next()
        .is_some());
}

#[cfg(unix)]
fn git_target(key: &str, provider: sitesync::GitProvider, base_url: &str) -> PublishConfig {
    PublishConfig {
        key: key.to_string(),
        config: SyncConfig::Git(GitConfig {
            git_provider: provider,
            git_base_url: base_url.to_string(),
            username: "acme".to_string(),
            repository: "blog".to_string(),
            deploy_private_key: "-----BEGIN KEY-----\nabc\n-----END KEY-----\n".to_string(),
            ..GitConfig::default()
        }),
    }
}

/// SCENARIO: two git targets of one site share the temp clone root
#[cfg(unix)]
#[test]
fn scenario_git_targets_of_one_site_do_not_interleave() {
    use sitesync::infrastructure::git::DEFAULT_GIT_TIMEOUT;
    use sitesync::GitProvider;

    let fixture = SiteFixture::new();
    let (factory, _) = fixture.factory(GitSettings {
        binary: Some(slow_fake_git(&fixture.path("bin"), 1)),
        timeout: DEFAULT_GIT_TIMEOUT,
    });
    let factory = Arc::new(factory);
    let targets = [
        git_target("prod", GitProvider::Github, "github.com"),
        git_target("mirror", GitProvider::Gitlab, "gitlab.com"),
    ];

    let handles: Vec<_> = targets
        .iter()
        .cloned()
        .map(|target| {
            let factory = factory.clone();
            thread::spawn(move || {
                let service = factory
                    .get_serialized_publisher(&target, SITE_KEY, WORKSPACE_KEY)
                    .unwrap();
                service
                    .action_dispatcher("hardPush", None)
                    .map_err(|e| e.to_string())
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for result in &results {
        assert_eq!(result.as_ref(), Ok(&serde_json::Value::Bool(true)), "{:?}", results);
    }
    for staging in ["githubSyncRepo", "gitlabSyncRepo"] {
        let dir = fixture.data_dir().join("sites/blog").join(staging);
        assert!(dir.join(".git/HEAD").is_file(), "{} has history", staging);
        assert!(dir.join("index.html").is_file(), "{} has the site", staging);
    }
}
