//! Scenario tests for sitesync.
//!
//! Scenarios run complete publish journeys through the `SyncFactory`,
//! the same entry point the CLI uses.
//!
//! Run with: cargo test --test scenarios

mod common;

#[path = "scenarios/folder_publish.rs"]
mod folder_publish;

#[cfg(unix)]
#[path = "scenarios/git_publish.rs"]
mod git_publish;

#[path = "scenarios/serialized_targets.rs"]
mod serialized_targets;
