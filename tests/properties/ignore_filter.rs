//! Property tests for publish ignore rules.

use proptest::prelude::*;

use sitesync::infrastructure::fs::{IgnoreFilter, DEFAULT_PUBLISH_IGNORES};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9_-]{1,10}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: anything under an ignored entry is ignored too.
    #[test]
    fn property_ignored_entries_cover_descendants(
        index in 0..DEFAULT_PUBLISH_IGNORES.len(),
        tail in proptest::collection::vec(segment(), 1..4),
    ) {
        let filter = IgnoreFilter::publish_default();
        let path = format!("{}/{}", DEFAULT_PUBLISH_IGNORES[index], tail.join("/"));
        prop_assert!(filter.is_ignored(std::path::Path::new(&path), false));
    }

    /// PROPERTY: ordinary site paths are never ignored by default.
    #[test]
    fn property_plain_paths_are_kept(
        parts in proptest::collection::vec(segment(), 1..5),
    ) {
        let filter = IgnoreFilter::publish_default();
        let path = parts.join("/");
        prop_assert!(!filter.is_ignored(std::path::Path::new(&path), false));
    }
}
