//! Property-based tests for path normalization and resolution.

use super::normalize::{collapse_separators, join, split, split_last, ROOT};
use super::resolver::PathResolver;
use crate::remote::memory::MemoryStore;
use proptest::prelude::*;

fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ._'-]{1,16}"
}

// Segments joined by runs of one to three separators.
fn messy_path_strategy() -> impl Strategy<Value = (bool, Vec<String>, Vec<usize>)> {
    (
        any::<bool>(),
        prop::collection::vec(segment_strategy(), 1..8),
        prop::collection::vec(1..4usize, 8),
    )
}

fn render(leading: bool, segments: &[String], runs: &[usize]) -> String {
    let mut path = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 || leading {
            path.push_str(&"/".repeat(runs[i]));
        }
        path.push_str(segment);
    }
    path
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 2000,
        .. ProptestConfig::default()
    })]

    // Separator-only paths are the root
    #[test]
    fn separator_only_paths_are_root(n in 1..64usize) {
        let path = "/".repeat(n);
        prop_assert_eq!(collapse_separators(&path), ROOT);
        prop_assert!(split(&path).anchor().is_root());
    }

    // Collapsing is idempotent
    #[test]
    fn collapse_idempotent(path in "[a-c/]{0,24}") {
        let once = collapse_separators(&path).into_owned();
        let twice = collapse_separators(&once).into_owned();
        prop_assert_eq!(once.clone(), twice);
        prop_assert!(!once.contains("//"));
    }

    // Split recovers every segment in order, regardless of separator runs
    #[test]
    fn split_recovers_segments((leading, segments, runs) in messy_path_strategy()) {
        let path = render(leading, &segments, &runs);
        let components = split(&path);
        let anchor = components.anchor();

        prop_assert_eq!(&anchor.name, &segments[0]);
        prop_assert_eq!(anchor.parent_id.is_some(), leading);
        prop_assert_eq!(components.remaining(), segments[1..].iter().map(String::as_str).collect::<Vec<_>>());
    }

    // split_last and join are inverse on collapsed paths
    #[test]
    fn split_last_join_roundtrip((leading, segments, runs) in messy_path_strategy()) {
        let path = collapse_separators(&render(leading, &segments, &runs)).into_owned();
        let (head, tail) = split_last(&path);
        prop_assert_eq!(join(head, tail), path);
    }

    // A trailing separator always leaves an empty leaf
    #[test]
    fn trailing_separator_never_resolves(segments in prop::collection::vec(segment_strategy(), 1..4)) {
        let store = MemoryStore::new();
        let mut parent = "root".to_string();
        for segment in &segments {
            parent = store.insert_folder(segment, Some(&parent));
        }
        let path = format!("/{}//", segments.join("/"));

        let resolver = PathResolver::new(&store);
        let err = resolver.stat(&path, None).unwrap_err();
        prop_assert!(err.is_not_found());
        prop_assert_eq!(err.filename(), Some(path.as_str()));
    }
}
