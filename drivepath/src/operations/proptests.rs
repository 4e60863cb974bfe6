//! Property-based tests for filesystem operations.
//!
//! These tests focus on folder materialization and the uniqueness checks
//! the store itself does not enforce.

use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::filesystem::DriveFs;
use crate::remote::memory::{CallKind, MemoryStore};

fn segments_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,6}", 1..5)
}

fn rooted(segments: &[String]) -> String {
    format!("/{}", segments.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 1000,
        .. ProptestConfig::default()
    })]

    // Materializing a chain twice creates nothing the second time
    #[test]
    fn ensure_folder_idempotent(segments in segments_strategy()) {
        let store = MemoryStore::new();
        let fs = DriveFs::new(&store);
        let path = rooted(&segments);

        let first = fs.ensure_folder(&path).unwrap();
        let creates = store.count(CallKind::Create);
        prop_assert_eq!(creates, segments.len());

        let second = fs.ensure_folder(&path).unwrap();
        prop_assert_eq!(first.id, second.id);
        prop_assert_eq!(store.count(CallKind::Create), creates);
    }

    // Overlapping chains share their common prefix
    #[test]
    fn ensure_folder_shares_prefixes(paths in prop::collection::vec(segments_strategy(), 1..6)) {
        let store = MemoryStore::new();
        let fs = DriveFs::new(&store);

        let mut prefixes = BTreeSet::new();
        for segments in &paths {
            for depth in 1..=segments.len() {
                prefixes.insert(segments[..depth].to_vec());
            }
            fs.ensure_folder(&rooted(segments)).unwrap();
        }
        prop_assert_eq!(store.count(CallKind::Create), prefixes.len());
    }

    // A created path exists and cannot be created again
    #[test]
    fn create_then_exists(segments in segments_strategy()) {
        let store = MemoryStore::new();
        let fs = DriveFs::new(&store);
        let path = rooted(&segments);

        fs.create(&path, None, None).unwrap();
        prop_assert!(fs.exists(&path).unwrap());
        let err = fs.create(&path, None, None).unwrap_err();
        prop_assert!(err.is_already_exists());
        prop_assert_eq!(err.filename(), Some(path.as_str()));
    }

    // Listing returns every child once, whatever the page size
    #[test]
    fn listing_is_complete(count in 0usize..40, page_size in 1usize..10) {
        let store = MemoryStore::new().with_page_size(page_size);
        let dir = store.insert_folder("dir", Some("root"));
        for i in 0..count {
            store.insert_file(&format!("f{i}"), "text/plain", Some(&dir), b"");
        }
        let fs = DriveFs::new(&store);

        let names: BTreeSet<String> = fs
            .list("/dir", None, None)
            .unwrap()
            .into_iter()
            .map(|record| record.name)
            .collect();
        prop_assert_eq!(names.len(), count);
    }

    // A rename onto a taken sibling name changes nothing
    #[test]
    fn rename_collision_preserves_both(a in "[a-z]{1,6}", b in "[a-z]{1,6}") {
        prop_assume!(a != b);
        let store = MemoryStore::new();
        let fs = DriveFs::new(&store);
        let path_a = format!("/{a}");
        let path_b = format!("/{b}");
        fs.create(&path_a, None, None).unwrap();
        fs.create(&path_b, None, None).unwrap();

        let err = fs.rename(&path_a, &b).unwrap_err();
        prop_assert!(err.is_already_exists());
        let kept_a = fs.exists(&path_a).unwrap();
        let kept_b = fs.exists(&path_b).unwrap();
        prop_assert!(kept_a);
        prop_assert!(kept_b);
        prop_assert_eq!(store.count(CallKind::Update), 0);
    }
}
