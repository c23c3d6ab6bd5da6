mod common;

use common::strategies::*;
use proptest::prelude::*;

use cluster_provider::orchestration::TagDelta;

proptest! {
    /// Property: removed keys are never desired
    #[test]
    fn removed_keys_are_absent_from_desired(previous in tag_map_strategy(), desired in tag_map_strategy()) {
        let delta = TagDelta::diff(&previous, &desired);
        for key in &delta.tags_to_remove {
            prop_assert!(!desired.contains_key(key), "Key {} is both removed and desired", key);
        }
    }

    /// Property: unchanged entries are never re-added
    #[test]
    fn unchanged_entries_are_not_added(previous in tag_map_strategy(), desired in tag_map_strategy()) {
        let delta = TagDelta::diff(&previous, &desired);
        for (key, value) in &delta.tags_to_add {
            prop_assert_ne!(previous.get(key), Some(value));
        }
    }

    /// Property: a key is never both added and removed
    #[test]
    fn add_and_remove_sets_are_disjoint(previous in tag_map_strategy(), desired in tag_map_strategy()) {
        let delta = TagDelta::diff(&previous, &desired);
        for key in delta.tags_to_add.keys() {
            prop_assert!(!delta.tags_to_remove.contains(key));
        }
    }

    /// Property: applying the delta to the previous tags yields the desired tags
    #[test]
    fn applying_delta_reaches_desired(previous in tag_map_strategy(), desired in tag_map_strategy()) {
        let delta = TagDelta::diff(&previous, &desired);
        let applied = delta.apply(&previous);
        prop_assert_eq!(&applied, &desired);
        prop_assert!(TagDelta::diff(&applied, &desired).is_empty());
    }

    /// Property: diffing a tag set against itself is empty
    #[test]
    fn self_diff_is_empty(tags in tag_map_strategy()) {
        prop_assert!(TagDelta::diff(&tags, &tags).is_empty());
    }
}
