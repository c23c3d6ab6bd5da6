use proptest::prelude::*;
use std::collections::HashMap;

/// Strategy for generating tag keys from a small alphabet so maps overlap
pub fn tag_key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

/// Strategy for generating tag values, kept short to force collisions
pub fn tag_value_strategy() -> impl Strategy<Value = String> {
    "[xyz]{0,2}"
}

/// Strategy for generating tag maps
pub fn tag_map_strategy() -> impl Strategy<Value = HashMap<String, String>> {
    prop::collection::hash_map(tag_key_strategy(), tag_value_strategy(), 0..8)
}
