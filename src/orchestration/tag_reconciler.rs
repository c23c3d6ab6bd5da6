//! # Tag Reconciliation
//!
//! Computes the minimal set of tag mutations needed to move a resource from
//! its previously attached tags to its desired tags.
//!
//! ## Overview
//!
//! Tags reach a cluster from two sources: stack-level tags supplied by the
//! orchestrator and resource-level tags declared on the model. Both sides of
//! the diff are built by overlaying the resource-level map on the stack-level
//! one, so resource-level values win when the same key appears in both.
//!
//! Everything here is pure; the update handler issues the remote calls.

use std::collections::{HashMap, HashSet};

use crate::models::ResourceHandlerRequest;

/// Tag mutations required to reach the desired tag set
///
/// A key never appears in both `tags_to_add` and `tags_to_remove`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDelta {
    /// Entries that are new or whose value changed
    pub tags_to_add: HashMap<String, String>,

    /// Keys that are no longer desired
    pub tags_to_remove: HashSet<String>,
}

impl TagDelta {
    /// Diff previously attached tags against desired tags
    pub fn diff(previous: &HashMap<String, String>, desired: &HashMap<String, String>) -> Self {
        let tags_to_add = desired
            .iter()
            .filter(|(key, value)| previous.get(*key) != Some(*value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let tags_to_remove = previous
            .keys()
            .filter(|key| !desired.contains_key(*key))
            .cloned()
            .collect();

        Self {
            tags_to_add,
            tags_to_remove,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tags_to_add.is_empty() && self.tags_to_remove.is_empty()
    }

    /// Result of applying this delta to `previous`
    pub fn apply(&self, previous: &HashMap<String, String>) -> HashMap<String, String> {
        let mut result: HashMap<String, String> = previous
            .iter()
            .filter(|(key, _)| !self.tags_to_remove.contains(*key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        result.extend(
            self.tags_to_add
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        result
    }

    /// Keys to remove in a stable order, for the untag call
    pub fn keys_to_remove(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.tags_to_remove.iter().cloned().collect();
        keys.sort();
        keys
    }
}

fn overlay(
    stack_tags: Option<&HashMap<String, String>>,
    resource_tags: Option<&HashMap<String, String>>,
) -> HashMap<String, String> {
    let mut merged = stack_tags.cloned().unwrap_or_default();
    if let Some(resource_tags) = resource_tags {
        merged.extend(
            resource_tags
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
    }
    merged
}

/// Tags attached before this update: previous stack tags overlaid by previous resource tags
pub fn previously_attached_tags(request: &ResourceHandlerRequest) -> HashMap<String, String> {
    overlay(
        request.previous_resource_tags.as_ref(),
        request
            .previous_resource_state
            .as_ref()
            .map(|previous| &previous.tags),
    )
}

/// Tags wanted after this update: desired stack tags overlaid by desired resource tags
pub fn new_desired_tags(request: &ResourceHandlerRequest) -> HashMap<String, String> {
    overlay(
        request.desired_resource_tags.as_ref(),
        Some(&request.desired_resource_state.tags),
    )
}

/// Tags stamped onto the model at create time
///
/// Same overlay as [`new_desired_tags`], so a later update sees every created
/// tag as already attached.
pub fn tags_for_create(request: &ResourceHandlerRequest) -> HashMap<String, String> {
    new_desired_tags(request)
}
