//! Selection state: followed churches, joined groups, active context.
//!
//! The store tracks raw id sets and performs no referential enforcement;
//! unknown ids are inert and the join guard lives in the discovery view.

use std::collections::HashSet;

use phil_catalog::{Catalog, Church, ContextDescriptor, SmallGroup};

/// Sentinel church id for the unscoped conversation context.
pub const GENERAL_CONTEXT: &str = "general";

/// Session-scoped selection state.
///
/// Owned exclusively by [`crate::PhilApp`]; views see derived lists only.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    followed: HashSet<String>,
    joined: HashSet<String>,
    active_church: String,
    active_group: Option<String>,
}

impl SelectionStore {
    /// Create an empty store with the general context active.
    pub fn new() -> Self {
        Self {
            followed: HashSet::new(),
            joined: HashSet::new(),
            active_church: GENERAL_CONTEXT.to_string(),
            active_group: None,
        }
    }

    /// Flip membership of a church in the followed set.
    ///
    /// Unknown ids are simply stored and never resolve to anything.
    pub fn toggle_follow(&mut self, church_id: &str) {
        if !self.followed.remove(church_id) {
            self.followed.insert(church_id.to_string());
        }
    }

    /// Flip membership of a group in the joined set.
    ///
    /// No owning-church check here; the discovery view disables the
    /// action when the church is not followed.
    pub fn toggle_join_group(&mut self, group_id: &str) {
        if !self.joined.remove(group_id) {
            self.joined.insert(group_id.to_string());
        }
    }

    /// Replace both sets wholesale (onboarding completion).
    pub fn install(&mut self, followed: HashSet<String>, joined: HashSet<String>) {
        self.followed = followed;
        self.joined = joined;
    }

    /// Set the active church; clears any active group.
    pub fn select_church(&mut self, church_id: &str) {
        self.active_church = church_id.to_string();
        self.active_group = None;
    }

    /// Set the active group; the group takes precedence for context.
    pub fn select_group(&mut self, group_id: &str) {
        self.active_group = Some(group_id.to_string());
    }

    /// Currently active church id.
    pub fn active_church(&self) -> &str {
        &self.active_church
    }

    /// Currently active group id, if any.
    pub fn active_group(&self) -> Option<&str> {
        self.active_group.as_deref()
    }

    /// Whether a church is followed.
    pub fn is_following(&self, church_id: &str) -> bool {
        self.followed.contains(church_id)
    }

    /// Whether a group is joined.
    pub fn has_joined(&self, group_id: &str) -> bool {
        self.joined.contains(group_id)
    }

    /// The raw followed set.
    pub fn followed_ids(&self) -> &HashSet<String> {
        &self.followed
    }

    /// The raw joined set.
    pub fn joined_ids(&self) -> &HashSet<String> {
        &self.joined
    }

    /// Followed churches in catalog (directory) order.
    pub fn followed_churches<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Church> {
        catalog
            .directory()
            .iter()
            .filter(|c| self.followed.contains(&c.id))
            .collect()
    }

    /// Joined groups in catalog order.
    pub fn joined_groups<'a>(&self, catalog: &'a Catalog) -> Vec<&'a SmallGroup> {
        catalog
            .groups()
            .iter()
            .filter(|g| self.joined.contains(&g.id))
            .collect()
    }

    /// Resolve the context descriptor for the next outbound request.
    ///
    /// An active group wins; otherwise the active church, resolved over
    /// featured churches plus followed directory churches; otherwise
    /// general. An unfollowed directory church does not scope the
    /// conversation even while selected.
    pub fn active_context(&self, catalog: &Catalog) -> ContextDescriptor {
        if let Some(group_id) = &self.active_group {
            if let Some(group) = catalog.group(group_id) {
                return ContextDescriptor::Group {
                    name: group.name.clone(),
                };
            }
        }

        if self.active_church != GENERAL_CONTEXT {
            let resolvable = catalog
                .featured()
                .iter()
                .any(|c| c.id == self.active_church)
                || self.followed.contains(&self.active_church);
            if resolvable {
                if let Some(church) = catalog.church(&self.active_church) {
                    return ContextDescriptor::Church {
                        name: church.name.clone(),
                    };
                }
            }
        }

        ContextDescriptor::General
    }

    /// Church tag for the next user message.
    ///
    /// Set only when no group is active and the active church is not the
    /// general sentinel.
    pub fn church_tag_for_message(&self) -> Option<String> {
        if self.active_group.is_some() || self.active_church == GENERAL_CONTEXT {
            None
        } else {
            Some(self.active_church.clone())
        }
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_follow_involution() {
        let mut store = SelectionStore::new();
        store.toggle_follow("v-decatur");
        let snapshot = store.followed_ids().clone();

        store.toggle_follow("v-duluth");
        store.toggle_follow("v-duluth");

        assert_eq!(*store.followed_ids(), snapshot);
    }

    #[test]
    fn test_store_does_not_guard_group_join() {
        let mut store = SelectionStore::new();
        // No churches followed; the store still accepts the join.
        store.toggle_join_group("g-dec-1");
        assert!(store.has_joined("g-dec-1"));
    }

    #[test]
    fn test_unknown_ids_are_inert() {
        let mut store = SelectionStore::new();
        let catalog = Catalog::builtin();

        store.toggle_follow("not-a-church");
        assert!(store.followed_churches(&catalog).is_empty());
    }

    #[test]
    fn test_select_church_clears_group() {
        let mut store = SelectionStore::new();
        store.select_group("g-dec-1");
        assert_eq!(store.active_group(), Some("g-dec-1"));

        store.select_church("v-decatur");
        assert!(store.active_group().is_none());
        assert_eq!(store.active_church(), "v-decatur");
    }

    #[test]
    fn test_group_takes_precedence_in_context() {
        let catalog = Catalog::builtin();
        let mut store = SelectionStore::new();
        store.toggle_follow("v-decatur");
        store.select_church("v-decatur");
        store.select_group("g-dec-1");

        match store.active_context(&catalog) {
            ContextDescriptor::Group { name } => {
                assert_eq!(name, "Young Professionals (25-35)")
            }
            other => panic!("expected group context, got {:?}", other),
        }
    }

    #[test]
    fn test_featured_church_resolves_context() {
        let catalog = Catalog::builtin();
        let mut store = SelectionStore::new();
        store.select_church("grace-community");

        match store.active_context(&catalog) {
            ContextDescriptor::Church { name } => assert_eq!(name, "Grace Community"),
            other => panic!("expected church context, got {:?}", other),
        }
    }

    #[test]
    fn test_unfollowed_directory_church_falls_back_to_general() {
        let catalog = Catalog::builtin();
        let mut store = SelectionStore::new();
        store.select_church("v-duluth");

        // Selected but not followed: no church scope for the request.
        assert_eq!(store.active_context(&catalog), ContextDescriptor::General);
        // The message itself is still tagged with the selected church.
        assert_eq!(store.church_tag_for_message(), Some("v-duluth".to_string()));

        store.toggle_follow("v-duluth");
        match store.active_context(&catalog) {
            ContextDescriptor::Church { name } => assert_eq!(name, "Victory Duluth"),
            other => panic!("expected church context, got {:?}", other),
        }
    }

    #[test]
    fn test_general_fallback() {
        let catalog = Catalog::builtin();
        let store = SelectionStore::new();
        assert_eq!(store.active_context(&catalog), ContextDescriptor::General);
        assert!(store.church_tag_for_message().is_none());
    }

    #[test]
    fn test_active_group_suppresses_church_tag() {
        let mut store = SelectionStore::new();
        store.select_church("v-decatur");
        assert_eq!(store.church_tag_for_message(), Some("v-decatur".to_string()));

        store.select_group("g-dec-1");
        assert!(store.church_tag_for_message().is_none());
    }

    #[test]
    fn test_derived_lists_in_catalog_order() {
        let catalog = Catalog::builtin();
        let mut store = SelectionStore::new();
        store.toggle_follow("v-duluth");
        store.toggle_follow("v-decatur");

        let names: Vec<&str> = store
            .followed_churches(&catalog)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Victory Decatur", "Victory Duluth"]);
    }
}
