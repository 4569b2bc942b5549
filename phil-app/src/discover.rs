//! Discovery browser state: tab, search query, and the join guard.
//!
//! Search always runs over the full catalogs. The owning-church guard for
//! joining a group is enforced here, at the view level, because the
//! selection store deliberately accepts any id.

use phil_catalog::{filter_churches, filter_groups, Catalog, Church, SmallGroup};

use crate::selection::SelectionStore;

/// Which discovery tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoverTab {
    Churches,
    Groups,
}

/// State a group's join button can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinAction {
    /// Church followed, group not yet joined
    Join,
    /// Already a member
    Joined,
    /// Owning church not followed; the action is disabled
    FollowChurchFirst,
}

impl JoinAction {
    /// Whether the button accepts a click.
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Join | Self::Joined)
    }
}

/// Local state of the discovery browser.
#[derive(Debug, Clone)]
pub struct DiscoverView {
    tab: DiscoverTab,
    query: String,
}

impl DiscoverView {
    /// Open on the churches tab with an empty query.
    pub fn new() -> Self {
        Self {
            tab: DiscoverTab::Churches,
            query: String::new(),
        }
    }

    /// Active tab.
    pub fn tab(&self) -> DiscoverTab {
        self.tab
    }

    /// Current search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Switch tabs; the query carries over, as in the original browser.
    pub fn select_tab(&mut self, tab: DiscoverTab) {
        self.tab = tab;
    }

    /// Update the search query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Churches matching the query, over the full directory.
    pub fn filtered_churches<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Church> {
        filter_churches(catalog.directory(), &self.query)
    }

    /// Groups matching the query, over the full group catalog.
    pub fn filtered_groups<'a>(&self, catalog: &'a Catalog) -> Vec<&'a SmallGroup> {
        filter_groups(catalog.groups(), &self.query)
    }

    /// Whether the current tab has zero results.
    pub fn is_empty(&self, catalog: &Catalog) -> bool {
        match self.tab {
            DiscoverTab::Churches => self.filtered_churches(catalog).is_empty(),
            DiscoverTab::Groups => self.filtered_groups(catalog).is_empty(),
        }
    }

    /// View-level join guard: a group is joinable only while its owning
    /// church is followed.
    pub fn can_join(&self, group: &SmallGroup, selection: &SelectionStore) -> bool {
        selection.is_following(&group.church_id)
    }

    /// Button state for a group card.
    pub fn join_action(&self, group: &SmallGroup, selection: &SelectionStore) -> JoinAction {
        if selection.has_joined(&group.id) {
            JoinAction::Joined
        } else if selection.is_following(&group.church_id) {
            JoinAction::Join
        } else {
            JoinAction::FollowChurchFirst
        }
    }
}

impl Default for DiscoverView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_guard_blocks_unfollowed_church_group() {
        let catalog = Catalog::builtin();
        let view = DiscoverView::new();
        let selection = SelectionStore::new();

        let group = catalog.group("g-dec-1").unwrap();
        assert!(!view.can_join(group, &selection));
        assert_eq!(
            view.join_action(group, &selection),
            JoinAction::FollowChurchFirst
        );
        assert!(!view.join_action(group, &selection).is_enabled());
    }

    #[test]
    fn test_join_action_after_following() {
        let catalog = Catalog::builtin();
        let view = DiscoverView::new();
        let mut selection = SelectionStore::new();
        let group = catalog.group("g-dec-1").unwrap();

        selection.toggle_follow("v-decatur");
        assert_eq!(view.join_action(group, &selection), JoinAction::Join);

        selection.toggle_join_group("g-dec-1");
        assert_eq!(view.join_action(group, &selection), JoinAction::Joined);
    }

    #[test]
    fn test_store_itself_has_no_guard() {
        // The invariant is UI-enforced; the store accepts the join even
        // though nothing is followed.
        let mut selection = SelectionStore::new();
        selection.toggle_join_group("g-dul-3");
        assert!(selection.has_joined("g-dul-3"));
    }

    #[test]
    fn test_search_covers_full_catalog_not_followed_subset() {
        let catalog = Catalog::builtin();
        let mut view = DiscoverView::new();
        view.set_query("victory");

        // Nothing followed, discovery still shows everything.
        assert_eq!(view.filtered_churches(&catalog).len(), 5);
    }

    #[test]
    fn test_empty_state_detection() {
        let catalog = Catalog::builtin();
        let mut view = DiscoverView::new();

        view.set_query("nonexistent-xyz");
        assert!(view.is_empty(&catalog));

        view.select_tab(DiscoverTab::Groups);
        assert!(view.is_empty(&catalog));

        view.set_query("");
        assert!(!view.is_empty(&catalog));
    }
}
