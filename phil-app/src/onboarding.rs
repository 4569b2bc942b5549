//! Onboarding flow: a forward-only four-step state machine.
//!
//! `Intro → FollowChurches → JoinGroups → Summary`, with skip edges from
//! the two middle steps straight to the summary. Leaving FollowChurches
//! through the primary action requires at least one followed church; the
//! skip edge bypasses the guard. The flow is torn down after `complete`
//! and never re-entered unless the shell resets it.

use std::collections::HashSet;

use phil_catalog::{Catalog, Church, SmallGroup};

/// Error types for onboarding transitions.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OnboardingError {
    /// The primary continue action requires at least one followed church
    #[error("Cannot continue: no churches followed")]
    NoChurchesFollowed,

    /// No forward transition exists from the summary step
    #[error("Onboarding already at summary")]
    AlreadyComplete,

    /// Skip is only available from the two middle steps
    #[error("Cannot skip from step {0:?}")]
    SkipUnavailable(OnboardingStep),

    /// Completion is the summary step's terminal action
    #[error("Complete is only available from the summary step")]
    NotAtSummary,

    /// No flow is active (already completed or never started)
    #[error("No onboarding flow is active")]
    NotActive,
}

/// The four onboarding steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    Intro,
    FollowChurches,
    JoinGroups,
    Summary,
}

impl OnboardingStep {
    /// 1-based position for the "Step N of 4" progress indicator.
    pub fn position(&self) -> u8 {
        match self {
            Self::Intro => 1,
            Self::FollowChurches => 2,
            Self::JoinGroups => 3,
            Self::Summary => 4,
        }
    }

    /// Progress fraction for the progress bar.
    pub fn progress(&self) -> f32 {
        self.position() as f32 / 4.0
    }
}

/// Filter applied to the group list on the JoinGroups step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupFilter {
    /// All groups whose owning church is currently followed
    All,
    /// One church's groups, regardless of follow status
    Church(String),
}

impl Default for GroupFilter {
    fn default() -> Self {
        Self::All
    }
}

/// Accumulated result handed to the shell on completion.
#[derive(Debug, Clone)]
pub struct OnboardingOutcome {
    /// Followed churches, catalog order
    pub followed_churches: Vec<Church>,
    /// Joined groups, catalog order
    pub joined_groups: Vec<SmallGroup>,
}

/// The onboarding flow state machine.
#[derive(Debug, Clone)]
pub struct OnboardingFlow {
    step: OnboardingStep,
    followed: HashSet<String>,
    joined: HashSet<String>,
    group_filter: GroupFilter,
}

impl OnboardingFlow {
    /// Start a fresh flow at the intro step.
    pub fn new() -> Self {
        Self {
            step: OnboardingStep::Intro,
            followed: HashSet::new(),
            joined: HashSet::new(),
            group_filter: GroupFilter::All,
        }
    }

    /// Current step.
    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    /// Current group filter.
    pub fn group_filter(&self) -> &GroupFilter {
        &self.group_filter
    }

    /// Number of churches followed so far.
    pub fn followed_count(&self) -> usize {
        self.followed.len()
    }

    /// Whether a church is followed.
    pub fn is_following(&self, church_id: &str) -> bool {
        self.followed.contains(church_id)
    }

    /// Whether a group is joined.
    pub fn has_joined(&self, group_id: &str) -> bool {
        self.joined.contains(group_id)
    }

    /// Flip a church in the followed set.
    pub fn toggle_follow(&mut self, church_id: &str) {
        if !self.followed.remove(church_id) {
            self.followed.insert(church_id.to_string());
        }
    }

    /// Flip a group in the joined set.
    pub fn toggle_join(&mut self, group_id: &str) {
        if !self.joined.remove(group_id) {
            self.joined.insert(group_id.to_string());
        }
    }

    /// Set the group filter.
    pub fn set_group_filter(&mut self, filter: GroupFilter) {
        self.group_filter = filter;
    }

    /// Primary forward transition.
    ///
    /// Guarded out of FollowChurches: at least one church must be
    /// followed. Use [`skip`](Self::skip) for the unguarded edge.
    pub fn advance(&mut self) -> Result<OnboardingStep, OnboardingError> {
        self.step = match self.step {
            OnboardingStep::Intro => OnboardingStep::FollowChurches,
            OnboardingStep::FollowChurches => {
                if self.followed.is_empty() {
                    return Err(OnboardingError::NoChurchesFollowed);
                }
                OnboardingStep::JoinGroups
            }
            OnboardingStep::JoinGroups => OnboardingStep::Summary,
            OnboardingStep::Summary => return Err(OnboardingError::AlreadyComplete),
        };
        Ok(self.step)
    }

    /// Skip edge: jump straight to the summary, bypassing any guard.
    pub fn skip(&mut self) -> Result<OnboardingStep, OnboardingError> {
        match self.step {
            OnboardingStep::FollowChurches | OnboardingStep::JoinGroups => {
                self.step = OnboardingStep::Summary;
                Ok(self.step)
            }
            other => Err(OnboardingError::SkipUnavailable(other)),
        }
    }

    /// Groups visible on the JoinGroups step under the current filter.
    ///
    /// `All` means "groups of currently followed churches"; a specific
    /// church shows its groups regardless of follow status.
    pub fn filtered_groups<'a>(&self, catalog: &'a Catalog) -> Vec<&'a SmallGroup> {
        catalog
            .groups()
            .iter()
            .filter(|g| match &self.group_filter {
                GroupFilter::All => self.followed.contains(&g.church_id),
                GroupFilter::Church(id) => &g.church_id == id,
            })
            .collect()
    }

    /// Terminal action: resolve the accumulated sets against the catalog
    /// and consume the flow.
    ///
    /// Resolution happens at invocation time, so mutations made after
    /// reaching the summary are reflected in the outcome.
    pub fn complete(self, catalog: &Catalog) -> OnboardingOutcome {
        let followed_churches = catalog
            .directory()
            .iter()
            .filter(|c| self.followed.contains(&c.id))
            .cloned()
            .collect();
        let joined_groups = catalog
            .groups()
            .iter()
            .filter(|g| self.joined.contains(&g.id))
            .cloned()
            .collect();

        OnboardingOutcome {
            followed_churches,
            joined_groups,
        }
    }
}

impl Default for OnboardingFlow {
    fn default() -> Self {
        Self::new()
    }
}
