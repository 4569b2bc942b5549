//! PhilApp - the application shell.
//!
//! Owns every piece of session state (selection, conversation, layout,
//! discovery, onboarding) exclusively. Child views receive read-only
//! derived data and report user actions through the intent methods here;
//! nothing mutates state from below.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use phil_assistant::AssistantBackend;
use phil_catalog::{Catalog, Church, ContextDescriptor, SmallGroup};

use crate::config::AppConfig;
use crate::conversation::{ConversationEngine, FailureNotice, Message, SendTicket};
use crate::discover::DiscoverView;
use crate::layout::LayoutState;
use crate::onboarding::{OnboardingError, OnboardingFlow, OnboardingStep};
use crate::selection::SelectionStore;

/// The Phil application shell.
pub struct PhilApp {
    config: AppConfig,
    catalog: Arc<Catalog>,
    selection: SelectionStore,
    engine: ConversationEngine,
    layout: LayoutState,
    discover: DiscoverView,
    onboarding: Option<OnboardingFlow>,
}

impl PhilApp {
    /// Create a session with an empty transcript and onboarding active.
    pub fn new(config: AppConfig, backend: Arc<dyn AssistantBackend>) -> Self {
        Self::build(config, backend, false)
    }

    /// Create a session preloaded with the catalog's seed transcript.
    pub fn seeded(config: AppConfig, backend: Arc<dyn AssistantBackend>) -> Self {
        Self::build(config, backend, true)
    }

    fn build(config: AppConfig, backend: Arc<dyn AssistantBackend>, seed: bool) -> Self {
        let catalog = Arc::new(Catalog::builtin());
        let engine = if seed {
            ConversationEngine::seeded(
                Arc::clone(&backend),
                Arc::clone(&catalog),
                config.conversation.clone(),
            )
        } else {
            ConversationEngine::new(
                Arc::clone(&backend),
                Arc::clone(&catalog),
                config.conversation.clone(),
            )
        };

        info!(model = %backend.id(), "Starting Phil session");

        Self {
            // Starts wide; the host reports the real width via resize().
            layout: LayoutState::with_threshold(
                config.layout.narrow_threshold_px,
                config.layout.narrow_threshold_px,
            ),
            config,
            catalog,
            selection: SelectionStore::new(),
            engine,
            discover: DiscoverView::new(),
            onboarding: Some(OnboardingFlow::new()),
        }
    }

    /// The shared content catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Session configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // ---- Onboarding -----------------------------------------------------

    /// The active onboarding flow, if any.
    pub fn onboarding(&self) -> Option<&OnboardingFlow> {
        self.onboarding.as_ref()
    }

    /// Mutable access for onboarding intents (toggle/advance/skip).
    pub fn onboarding_mut(&mut self) -> Option<&mut OnboardingFlow> {
        self.onboarding.as_mut()
    }

    /// Terminal onboarding action.
    ///
    /// Installs the accumulated sets, selects the first followed church
    /// when there is one, and tears the flow down.
    pub fn complete_onboarding(&mut self) -> Result<(), OnboardingError> {
        let flow = self.onboarding.take().ok_or(OnboardingError::NotActive)?;
        if flow.step() != OnboardingStep::Summary {
            // Not at the terminal step; put the flow back untouched.
            let step = flow.step();
            self.onboarding = Some(flow);
            debug!(?step, "Rejected onboarding completion before summary");
            return Err(OnboardingError::NotAtSummary);
        }

        let outcome = flow.complete(&self.catalog);
        let followed: HashSet<String> = outcome
            .followed_churches
            .iter()
            .map(|c| c.id.clone())
            .collect();
        let joined: HashSet<String> = outcome.joined_groups.iter().map(|g| g.id.clone()).collect();

        info!(
            followed = followed.len(),
            joined = joined.len(),
            "Onboarding complete"
        );

        self.selection.install(followed, joined);
        if let Some(first) = outcome.followed_churches.first() {
            self.selection.select_church(&first.id);
        }
        Ok(())
    }

    /// Re-open onboarding (the only way a completed flow is re-entered).
    pub fn reset_onboarding(&mut self) {
        self.onboarding = Some(OnboardingFlow::new());
    }

    // ---- Selection intents ----------------------------------------------

    /// Sidebar intent: make a church the active context.
    pub fn select_church(&mut self, church_id: &str) {
        self.selection.select_church(church_id);
        self.layout.handle_selection();
    }

    /// Sidebar intent: make a group the active context.
    pub fn select_group(&mut self, group_id: &str) {
        self.selection.select_group(group_id);
        self.layout.handle_selection();
    }

    /// Discovery intent: flip a church follow.
    pub fn toggle_follow(&mut self, church_id: &str) {
        self.selection.toggle_follow(church_id);
    }

    /// Discovery intent: flip a group membership.
    ///
    /// The discovery view disables the action for unfollowed churches;
    /// this method trusts the view and applies the flip unconditionally.
    pub fn toggle_join_group(&mut self, group_id: &str) {
        self.selection.toggle_join_group(group_id);
    }

    /// Read-only selection state.
    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    /// Followed churches in catalog order.
    pub fn followed_churches(&self) -> Vec<&Church> {
        self.selection.followed_churches(&self.catalog)
    }

    /// Joined groups in catalog order.
    pub fn joined_groups(&self) -> Vec<&SmallGroup> {
        self.selection.joined_groups(&self.catalog)
    }

    /// Context for the next outbound request.
    pub fn active_context(&self) -> ContextDescriptor {
        self.selection.active_context(&self.catalog)
    }

    // ---- Conversation ----------------------------------------------------

    /// Send a user message.
    ///
    /// Whitespace-only input is a no-op and returns `None`, matching the
    /// caller-side contract; otherwise one assistant request is
    /// dispatched and its ticket returned.
    pub async fn send_message(&self, text: &str) -> Option<SendTicket> {
        let context = self.selection.active_context(&self.catalog);
        let church_tag = self.selection.church_tag_for_message();
        self.engine.send(text, context, church_tag).await.ok()
    }

    /// Transcript snapshot.
    pub async fn messages(&self) -> Vec<Message> {
        self.engine.messages().await
    }

    /// Recorded assistant failures.
    pub async fn failures(&self) -> Vec<FailureNotice> {
        self.engine.failures().await
    }

    /// Whether the typing indicator should show.
    pub async fn is_typing(&self) -> bool {
        self.engine.is_typing().await
    }

    /// Abort one in-flight request.
    pub async fn cancel_request(&self, request_id: &str) -> bool {
        self.engine.cancel(request_id).await
    }

    // ---- Layout & discovery ---------------------------------------------

    /// Current layout state.
    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    /// Viewport resize signal.
    pub fn resize(&mut self, width_px: u32) {
        self.layout.handle_resize(width_px);
    }

    /// Open or close the sidebar.
    pub fn set_sidebar_open(&mut self, open: bool) {
        self.layout.set_sidebar_open(open);
    }

    /// Flip the detail panel.
    pub fn toggle_context_panel(&mut self) {
        self.layout.toggle_context_panel();
    }

    /// Switch to the discovery browser.
    pub fn open_discover(&mut self) {
        self.layout.open_discover();
    }

    /// Return from discovery to the chat.
    pub fn back_to_chat(&mut self) {
        self.layout.back_to_chat();
    }

    /// The discovery browser state.
    pub fn discover(&self) -> &DiscoverView {
        &self.discover
    }

    /// Mutable access for discovery intents (tab, query).
    pub fn discover_mut(&mut self) -> &mut DiscoverView {
        &mut self.discover
    }
}
