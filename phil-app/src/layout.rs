//! Viewport-derived layout state.
//!
//! The only signal the layout needs from the host window is its width;
//! everything else is a boolean derived from the narrow threshold.

/// Viewport width below which the overlay layout is used.
pub const NARROW_THRESHOLD_PX: u32 = 1024;

/// Which main view fills the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Chat,
    Discover,
}

/// Panel and view state derived from the viewport.
#[derive(Debug, Clone)]
pub struct LayoutState {
    narrow: bool,
    sidebar_open: bool,
    context_panel_open: bool,
    view: ViewMode,
    threshold_px: u32,
}

impl LayoutState {
    /// Create layout state for an initial viewport width.
    pub fn new(width_px: u32) -> Self {
        Self::with_threshold(width_px, NARROW_THRESHOLD_PX)
    }

    /// Create with a custom narrow threshold.
    pub fn with_threshold(width_px: u32, threshold_px: u32) -> Self {
        let narrow = width_px < threshold_px;
        Self {
            narrow,
            // Wide viewports keep the sidebar persistent; narrow ones
            // start with it closed.
            sidebar_open: !narrow,
            context_panel_open: false,
            view: ViewMode::Chat,
            threshold_px,
        }
    }

    /// Whether the overlay layout is active.
    pub fn is_narrow(&self) -> bool {
        self.narrow
    }

    /// Whether the sidebar is visible.
    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    /// Whether the detail panel is visible.
    pub fn context_panel_open(&self) -> bool {
        self.context_panel_open
    }

    /// Active main view.
    pub fn view(&self) -> ViewMode {
        self.view
    }

    /// Recompute on a window resize.
    pub fn handle_resize(&mut self, width_px: u32) {
        self.narrow = width_px < self.threshold_px;
        self.sidebar_open = !self.narrow;
    }

    /// Open or close the sidebar.
    pub fn set_sidebar_open(&mut self, open: bool) {
        self.sidebar_open = open;
    }

    /// Flip the detail panel.
    pub fn toggle_context_panel(&mut self) {
        self.context_panel_open = !self.context_panel_open;
    }

    /// Switch to the discovery browser.
    pub fn open_discover(&mut self) {
        self.view = ViewMode::Discover;
        if self.narrow {
            self.sidebar_open = false;
        }
    }

    /// Return to the chat view.
    pub fn back_to_chat(&mut self) {
        self.view = ViewMode::Chat;
    }

    /// A sidebar selection was made: return to chat, and on narrow
    /// viewports dismiss the overlay sidebar.
    pub fn handle_selection(&mut self) {
        self.view = ViewMode::Chat;
        if self.narrow {
            self.sidebar_open = false;
        }
    }
}
