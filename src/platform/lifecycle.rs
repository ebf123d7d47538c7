//! Page lifecycle
//!
//! A page entering the back/forward cache may come back later, so its frame
//! loop is only suspended. A real unload releases it for good.

/// What the frame loop should do for a page transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    Suspend,
    Resume,
    Stop,
}

impl LoopAction {
    /// Map a `pagehide`/`pageshow` event and its `persisted` flag
    pub fn for_page_transition(event_type: &str, persisted: bool) -> Option<Self> {
        match (event_type, persisted) {
            ("pagehide", true) => Some(Self::Suspend),
            ("pagehide", false) => Some(Self::Stop),
            // A fresh (non-cached) show is the initial load; the loop is already running
            ("pageshow", true) => Some(Self::Resume),
            _ => None,
        }
    }
}
