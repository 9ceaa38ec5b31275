use crate::search::PendingHighlight;
use datitos_common::SectionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// Outgoing section is playing its exit cue.
    Leaving,
    /// Outgoing section is hidden; waiting to show the target.
    Swapping,
}

/// The in-flight navigation, if any. Replaced wholesale when a newer
/// navigation supersedes it, so a stored transition always belongs to the
/// live generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: SectionId,
    pub to: SectionId,
    pub phase: TransitionPhase,
    pub due_ms: u64,
    pub generation: u64,
}

/// Navigation state that can be reset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuntimeState {
    pub current_section: SectionId,
    pub menu_active: SectionId,
    pub fragment: Option<String>,
    /// Bumped on every accepted navigation; stale deferred work checks it
    /// before touching shared state.
    pub generation: u64,
    pub transition: Option<Transition>,
    pub pending_highlight: Option<PendingHighlight>,
    pub now_ms: u64,
}

impl RuntimeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(section_id: SectionId) -> Self {
        Self {
            current_section: section_id,
            menu_active: section_id,
            ..Self::default()
        }
    }
}
