use datitos_common::*;

mod error;
pub use error::RuntimeError;

mod event;
pub use event::RuntimeEvent;

mod search;
use search::PendingHighlight;
pub use search::{occurrences, Highlight};

mod stage;
pub use stage::Stage;

mod state;
use state::{RuntimeState, Transition, TransitionPhase};

mod toast;
pub use toast::{Severity, Toast};

/// One entry of the externally rendered menu. Exactly one entry is active
/// at any time; it tracks the last section that finished entering.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    pub section: SectionId,
    pub active: bool,
}

/// The navigation controller: sole authority over which section is visible.
///
/// Time is a virtual millisecond clock advanced through `tick`; the timed
/// transition phases are deferred steps against that clock, never sleeps.
#[derive(Debug)]
pub struct Runtime {
    pub database: Database,
    config: Config,
    running: bool,
    state: RuntimeState,
    stage: Stage,
    toasts: Vec<Toast>,
    highlight: Option<Highlight>,
    events: Vec<RuntimeEvent>,
}

impl Runtime {
    pub fn new(database: Database) -> Self {
        Self::with_config(database, Config::default())
    }

    pub fn with_config(database: Database, config: Config) -> Self {
        Self {
            database,
            config,
            running: false,
            state: RuntimeState::new(),
            stage: Stage::new(),
            toasts: Vec::new(),
            highlight: None,
            events: Vec::new(),
        }
    }

    /// Starts the presentation. The fragment is read exactly once, here: a
    /// valid `#token` selects the initial section, anything else falls back
    /// to the home section without comment.
    pub fn run(&mut self, fragment: Option<&str>) -> Result<(), RuntimeError> {
        if self.database.sections.is_empty() {
            return Err(RuntimeError::EmptyCatalog);
        }

        self.running = true;
        self.stage = Stage::new();
        self.toasts.clear();
        self.highlight = None;
        self.events.clear();

        let restored = fragment
            .map(|f| f.trim().trim_start_matches('#'))
            .filter(|f| !f.is_empty())
            .and_then(|f| self.database.section_id(f));

        let initial = restored.unwrap_or_else(|| self.home_section());
        self.state = RuntimeState::with_section(initial);
        if restored.is_some() {
            self.state.fragment = Some(self.database.section_name(initial).to_string());
        }

        self.stage.show(initial);
        self.events.push(RuntimeEvent::SectionEntered(initial));
        Ok(())
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.state = RuntimeState::new();
        self.stage = Stage::new();
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn current_section(&self) -> SectionId {
        self.state.current_section
    }

    pub fn fragment(&self) -> Option<&str> {
        self.state.fragment.as_deref()
    }

    pub fn now_ms(&self) -> u64 {
        self.state.now_ms
    }

    pub fn is_transitioning(&self) -> bool {
        self.state.transition.is_some()
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    pub fn menu(&self) -> Vec<MenuEntry> {
        self.database
            .catalog()
            .map(|section_id| MenuEntry {
                section: section_id,
                active: section_id == self.state.menu_active,
            })
            .collect()
    }

    pub fn take_events(&mut self) -> Vec<RuntimeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Requests a navigation. Unknown targets, repeats of the current
    /// section and repeats of the in-flight target are silent no-ops.
    pub fn navigate_to(&mut self, target: SectionId) {
        if !self.running || target >= self.database.section_count() {
            return;
        }
        match &self.state.transition {
            Some(transition) if transition.to == target => return,
            None if target == self.state.current_section => return,
            _ => {}
        }

        self.state.generation += 1;
        let generation = self.state.generation;
        let now = self.state.now_ms;

        let transition = match self.stage.visible() {
            Some(visible) => {
                // Fresh exit cue on whatever is on stage, even when this
                // supersedes an in-flight navigation.
                self.stage.mark_leaving(visible);
                Transition {
                    from: visible,
                    to: target,
                    phase: TransitionPhase::Leaving,
                    due_ms: now + self.config.timing.exit_ms,
                    generation,
                }
            }
            None => {
                // Mid-swap: the outgoing section is already gone, only the
                // reveal remains.
                let from = self
                    .state
                    .transition
                    .as_ref()
                    .map(|t| t.from)
                    .unwrap_or(self.state.current_section);
                Transition {
                    from,
                    to: target,
                    phase: TransitionPhase::Swapping,
                    due_ms: now + self.config.timing.enter_delay_ms,
                    generation,
                }
            }
        };

        self.state.transition = Some(transition);
    }

    /// Navigation by section token; unknown tokens are ignored.
    pub fn navigate_to_name(&mut self, name: &str) {
        if let Some(section_id) = self.database.section_id(name) {
            self.navigate_to(section_id);
        }
    }

    pub fn next_section(&mut self) {
        let count = self.database.section_count();
        if count == 0 {
            return;
        }
        self.navigate_to((self.navigation_target() + 1) % count);
    }

    pub fn previous_section(&mut self) {
        let count = self.database.section_count();
        if count == 0 {
            return;
        }
        self.navigate_to((self.navigation_target() + count - 1) % count);
    }

    pub fn home(&mut self) {
        if !self.running {
            return;
        }
        let home = self.home_section();
        self.navigate_to(home);
    }

    /// Locates the first section matching `query` and navigates to it,
    /// marking the matched text once the transition completes. Empty queries
    /// are ignored; a miss is reported on the notification surface.
    pub fn search(&mut self, query: &str) {
        if !self.running {
            return;
        }
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        match search::find_first_match(&self.database, query) {
            Some(section_id) => {
                if section_id == self.state.current_section && self.state.transition.is_none() {
                    self.install_highlight(section_id, query);
                } else {
                    self.navigate_to(section_id);
                    self.state.pending_highlight = Some(PendingHighlight {
                        section: section_id,
                        query: query.to_string(),
                        generation: self.state.generation,
                    });
                }
            }
            None => {
                self.notify(
                    format!("No results found for \"{}\"", query),
                    Severity::Warning,
                );
            }
        }
    }

    pub fn notify(&mut self, message: String, severity: Severity) {
        let toast = Toast {
            message,
            severity,
            expires_at_ms: self.state.now_ms + self.config.timing.toast_ms,
        };
        self.events.push(RuntimeEvent::Notified(toast.clone()));
        self.toasts.push(toast);
    }

    /// Advances the clock and performs all work that came due: transition
    /// phases, toast expiry, highlight expiry. Going back in time is a
    /// no-op.
    pub fn tick(&mut self, now_ms: u64) {
        if !self.running {
            return;
        }
        let now = now_ms.max(self.state.now_ms);

        while let Some(transition) = self.state.transition.clone() {
            if transition.due_ms > now {
                break;
            }
            // Each phase runs at its own due time so anything it schedules
            // is stamped consistently.
            self.state.now_ms = self.state.now_ms.max(transition.due_ms);
            match transition.phase {
                TransitionPhase::Leaving => {
                    self.stage.hide(transition.from);
                    self.state.transition = Some(Transition {
                        phase: TransitionPhase::Swapping,
                        due_ms: transition.due_ms + self.config.timing.enter_delay_ms,
                        ..transition
                    });
                }
                TransitionPhase::Swapping => {
                    self.state.transition = None;
                    self.arrive(transition.to);
                }
            }
        }

        self.state.now_ms = self.state.now_ms.max(now);
        let now = self.state.now_ms;
        self.toasts.retain(|toast| toast.expires_at_ms > now);
        if self
            .highlight
            .as_ref()
            .is_some_and(|highlight| highlight.expires_at_ms <= now)
        {
            self.highlight = None;
        }
    }

    /// Runs every pending transition phase to completion without expiring
    /// toasts or highlights ahead of time.
    pub fn settle(&mut self) {
        while let Some(due_ms) = self.state.transition.as_ref().map(|t| t.due_ms) {
            self.tick(due_ms);
        }
    }

    fn navigation_target(&self) -> SectionId {
        self.state
            .transition
            .as_ref()
            .map(|t| t.to)
            .unwrap_or(self.state.current_section)
    }

    fn home_section(&self) -> SectionId {
        self.config
            .home
            .as_ref()
            .and_then(|name| self.database.section_id(name))
            .unwrap_or(0)
    }

    fn install_highlight(&mut self, section: SectionId, query: &str) {
        self.highlight = Some(Highlight {
            section,
            query: query.to_string(),
            expires_at_ms: self.state.now_ms + self.config.timing.highlight_ms,
        });
    }

    fn arrive(&mut self, target: SectionId) {
        self.stage.show(target);
        self.state.current_section = target;
        self.state.menu_active = target;

        let name = self.database.section_name(target).to_string();
        self.state.fragment = Some(name.clone());

        if let Some(pending) = self.state.pending_highlight.take() {
            // Superseded search navigations leave no marks behind.
            if pending.generation == self.state.generation && pending.section == target {
                self.install_highlight(pending.section, &pending.query);
            }
        }

        self.events.push(RuntimeEvent::ScrollTop);
        self.events.push(RuntimeEvent::SectionEntered(target));
        self.events.push(RuntimeEvent::FragmentChanged(name));
        self.events.push(RuntimeEvent::AudioCue);
    }
}
