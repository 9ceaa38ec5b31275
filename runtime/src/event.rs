use crate::toast::Toast;
use datitos_common::SectionId;

/// Events drained by the frontend after each call into the runtime.
///
/// Decorative hooks (terminal bell, easter-egg toasts) attach to these;
/// nothing observed here ever feeds back into navigation state.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeEvent {
    /// A section finished entering and is now the visible one.
    SectionEntered(SectionId),
    /// The content view should reset to the top.
    ScrollTop,
    /// The fragment was rewritten after a completed navigation.
    FragmentChanged(String),
    /// One-shot audio cue; best effort, frontends may ignore it.
    AudioCue,
    /// A toast was posted to the notification surface.
    Notified(Toast),
}
