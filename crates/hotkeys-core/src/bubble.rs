//! Delivering one event along a chain of nested scopes.
//!
//! ```
//! use hotkeys_core::{dispatch_bubble, BindingDescriptor, HotkeyEvent, NoOverlay, ScopeRouter};
//! use hotkeys_core::testing::{key_down, CallCounter};
//!
//! let inner_hits = CallCounter::new();
//! let outer_hits = CallCounter::new();
//!
//! let mut inner = ScopeRouter::new();
//! inner.set_hotkeys(&[BindingDescriptor::new("ctrl+s", "Save draft")
//!     .on_key_down(inner_hits.callback())]).unwrap();
//! let mut outer = ScopeRouter::new();
//! outer.set_hotkeys(&[BindingDescriptor::new("ctrl+s", "Save all")
//!     .on_key_down(outer_hits.callback())]).unwrap();
//!
//! let event = HotkeyEvent::new(key_down("ctrl+s"));
//! let path = hotkeys_core::bubble_path(&[&inner, &outer]);
//! dispatch_bubble(path, &event, &mut NoOverlay);
//!
//! // Closest scope wins.
//! assert_eq!((inner_hits.get(), outer_hits.get()), (1, 0));
//! ```

use crate::dispatch::{Dispatch, ScopeDispatcher};
use crate::event::HotkeyEvent;
use crate::overlay::HotkeysOverlay;
use crate::scope::ScopeRouter;
use crate::seen::SeenRecord;

/// What happened to an event across its whole bubble path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BubbleOutcome {
    /// Callbacks invoked across all scopes.
    pub fired: usize,
    /// Whether some scope opened the help dialog.
    pub showed_dialog: bool,
    /// Scopes that ignored the event (text field target or open overlay).
    pub suppressed: usize,
}

impl BubbleOutcome {
    /// Returns `true` if the event triggered a callback or the dialog.
    pub fn is_handled(&self) -> bool {
        self.fired > 0 || self.showed_dialog
    }
}

/// Order the dispatchers of nested routers for delivery: every local tier
/// innermost first, then every global tier innermost first.
///
/// `routers` must be ordered innermost first.
pub fn bubble_path<'a>(routers: &[&'a ScopeRouter]) -> Vec<&'a ScopeDispatcher> {
    routers
        .iter()
        .map(|r| r.local())
        .chain(routers.iter().map(|r| r.global()))
        .collect()
}

/// Deliver one event to every dispatcher on `path`, innermost first.
///
/// A fresh [`SeenRecord`] is created for the event and dropped afterwards,
/// so nothing carries over to the next event.
pub fn dispatch_bubble<'a, I>(
    path: I,
    event: &HotkeyEvent<'_>,
    overlay: &mut dyn HotkeysOverlay,
) -> BubbleOutcome
where
    I: IntoIterator<Item = &'a ScopeDispatcher>,
{
    let mut seen = SeenRecord::new();
    let mut outcome = BubbleOutcome::default();
    for dispatcher in path {
        match dispatcher.handle(event, &mut seen, overlay) {
            Dispatch::Suppressed => outcome.suppressed += 1,
            Dispatch::ShowedDialog => outcome.showed_dialog = true,
            Dispatch::Handled { fired } => outcome.fired += fired,
        }
    }
    outcome
}
