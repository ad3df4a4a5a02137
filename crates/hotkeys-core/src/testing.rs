use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::combo::KeyCombination;
use crate::descriptor::BindingDescriptor;
use crate::event::HotkeyEvent;
use crate::overlay::HotkeysOverlay;

/// A headless overlay that records what it was asked to show.
///
/// Lets you assert on help-dialog behaviour in a plain `#[test]` without
/// rendering anything.
///
/// # Example
///
/// ```rust
/// use hotkeys_core::testing::{key_down, TestOverlay};
/// use hotkeys_core::{dispatch_bubble, BindingDescriptor, HotkeyEvent, ScopeRouter};
///
/// let mut router = ScopeRouter::new();
/// router.set_hotkeys(&[BindingDescriptor::new("ctrl+s", "Save")]).unwrap();
///
/// let mut overlay = TestOverlay::new();
/// dispatch_bubble([router.local()], &HotkeyEvent::new(key_down("?")), &mut overlay);
/// assert_eq!(overlay.last_shown(), Some(&["Save".to_string()][..]));
/// ```
#[derive(Debug, Default, Clone)]
pub struct TestOverlay {
    open: bool,
    shown: Vec<Vec<String>>,
}

impl TestOverlay {
    /// Create a closed overlay with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the overlay open, as if a user had opened it.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Mark the overlay closed.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// How many times [`show`](HotkeysOverlay::show) was called.
    pub fn show_count(&self) -> usize {
        self.shown.len()
    }

    /// Labels passed to the most recent [`show`](HotkeysOverlay::show) call.
    pub fn last_shown(&self) -> Option<&[String]> {
        self.shown.last().map(Vec::as_slice)
    }
}

impl HotkeysOverlay for TestOverlay {
    fn is_open(&self) -> bool {
        self.open
    }

    fn show(&mut self, descriptors: &[BindingDescriptor]) {
        self.open = true;
        self.shown
            .push(descriptors.iter().map(|d| d.label.clone()).collect());
    }
}

/// Counts callback invocations; clones share the count.
#[derive(Debug, Default, Clone)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count.
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    /// A callback that increments this counter.
    pub fn callback(&self) -> impl Fn(&HotkeyEvent<'_>) + Send + Sync + 'static {
        let count = Arc::clone(&self.0);
        callback(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }
}

// Pins the closure's signature to the higher-ranked form callbacks need.
fn callback<F>(f: F) -> F
where
    F: Fn(&HotkeyEvent<'_>) + Send + Sync + 'static,
{
    f
}

/// Build a key-press event for a combination string like `"ctrl+s"`.
///
/// # Panics
///
/// Panics if `combo` does not parse.
pub fn key_down(combo: &str) -> KeyEvent {
    key_event(combo, KeyEventKind::Press)
}

/// Build a key-release event for a combination string like `"ctrl+s"`.
///
/// # Panics
///
/// Panics if `combo` does not parse.
pub fn key_up(combo: &str) -> KeyEvent {
    key_event(combo, KeyEventKind::Release)
}

fn key_event(combo: &str, kind: KeyEventKind) -> KeyEvent {
    let combination = KeyCombination::parse(combo)
        .unwrap_or_else(|err| panic!("test key combination {combo:?} is invalid: {err}"));
    KeyEvent::new_with_kind(combination.code(), combination.modifiers(), kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KeyPhase;

    #[test]
    fn key_builders_round_trip_through_from_event() {
        let down = key_down("ctrl+shift+s");
        assert_eq!(
            KeyCombination::from_event(&down),
            KeyCombination::parse("ctrl+shift+s").unwrap()
        );
        assert_eq!(HotkeyEvent::new(down).phase(), KeyPhase::Down);
        assert_eq!(HotkeyEvent::new(key_up("?")).phase(), KeyPhase::Up);
    }

    #[test]
    fn overlay_records_each_show() {
        let mut overlay = TestOverlay::new();
        assert!(!overlay.is_open());
        overlay.show(&[BindingDescriptor::new("a", "Alpha")]);
        overlay.show(&[]);
        assert!(overlay.is_open());
        assert_eq!(overlay.show_count(), 2);
        assert_eq!(overlay.last_shown(), Some(&[][..]));
        overlay.close();
        assert!(!overlay.is_open());
    }

    #[test]
    fn counter_clones_share_state() {
        let counter = CallCounter::new();
        let callback = counter.clone().callback();
        let event = HotkeyEvent::new(key_down("x"));
        callback(&event);
        callback(&event);
        assert_eq!(counter.get(), 2);
    }
}
