use std::fmt;

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::combo::KeyCombination;
use crate::target::EventTarget;

/// Which half of a key press an event represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPhase {
    /// Key pressed (including auto-repeat).
    Down,
    /// Key released.
    Up,
}

/// A keyboard event on its way through the scope chain.
///
/// Wraps the raw [`KeyEvent`] together with the element it was aimed at.
/// Terminals that don't report key releases only ever produce
/// [`KeyPhase::Down`] events.
#[derive(Clone, Copy)]
pub struct HotkeyEvent<'a> {
    /// The raw key event.
    pub key: KeyEvent,
    /// The focused element the event is aimed at, if known.
    pub target: Option<&'a dyn EventTarget>,
}

impl<'a> HotkeyEvent<'a> {
    /// Wrap a key event with no target.
    pub fn new(key: KeyEvent) -> Self {
        Self { key, target: None }
    }

    /// Aim the event at `target`.
    pub fn with_target(mut self, target: &'a dyn EventTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Key-down for press and repeat, key-up for release.
    pub fn phase(&self) -> KeyPhase {
        match self.key.kind {
            KeyEventKind::Release => KeyPhase::Up,
            KeyEventKind::Press | KeyEventKind::Repeat => KeyPhase::Down,
        }
    }

    /// The combination this event represents.
    pub fn combination(&self) -> KeyCombination {
        KeyCombination::from_event(&self.key)
    }
}

impl From<KeyEvent> for HotkeyEvent<'_> {
    fn from(key: KeyEvent) -> Self {
        Self::new(key)
    }
}

impl fmt::Debug for HotkeyEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HotkeyEvent")
            .field("key", &self.key)
            .field("target", &self.target.and_then(|t| t.kind()))
            .finish()
    }
}
