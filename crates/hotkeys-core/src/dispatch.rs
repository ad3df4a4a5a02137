//! The per-scope dispatch engine.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::config::HotkeysConfig;
use crate::descriptor::{BindingDescriptor, HotkeyCallback};
use crate::error::HotkeysError;
use crate::event::{HotkeyEvent, KeyPhase};
use crate::overlay::HotkeysOverlay;
use crate::scope::ScopeTag;
use crate::seen::SeenRecord;
use crate::table::{Action, BindingTable};
use crate::target::is_text_input;

/// What a single scope did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The event was aimed at a text field or the overlay is open. Nothing
    /// matched and nothing was marked seen.
    Suppressed,
    /// The reserved combination opened the help overlay.
    ShowedDialog,
    /// Ordinary matching ran. The event's combination is marked seen if an
    /// enabled binding here claimed it.
    Handled {
        /// Number of callbacks invoked at this scope.
        fired: usize,
    },
}

/// One scope tier's binding table plus the logic that runs key events
/// against it.
///
/// Events reach every dispatcher on the bubble path, innermost first,
/// sharing one [`SeenRecord`]. A binding fires only if no inner scope has
/// already serviced the same combination; bindings for the same combination
/// within one scope all fire.
#[derive(Debug, Clone)]
pub struct ScopeDispatcher {
    table: BindingTable,
    config: HotkeysConfig,
}

impl ScopeDispatcher {
    /// Create an empty dispatcher for `scope` with default options.
    pub fn new(scope: ScopeTag) -> Self {
        Self::with_config(scope, HotkeysConfig::default())
    }

    /// Create an empty dispatcher for `scope` with custom options.
    pub fn with_config(scope: ScopeTag, config: HotkeysConfig) -> Self {
        Self {
            table: BindingTable::new(scope),
            config,
        }
    }

    /// Replace the bindings with the in-tier subset of `descriptors`.
    pub fn set_hotkeys(&mut self, descriptors: &[BindingDescriptor]) -> Result<(), HotkeysError> {
        self.table.replace(descriptors)
    }

    pub(crate) fn set_table(&mut self, table: BindingTable) {
        self.table = table;
    }

    /// Remove every binding.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Number of registered bindings.
    pub fn count(&self) -> usize {
        self.table.count()
    }

    /// The tier this dispatcher serves.
    pub fn scope(&self) -> ScopeTag {
        self.table.scope()
    }

    /// The underlying binding table.
    pub fn table(&self) -> &BindingTable {
        &self.table
    }

    /// The options this dispatcher was built with.
    pub fn config(&self) -> &HotkeysConfig {
        &self.config
    }

    /// Run an event against this scope, choosing key-down or key-up handling
    /// from the event's kind.
    pub fn handle(
        &self,
        event: &HotkeyEvent<'_>,
        seen: &mut SeenRecord,
        overlay: &mut dyn HotkeysOverlay,
    ) -> Dispatch {
        match event.phase() {
            KeyPhase::Down => self.handle_key_down(event, seen, overlay),
            KeyPhase::Up => self.handle_key_up(event, seen, overlay),
        }
    }

    /// Key-down handling: the help dialog check, then `on_key_down` callbacks.
    pub fn handle_key_down(
        &self,
        event: &HotkeyEvent<'_>,
        seen: &mut SeenRecord,
        overlay: &mut dyn HotkeysOverlay,
    ) -> Dispatch {
        if self.is_suppressed(event, overlay) {
            return Dispatch::Suppressed;
        }

        let combination = event.combination();
        if self
            .config
            .dialog_combo
            .is_some_and(|dialog| dialog.matches(&combination))
        {
            tracing::debug!(scope = ?self.scope(), count = self.count(), "showing hotkeys dialog");
            overlay.show(&self.table.descriptors());
            return Dispatch::ShowedDialog;
        }

        self.run_actions(KeyPhase::Down, event, seen)
    }

    /// Key-up handling: `on_key_up` callbacks only.
    pub fn handle_key_up(
        &self,
        event: &HotkeyEvent<'_>,
        seen: &mut SeenRecord,
        overlay: &mut dyn HotkeysOverlay,
    ) -> Dispatch {
        if self.is_suppressed(event, overlay) {
            return Dispatch::Suppressed;
        }
        self.run_actions(KeyPhase::Up, event, seen)
    }

    fn is_suppressed(&self, event: &HotkeyEvent<'_>, overlay: &dyn HotkeysOverlay) -> bool {
        (self.config.suppress_in_text_input && is_text_input(event.target)) || overlay.is_open()
    }

    fn run_actions(&self, phase: KeyPhase, event: &HotkeyEvent<'_>, seen: &mut SeenRecord) -> Dispatch {
        let combination = event.combination();
        let actions = self.table.snapshot();
        let mut fired = 0;
        let mut claimed = false;

        for action in actions.iter() {
            let descriptor = action.descriptor();
            if !descriptor.enabled
                || !action.combination().matches(&combination)
                || seen.has_seen(action.canonical())
            {
                continue;
            }
            claimed = true;
            let callback = match phase {
                KeyPhase::Down => descriptor.on_key_down.as_ref(),
                KeyPhase::Up => descriptor.on_key_up.as_ref(),
            };
            if let Some(callback) = callback {
                invoke(action, callback, event);
                fired += 1;
            }
        }

        // Only a scope that binds the combination hides it from ancestors.
        if claimed {
            seen.mark(combination.to_string());
        }
        Dispatch::Handled { fired }
    }
}

fn invoke(action: &Action, callback: &HotkeyCallback, event: &HotkeyEvent<'_>) {
    let label = action.descriptor().label.as_str();
    match panic::catch_unwind(AssertUnwindSafe(|| callback(event))) {
        Ok(Ok(())) => {
            tracing::trace!(combo = action.canonical(), label, "hotkey fired");
        }
        Ok(Err(err)) => {
            tracing::warn!(combo = action.canonical(), label, error = %err, "hotkey callback failed");
        }
        Err(payload) => {
            tracing::error!(
                combo = action.canonical(),
                label,
                panic = panic_message(&*payload),
                "hotkey callback panicked"
            );
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
