use crossterm::event::KeyCode;

use crate::combo::KeyCombination;

/// Per-dispatcher options.
///
/// All fields have sensible defaults (see [`Default`]). Override with the
/// builder methods or struct update syntax:
///
/// ```
/// use hotkeys_core::{HotkeysConfig, KeyCombination};
///
/// let config = HotkeysConfig::default()
///     .with_dialog_combo(KeyCombination::parse("f1").unwrap())
///     .suppress_in_text_input(false);
/// assert_eq!(config.dialog_combo.unwrap().to_string(), "f1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeysConfig {
    /// The reserved combination that opens the help dialog instead of
    /// dispatching. `None` disables the trigger. Default: `?`.
    pub dialog_combo: Option<KeyCombination>,
    /// Ignore key events aimed at text-entry elements. Default: `true`.
    pub suppress_in_text_input: bool,
}

impl Default for HotkeysConfig {
    fn default() -> Self {
        Self {
            dialog_combo: Some(default_dialog_combo()),
            suppress_in_text_input: true,
        }
    }
}

impl HotkeysConfig {
    /// Use `combo` to open the help dialog.
    pub fn with_dialog_combo(mut self, combo: KeyCombination) -> Self {
        self.dialog_combo = Some(combo);
        self
    }

    /// Never open the help dialog from a key press.
    pub fn without_dialog(mut self) -> Self {
        self.dialog_combo = None;
        self
    }

    /// Set whether key events aimed at text-entry elements are ignored.
    pub fn suppress_in_text_input(mut self, suppress: bool) -> Self {
        self.suppress_in_text_input = suppress;
        self
    }
}

/// The `?` key with no modifiers.
pub fn default_dialog_combo() -> KeyCombination {
    KeyCombination::new(KeyCode::Char('?'))
}
