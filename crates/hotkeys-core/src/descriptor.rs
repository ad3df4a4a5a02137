//! Declared bindings and their callbacks.

use std::fmt;
use std::sync::Arc;

use crate::event::HotkeyEvent;
use crate::scope::ScopeTag;

/// The error type a fallible callback may return.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// The result type of a hotkey callback.
pub type CallbackResult = Result<(), CallbackError>;

/// A key-down or key-up handler.
pub type HotkeyCallback = Arc<dyn Fn(&HotkeyEvent<'_>) -> CallbackResult + Send + Sync>;

/// A hotkey as declared by the UI: a combination string plus metadata and
/// callbacks.
///
/// ```
/// use hotkeys_core::BindingDescriptor;
///
/// let save = BindingDescriptor::new("ctrl+s", "Save")
///     .group("File")
///     .on_key_down(|_| println!("saving"));
/// assert!(!save.global);
/// ```
#[derive(Clone)]
pub struct BindingDescriptor {
    /// The combination string, parsed when the binding is registered.
    pub combo: String,
    /// A human-readable description shown in the help dialog.
    pub label: String,
    /// Global bindings belong to the global tier; all others are local.
    pub global: bool,
    /// Optional heading the help dialog groups this binding under.
    pub group: Option<String>,
    /// Disabled bindings are listed in the help dialog but never fire.
    pub enabled: bool,
    /// Invoked on key-down.
    pub on_key_down: Option<HotkeyCallback>,
    /// Invoked on key-up.
    pub on_key_up: Option<HotkeyCallback>,
}

impl BindingDescriptor {
    /// Declare a local, enabled binding with no callbacks yet.
    pub fn new(combo: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            combo: combo.into(),
            label: label.into(),
            global: false,
            group: None,
            enabled: true,
            on_key_down: None,
            on_key_up: None,
        }
    }

    /// Set whether this binding belongs to the global tier.
    pub fn global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }

    /// Set the help dialog group.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Set whether this binding fires.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set an infallible key-down handler.
    pub fn on_key_down(self, f: impl Fn(&HotkeyEvent<'_>) + Send + Sync + 'static) -> Self {
        self.try_on_key_down(move |event| {
            f(event);
            Ok(())
        })
    }

    /// Set a fallible key-down handler. Errors are logged, never propagated.
    pub fn try_on_key_down(
        mut self,
        f: impl Fn(&HotkeyEvent<'_>) -> CallbackResult + Send + Sync + 'static,
    ) -> Self {
        let callback: HotkeyCallback = Arc::new(f);
        self.on_key_down = Some(callback);
        self
    }

    /// Set an infallible key-up handler.
    pub fn on_key_up(self, f: impl Fn(&HotkeyEvent<'_>) + Send + Sync + 'static) -> Self {
        self.try_on_key_up(move |event| {
            f(event);
            Ok(())
        })
    }

    /// Set a fallible key-up handler. Errors are logged, never propagated.
    pub fn try_on_key_up(
        mut self,
        f: impl Fn(&HotkeyEvent<'_>) -> CallbackResult + Send + Sync + 'static,
    ) -> Self {
        let callback: HotkeyCallback = Arc::new(f);
        self.on_key_up = Some(callback);
        self
    }

    /// The tier this binding belongs to.
    pub fn scope(&self) -> ScopeTag {
        if self.global {
            ScopeTag::Global
        } else {
            ScopeTag::Local
        }
    }
}

impl fmt::Debug for BindingDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingDescriptor")
            .field("combo", &self.combo)
            .field("label", &self.label)
            .field("global", &self.global)
            .field("group", &self.group)
            .field("enabled", &self.enabled)
            .field("on_key_down", &self.on_key_down.is_some())
            .field("on_key_up", &self.on_key_up.is_some())
            .finish()
    }
}
