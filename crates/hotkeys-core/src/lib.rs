//! Scoped keyboard shortcut dispatch.
//!
//! `hotkeys-core` matches key events against bindings declared by nested UI
//! scopes and fires each logical key press once, even when several scopes
//! bind the same combination. The closest scope wins; scopes further out
//! still receive combinations nobody closer handled.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`KeyCombination`] | Parsed, normalised key press (`"ctrl+s"`) |
//! | [`BindingDescriptor`] | A declared hotkey: combination, label, tier, callbacks |
//! | [`BindingTable`] | One tier's active bindings, in declaration order |
//! | [`ScopeDispatcher`] | Runs key events against one table |
//! | [`ScopeRouter`] | The local/global dispatcher pair a UI subtree owns |
//! | [`SeenRecord`] | Per-event record of combinations already serviced |
//! | [`HotkeysOverlay`] | The help dialog seam |
//!
//! # Dispatch
//!
//! 1. **discover** -- Whenever a subtree's declared bindings change, hand the
//!    full ordered list to [`ScopeRouter::set_hotkeys`].
//! 2. **deliver** -- For each key event, build the bubble path (innermost
//!    scope first) and call [`dispatch_bubble`].
//! 3. **match** -- Each scope skips the event if it targets a text field or
//!    the overlay is open, opens the overlay on `?`, and otherwise fires every
//!    enabled binding whose combination matches and hasn't been seen.
//! 4. **mark** -- A scope that bound the combination marks it seen, so outer
//!    scopes leave it alone.
//!
//! # Quick example
//!
//! ```
//! use hotkeys_core::{dispatch_bubble, bubble_path, BindingDescriptor, HotkeyEvent, NoOverlay, ScopeRouter};
//! use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
//!
//! let mut app = ScopeRouter::new();
//! app.set_hotkeys(&[
//!     BindingDescriptor::new("ctrl+s", "Save").on_key_down(|_| println!("saved")),
//!     BindingDescriptor::new("ctrl+q", "Quit").global(true),
//! ])?;
//!
//! let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
//! let outcome = dispatch_bubble(bubble_path(&[&app]), &HotkeyEvent::new(key), &mut NoOverlay);
//! assert_eq!(outcome.fired, 1);
//! # Ok::<(), hotkeys_core::HotkeysError>(())
//! ```

pub mod bubble;
pub mod combo;
pub mod config;
pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod overlay;
pub mod scope;
pub mod seen;
pub mod table;
pub mod target;
pub mod testing;

pub use bubble::{bubble_path, dispatch_bubble, BubbleOutcome};
pub use combo::KeyCombination;
pub use config::{default_dialog_combo, HotkeysConfig};
pub use descriptor::{BindingDescriptor, CallbackError, CallbackResult, HotkeyCallback};
pub use dispatch::{Dispatch, ScopeDispatcher};
pub use error::{ComboParseError, HotkeysError};
pub use event::{HotkeyEvent, KeyPhase};
pub use overlay::{HotkeysOverlay, NoOverlay};
pub use scope::{ScopeRouter, ScopeTag};
pub use seen::SeenRecord;
pub use table::{Action, BindingTable};
pub use target::{is_text_input, Element, ElementKind, EventTarget, InputType};
