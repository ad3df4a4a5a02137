//! **hotkeys** -- scoped keyboard shortcut dispatch for [`ratatui`] apps.
//!
//! This is the umbrella crate that re-exports everything from a single
//! dependency:
//!
//! ```toml
//! [dependencies]
//! hotkeys = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`hotkeys_core`] are available at the crate root
//!   ([`ScopeRouter`], [`BindingDescriptor`], [`dispatch_bubble`], etc.).
//! * The [`widgets`] module re-exports everything from [`hotkeys_widgets`]
//!   (the help dialog and overlay helpers).
//! * [`ratatui`] and [`crossterm`] are re-exported so downstream crates do
//!   not need to depend on them directly.
//!
//! # Quick start
//!
//! ```
//! use hotkeys::widgets::HotkeysDialog;
//! use hotkeys::{bubble_path, dispatch_bubble, BindingDescriptor, HotkeyEvent, HotkeysOverlay, ScopeRouter};
//! use hotkeys::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
//!
//! let mut app = ScopeRouter::new();
//! app.set_hotkeys(&[
//!     BindingDescriptor::new("ctrl+s", "Save").on_key_down(|_| {}),
//! ]).unwrap();
//!
//! let mut dialog = HotkeysDialog::new();
//! let help = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE);
//! dispatch_bubble(bubble_path(&[&app]), &HotkeyEvent::new(help), &mut dialog);
//! assert!(dialog.is_open());
//! ```
//!
//! See `demos/scoped_hotkeys.rs` for a complete terminal application.

pub use hotkeys_core::*;
pub mod widgets {
    pub use hotkeys_widgets::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use ratatui;
