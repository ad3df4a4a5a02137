//! Ready-made widgets for the **hotkeys** dispatcher.
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`dialog`] | [`HotkeysDialog`](dialog::HotkeysDialog), the help overlay opened by `?` |
//!
//! # Utilities
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`overlay`] | Centering and clearing helpers for floating overlays |

pub mod dialog;
pub mod overlay;

pub use dialog::{DialogEntry, DialogGroup, DialogStyle, HotkeysDialog};
