//! The help overlay seam.

use crate::descriptor::BindingDescriptor;

/// The help overlay the dispatcher opens on the reserved combination.
///
/// While the overlay is open every dispatcher stays silent, so the overlay
/// gets the keyboard to itself. `hotkeys-widgets` ships a ratatui
/// implementation; [`NoOverlay`] is a stand-in for apps without one.
pub trait HotkeysOverlay {
    /// Returns `true` while the overlay is showing.
    fn is_open(&self) -> bool;

    /// Open the overlay listing `descriptors`. Showing an already open
    /// overlay replaces its contents.
    fn show(&mut self, descriptors: &[BindingDescriptor]);
}

/// An overlay that is never open and ignores requests to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOverlay;

impl HotkeysOverlay for NoOverlay {
    fn is_open(&self) -> bool {
        false
    }

    fn show(&mut self, _descriptors: &[BindingDescriptor]) {}
}
