//! Overlay positioning and rendering utilities.
//!
//! The help dialog floats above the application; these helpers compute its
//! rect and clear what's underneath.

use ratatui::layout::Rect;
use ratatui::widgets::{Block, Clear};
use ratatui::Frame;

/// Compute a centered sub-rect with fixed dimensions, clamped to `area`.
///
/// If `width` or `height` exceed the area dimensions, they are clamped.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Clear the overlay area and render `block` around it.
///
/// Returns the inner area left for content.
pub fn render_overlay(frame: &mut Frame, area: Rect, block: &Block) -> Rect {
    frame.render_widget(Clear, area);
    let inner = block.inner(area);
    frame.render_widget(block.clone(), area);
    inner
}
