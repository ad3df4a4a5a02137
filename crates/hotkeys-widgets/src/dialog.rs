//! The hotkeys help dialog: a scrollable overlay listing active bindings.

use std::cell::Cell;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use hotkeys_core::{BindingDescriptor, HotkeysOverlay, KeyCombination};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::overlay::{centered_fixed, render_overlay};

const GLOBAL_GROUP: &str = "Global hotkeys";
const LOCAL_GROUP: &str = "Local hotkeys";

/// Messages for the hotkeys dialog.
#[derive(Debug, Clone)]
pub enum Message {
    /// A key press forwarded while the dialog is open.
    KeyPress(KeyEvent),
    /// Close the dialog.
    Hide,
}

/// A single row of the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogEntry {
    /// The combination in canonical form (e.g. "ctrl+s").
    pub keys: String,
    /// What the binding does.
    pub label: String,
    /// Disabled bindings are listed dimmed.
    pub enabled: bool,
}

/// A titled run of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogGroup {
    /// Heading shown above the entries.
    pub name: String,
    /// Entries in declaration order.
    pub entries: Vec<DialogEntry>,
}

/// Visual style configuration for the [`HotkeysDialog`].
#[derive(Debug, Clone)]
pub struct DialogStyle {
    /// Style applied to combination labels.
    pub key: Style,
    /// Style applied to binding descriptions.
    pub label: Style,
    /// Style applied to disabled rows.
    pub disabled: Style,
    /// Style applied to group headings.
    pub group: Style,
    /// Style applied to the border.
    pub border: Style,
    /// Style applied to the title.
    pub title: Style,
}

impl Default for DialogStyle {
    fn default() -> Self {
        Self {
            key: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::White),
            disabled: Style::default().fg(Color::DarkGray),
            group: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// The overlay opened by the reserved `?` combination.
///
/// Implements [`HotkeysOverlay`], so pass it straight to
/// [`dispatch_bubble`](hotkeys_core::dispatch_bubble). While it is open the
/// dispatchers stay silent; forward keys to [`update`](HotkeysDialog::update)
/// instead so the user can scroll and close it.
pub struct HotkeysDialog {
    groups: Vec<DialogGroup>,
    open: bool,
    style: DialogStyle,
    title: String,
    width: u16,
    max_height: u16,
    scroll_offset: usize,
    visible_height: Cell<u16>,
}

impl HotkeysDialog {
    /// Create a closed dialog with default settings.
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            open: false,
            style: DialogStyle::default(),
            title: " Hotkeys ".to_string(),
            width: 60,
            max_height: 20,
            scroll_offset: 0,
            visible_height: Cell::new(18),
        }
    }

    /// Set the visual style.
    pub fn with_style(mut self, style: DialogStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the border title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the dialog width and maximum height in cells.
    pub fn with_size(mut self, width: u16, max_height: u16) -> Self {
        self.width = width;
        self.max_height = max_height;
        self
    }

    /// The groups currently listed.
    pub fn groups(&self) -> &[DialogGroup] {
        &self.groups
    }

    /// Close the dialog and reset the scroll position.
    pub fn hide(&mut self) {
        self.open = false;
        self.scroll_offset = 0;
    }

    /// Process a message.
    pub fn update(&mut self, msg: Message) {
        match msg {
            Message::Hide => self.hide(),
            Message::KeyPress(_) if !self.open => {}
            // The release of the key that opened the dialog must not close it.
            Message::KeyPress(key) if key.kind == KeyEventKind::Release => {}
            Message::KeyPress(key) => match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => self.hide(),
                KeyCode::Up | KeyCode::Char('k') => {
                    self.scroll_offset = self.scroll_offset.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.scroll_offset = self.scroll_offset.saturating_add(1).min(self.line_count());
                }
                KeyCode::PageUp => {
                    let page = self.visible_height.get() as usize;
                    self.scroll_offset = self.scroll_offset.saturating_sub(page);
                }
                KeyCode::PageDown => {
                    let page = self.visible_height.get() as usize;
                    self.scroll_offset =
                        self.scroll_offset.saturating_add(page).min(self.line_count());
                }
                KeyCode::Home => self.scroll_offset = 0,
                // view() clamps to the true maximum.
                KeyCode::End => self.scroll_offset = self.line_count(),
                _ => {}
            },
        }
    }

    /// Build the dialog body, one line per heading, entry, and group gap.
    pub fn lines(&self) -> Vec<Line<'_>> {
        let key_width = self
            .groups
            .iter()
            .flat_map(|g| &g.entries)
            .map(|e| e.keys.width())
            .max()
            .unwrap_or(0)
            + 2;

        let mut lines = Vec::new();
        for (idx, group) in self.groups.iter().enumerate() {
            if idx > 0 {
                lines.push(Line::raw(""));
            }
            lines.push(Line::from(Span::styled(group.name.as_str(), self.style.group)));
            for entry in &group.entries {
                let padding = " ".repeat(key_width.saturating_sub(entry.keys.width()));
                let (key_style, label_style) = if entry.enabled {
                    (self.style.key, self.style.label)
                } else {
                    (self.style.disabled, self.style.disabled)
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("{}{padding}", entry.keys), key_style),
                    Span::styled(entry.label.as_str(), label_style),
                ]));
            }
        }
        lines
    }

    fn line_count(&self) -> usize {
        let entries: usize = self.groups.iter().map(|g| g.entries.len()).sum();
        // One heading per group, one gap between groups.
        entries + self.groups.len() * 2 - usize::from(!self.groups.is_empty())
    }

    /// Render the dialog centered in `area`. Does nothing while closed.
    pub fn view(&self, frame: &mut Frame, area: Rect) {
        if !self.open {
            return;
        }

        let lines = self.lines();
        let height = outer_height(lines.len(), self.max_height);
        let overlay = centered_fixed(self.width, height, area);

        let block = Block::default()
            .title(self.title.as_str())
            .title_style(self.style.title)
            .borders(Borders::ALL)
            .border_style(self.style.border);
        let inner = render_overlay(frame, overlay, &block);

        self.visible_height.set(inner.height);
        let max_scroll = lines.len().saturating_sub(inner.height as usize);
        let offset = self.scroll_offset.min(max_scroll);

        frame.render_widget(Paragraph::new(lines).scroll((offset as u16, 0)), inner);
    }
}

/// Body lines plus the border, capped at `max_height`.
fn outer_height(line_count: usize, max_height: u16) -> u16 {
    u16::try_from(line_count)
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(max_height)
}

impl Default for HotkeysDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl HotkeysOverlay for HotkeysDialog {
    fn is_open(&self) -> bool {
        self.open
    }

    fn show(&mut self, descriptors: &[BindingDescriptor]) {
        let mut groups: Vec<DialogGroup> = Vec::new();
        for descriptor in descriptors {
            let name = descriptor.group.as_deref().unwrap_or(if descriptor.global {
                GLOBAL_GROUP
            } else {
                LOCAL_GROUP
            });
            let entry = DialogEntry {
                keys: KeyCombination::parse(&descriptor.combo)
                    .map(|c| c.to_string())
                    .unwrap_or_else(|_| descriptor.combo.clone()),
                label: descriptor.label.clone(),
                enabled: descriptor.enabled,
            };
            match groups.iter_mut().find(|g| g.name == name) {
                Some(group) => group.entries.push(entry),
                None => groups.push(DialogGroup {
                    name: name.to_string(),
                    entries: vec![entry],
                }),
            }
        }

        self.groups = groups;
        self.open = true;
        self.scroll_offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    fn descriptors() -> Vec<BindingDescriptor> {
        vec![
            BindingDescriptor::new("Ctrl+S", "Save").group("File"),
            BindingDescriptor::new("j", "Next item"),
            BindingDescriptor::new("ctrl+o", "Open").group("File"),
            BindingDescriptor::new("ctrl+q", "Quit").global(true),
            BindingDescriptor::new("x", "Delete").enabled(false),
        ]
    }

    fn make_dialog(rows: usize) -> HotkeysDialog {
        let mut dialog = HotkeysDialog::new();
        let many: Vec<_> = (0..rows)
            .map(|i| BindingDescriptor::new(format!("f{}", i % 24 + 1), format!("desc{i}")))
            .collect();
        dialog.show(&many);
        dialog
    }

    fn render(dialog: &HotkeysDialog, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                dialog.view(frame, area);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut output = String::new();
        for y in 0..height {
            for x in 0..width {
                output.push_str(buffer[(x, y)].symbol());
            }
            output.push('\n');
        }
        output
    }

    #[test]
    fn show_groups_in_first_appearance_order() {
        let mut dialog = HotkeysDialog::new();
        dialog.show(&descriptors());
        assert!(dialog.is_open());

        let names: Vec<&str> = dialog.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["File", LOCAL_GROUP, GLOBAL_GROUP]);

        let file = &dialog.groups()[0];
        assert_eq!(file.entries[0].keys, "ctrl+s");
        assert_eq!(file.entries[1].label, "Open");
        assert!(!dialog.groups()[1].entries[1].enabled);
    }

    #[test]
    fn lines_include_headings_and_gaps() {
        let mut dialog = HotkeysDialog::new();
        dialog.show(&descriptors());
        // 5 entries + 3 headings + 2 gaps
        assert_eq!(dialog.lines().len(), 10);
        assert_eq!(dialog.line_count(), 10);
    }

    #[test]
    fn renders_bindings_when_open() {
        let mut dialog = HotkeysDialog::new();
        dialog.show(&descriptors());
        let screen = render(&dialog, 80, 24);
        assert!(screen.contains("Hotkeys"));
        assert!(screen.contains("ctrl+s"));
        assert!(screen.contains("Save"));
        assert!(screen.contains(GLOBAL_GROUP));
    }

    #[test]
    fn renders_nothing_when_closed() {
        let dialog = HotkeysDialog::new();
        let screen = render(&dialog, 40, 10);
        assert!(screen.chars().all(|c| c == ' ' || c == '\n'));
    }

    #[test]
    fn esc_and_question_mark_close() {
        let mut dialog = make_dialog(3);
        dialog.update(Message::KeyPress(key(KeyCode::Esc)));
        assert!(!dialog.is_open());

        dialog.show(&descriptors());
        dialog.update(Message::KeyPress(key(KeyCode::Char('?'))));
        assert!(!dialog.is_open());

        dialog.show(&descriptors());
        dialog.update(Message::Hide);
        assert!(!dialog.is_open());
    }

    #[test]
    fn release_of_opening_key_keeps_dialog_open() {
        let mut dialog = HotkeysDialog::new();
        dialog.show(&descriptors());
        dialog.update(Message::KeyPress(release(KeyCode::Char('?'))));
        assert!(dialog.is_open());
    }

    #[test]
    fn scroll_keys_apply_once_per_press() {
        let mut dialog = make_dialog(100);
        dialog.update(Message::KeyPress(key(KeyCode::Char('j'))));
        dialog.update(Message::KeyPress(release(KeyCode::Char('j'))));
        assert_eq!(dialog.scroll_offset, 1);

        let repeat = KeyEvent::new_with_kind(KeyCode::Char('j'), KeyModifiers::NONE, KeyEventKind::Repeat);
        dialog.update(Message::KeyPress(repeat));
        assert_eq!(dialog.scroll_offset, 2);
    }

    #[test]
    fn outer_height_saturates_for_huge_bodies() {
        assert_eq!(outer_height(3, 20), 5);
        assert_eq!(outer_height(100, 20), 20);
        assert_eq!(outer_height(70_000, u16::MAX), u16::MAX);
        assert_eq!(outer_height(usize::MAX, 30), 30);
    }

    #[test]
    fn page_down_scrolls_by_visible_height() {
        let mut dialog = make_dialog(100);
        // Default visible_height is 18.
        dialog.update(Message::KeyPress(key(KeyCode::PageDown)));
        assert_eq!(dialog.scroll_offset, 18);
        dialog.update(Message::KeyPress(key(KeyCode::PageUp)));
        assert_eq!(dialog.scroll_offset, 0);
    }

    #[test]
    fn line_scrolling_clamps() {
        let mut dialog = make_dialog(3);
        dialog.update(Message::KeyPress(key(KeyCode::Up)));
        assert_eq!(dialog.scroll_offset, 0);
        for _ in 0..10 {
            dialog.update(Message::KeyPress(key(KeyCode::Char('j'))));
        }
        // 3 entries + 1 heading
        assert_eq!(dialog.scroll_offset, 4);
        dialog.update(Message::KeyPress(key(KeyCode::Home)));
        assert_eq!(dialog.scroll_offset, 0);
        dialog.update(Message::KeyPress(key(KeyCode::End)));
        assert_eq!(dialog.scroll_offset, 4);
    }

    #[test]
    fn keys_ignored_when_closed() {
        let mut dialog = make_dialog(100);
        dialog.hide();
        dialog.update(Message::KeyPress(key(KeyCode::PageDown)));
        assert_eq!(dialog.scroll_offset, 0);
    }

    #[test]
    fn view_records_visible_height() {
        let dialog = make_dialog(100);
        render(&dialog, 80, 12);
        // 12 rows minus the border.
        assert_eq!(dialog.visible_height.get(), 10);
    }

    #[test]
    fn show_resets_scroll() {
        let mut dialog = make_dialog(100);
        dialog.update(Message::KeyPress(key(KeyCode::PageDown)));
        dialog.show(&descriptors());
        assert_eq!(dialog.scroll_offset, 0);
    }
}
