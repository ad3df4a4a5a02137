//! Nested hotkey scopes in a terminal app.
//!
//! Run with `cargo run --example scoped_hotkeys`, press `?` for the help
//! dialog. Set `RUST_LOG=hotkeys_core=trace` to see dispatch decisions in
//! `scoped_hotkeys.log`.

use std::fs::File;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures::StreamExt;
use hotkeys::crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind};
use hotkeys::ratatui::layout::{Constraint, Direction, Layout};
use hotkeys::ratatui::style::{Color, Modifier, Style};
use hotkeys::ratatui::text::Line;
use hotkeys::ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use hotkeys::ratatui::{DefaultTerminal, Frame};
use hotkeys::widgets::dialog::Message as DialogMessage;
use hotkeys::widgets::HotkeysDialog;
use hotkeys::{
    bubble_path, dispatch_bubble, BindingDescriptor, Element, HotkeyEvent, HotkeysError,
    HotkeysOverlay, ScopeRouter,
};
use tracing_subscriber::EnvFilter;

static ITEMS: [&str; 5] = ["apples", "bread", "coffee", "dates", "eggs"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Search,
    List,
}

/// State shared with hotkey callbacks.
#[derive(Default)]
struct Shared {
    /// Index into the filtered list.
    selected: AtomicUsize,
    visible: AtomicUsize,
    quit: AtomicBool,
    log: Mutex<Vec<String>>,
}

impl Shared {
    fn set_visible(&self, count: usize) {
        self.visible.store(count, Ordering::SeqCst);
        let last = count.saturating_sub(1);
        let _ = self
            .selected
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |sel| Some(sel.min(last)));
    }

    fn record(&self, line: impl Into<String>) {
        if let Ok(mut log) = self.log.lock() {
            log.push(line.into());
        }
    }
}

struct Demo {
    shared: Arc<Shared>,
    app: ScopeRouter,
    list: ScopeRouter,
    dialog: HotkeysDialog,
    focus: Focus,
    query: String,
    search_field: Element,
    list_body: Element,
}

impl Demo {
    fn new() -> Result<Self, HotkeysError> {
        let shared = Arc::new(Shared::default());
        shared.set_visible(ITEMS.len());

        let mut app = ScopeRouter::new();
        app.set_hotkeys(&app_hotkeys(&shared))?;
        let mut list = ScopeRouter::new();
        list.set_hotkeys(&list_hotkeys(&shared))?;

        Ok(Self {
            shared,
            app,
            list,
            dialog: HotkeysDialog::new().with_title(" Hotkeys (esc to close) "),
            focus: Focus::List,
            query: String::new(),
            search_field: Element::text_input().inside(Element::container()),
            list_body: Element::container(),
        })
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.dialog.is_open() {
            self.dialog.update(DialogMessage::KeyPress(key));
            return;
        }

        let target = match self.focus {
            Focus::Search => &self.search_field,
            Focus::List => &self.list_body,
        };
        let event = HotkeyEvent::new(key).with_target(target);
        let outcome = dispatch_bubble(
            bubble_path(&[&self.list, &self.app]),
            &event,
            &mut self.dialog,
        );
        if outcome.is_handled() || key.kind == KeyEventKind::Release {
            return;
        }

        match (self.focus, key.code) {
            (_, KeyCode::Tab) => {
                self.focus = match self.focus {
                    Focus::Search => Focus::List,
                    Focus::List => Focus::Search,
                };
            }
            (Focus::Search, KeyCode::Esc) => self.focus = Focus::List,
            (Focus::Search, KeyCode::Backspace) => {
                self.query.pop();
                self.refilter();
            }
            (Focus::Search, KeyCode::Char(c)) => {
                self.query.push(c);
                self.refilter();
            }
            _ => {}
        }
    }

    fn filtered(&self) -> impl Iterator<Item = &'static str> + '_ {
        ITEMS
            .iter()
            .copied()
            .filter(|item| item.contains(self.query.as_str()))
    }

    fn refilter(&self) {
        self.shared.set_visible(self.filtered().count());
    }

    fn view(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(8),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let focused = Style::default().fg(Color::Cyan);
        let border = |focus: Focus| if self.focus == focus { focused } else { Style::default() };

        frame.render_widget(
            Paragraph::new(self.query.as_str()).block(
                Block::default()
                    .title(" Search (typing here disables hotkeys) ")
                    .borders(Borders::ALL)
                    .border_style(border(Focus::Search)),
            ),
            chunks[0],
        );

        let selected = self.shared.selected.load(Ordering::SeqCst);
        let items: Vec<ListItem> = self
            .filtered()
            .enumerate()
            .map(|(idx, item)| {
                let style = if idx == selected {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                ListItem::new(item).style(style)
            })
            .collect();
        frame.render_widget(
            List::new(items).block(
                Block::default()
                    .title(" Items ")
                    .borders(Borders::ALL)
                    .border_style(border(Focus::List)),
            ),
            chunks[1],
        );

        let log: Vec<Line> = self
            .shared
            .log
            .lock()
            .map(|log| log.iter().rev().take(6).map(|l| Line::raw(l.clone())).collect())
            .unwrap_or_default();
        frame.render_widget(
            Paragraph::new(log).block(Block::default().title(" Fired ").borders(Borders::ALL)),
            chunks[2],
        );

        frame.render_widget(
            Paragraph::new("? help  tab focus  j/k move  ctrl+s save  ctrl+q quit"),
            chunks[3],
        );

        let area = frame.area();
        self.dialog.view(frame, area);
    }
}

fn app_hotkeys(shared: &Arc<Shared>) -> Vec<BindingDescriptor> {
    let save = Arc::clone(shared);
    let quit = Arc::clone(shared);
    let refresh = Arc::clone(shared);
    vec![
        BindingDescriptor::new("ctrl+s", "Save everything")
            .group("Application")
            .on_key_down(move |_| save.record("app: save everything")),
        BindingDescriptor::new("ctrl+r", "Refresh")
            .group("Application")
            .try_on_key_down(move |_| {
                refresh.record("app: refresh failed (see log)");
                Err("no network in the demo".into())
            }),
        BindingDescriptor::new("ctrl+q", "Quit")
            .global(true)
            .on_key_down(move |_| quit.quit.store(true, Ordering::SeqCst)),
    ]
}

fn list_hotkeys(shared: &Arc<Shared>) -> Vec<BindingDescriptor> {
    let down = Arc::clone(shared);
    let up = Arc::clone(shared);
    let save = Arc::clone(shared);
    vec![
        BindingDescriptor::new("j", "Next item")
            .group("List")
            .on_key_down(move |_| {
                let last = down.visible.load(Ordering::SeqCst).saturating_sub(1);
                let next = (down.selected.load(Ordering::SeqCst) + 1).min(last);
                down.selected.store(next, Ordering::SeqCst);
            }),
        BindingDescriptor::new("k", "Previous item")
            .group("List")
            .on_key_down(move |_| {
                let prev = up.selected.load(Ordering::SeqCst).saturating_sub(1);
                up.selected.store(prev, Ordering::SeqCst);
            }),
        BindingDescriptor::new("ctrl+s", "Save selected item")
            .group("List")
            .on_key_down(move |_| save.record("list: save selected item")),
        BindingDescriptor::new("d", "Delete item (read-only demo)")
            .group("List")
            .enabled(false),
    ]
}

fn init_logging() -> io::Result<()> {
    let file = File::create("scoped_hotkeys.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run(terminal: &mut DefaultTerminal) -> io::Result<()> {
    let mut demo = Demo::new().map_err(io::Error::other)?;
    let mut events = EventStream::new();

    while !demo.shared.quit.load(Ordering::SeqCst) {
        terminal.draw(|frame| demo.view(frame))?;
        let Some(event) = events.next().await.transpose()? else {
            break;
        };
        if let Event::Key(key) = event {
            demo.on_key(key);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    init_logging()?;
    tracing::info!("starting scoped hotkeys demo");

    let mut terminal = hotkeys::ratatui::init();
    let result = run(&mut terminal).await;
    hotkeys::ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotkeys::crossterm::event::KeyModifiers;

    fn press(demo: &mut Demo, code: KeyCode) {
        demo.on_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn selection_follows_the_filtered_list() {
        let mut demo = Demo::new().unwrap();
        for _ in 0..4 {
            press(&mut demo, KeyCode::Char('j'));
        }
        assert_eq!(demo.shared.selected.load(Ordering::SeqCst), 4);

        press(&mut demo, KeyCode::Tab);
        press(&mut demo, KeyCode::Char('a'));
        assert_eq!(demo.query, "a");
        // apples, bread, dates
        assert_eq!(demo.shared.visible.load(Ordering::SeqCst), 3);
        assert_eq!(demo.shared.selected.load(Ordering::SeqCst), 2);

        press(&mut demo, KeyCode::Tab);
        press(&mut demo, KeyCode::Char('j'));
        assert_eq!(demo.shared.selected.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn typing_in_search_does_not_move_selection() {
        let mut demo = Demo::new().unwrap();
        press(&mut demo, KeyCode::Tab);
        press(&mut demo, KeyCode::Char('j'));
        assert_eq!(demo.query, "j");
        assert_eq!(demo.shared.selected.load(Ordering::SeqCst), 0);
    }
}
