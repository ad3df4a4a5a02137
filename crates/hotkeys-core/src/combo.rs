//! Key combinations: parsing, event conversion, and canonical form.
//!
//! A [`KeyCombination`] is a primary key plus a set of modifiers. Both
//! [`KeyCombination::parse`] and [`KeyCombination::from_event`] run the same
//! normalisation, so a binding declared as `"shift+/"` matches the `?` a
//! terminal actually reports, and `"A"` matches `shift+a`.

use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::ComboParseError;

/// A single key press with the modifier keys held alongside it.
///
/// Equality is exact on both the primary key and the modifier set. The
/// [`Display`](fmt::Display) output is the canonical string form
/// (`alt+ctrl+meta+shift+<key>`), which is also what the seen record is keyed
/// on during dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    code: KeyCode,
    modifiers: KeyModifiers,
}

impl KeyCombination {
    /// Create a combination with no modifier keys.
    pub fn new(code: KeyCode) -> Self {
        Self::normalized(code, KeyModifiers::NONE)
    }

    /// Create a combination with the Ctrl modifier.
    pub fn ctrl(code: KeyCode) -> Self {
        Self::normalized(code, KeyModifiers::CONTROL)
    }

    /// Create a combination with an explicit set of modifier keys.
    pub fn with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self::normalized(code, modifiers)
    }

    /// Parse a human-readable combination such as `"ctrl+shift+s"` or `"?"`.
    ///
    /// Parts are separated by `+`, matched case-insensitively, and may appear
    /// in any order. Exactly one part must be a primary key.
    ///
    /// ```
    /// use hotkeys_core::KeyCombination;
    ///
    /// let a = KeyCombination::parse("ctrl+s").unwrap();
    /// let b = KeyCombination::parse("S + Ctrl").unwrap();
    /// assert_ne!(a, b); // "S" carries shift
    /// assert_eq!(a, KeyCombination::parse("Control+s").unwrap());
    /// assert_eq!(a.to_string(), "ctrl+s");
    /// ```
    pub fn parse(combo: &str) -> Result<Self, ComboParseError> {
        let trimmed = combo.trim();
        if trimmed.is_empty() {
            return Err(ComboParseError::Empty);
        }

        let mut modifiers = KeyModifiers::NONE;
        let mut code = None;
        for part in trimmed.split('+').map(str::trim) {
            if part.is_empty() {
                return Err(ComboParseError::InvalidSyntax {
                    combo: combo.to_string(),
                });
            }
            if let Some(modifier) = modifier_named(part) {
                modifiers |= modifier;
                continue;
            }
            let key = key_named(part).ok_or_else(|| ComboParseError::UnknownKey {
                combo: combo.to_string(),
                key: part.to_string(),
            })?;
            if code.replace(key).is_some() {
                return Err(ComboParseError::MultipleKeys {
                    combo: combo.to_string(),
                });
            }
        }

        let code = code.ok_or_else(|| ComboParseError::MissingKey {
            combo: combo.to_string(),
        })?;
        Ok(Self::normalized(code, modifiers))
    }

    /// Derive the combination a raw key event represents.
    pub fn from_event(event: &KeyEvent) -> Self {
        Self::normalized(event.code, event.modifiers)
    }

    /// Return whether two combinations denote the same key press.
    pub fn matches(&self, other: &KeyCombination) -> bool {
        self == other
    }

    /// The normalised primary key.
    pub fn code(&self) -> KeyCode {
        self.code
    }

    /// The normalised modifier set.
    pub fn modifiers(&self) -> KeyModifiers {
        self.modifiers
    }

    fn normalized(code: KeyCode, modifiers: KeyModifiers) -> Self {
        let mut modifiers = modifiers;
        if modifiers.contains(KeyModifiers::META) {
            modifiers.remove(KeyModifiers::META);
            modifiers.insert(KeyModifiers::SUPER);
        }
        modifiers &= matched_modifiers();

        let code = match code {
            KeyCode::BackTab => {
                modifiers.insert(KeyModifiers::SHIFT);
                KeyCode::Tab
            }
            KeyCode::Char(c) if c.is_alphabetic() => {
                if c.is_uppercase() {
                    modifiers.insert(KeyModifiers::SHIFT);
                }
                KeyCode::Char(c.to_lowercase().next().unwrap_or(c))
            }
            // Shift is implied by the character a symbol key produces.
            KeyCode::Char(c) if c != ' ' => {
                let produced = if modifiers.contains(KeyModifiers::SHIFT) {
                    shifted_symbol(c).unwrap_or(c)
                } else {
                    c
                };
                modifiers.remove(KeyModifiers::SHIFT);
                KeyCode::Char(produced)
            }
            other => other,
        };

        Self { code, modifiers }
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in MODIFIER_ORDER {
            if self.modifiers.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("space"),
            KeyCode::Char('+') => f.write_str("plus"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::F(n) => write!(f, "f{n}"),
            KeyCode::Enter => f.write_str("enter"),
            KeyCode::Esc => f.write_str("escape"),
            KeyCode::Tab => f.write_str("tab"),
            KeyCode::Backspace => f.write_str("backspace"),
            KeyCode::Delete => f.write_str("delete"),
            KeyCode::Insert => f.write_str("insert"),
            KeyCode::Home => f.write_str("home"),
            KeyCode::End => f.write_str("end"),
            KeyCode::PageUp => f.write_str("pageup"),
            KeyCode::PageDown => f.write_str("pagedown"),
            KeyCode::Up => f.write_str("up"),
            KeyCode::Down => f.write_str("down"),
            KeyCode::Left => f.write_str("left"),
            KeyCode::Right => f.write_str("right"),
            other => write!(f, "{}", format!("{other:?}").to_lowercase()),
        }
    }
}

impl FromStr for KeyCombination {
    type Err = ComboParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

const MODIFIER_ORDER: [(KeyModifiers, &str); 4] = [
    (KeyModifiers::ALT, "alt"),
    (KeyModifiers::CONTROL, "ctrl"),
    (KeyModifiers::SUPER, "meta"),
    (KeyModifiers::SHIFT, "shift"),
];

fn matched_modifiers() -> KeyModifiers {
    KeyModifiers::SHIFT | KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER
}

fn modifier_named(part: &str) -> Option<KeyModifiers> {
    let modifier = match part.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => KeyModifiers::CONTROL,
        "alt" | "option" | "opt" => KeyModifiers::ALT,
        "shift" => KeyModifiers::SHIFT,
        "meta" | "cmd" | "command" | "super" | "win" => KeyModifiers::SUPER,
        "mod" if cfg!(target_os = "macos") => KeyModifiers::SUPER,
        "mod" => KeyModifiers::CONTROL,
        _ => return None,
    };
    Some(modifier)
}

fn key_named(part: &str) -> Option<KeyCode> {
    let lower = part.to_ascii_lowercase();
    let code = match lower.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "space" => KeyCode::Char(' '),
        "plus" => KeyCode::Char('+'),
        _ => {
            if let Some(n) = lower
                .strip_prefix('f')
                .and_then(|n| n.parse::<u8>().ok())
                .filter(|n| (1..=24).contains(n))
            {
                return Some(KeyCode::F(n));
            }
            let mut chars = part.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some(code)
}

/// The character a US-layout key produces with shift held.
fn shifted_symbol(c: char) -> Option<char> {
    let shifted = match c {
        '`' => '~',
        '1' => '!',
        '2' => '@',
        '3' => '#',
        '4' => '$',
        '5' => '%',
        '6' => '^',
        '7' => '&',
        '8' => '*',
        '9' => '(',
        '0' => ')',
        '-' => '_',
        '=' => '+',
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        ';' => ':',
        '\'' => '"',
        ',' => '<',
        '.' => '>',
        '/' => '?',
        _ => return None,
    };
    Some(shifted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn parses_single_char() {
        let combo = KeyCombination::parse("q").unwrap();
        assert_eq!(combo.code(), KeyCode::Char('q'));
        assert_eq!(combo.modifiers(), KeyModifiers::NONE);
    }

    #[test]
    fn modifier_order_does_not_matter() {
        let a = KeyCombination::parse("ctrl+alt+x").unwrap();
        let b = KeyCombination::parse("Alt + X + Ctrl").unwrap();
        // Uppercase X carries shift, so compare against the lowercase spelling.
        let c = KeyCombination::parse("alt+x+ctrl").unwrap();
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert!(b.modifiers().contains(KeyModifiers::SHIFT));
    }

    #[test]
    fn uppercase_letter_means_shift() {
        assert_eq!(
            KeyCombination::parse("A").unwrap(),
            KeyCombination::parse("shift+a").unwrap()
        );
    }

    #[test]
    fn shifted_symbol_folds_to_produced_char() {
        let question = KeyCombination::parse("?").unwrap();
        assert_eq!(KeyCombination::parse("shift+/").unwrap(), question);
        assert_eq!(question.modifiers(), KeyModifiers::NONE);
        assert_eq!(question.to_string(), "?");
    }

    #[test]
    fn named_keys_and_aliases() {
        assert_eq!(KeyCombination::parse("return").unwrap().code(), KeyCode::Enter);
        assert_eq!(KeyCombination::parse("Esc").unwrap().code(), KeyCode::Esc);
        assert_eq!(KeyCombination::parse("pgdn").unwrap().code(), KeyCode::PageDown);
        assert_eq!(KeyCombination::parse("space").unwrap().code(), KeyCode::Char(' '));
        assert_eq!(KeyCombination::parse("ctrl+plus").unwrap().code(), KeyCode::Char('+'));
        assert_eq!(KeyCombination::parse("F12").unwrap().code(), KeyCode::F(12));
        assert_eq!(KeyCombination::parse("f").unwrap().code(), KeyCode::Char('f'));
    }

    #[test]
    fn meta_aliases_share_one_modifier() {
        let meta = KeyCombination::parse("meta+k").unwrap();
        assert_eq!(KeyCombination::parse("cmd+k").unwrap(), meta);
        assert_eq!(KeyCombination::parse("super+k").unwrap(), meta);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(KeyCombination::parse("   "), Err(ComboParseError::Empty));
        assert!(matches!(
            KeyCombination::parse("ctrl+shift"),
            Err(ComboParseError::MissingKey { .. })
        ));
        assert!(matches!(
            KeyCombination::parse("a+b"),
            Err(ComboParseError::MultipleKeys { .. })
        ));
        assert!(matches!(
            KeyCombination::parse("ctrl++"),
            Err(ComboParseError::InvalidSyntax { .. })
        ));
        assert_eq!(
            KeyCombination::parse("ctrl+banana"),
            Err(ComboParseError::UnknownKey {
                combo: "ctrl+banana".into(),
                key: "banana".into(),
            })
        );
        assert!(KeyCombination::parse("f25").is_err());
    }

    #[test]
    fn canonical_string_orders_modifiers() {
        let combo = KeyCombination::parse("shift+meta+ctrl+alt+s").unwrap();
        assert_eq!(combo.to_string(), "alt+ctrl+meta+shift+s");
        assert_eq!(KeyCombination::parse("ctrl+space").unwrap().to_string(), "ctrl+space");
        assert_eq!(KeyCombination::parse("shift+tab").unwrap().to_string(), "shift+tab");
    }

    #[test]
    fn canonical_string_reparses_to_same_combo() {
        for combo in ["ctrl+s", "alt+shift+f4", "meta+enter", "?", "ctrl+plus", "shift+space"] {
            let parsed = KeyCombination::parse(combo).unwrap();
            assert_eq!(KeyCombination::parse(&parsed.to_string()).unwrap(), parsed);
        }
    }

    #[test]
    fn from_event_matches_parsed() {
        let ctrl_s = event(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(KeyCombination::from_event(&ctrl_s).matches(&"ctrl+s".parse().unwrap()));

        // Terminals report '?' with or without shift depending on protocol.
        let question = event(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert!(KeyCombination::from_event(&question).matches(&"?".parse().unwrap()));

        let back_tab = event(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert!(KeyCombination::from_event(&back_tab).matches(&"shift+tab".parse().unwrap()));

        let upper = event(KeyCode::Char('S'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert!(KeyCombination::from_event(&upper).matches(&"ctrl+shift+s".parse().unwrap()));
    }

    #[test]
    fn event_meta_folds_into_meta_and_extra_modifiers_are_dropped() {
        let meta = event(KeyCode::Char('k'), KeyModifiers::META);
        assert_eq!(
            KeyCombination::from_event(&meta),
            KeyCombination::parse("meta+k").unwrap()
        );
        let hyper = event(KeyCode::Char('k'), KeyModifiers::HYPER | KeyModifiers::CONTROL);
        assert_eq!(
            KeyCombination::from_event(&hyper),
            KeyCombination::parse("ctrl+k").unwrap()
        );
    }

    #[test]
    fn extra_modifier_does_not_match() {
        let ctrl_shift_s = event(KeyCode::Char('s'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert!(!KeyCombination::from_event(&ctrl_shift_s).matches(&"ctrl+s".parse().unwrap()));
    }
}
