//! Core types for the keymap system: KeyChord, Modifiers, KeyCode

use std::fmt;

/// Modifier keys as a bitfield for efficient storage and comparison
///
/// Control is not a modifier here: terminals deliver control keys as their
/// own key codes, so it lives in [`KeyCode::Ctrl`]. Shift is folded into the
/// character. Only Alt is currently distinguished by the terminal adapter,
/// but the bitfield leaves room for more.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const ALT: Modifiers = Modifiers(0b0001);

    /// Check if alt/meta is held
    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & Self::ALT.0 != 0
    }

    /// Check if no modifiers are held
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// A key code representing a terminal key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    /// A printable character, case preserved
    Char(char),
    /// A control character, e.g. `Ctrl('x')` for C-x (normalized to lowercase)
    Ctrl(char),

    // Named keys
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Insert,

    // Arrow keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,

    // Function keys
    F(u8), // F1-F24
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(' ') => write!(f, "Space"),
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::Ctrl(' ') => write!(f, "C-Space"),
            KeyCode::Ctrl(c) => write!(f, "C-{}", c),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Escape => write!(f, "Esc"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::BackTab => write!(f, "BackTab"),
            KeyCode::Backspace => write!(f, "BS"),
            KeyCode::Delete => write!(f, "Del"),
            KeyCode::Insert => write!(f, "Insert"),
            KeyCode::Up => write!(f, "ArrowUp"),
            KeyCode::Down => write!(f, "ArrowDown"),
            KeyCode::Left => write!(f, "ArrowLeft"),
            KeyCode::Right => write!(f, "ArrowRight"),
            KeyCode::Home => write!(f, "Home"),
            KeyCode::End => write!(f, "End"),
            KeyCode::PageUp => write!(f, "PgUp"),
            KeyCode::PageDown => write!(f, "PgDn"),
            KeyCode::F(n) => write!(f, "F{}", n),
        }
    }
}

/// A single keystroke: a key with modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyChord {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl KeyChord {
    /// Create a new chord
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// Create a chord with no modifiers
    pub const fn key(key: KeyCode) -> Self {
        Self {
            key,
            mods: Modifiers::NONE,
        }
    }

    /// Create a chord for a plain character
    pub const fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    /// Create a chord for a control character (C-x)
    pub fn ctrl(c: char) -> Self {
        Self::key(KeyCode::Ctrl(c.to_ascii_lowercase()))
    }

    /// Create an Alt chord for a plain character (M-x)
    pub const fn alt(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::ALT)
    }

    /// The character this chord would insert, if any
    pub fn printable(&self) -> Option<char> {
        match self.key {
            KeyCode::Char(c) if self.mods.is_empty() => Some(c),
            _ => None,
        }
    }

    /// Display form used in key specs and in sequence feedback, e.g. `M-C-x`
    pub fn display_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.alt() {
            write!(f, "M-")?;
        }
        write!(f, "{}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_empty() {
        let mods = Modifiers::NONE;
        assert!(mods.is_empty());
        assert!(!mods.alt());
    }

    #[test]
    fn test_modifiers_combined() {
        let mods = Modifiers::NONE | Modifiers::ALT;
        assert!(mods.alt());
        assert!(mods.contains(Modifiers::ALT));
        assert!(mods.contains(Modifiers::NONE));
    }

    #[test]
    fn test_chord_display() {
        assert_eq!(KeyChord::char('a').to_string(), "a");
        assert_eq!(KeyChord::char('A').to_string(), "A");
        assert_eq!(KeyChord::ctrl('X').to_string(), "C-x");
        assert_eq!(KeyChord::alt('v').to_string(), "M-v");
        assert_eq!(KeyChord::key(KeyCode::Up).to_string(), "ArrowUp");
        assert_eq!(KeyChord::ctrl(' ').to_string(), "C-Space");
        assert_eq!(
            KeyChord::new(KeyCode::Ctrl('g'), Modifiers::ALT).to_string(),
            "M-C-g"
        );
    }

    #[test]
    fn test_printable() {
        assert_eq!(KeyChord::char('q').printable(), Some('q'));
        assert_eq!(KeyChord::alt('q').printable(), None);
        assert_eq!(KeyChord::ctrl('q').printable(), None);
        assert_eq!(KeyChord::key(KeyCode::Enter).printable(), None);
    }

    #[test]
    fn test_chord_equality_is_structural() {
        assert_eq!(KeyChord::ctrl('x'), KeyChord::key(KeyCode::Ctrl('x')));
        assert_ne!(KeyChord::char('x'), KeyChord::alt('x'));
    }
}
