//! Key sequences and the textual key spec syntax
//!
//! A key spec is a whitespace separated list of chord tokens:
//!
//! ```text
//! "C-x C-s"   Ctrl+x then Ctrl+s
//! "M-v"       Alt+v
//! "M-C-g"     Alt+Ctrl+g
//! "ArrowUp"   named key
//! "q"         plain character
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::KeymapError;
use super::types::{KeyChord, KeyCode, Modifiers};

/// An ordered, non-empty list of chords bound to one command
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeySequence {
    chords: Vec<KeyChord>,
}

impl KeySequence {
    /// Build a sequence from chords; returns None when empty
    pub fn new(chords: Vec<KeyChord>) -> Option<Self> {
        if chords.is_empty() {
            None
        } else {
            Some(Self { chords })
        }
    }

    pub fn chords(&self) -> &[KeyChord] {
        &self.chords
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Check if this is a chord (multi-keystroke) sequence
    pub fn is_chord(&self) -> bool {
        self.chords.len() > 1
    }

    /// Check if this sequence starts with the given chords
    pub fn starts_with(&self, prefix: &[KeyChord]) -> bool {
        self.chords.starts_with(prefix)
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chord) in self.chords.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", chord)?;
        }
        Ok(())
    }
}

impl FromStr for KeySequence {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key_sequence(s)
    }
}

/// Parse a key spec like "C-x C-s" into a KeySequence
pub fn parse_key_sequence(spec: &str) -> Result<KeySequence, KeymapError> {
    let chords = spec
        .split_whitespace()
        .map(|token| parse_chord(spec, token))
        .collect::<Result<Vec<_>, _>>()?;

    KeySequence::new(chords).ok_or_else(|| KeymapError::syntax(spec, "empty key sequence"))
}

/// Parse one chord token like "M-C-x"
fn parse_chord(spec: &str, token: &str) -> Result<KeyChord, KeymapError> {
    let mut mods = Modifiers::NONE;
    let mut rest = token;

    if let Some(r) = rest.strip_prefix("M-").filter(|r| !r.is_empty()) {
        mods = mods | Modifiers::ALT;
        rest = r;
    }

    if let Some(r) = rest.strip_prefix("C-").filter(|r| !r.is_empty()) {
        let c = match r {
            "Space" | "SPC" => ' ',
            _ => single_char(r).ok_or_else(|| {
                KeymapError::syntax(
                    spec,
                    format!("control modifier needs a single character in {}", token),
                )
            })?,
        };
        return Ok(KeyChord::new(KeyCode::Ctrl(c.to_ascii_lowercase()), mods));
    }

    if let Some(c) = single_char(rest) {
        return Ok(KeyChord::new(KeyCode::Char(c), mods));
    }

    let key = parse_named_key(rest)
        .ok_or_else(|| KeymapError::syntax(spec, format!("unknown key name {}", rest)))?;
    Ok(KeyChord::new(key, mods))
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Parse a named key
fn parse_named_key(name: &str) -> Option<KeyCode> {
    let key = match name {
        "Enter" | "RET" => KeyCode::Enter,
        "Esc" | "Escape" => KeyCode::Escape,
        "Tab" => KeyCode::Tab,
        "BackTab" => KeyCode::BackTab,
        "BS" | "Backspace" => KeyCode::Backspace,
        "Del" | "Delete" => KeyCode::Delete,
        "Insert" => KeyCode::Insert,
        "Space" | "SPC" => KeyCode::Char(' '),

        "ArrowUp" | "Up" => KeyCode::Up,
        "ArrowDown" | "Down" => KeyCode::Down,
        "ArrowLeft" | "Left" => KeyCode::Left,
        "ArrowRight" | "Right" => KeyCode::Right,

        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "PgUp" | "Pgup" | "PageUp" => KeyCode::PageUp,
        "PgDn" | "Pgdn" | "PageDown" => KeyCode::PageDown,

        _ => {
            let n: u8 = name.strip_prefix('F')?.parse().ok()?;
            if (1..=24).contains(&n) {
                KeyCode::F(n)
            } else {
                return None;
            }
        }
    };
    Some(key)
}
