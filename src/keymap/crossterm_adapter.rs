//! Adapter to convert crossterm key events to our KeyChord type

use crossterm::event::{KeyCode as CtKeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::types::{KeyChord, KeyCode, Modifiers};

/// Convert a crossterm key event to a KeyChord
///
/// Returns None for key releases and keys with no terminal equivalent
/// (media keys, bare modifiers, ...). Shift is folded into the character
/// and Control only applies to characters; Ctrl on a named key is dropped.
pub fn chord_from_crossterm(event: &KeyEvent) -> Option<KeyChord> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let mods = if event.modifiers.contains(KeyModifiers::ALT) {
        Modifiers::ALT
    } else {
        Modifiers::NONE
    };

    let key = match event.code {
        CtKeyCode::Char(c) if ctrl => KeyCode::Ctrl(c.to_ascii_lowercase()),
        CtKeyCode::Char(c) => KeyCode::Char(c),
        // Some terminals report C-Space as NUL
        CtKeyCode::Null => KeyCode::Ctrl(' '),

        CtKeyCode::Enter => KeyCode::Enter,
        CtKeyCode::Esc => KeyCode::Escape,
        CtKeyCode::Tab => KeyCode::Tab,
        CtKeyCode::BackTab => KeyCode::BackTab,
        CtKeyCode::Backspace => KeyCode::Backspace,
        CtKeyCode::Delete => KeyCode::Delete,
        CtKeyCode::Insert => KeyCode::Insert,

        // Arrows
        CtKeyCode::Up => KeyCode::Up,
        CtKeyCode::Down => KeyCode::Down,
        CtKeyCode::Left => KeyCode::Left,
        CtKeyCode::Right => KeyCode::Right,

        // Navigation
        CtKeyCode::Home => KeyCode::Home,
        CtKeyCode::End => KeyCode::End,
        CtKeyCode::PageUp => KeyCode::PageUp,
        CtKeyCode::PageDown => KeyCode::PageDown,

        CtKeyCode::F(n @ 1..=24) => KeyCode::F(n),

        _ => return None,
    };

    Some(KeyChord::new(key, mods))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(code: CtKeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_character() {
        let chord = chord_from_crossterm(&event(CtKeyCode::Char('q'), KeyModifiers::NONE));
        assert_eq!(chord, Some(KeyChord::char('q')));
    }

    #[test]
    fn test_shift_folded_into_character() {
        let chord = chord_from_crossterm(&event(CtKeyCode::Char('Q'), KeyModifiers::SHIFT));
        assert_eq!(chord, Some(KeyChord::char('Q')));
    }

    #[test]
    fn test_control_character_lowercased() {
        let chord = chord_from_crossterm(&event(
            CtKeyCode::Char('X'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        ));
        assert_eq!(chord, Some(KeyChord::ctrl('x')));
    }

    #[test]
    fn test_alt_kept_as_modifier() {
        let chord = chord_from_crossterm(&event(CtKeyCode::Char('f'), KeyModifiers::ALT));
        assert_eq!(chord, Some(KeyChord::alt('f')));

        let chord = chord_from_crossterm(&event(
            CtKeyCode::Char('x'),
            KeyModifiers::ALT | KeyModifiers::CONTROL,
        ))
        .unwrap();
        assert_eq!(chord.key, KeyCode::Ctrl('x'));
        assert!(chord.mods.alt());
        assert_eq!(chord.to_string(), "M-C-x");
    }

    #[test]
    fn test_ctrl_space() {
        let chord = chord_from_crossterm(&event(CtKeyCode::Char(' '), KeyModifiers::CONTROL));
        assert_eq!(chord, Some(KeyChord::ctrl(' ')));

        let chord = chord_from_crossterm(&event(CtKeyCode::Null, KeyModifiers::NONE));
        assert_eq!(chord, Some(KeyChord::ctrl(' ')));
    }

    #[test]
    fn test_named_keys() {
        let cases = [
            (CtKeyCode::Enter, KeyCode::Enter),
            (CtKeyCode::Esc, KeyCode::Escape),
            (CtKeyCode::BackTab, KeyCode::BackTab),
            (CtKeyCode::Backspace, KeyCode::Backspace),
            (CtKeyCode::Up, KeyCode::Up),
            (CtKeyCode::PageDown, KeyCode::PageDown),
            (CtKeyCode::F(5), KeyCode::F(5)),
        ];
        for (code, expected) in cases {
            assert_eq!(
                chord_from_crossterm(&event(code, KeyModifiers::NONE)),
                Some(KeyChord::key(expected)),
                "{:?}",
                code
            );
        }
    }

    #[test]
    fn test_ctrl_dropped_on_named_key() {
        let chord = chord_from_crossterm(&event(CtKeyCode::Up, KeyModifiers::CONTROL));
        assert_eq!(chord, Some(KeyChord::key(KeyCode::Up)));
    }

    #[test]
    fn test_release_ignored() {
        let mut release = event(CtKeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(chord_from_crossterm(&release), None);
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(
            chord_from_crossterm(&event(CtKeyCode::CapsLock, KeyModifiers::NONE)),
            None
        );
        assert_eq!(
            chord_from_crossterm(&event(CtKeyCode::F(30), KeyModifiers::NONE)),
            None
        );
    }
}
