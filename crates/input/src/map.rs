//! Key mapping from terminal events to input signals.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One of the engine's polled input lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    ShiftLeft,
    ShiftRight,
    Rotate,
    FastDrop,
}

/// Map a key code onto a signal.
pub fn map_key(code: KeyCode) -> Option<Signal> {
    match code {
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(Signal::ShiftLeft),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(Signal::ShiftRight),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(Signal::FastDrop),
        KeyCode::Up
        | KeyCode::Char(' ')
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Signal::Rotate),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Check if key asks for a new round.
pub fn is_restart(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(KeyCode::Left), Some(Signal::ShiftLeft));
        assert_eq!(map_key(KeyCode::Right), Some(Signal::ShiftRight));
        assert_eq!(map_key(KeyCode::Down), Some(Signal::FastDrop));

        assert_eq!(map_key(KeyCode::Char('H')), Some(Signal::ShiftLeft));
        assert_eq!(map_key(KeyCode::Char('d')), Some(Signal::ShiftRight));
        assert_eq!(map_key(KeyCode::Char('j')), Some(Signal::FastDrop));
    }

    #[test]
    fn test_rotate_keys() {
        assert_eq!(map_key(KeyCode::Up), Some(Signal::Rotate));
        assert_eq!(map_key(KeyCode::Char(' ')), Some(Signal::Rotate));
        assert_eq!(map_key(KeyCode::Char('W')), Some(Signal::Rotate));
        assert_eq!(map_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }

    #[test]
    fn test_restart_key() {
        assert!(is_restart(KeyEvent::from(KeyCode::Char('r'))));
        assert!(!is_restart(KeyEvent::from(KeyCode::Char('q'))));
    }
}
