//! Input events
//!
//! The core only ever sees the four abstract commands below; terminal key
//! events are translated here.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    /// Flap while playing, start from the title screen
    Flap,
    PauseToggle,
    Restart,
}

/// Translate a terminal event into a game command
pub fn map_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<InputEvent> {
    // Key repeat would turn a held space bar into a stream of flaps
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(InputEvent::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputEvent::Quit),
        KeyCode::Char(' ') | KeyCode::Up => Some(InputEvent::Flap),
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => Some(InputEvent::PauseToggle),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Some(InputEvent::Restart),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(map_event(&press(KeyCode::Char(' '))), Some(InputEvent::Flap));
        assert_eq!(map_event(&press(KeyCode::Up)), Some(InputEvent::Flap));
        assert_eq!(map_event(&press(KeyCode::Esc)), Some(InputEvent::PauseToggle));
        assert_eq!(map_event(&press(KeyCode::Char('r'))), Some(InputEvent::Restart));
        assert_eq!(map_event(&press(KeyCode::Char('q'))), Some(InputEvent::Quit));
        assert_eq!(map_event(&press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(&event), Some(InputEvent::Quit));
        assert_eq!(map_event(&press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_releases_and_non_keys_are_ignored() {
        let mut release = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_event(&Event::Key(release)), None);
        assert_eq!(map_event(&Event::Resize(80, 24)), None);
    }
}
