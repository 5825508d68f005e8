use crate::ports::KeyInput;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub(crate) fn key_input(key: KeyEvent) -> KeyInput {
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            KeyInput::Interrupt
        }
        KeyCode::Up => KeyInput::Up,
        KeyCode::Down => KeyInput::Down,
        KeyCode::Left => KeyInput::Left,
        KeyCode::Right => KeyInput::Right,
        KeyCode::Enter => KeyInput::Enter,
        KeyCode::Esc => KeyInput::Escape,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => KeyInput::Char(c),
        _ => KeyInput::Other,
    }
}
