use super::app::MenuAction;
use crate::domain::layout::Direction;
use crate::domain::SelectionMode;
use crate::ports::KeyInput;

pub(crate) fn action_for(key: KeyInput, mode: SelectionMode) -> Option<MenuAction> {
    match key {
        KeyInput::Up => Some(MenuAction::Move(Direction::Up)),
        KeyInput::Down => Some(MenuAction::Move(Direction::Down)),
        KeyInput::Left => Some(MenuAction::Move(Direction::Left)),
        KeyInput::Right => Some(MenuAction::Move(Direction::Right)),
        KeyInput::Char('q') | KeyInput::Escape | KeyInput::Interrupt => Some(MenuAction::Cancel),
        KeyInput::Resize => Some(MenuAction::Redraw),
        KeyInput::Char(' ') if mode == SelectionMode::Multi => Some(MenuAction::Toggle),
        KeyInput::Char('x') if mode == SelectionMode::Multi => Some(MenuAction::ConfirmSelection),
        KeyInput::Enter if mode == SelectionMode::Single => Some(MenuAction::ConfirmCursor),
        _ => None,
    }
}

/// Keys still honoured while the terminal is too small to draw the grid.
pub(crate) fn allowed_while_too_small(action: MenuAction) -> bool {
    matches!(action, MenuAction::Cancel | MenuAction::Redraw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_bindings() {
        let mode = SelectionMode::Multi;
        assert_eq!(action_for(KeyInput::Char(' '), mode), Some(MenuAction::Toggle));
        assert_eq!(action_for(KeyInput::Char('x'), mode), Some(MenuAction::ConfirmSelection));
        assert_eq!(action_for(KeyInput::Enter, mode), None);
    }

    #[test]
    fn test_single_bindings() {
        let mode = SelectionMode::Single;
        assert_eq!(action_for(KeyInput::Enter, mode), Some(MenuAction::ConfirmCursor));
        assert_eq!(action_for(KeyInput::Char(' '), mode), None);
        assert_eq!(action_for(KeyInput::Char('x'), mode), None);
    }

    #[test]
    fn test_cancel_keys() {
        for mode in [SelectionMode::Single, SelectionMode::Multi] {
            for key in [KeyInput::Char('q'), KeyInput::Escape, KeyInput::Interrupt] {
                assert_eq!(action_for(key, mode), Some(MenuAction::Cancel));
            }
            assert_eq!(action_for(KeyInput::Char('Q'), mode), None);
        }
    }

    #[test]
    fn test_arrows_move() {
        assert_eq!(
            action_for(KeyInput::Left, SelectionMode::Multi),
            Some(MenuAction::Move(Direction::Left))
        );
        assert!(!allowed_while_too_small(MenuAction::Move(Direction::Left)));
        assert!(allowed_while_too_small(MenuAction::Cancel));
    }
}
