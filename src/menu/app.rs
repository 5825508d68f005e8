use crate::domain::layout::{compute_layout, Direction, GridLayout, LayoutError};
use crate::domain::{ScriptEntry, SelectionMode};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum MenuPhase {
    Browsing,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum MenuAction {
    Move(Direction),
    Toggle,
    ConfirmSelection,
    ConfirmCursor,
    Cancel,
    Redraw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    Cancelled,
    Confirmed(Vec<ScriptEntry>),
}

pub(crate) struct MenuState {
    pub(crate) entries: Vec<ScriptEntry>,
    pub(crate) cursor: usize,
    pub(crate) layout: Option<GridLayout>,
    pub(crate) mode: SelectionMode,
    pub(crate) phase: MenuPhase,
    chosen: Vec<ScriptEntry>,
}

impl MenuState {
    pub(crate) fn new(entries: Vec<ScriptEntry>, mode: SelectionMode) -> Self {
        Self {
            entries,
            cursor: 0,
            layout: None,
            mode,
            phase: MenuPhase::Browsing,
            chosen: Vec::new(),
        }
    }

    /// Recompute the grid for the current screen size; navigation is
    /// disabled while the screen is too small.
    pub(crate) fn relayout(&mut self, width: u16, height: u16) -> Result<GridLayout, LayoutError> {
        let result = compute_layout(&self.entries, width, height);
        self.layout = result.ok();
        result
    }

    pub(crate) fn current(&self) -> Option<&ScriptEntry> {
        self.entries.get(self.cursor)
    }

    pub(crate) fn selected_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.selected).count()
    }

    pub(crate) fn apply(&mut self, action: MenuAction) {
        if self.phase != MenuPhase::Browsing || self.entries.is_empty() {
            return;
        }
        match action {
            MenuAction::Move(direction) => {
                if let Some(layout) = self.layout {
                    self.cursor = layout.step(self.cursor, self.entries.len(), direction);
                }
            }
            MenuAction::Toggle => {
                if let Some(entry) = self.entries.get_mut(self.cursor) {
                    entry.selected = !entry.selected;
                }
            }
            MenuAction::ConfirmSelection => {
                self.chosen = self
                    .entries
                    .iter()
                    .filter(|entry| entry.selected)
                    .cloned()
                    .collect();
                self.phase = MenuPhase::Confirmed;
            }
            MenuAction::ConfirmCursor => {
                self.chosen = self.current().cloned().into_iter().collect();
                self.phase = MenuPhase::Confirmed;
            }
            MenuAction::Cancel => self.phase = MenuPhase::Cancelled,
            MenuAction::Redraw => {}
        }
    }

    pub(crate) fn outcome(&mut self) -> Option<MenuOutcome> {
        match self.phase {
            MenuPhase::Browsing => None,
            MenuPhase::Cancelled => Some(MenuOutcome::Cancelled),
            MenuPhase::Confirmed => Some(MenuOutcome::Confirmed(std::mem::take(&mut self.chosen))),
        }
    }
}
