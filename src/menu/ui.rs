use super::app::MenuState;
use crate::domain::layout::{GridLayout, LayoutError};
use crate::domain::{ScriptEntry, SelectionMode};
use crate::ports::{TerminalIo, TextAttrs};
use crate::util::clip_to_width;
use std::io;

/// Lines below the grid: spacer, description, spacer, help.
pub(crate) const CHROME_HEIGHT: u16 = 4;
pub(crate) const TOO_SMALL_MESSAGE: &str = "Terminal size too small. Resize and try again.";

#[derive(Debug, Copy, Clone)]
struct Viewport {
    height: u16,
    width: u16,
}

impl Viewport {
    fn put<T: TerminalIo + ?Sized>(
        &self,
        terminal: &mut T,
        row: u16,
        col: u16,
        text: &str,
        attrs: TextAttrs,
    ) -> io::Result<()> {
        if row >= self.height || col >= self.width {
            return Ok(());
        }
        let room = (self.width - col) as usize;
        terminal.draw_text(row, col, clip_to_width(text, room), attrs)
    }
}

pub(crate) fn render<T: TerminalIo + ?Sized>(
    terminal: &mut T,
    state: &mut MenuState,
) -> io::Result<()> {
    let (height, width) = terminal.size()?;
    let viewport = Viewport { height, width };
    terminal.clear()?;
    match state.relayout(width, height) {
        Ok(layout) => render_menu(terminal, state, layout, viewport)?,
        Err(err) => render_too_small(terminal, &err, viewport)?,
    }
    terminal.present()
}

fn render_too_small<T: TerminalIo + ?Sized>(
    terminal: &mut T,
    err: &LayoutError,
    viewport: Viewport,
) -> io::Result<()> {
    viewport.put(terminal, 0, 0, TOO_SMALL_MESSAGE, TextAttrs::bold())?;
    viewport.put(terminal, 1, 0, &err.to_string(), TextAttrs::dim())?;
    viewport.put(terminal, 2, 0, "Press q to quit.", TextAttrs::plain())
}

fn render_menu<T: TerminalIo + ?Sized>(
    terminal: &mut T,
    state: &MenuState,
    layout: GridLayout,
    viewport: Viewport,
) -> io::Result<()> {
    let grid_height = viewport.height.saturating_sub(CHROME_HEIGHT) as usize;
    let visible_rows = layout.rows.min(grid_height);
    let (cursor_row, _) = layout.position(state.cursor);
    let first_row = (cursor_row + 1).saturating_sub(visible_rows);

    for (index, entry) in state.entries.iter().enumerate() {
        let (row, col) = layout.position(index);
        if row < first_row || row >= first_row + visible_rows {
            continue;
        }
        let x = col * layout.cell_width;
        if x >= viewport.width as usize {
            continue;
        }
        let is_cursor = index == state.cursor;
        let text = cell_text(entry, state.mode, is_cursor);
        let text = clip_to_width(&text, layout.cell_width);
        let attrs = if is_cursor {
            TextAttrs::highlighted()
        } else {
            TextAttrs::plain()
        };
        viewport.put(terminal, (row - first_row) as u16, x as u16, text, attrs)?;
    }

    let footer_row = visible_rows as u16 + 1;
    let description = state
        .current()
        .map(|entry| entry.description.as_str())
        .unwrap_or_default();
    viewport.put(
        terminal,
        footer_row,
        0,
        &format!("Description: {}", description),
        TextAttrs::plain(),
    )?;

    let mut help = help_text(state);
    if layout.rows > visible_rows {
        help.insert_str(
            0,
            &format!(
                "[rows {}-{} of {}] ",
                first_row + 1,
                first_row + visible_rows,
                layout.rows
            ),
        );
    }
    viewport.put(terminal, footer_row + 2, 0, &help, TextAttrs::bold())
}

fn cell_text(entry: &ScriptEntry, mode: SelectionMode, is_cursor: bool) -> String {
    match mode {
        SelectionMode::Multi => {
            let mark = if entry.selected { 'X' } else { ' ' };
            format!("[{}] {}", mark, entry.file_name)
        }
        SelectionMode::Single => {
            let mark = if is_cursor { '>' } else { ' ' };
            format!(" {}  {}", mark, entry.file_name)
        }
    }
}

fn help_text(state: &MenuState) -> String {
    match state.mode {
        SelectionMode::Multi => format!(
            "Arrows move, Space toggle, x execute selected, q quit ({} selected)",
            state.selected_count()
        ),
        SelectionMode::Single => "Arrows move, Enter execute, q quit".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cell_text_marks() {
        let mut entry = ScriptEntry::new("new-a.sh", PathBuf::from("/s/new-a.sh"), "");
        assert_eq!(cell_text(&entry, SelectionMode::Multi, true), "[ ] new-a.sh");
        entry.selected = true;
        assert_eq!(cell_text(&entry, SelectionMode::Multi, false), "[X] new-a.sh");
        assert_eq!(cell_text(&entry, SelectionMode::Single, true), " >  new-a.sh");
        assert_eq!(cell_text(&entry, SelectionMode::Single, false), "    new-a.sh");
    }
}
