use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Terminal column width of `text`.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Truncate `text` so it occupies at most `max_width` terminal columns.
pub fn clip_to_width(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (index, ch) in text.char_indices() {
        let width = ch.width().unwrap_or(0);
        if used + width > max_width {
            return &text[..index];
        }
        used += width;
    }
    text
}
