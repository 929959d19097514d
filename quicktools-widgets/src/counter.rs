// quicktools-widgets/src/counter.rs
//
// The two live counting tools: word counter (words/characters/lines) and
// character & byte counter (unicode scalars vs UTF-8 bytes). Both
// recompute on every keystroke instead of waiting for an explicit action.

use quicktools_core::{Event, EventResult, ThemeMode, Widget};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::Widget as RatatuiWidget,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tui_textarea::TextArea;

use crate::common::{Palette, focus_color, textarea_input};

/// Whitespace-delimited non-empty tokens; 0 for blank text
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Newline-delimited segments; 0 for empty text, minimum 1 otherwise
pub fn line_count(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        text.split('\n').count()
    }
}

/// Unicode scalar values
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Length of the UTF-8 encoding
pub fn byte_count(text: &str) -> usize {
    text.len()
}

fn styled_textarea() -> TextArea<'static> {
    let mut ta = TextArea::default();
    ta.set_cursor_line_style(Style::default());
    ta.set_placeholder_text("Type or paste text...");
    ta
}

fn render_text_tool(
    ta: &mut TextArea<'_>,
    title: &str,
    counts: String,
    palette: &Palette,
    area: Rect,
    buf: &mut Buffer,
    focused: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(Style::default().fg(focus_color(palette, focused)));
    let inner = block.inner(area);
    RatatuiWidget::render(block, area, buf);

    if inner.height < 2 {
        return;
    }

    let text_area = Rect {
        height: inner.height - 1,
        ..inner
    };
    let counts_area = Rect {
        y: inner.y + inner.height - 1,
        height: 1,
        ..inner
    };

    if focused {
        ta.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
    } else {
        ta.set_cursor_style(Style::default());
    }
    ta.set_style(Style::default().fg(palette.text));
    RatatuiWidget::render(&*ta, text_area, buf);

    RatatuiWidget::render(
        Paragraph::new(counts).style(Style::default().fg(palette.result)),
        counts_area,
        buf,
    );
}

/// Word counter widget: words / characters / lines, updated live
pub struct WordCountWidget {
    textarea: TextArea<'static>,
    mode: ThemeMode,
}

impl Default for WordCountWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl WordCountWidget {
    pub fn new() -> Self {
        Self {
            textarea: styled_textarea(),
            mode: ThemeMode::default(),
        }
    }

    fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }
}

impl Widget for WordCountWidget {
    fn on_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Theme(mode) => {
                self.mode = mode;
                EventResult::Consumed
            }
            Event::Key(key) => {
                self.textarea.input(textarea_input(key));
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.render_focused(area, buf, false);
    }

    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        let palette = Palette::for_mode(self.mode);
        let text = self.text();
        let counts = format!(
            "Words: {} • Characters: {} • Lines: {}",
            word_count(&text),
            char_count(&text),
            line_count(&text)
        );
        render_text_tool(
            &mut self.textarea,
            "Word Counter",
            counts,
            &palette,
            area,
            buf,
            focused,
        );
    }

    fn preferred_height(&self) -> u16 {
        7
    }
}

/// Character & byte counter widget: unicode scalars vs UTF-8 bytes, live
pub struct ByteCountWidget {
    textarea: TextArea<'static>,
    mode: ThemeMode,
}

impl Default for ByteCountWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteCountWidget {
    pub fn new() -> Self {
        Self {
            textarea: styled_textarea(),
            mode: ThemeMode::default(),
        }
    }

    fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }
}

impl Widget for ByteCountWidget {
    fn on_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Theme(mode) => {
                self.mode = mode;
                EventResult::Consumed
            }
            Event::Key(key) => {
                self.textarea.input(textarea_input(key));
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.render_focused(area, buf, false);
    }

    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        let palette = Palette::for_mode(self.mode);
        let text = self.text();
        let counts = format!(
            "Characters: {} • UTF-8 bytes: {}",
            char_count(&text),
            byte_count(&text)
        );
        render_text_tool(
            &mut self.textarea,
            "Character & Byte Counter",
            counts,
            &palette,
            area,
            buf,
            focused,
        );
    }

    fn preferred_height(&self) -> u16 {
        6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_counts_zero() {
        assert_eq!(word_count(""), 0);
        assert_eq!(char_count(""), 0);
        assert_eq!(line_count(""), 0);
        assert_eq!(byte_count(""), 0);
    }

    #[test]
    fn whitespace_only_has_no_words() {
        assert_eq!(word_count("   \n\t "), 0);
    }

    #[test]
    fn runs_of_whitespace_delimit_once() {
        assert_eq!(word_count("a b  c"), 3);
    }

    #[test]
    fn lines_are_newline_segments() {
        assert_eq!(line_count("one"), 1);
        assert_eq!(line_count("one\ntwo"), 2);
        assert_eq!(line_count("one\n"), 2); // trailing newline opens a segment
    }

    #[test]
    fn chars_are_scalars_bytes_are_utf8() {
        assert_eq!(char_count("héllo"), 5);
        assert_eq!(byte_count("héllo"), 6);
        assert_eq!(char_count("日本"), 2);
        assert_eq!(byte_count("日本"), 6);
    }
}
