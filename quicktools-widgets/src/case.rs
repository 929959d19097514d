// quicktools-widgets/src/case.rs
use crossterm::event::{KeyCode, KeyModifiers};
use quicktools_core::{Event, EventResult, ThemeMode, Widget};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::Widget as RatatuiWidget,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};
use tui_textarea::TextArea;

use crate::common::{Palette, focus_color, textarea_input};

/// Lowercase everything, then capitalize the first character of each
/// whitespace-delimited token. Tokens are re-joined with single spaces.
pub fn title_case(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text case converter widget
///
/// # Keyboard Shortcuts
/// - `Ctrl+U` - UPPERCASE
/// - `Ctrl+L` - lowercase
/// - `Ctrl+T` - Title Case
pub struct CaseWidget {
    textarea: TextArea<'static>,
    mode: ThemeMode,
}

impl Default for CaseWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl CaseWidget {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_text("Type text, then Ctrl+U / Ctrl+L / Ctrl+T");
        Self {
            textarea,
            mode: ThemeMode::default(),
        }
    }

    fn transform(&mut self, f: impl Fn(&str) -> String) {
        let text = self.textarea.lines().join("\n");
        let transformed = f(&text);
        self.textarea = TextArea::from(transformed.lines().map(String::from).collect::<Vec<_>>());
        self.textarea.set_cursor_line_style(Style::default());
    }
}

impl Widget for CaseWidget {
    fn on_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Theme(mode) => {
                self.mode = mode;
                EventResult::Consumed
            }
            Event::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    match key.code {
                        KeyCode::Char('u') => {
                            self.transform(|t| t.to_uppercase());
                            return EventResult::Consumed;
                        }
                        KeyCode::Char('l') => {
                            self.transform(|t| t.to_lowercase());
                            return EventResult::Consumed;
                        }
                        KeyCode::Char('t') => {
                            self.transform(title_case);
                            return EventResult::Consumed;
                        }
                        _ => {}
                    }
                }
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

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Text Case Converter ")
            .border_style(Style::default().fg(focus_color(&palette, focused)));
        let inner = block.inner(area);
        RatatuiWidget::render(block, area, buf);

        if focused {
            self.textarea
                .set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
        } else {
            self.textarea.set_cursor_style(Style::default());
        }
        self.textarea.set_style(Style::default().fg(palette.text));
        RatatuiWidget::render(&self.textarea, inner, buf);
    }

    fn preferred_height(&self) -> u16 {
        5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_each_token() {
        assert_eq!(title_case("hello world"), "Hello World");
    }

    #[test]
    fn lowercases_first() {
        assert_eq!(title_case("HELLO wOrLd"), "Hello World");
    }

    #[test]
    fn collapses_whitespace_between_tokens() {
        assert_eq!(title_case("  two   words "), "Two Words");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("   "), "");
    }
}
