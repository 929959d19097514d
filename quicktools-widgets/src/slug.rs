// quicktools-widgets/src/slug.rs
use crossterm::event::KeyCode;
use quicktools_core::{Event, EventResult, ThemeMode, Widget};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::Widget as RatatuiWidget,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::common::{Field, Palette, focus_color};

/// URL slug: lowercase, trim, strip everything outside [a-z0-9 \t\n-],
/// collapse whitespace runs to one hyphen, collapse hyphen runs to one.
pub fn slugify(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .trim()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    let mut slug = String::with_capacity(cleaned.len());
    let mut prev_hyphen = false;
    for c in cleaned.chars() {
        let next = if c.is_whitespace() { '-' } else { c };
        if next == '-' {
            if !prev_hyphen {
                slug.push('-');
            }
            prev_hyphen = true;
        } else {
            slug.push(next);
            prev_hyphen = false;
        }
    }
    slug
}

/// Slug generator widget
pub struct SlugWidget {
    input: Field,
    result: Option<String>,
    mode: ThemeMode,
}

impl Default for SlugWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl SlugWidget {
    pub fn new() -> Self {
        Self {
            input: Field::text("Text", ""),
            result: None,
            mode: ThemeMode::default(),
        }
    }
}

impl Widget for SlugWidget {
    fn on_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Theme(mode) => {
                self.mode = mode;
                EventResult::Consumed
            }
            Event::Key(key) => match key.code {
                KeyCode::Enter => {
                    self.result = Some(slugify(self.input.value()));
                    EventResult::Consumed
                }
                _ => {
                    if self.input.handle_key(key) {
                        EventResult::Consumed
                    } else {
                        EventResult::Ignored
                    }
                }
            },
            _ => EventResult::Ignored,
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.render_focused(area, buf, false);
    }

    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        let palette = Palette::for_mode(self.mode);

        let result_line = match &self.result {
            Some(slug) => Line::styled(slug.clone(), Style::default().fg(palette.result)),
            None => Line::styled("Enter to generate a slug", Style::default().fg(palette.hint)),
        };

        let lines = vec![self.input.line(focused, &palette), result_line];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Slug Generator ")
            .border_style(Style::default().fg(focus_color(&palette, focused)));

        RatatuiWidget::render(Paragraph::new(lines).block(block), area, buf);
    }

    fn preferred_height(&self) -> u16 {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_slug() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(slugify("Rust: 2024 Edition!"), "rust-2024-edition");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(slugify("  a   b\tc  "), "a-b-c");
    }

    #[test]
    fn collapses_hyphen_runs() {
        assert_eq!(slugify("a --- b"), "a-b");
        assert_eq!(slugify("a- -b"), "a-b");
    }

    #[test]
    fn empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
