// quicktools-widgets/src/percent.rs
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

use crate::common::{Field, Palette, focus_color, format_trimmed};

/// X percent of Y, rounded to 2 decimal places
pub fn percent_of(base: f64, percent: f64) -> f64 {
    (base * percent / 100.0 * 100.0).round() / 100.0
}

/// Percentage calculator widget
pub struct PercentWidget {
    base: Field,
    percent: Field,
    focused_field: usize,
    result: Option<String>,
    mode: ThemeMode,
}

impl Default for PercentWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl PercentWidget {
    pub fn new() -> Self {
        Self {
            base: Field::numeric("Base (Y)", "100"),
            percent: Field::numeric("Percent (X)", "15"),
            focused_field: 0,
            result: None,
            mode: ThemeMode::default(),
        }
    }

    fn calculate(&mut self) {
        let value = percent_of(self.base.f64_or_zero(), self.percent.f64_or_zero());
        self.result = Some(format!("Result: {}", format_trimmed(value, 2)));
    }

    fn field_mut(&mut self) -> &mut Field {
        match self.focused_field {
            0 => &mut self.base,
            _ => &mut self.percent,
        }
    }
}

impl Widget for PercentWidget {
    fn on_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Theme(mode) => {
                self.mode = mode;
                EventResult::Consumed
            }
            Event::Key(key) => match key.code {
                KeyCode::Up => {
                    self.focused_field = self.focused_field.saturating_sub(1);
                    EventResult::Consumed
                }
                KeyCode::Down => {
                    self.focused_field = (self.focused_field + 1).min(1);
                    EventResult::Consumed
                }
                KeyCode::Enter => {
                    self.calculate();
                    EventResult::Consumed
                }
                _ => {
                    if self.field_mut().handle_key(key) {
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
            Some(text) => Line::styled(text.clone(), Style::default().fg(palette.result)),
            None => Line::styled("Enter to calculate", Style::default().fg(palette.hint)),
        };

        let lines = vec![
            self.base.line(focused && self.focused_field == 0, &palette),
            self.percent.line(focused && self.focused_field == 1, &palette),
            result_line,
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Percentage Calculator ")
            .border_style(Style::default().fg(focus_color(&palette, focused)));

        RatatuiWidget::render(Paragraph::new(lines).block(block), area, buf);
    }

    fn preferred_height(&self) -> u16 {
        5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifteen_percent_of_hundred() {
        assert_eq!(percent_of(100.0, 15.0), 15.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(percent_of(33.0, 33.333), 11.0);
        assert_eq!(percent_of(1.0, 0.333), 0.0);
        assert_eq!(percent_of(10.0, 1.25), 0.13);
    }

    #[test]
    fn zero_inputs_give_zero() {
        assert_eq!(percent_of(0.0, 50.0), 0.0);
        assert_eq!(percent_of(50.0, 0.0), 0.0);
    }
}
