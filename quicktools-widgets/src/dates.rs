// quicktools-widgets/src/dates.rs
use chrono::NaiveDate;
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

/// Absolute difference in whole days; time-of-day never enters into it
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days().abs()
}

/// Days-between-dates widget
pub struct DaysBetweenWidget {
    start: Field,
    end: Field,
    focused_field: usize,
    result: Option<String>,
    mode: ThemeMode,
}

impl Default for DaysBetweenWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl DaysBetweenWidget {
    pub fn new() -> Self {
        Self {
            start: Field::date("Start Date (YYYY-MM-DD)"),
            end: Field::date("End Date (YYYY-MM-DD)"),
            focused_field: 0,
            result: None,
            mode: ThemeMode::default(),
        }
    }

    fn calculate(&mut self) {
        let parse = |f: &Field| NaiveDate::parse_from_str(f.value().trim(), "%Y-%m-%d");
        match (parse(&self.start), parse(&self.end)) {
            (Ok(a), Ok(b)) => self.result = Some(format!("{} days", days_between(a, b))),
            _ => self.result = None,
        }
    }

    fn field_mut(&mut self) -> &mut Field {
        match self.focused_field {
            0 => &mut self.start,
            _ => &mut self.end,
        }
    }
}

impl Widget for DaysBetweenWidget {
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
            None => Line::styled("Enter both dates as YYYY-MM-DD", Style::default().fg(palette.hint)),
        };

        let lines = vec![
            self.start.line(focused && self.focused_field == 0, &palette),
            self.end.line(focused && self.focused_field == 1, &palette),
            result_line,
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Days Between Dates ")
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

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn whole_day_difference() {
        assert_eq!(days_between(d(2024, 1, 1), d(2024, 1, 31)), 30);
    }

    #[test]
    fn order_does_not_matter() {
        assert_eq!(days_between(d(2024, 1, 31), d(2024, 1, 1)), 30);
    }

    #[test]
    fn same_day_is_zero() {
        assert_eq!(days_between(d(2024, 6, 1), d(2024, 6, 1)), 0);
    }

    #[test]
    fn leap_year_february() {
        assert_eq!(days_between(d(2024, 2, 1), d(2024, 3, 1)), 29);
    }
}
