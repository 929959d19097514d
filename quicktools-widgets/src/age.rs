// quicktools-widgets/src/age.rs
use chrono::{Datelike, Local, NaiveDate};
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

/// Calendar difference in (years, months, days) between `dob` and `today`.
///
/// The day borrow uses a flat 30-day month, not the length of the
/// preceding month. Known approximation, kept on purpose.
pub fn age_between(dob: NaiveDate, today: NaiveDate) -> (i32, i32, i32) {
    let mut years = today.year() - dob.year();
    let mut months = today.month() as i32 - dob.month() as i32;
    let mut days = today.day() as i32 - dob.day() as i32;

    if days < 0 {
        months -= 1;
        days += 30;
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }

    (years, months, days)
}

/// Age calculator widget: date of birth to years/months/days as of today
pub struct AgeWidget {
    dob: Field,
    result: Option<String>,
    mode: ThemeMode,
}

impl Default for AgeWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl AgeWidget {
    pub fn new() -> Self {
        Self {
            dob: Field::date("Date of Birth (YYYY-MM-DD)"),
            result: None,
            mode: ThemeMode::default(),
        }
    }

    fn calculate(&mut self) {
        match NaiveDate::parse_from_str(self.dob.value().trim(), "%Y-%m-%d") {
            Ok(dob) => {
                let today = Local::now().date_naive();
                let (years, months, days) = age_between(dob, today);
                self.result = Some(format!("{} years, {} months, {} days", years, months, days));
            }
            Err(_) => self.result = None,
        }
    }
}

impl Widget for AgeWidget {
    fn on_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Theme(mode) => {
                self.mode = mode;
                EventResult::Consumed
            }
            Event::Key(key) => match key.code {
                KeyCode::Enter => {
                    self.calculate();
                    EventResult::Consumed
                }
                _ => {
                    if self.dob.handle_key(key) {
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
            None => Line::styled("Enter a date as YYYY-MM-DD", Style::default().fg(palette.hint)),
        };

        let lines = vec![self.dob.line(focused, &palette), result_line];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Age Calculator ")
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

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn plain_difference() {
        assert_eq!(age_between(d(1990, 3, 10), d(2024, 5, 20)), (34, 2, 10));
    }

    #[test]
    fn day_borrow_uses_flat_thirty() {
        // 2024-03-05 minus 1990-03-10: days -5 -> +30 gives 25, months borrow
        assert_eq!(age_between(d(1990, 3, 10), d(2024, 3, 5)), (33, 11, 25));
    }

    #[test]
    fn month_borrow_decrements_year() {
        assert_eq!(age_between(d(1990, 11, 1), d(2024, 3, 1)), (33, 4, 0));
    }

    #[test]
    fn birthday_today() {
        assert_eq!(age_between(d(2000, 6, 15), d(2024, 6, 15)), (24, 0, 0));
    }
}
