// quicktools-widgets/src/tip.rs
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

use crate::common::{Field, Palette, focus_color, format_money};

/// (tip amount, bill total, per-person share). The person count is
/// clamped to at least 1 before dividing.
pub fn tip_split(bill: f64, tip_percent: f64, people: f64) -> (f64, f64, f64) {
    let people = people.max(1.0);
    let tip = bill * tip_percent / 100.0;
    let total = bill + tip;
    (tip, total, total / people)
}

/// Tip & split calculator widget
pub struct TipWidget {
    bill: Field,
    tip: Field,
    people: Field,
    focused_field: usize,
    result: Option<String>,
    mode: ThemeMode,
}

impl Default for TipWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl TipWidget {
    pub fn new() -> Self {
        Self {
            bill: Field::numeric("Bill", "1000"),
            tip: Field::numeric("Tip (%)", "10"),
            people: Field::numeric("People", "2"),
            focused_field: 0,
            result: None,
            mode: ThemeMode::default(),
        }
    }

    fn calculate(&mut self) {
        let (tip, total, per) = tip_split(
            self.bill.f64_or_zero(),
            self.tip.f64_or_zero(),
            self.people.f64_min_1(),
        );
        self.result = Some(format!(
            "Tip: {} • Total: {} • Per person: {}",
            format_money(tip),
            format_money(total),
            format_money(per)
        ));
    }

    fn field_mut(&mut self) -> &mut Field {
        match self.focused_field {
            0 => &mut self.bill,
            1 => &mut self.tip,
            _ => &mut self.people,
        }
    }
}

impl Widget for TipWidget {
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
                    self.focused_field = (self.focused_field + 1).min(2);
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
            self.bill.line(focused && self.focused_field == 0, &palette),
            self.tip.line(focused && self.focused_field == 1, &palette),
            self.people.line(focused && self.focused_field == 2, &palette),
            result_line,
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Tip & Split Calculator ")
            .border_style(Style::default().fg(focus_color(&palette, focused)));

        RatatuiWidget::render(Paragraph::new(lines).block(block), area, buf);
    }

    fn preferred_height(&self) -> u16 {
        6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_evenly() {
        let (tip, total, per) = tip_split(1000.0, 10.0, 2.0);
        assert_eq!(tip, 100.0);
        assert_eq!(total, 1100.0);
        assert_eq!(per, 550.0);
    }

    #[test]
    fn zero_people_clamps_to_one() {
        let (_, total, per) = tip_split(50.0, 0.0, 0.0);
        assert_eq!(per, total);
    }

    #[test]
    fn zero_bill() {
        let (tip, total, per) = tip_split(0.0, 15.0, 4.0);
        assert_eq!(tip, 0.0);
        assert_eq!(total, 0.0);
        assert_eq!(per, 0.0);
    }
}
