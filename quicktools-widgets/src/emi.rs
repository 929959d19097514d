// quicktools-widgets/src/emi.rs
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

use crate::common::{Field, Palette, focus_color, format_number};

/// Loan payment breakdown, all values in currency units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmiBreakdown {
    pub payment: f64,
    pub total: f64,
    pub interest: f64,
}

/// Standard EMI formula with monthly rate r = annual / 1200.
/// A zero rate degenerates to straight division of the principal.
pub fn emi(principal: f64, annual_rate: f64, months: f64) -> EmiBreakdown {
    let r = annual_rate / 12.0 / 100.0;
    let payment = if r == 0.0 {
        principal / months
    } else {
        let x = (1.0 + r).powf(months);
        principal * r * x / (x - 1.0)
    };
    let total = payment * months;
    EmiBreakdown {
        payment,
        total,
        interest: total - principal,
    }
}

/// EMI calculator widget: principal / annual rate / tenure in months
pub struct EmiWidget {
    principal: Field,
    rate: Field,
    tenure: Field,
    focused_field: usize,
    result: Vec<String>,
    mode: ThemeMode,
}

impl Default for EmiWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl EmiWidget {
    pub fn new() -> Self {
        Self {
            principal: Field::numeric("Principal", "500000"),
            rate: Field::numeric("Annual Rate (%)", "10"),
            tenure: Field::numeric("Tenure (months)", "60"),
            focused_field: 0,
            result: Vec::new(),
            mode: ThemeMode::default(),
        }
    }

    fn calculate(&mut self) {
        let breakdown = emi(
            self.principal.f64_or_zero(),
            self.rate.f64_or_zero(),
            self.tenure.f64_min_1(),
        );
        self.result = vec![
            format!("EMI: {}", format_number(breakdown.payment.round() as u64)),
            format!(
                "Total Interest: {}",
                format_number(breakdown.interest.round().max(0.0) as u64)
            ),
            format!("Total Payment: {}", format_number(breakdown.total.round() as u64)),
        ];
    }

    fn field_mut(&mut self) -> &mut Field {
        match self.focused_field {
            0 => &mut self.principal,
            1 => &mut self.rate,
            _ => &mut self.tenure,
        }
    }
}

impl Widget for EmiWidget {
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

        let mut lines = vec![
            self.principal.line(focused && self.focused_field == 0, &palette),
            self.rate.line(focused && self.focused_field == 1, &palette),
            self.tenure.line(focused && self.focused_field == 2, &palette),
        ];

        if self.result.is_empty() {
            lines.push(Line::styled(
                "Enter to calculate",
                Style::default().fg(palette.hint),
            ));
        } else {
            for row in &self.result {
                lines.push(Line::styled(row.clone(), Style::default().fg(palette.result)));
            }
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" EMI Calculator ")
            .border_style(Style::default().fg(focus_color(&palette, focused)));

        RatatuiWidget::render(Paragraph::new(lines).block(block), area, buf);
    }

    fn preferred_height(&self) -> u16 {
        8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_example() {
        // 500000 at 10% over 60 months: the classic ~10624/month loan
        let b = emi(500_000.0, 10.0, 60.0);
        assert_eq!(b.payment.round() as u64, 10_624);
        assert_eq!(b.total.round() as u64, 637_411);
    }

    #[test]
    fn interest_identity_holds() {
        for (p, r, n) in [
            (500_000.0, 10.0, 60.0),
            (1_000.0, 0.0, 12.0),
            (250_000.0, 7.5, 240.0),
            (1.0, 36.0, 1.0),
        ] {
            let b = emi(p, r, n);
            // interest = payment * months - principal, up to rounding
            assert!((b.interest - (b.payment * n - p)).abs() < 1e-6);
        }
    }

    #[test]
    fn zero_rate_is_straight_division() {
        let b = emi(1200.0, 0.0, 12.0);
        assert_eq!(b.payment, 100.0);
        assert_eq!(b.interest, 0.0);
    }
}
