// quicktools-widgets/src/gst.rs
use crossterm::event::KeyCode;
use quicktools_core::{Event, EventResult, ThemeMode, Widget};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::Widget as RatatuiWidget,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::common::{Field, Palette, focus_color, format_money};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GstMode {
    Add,
    Remove,
}

impl GstMode {
    pub fn toggled(self) -> Self {
        match self {
            GstMode::Add => GstMode::Remove,
            GstMode::Remove => GstMode::Add,
        }
    }

    fn label(self) -> &'static str {
        match self {
            GstMode::Add => "Add GST",
            GstMode::Remove => "Remove GST",
        }
    }
}

/// Tax on top of a base price: (tax amount, final price)
pub fn add_tax(price: f64, rate: f64) -> (f64, f64) {
    let tax = price * rate / 100.0;
    (tax, price + tax)
}

/// Recover the base from a tax-inclusive price: (base price, tax amount)
pub fn remove_tax(price: f64, rate: f64) -> (f64, f64) {
    let base = price / (1.0 + rate / 100.0);
    (base, price - base)
}

/// GST calculator widget with add/remove modes
///
/// # Keyboard Shortcuts
/// - `m` - Toggle between Add GST and Remove GST
/// - `Enter` - Calculate
pub struct GstWidget {
    price: Field,
    rate: Field,
    gst_mode: GstMode,
    focused_field: usize,
    result: Vec<String>,
    mode: ThemeMode,
}

impl Default for GstWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl GstWidget {
    pub fn new() -> Self {
        Self {
            price: Field::numeric("Price", "1000"),
            rate: Field::numeric("GST Rate (%)", "18"),
            gst_mode: GstMode::Add,
            focused_field: 0,
            result: Vec::new(),
            mode: ThemeMode::default(),
        }
    }

    fn calculate(&mut self) {
        let price = self.price.f64_or_zero();
        let rate = self.rate.f64_or_zero();
        self.result = match self.gst_mode {
            GstMode::Add => {
                let (tax, final_price) = add_tax(price, rate);
                vec![
                    format!("GST Amount: {}", format_money(tax)),
                    format!("Final Price: {}", format_money(final_price)),
                ]
            }
            GstMode::Remove => {
                let (base, tax) = remove_tax(price, rate);
                vec![
                    format!("Base Price: {}", format_money(base)),
                    format!("GST Amount: {}", format_money(tax)),
                ]
            }
        };
    }

    fn field_mut(&mut self) -> &mut Field {
        match self.focused_field {
            0 => &mut self.price,
            _ => &mut self.rate,
        }
    }
}

impl Widget for GstWidget {
    fn on_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Theme(mode) => {
                self.mode = mode;
                EventResult::Consumed
            }
            Event::Key(key) => match key.code {
                KeyCode::Char('m') => {
                    self.gst_mode = self.gst_mode.toggled();
                    EventResult::Consumed
                }
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

        let mode_line = Line::from(vec![
            Span::styled("Mode [m]: ", Style::default().fg(palette.label)),
            Span::styled(
                self.gst_mode.label(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let mut lines = vec![
            self.price.line(focused && self.focused_field == 0, &palette),
            self.rate.line(focused && self.focused_field == 1, &palette),
            mode_line,
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
            .title(" GST Calculator ")
            .border_style(Style::default().fg(focus_color(&palette, focused)));

        RatatuiWidget::render(Paragraph::new(lines).block(block), area, buf);
    }

    fn preferred_height(&self) -> u16 {
        7
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_mode() {
        let (tax, final_price) = add_tax(1000.0, 18.0);
        assert_eq!(tax, 180.0);
        assert_eq!(final_price, 1180.0);
    }

    #[test]
    fn remove_mode_recovers_base() {
        let (base, tax) = remove_tax(1180.0, 18.0);
        assert!((base - 1000.0).abs() < 1e-9);
        assert!((tax - 180.0).abs() < 1e-9);
    }

    #[test]
    fn near_round_trip_within_two_decimals() {
        // remove(add(p, g)) ≈ p; only within rounding tolerance, the two
        // directions round independently
        for (p, g) in [(999.99, 18.0), (123.45, 5.0), (1.0, 28.0), (0.0, 12.0)] {
            let (_, inclusive) = add_tax(p, g);
            let (base, _) = remove_tax(inclusive, g);
            assert!((base - p).abs() < 0.005, "p={p} g={g} base={base}");
        }
    }
}
