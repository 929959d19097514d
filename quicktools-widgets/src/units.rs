// quicktools-widgets/src/units.rs
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

use crate::common::{Field, Palette, focus_color, format_trimmed};

/// Length units and their size in meters
pub const UNITS: [(&str, f64); 8] = [
    ("m", 1.0),
    ("km", 1000.0),
    ("cm", 0.01),
    ("mm", 0.001),
    ("mi", 1609.34),
    ("yd", 0.9144),
    ("ft", 0.3048),
    ("in", 0.0254),
];

/// Convert through meters; output shown at up to 6 decimal places
pub fn convert(value: f64, from: usize, to: usize) -> f64 {
    let meters = value * UNITS[from].1;
    meters / UNITS[to].1
}

/// Length unit converter widget
///
/// # Keyboard Shortcuts
/// - `f` - Cycle the source unit
/// - `t` - Cycle the target unit
/// - `Enter` - Convert
pub struct UnitWidget {
    value: Field,
    from: usize,
    to: usize,
    result: Option<String>,
    mode: ThemeMode,
}

impl Default for UnitWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitWidget {
    pub fn new() -> Self {
        Self {
            value: Field::numeric("Value", "1"),
            from: 0,                                 // m
            to: UNITS.iter().position(|(n, _)| *n == "ft").unwrap_or(0),
            result: None,
            mode: ThemeMode::default(),
        }
    }

    fn calculate(&mut self) {
        let converted = convert(self.value.f64_or_zero(), self.from, self.to);
        self.result = Some(format!(
            "Result: {} {}",
            format_trimmed(converted, 6),
            UNITS[self.to].0
        ));
    }
}

impl Widget for UnitWidget {
    fn on_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Theme(mode) => {
                self.mode = mode;
                EventResult::Consumed
            }
            Event::Key(key) => match key.code {
                KeyCode::Char('f') => {
                    self.from = (self.from + 1) % UNITS.len();
                    EventResult::Consumed
                }
                KeyCode::Char('t') => {
                    self.to = (self.to + 1) % UNITS.len();
                    EventResult::Consumed
                }
                KeyCode::Enter => {
                    self.calculate();
                    EventResult::Consumed
                }
                _ => {
                    if self.value.handle_key(key) {
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

        let units_line = Line::from(vec![
            Span::styled("From [f]: ", Style::default().fg(palette.label)),
            Span::styled(
                UNITS[self.from].0,
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("   To [t]: ", Style::default().fg(palette.label)),
            Span::styled(
                UNITS[self.to].0,
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let result_line = match &self.result {
            Some(text) => Line::styled(text.clone(), Style::default().fg(palette.result)),
            None => Line::styled("Enter to convert", Style::default().fg(palette.hint)),
        };

        let lines = vec![self.value.line(focused, &palette), units_line, result_line];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Unit Converter ")
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

    fn idx(name: &str) -> usize {
        UNITS.iter().position(|(n, _)| *n == name).unwrap()
    }

    #[test]
    fn meters_to_feet() {
        let ft = convert(1.0, idx("m"), idx("ft"));
        assert_eq!(format_trimmed(ft, 6), "3.28084");
    }

    #[test]
    fn kilometers_to_miles() {
        let mi = convert(5.0, idx("km"), idx("mi"));
        assert!((mi - 3.106864).abs() < 1e-5);
    }

    #[test]
    fn identity_conversion() {
        assert_eq!(convert(42.0, idx("cm"), idx("cm")), 42.0);
    }

    #[test]
    fn inches_to_millimeters() {
        let mm = convert(1.0, idx("in"), idx("mm"));
        assert!((mm - 25.4).abs() < 1e-9);
    }
}
