// quicktools-widgets/src/bmi.rs
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

/// Body mass index from weight in kilograms and height in centimeters.
/// Category thresholds are strict less-than against 18.5 / 25 / 30.
pub fn bmi(weight_kg: f64, height_cm: f64) -> (f64, &'static str) {
    let height_m = height_cm / 100.0;
    let value = if height_m > 0.0 {
        weight_kg / (height_m * height_m)
    } else {
        0.0
    };
    let category = if value < 18.5 {
        "Underweight"
    } else if value < 25.0 {
        "Normal"
    } else if value < 30.0 {
        "Overweight"
    } else {
        "Obese"
    };
    (value, category)
}

/// BMI calculator widget
///
/// # Keyboard Shortcuts
/// - `Up` / `Down` - Move between fields
/// - `Enter` - Calculate
pub struct BmiWidget {
    height_cm: Field,
    weight_kg: Field,
    focused_field: usize,
    result: Option<String>,
    mode: ThemeMode,
}

impl Default for BmiWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl BmiWidget {
    pub fn new() -> Self {
        Self {
            height_cm: Field::numeric("Height (cm)", "170"),
            weight_kg: Field::numeric("Weight (kg)", "65"),
            focused_field: 0,
            result: None,
            mode: ThemeMode::default(),
        }
    }

    fn calculate(&mut self) {
        let (value, category) = bmi(self.weight_kg.f64_or_zero(), self.height_cm.f64_or_zero());
        self.result = Some(format!("BMI: {:.1} ({})", value, category));
    }

    fn field_mut(&mut self) -> &mut Field {
        match self.focused_field {
            0 => &mut self.height_cm,
            _ => &mut self.weight_kg,
        }
    }
}

impl Widget for BmiWidget {
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
            self.height_cm.line(focused && self.focused_field == 0, &palette),
            self.weight_kg.line(focused && self.focused_field == 1, &palette),
            result_line,
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" BMI Calculator ")
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
    fn worked_example_from_defaults() {
        // 65 / (1.70 * 1.70) = 22.49... -> "22.5 (Normal)" at one decimal
        let (value, category) = bmi(65.0, 170.0);
        assert_eq!(format!("{:.1}", value), "22.5");
        assert_eq!(category, "Normal");
    }

    #[test]
    fn categories_use_strict_thresholds() {
        // 18.5 exactly is already Normal, 25 is Overweight, 30 is Obese
        let at = |v: f64| -> &'static str {
            // height 100cm makes bmi == weight
            bmi(v, 100.0).1
        };
        assert_eq!(at(18.49), "Underweight");
        assert_eq!(at(18.5), "Normal");
        assert_eq!(at(24.99), "Normal");
        assert_eq!(at(25.0), "Overweight");
        assert_eq!(at(30.0), "Obese");
    }

    #[test]
    fn invalid_input_coerces_to_zero_without_panicking() {
        let mut w = BmiWidget::new();
        w.height_cm.set_value("not a number");
        w.weight_kg.set_value("");
        w.calculate();
        assert!(w.result.is_some());
    }
}
