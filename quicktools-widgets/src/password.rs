// quicktools-widgets/src/password.rs
use crossterm::event::KeyCode;
use quicktools_core::{BusEvent, ClipboardCopy, Event, EventBus, EventResult, ThemeMode, Widget};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::Widget as RatatuiWidget,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::time::{Duration, Instant};

use crate::common::{Field, Palette, clipboard, focus_color};

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+{}[]<>?";

/// How long the "copied" flash stays up
const COPY_FLASH: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, Copy)]
pub struct PasswordConfig {
    pub length: usize,
    pub lower: bool,
    pub upper: bool,
    pub digit: bool,
    pub symbol: bool,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            length: 12,
            lower: true,
            upper: true,
            digit: true,
            symbol: false,
        }
    }
}

/// Candidate pool in fixed class order: lower, upper, digit, symbol.
/// Empty when no class is enabled.
pub fn build_pool(config: &PasswordConfig) -> String {
    let mut pool = String::new();
    if config.lower {
        pool.push_str(LOWER);
    }
    if config.upper {
        pool.push_str(UPPER);
    }
    if config.digit {
        pool.push_str(DIGITS);
    }
    if config.symbol {
        pool.push_str(SYMBOLS);
    }
    pool
}

/// Draw `length` characters uniformly, with replacement, from the pool.
///
/// The draw uses a general-purpose PRNG, not a CSPRNG: do not use these
/// passwords for security-sensitive secrets. An empty pool yields an empty
/// string rather than an error; length is clamped to at least 1.
pub fn generate(config: &PasswordConfig, rng: &mut impl Rng) -> String {
    let pool = build_pool(config);
    if pool.is_empty() {
        return String::new();
    }
    let bytes = pool.as_bytes();
    let length = config.length.max(1);
    (0..length)
        .map(|_| bytes[rng.random_range(0..bytes.len())] as char)
        .collect()
}

/// Password generator widget
///
/// # Keyboard Shortcuts
/// - `l` / `u` / `d` / `s` - Toggle lower / upper / digit / symbol classes
/// - `g` or `Enter` - Generate
/// - `c` - Copy the generated password
pub struct PasswordWidget {
    length: Field,
    config: PasswordConfig,
    output: String,
    copied_until: Option<Instant>,
    event_bus: EventBus,
    mode: ThemeMode,
}

impl PasswordWidget {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            length: Field::numeric("Length", "12"),
            config: PasswordConfig::default(),
            output: String::new(),
            copied_until: None,
            event_bus,
            mode: ThemeMode::default(),
        }
    }

    fn requested_length(&self) -> usize {
        self.length
            .value()
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|&n| n > 0)
            .unwrap_or(12)
    }

    fn generate_now(&mut self) {
        self.config.length = self.requested_length();
        self.output = generate(&self.config, &mut rand::rng());
    }

    fn copy_output(&mut self) {
        if clipboard::copy(&self.output) {
            self.copied_until = Some(Instant::now() + COPY_FLASH);
            self.event_bus.publish(BusEvent::new(
                "tool.clipboard",
                ClipboardCopy {
                    tool: "Password Generator".to_string(),
                    bytes: self.output.len(),
                },
            ));
        }
    }

    fn class_span(&self, enabled: bool, key: char, name: &str, palette: &Palette) -> Span<'static> {
        let marker = if enabled { "x" } else { " " };
        let style = if enabled {
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.label)
        };
        Span::styled(format!("[{marker}] {key}:{name}  "), style)
    }
}

impl Widget for PasswordWidget {
    fn on_update(&mut self, _delta: Duration) {
        if let Some(until) = self.copied_until
            && Instant::now() >= until
        {
            self.copied_until = None;
        }
    }

    fn on_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Theme(mode) => {
                self.mode = mode;
                EventResult::Consumed
            }
            Event::Key(key) => match key.code {
                KeyCode::Char('l') => {
                    self.config.lower = !self.config.lower;
                    EventResult::Consumed
                }
                KeyCode::Char('u') => {
                    self.config.upper = !self.config.upper;
                    EventResult::Consumed
                }
                KeyCode::Char('d') => {
                    self.config.digit = !self.config.digit;
                    EventResult::Consumed
                }
                KeyCode::Char('s') => {
                    self.config.symbol = !self.config.symbol;
                    EventResult::Consumed
                }
                KeyCode::Char('g') | KeyCode::Enter => {
                    self.generate_now();
                    EventResult::Consumed
                }
                KeyCode::Char('c') => {
                    self.copy_output();
                    EventResult::Consumed
                }
                _ => {
                    if self.length.handle_key(key) {
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

        let classes_line = Line::from(vec![
            self.class_span(self.config.lower, 'l', "lower", &palette),
            self.class_span(self.config.upper, 'u', "UPPER", &palette),
            self.class_span(self.config.digit, 'd', "123", &palette),
            self.class_span(self.config.symbol, 's', "!@#", &palette),
        ]);

        let output_line = if self.copied_until.is_some() {
            Line::from(vec![
                Span::styled(self.output.clone(), Style::default().fg(palette.result)),
                Span::styled("  ✔ copied", Style::default().fg(palette.accent)),
            ])
        } else if self.output.is_empty() {
            Line::styled(
                "g to generate, c to copy",
                Style::default().fg(palette.hint),
            )
        } else {
            Line::styled(self.output.clone(), Style::default().fg(palette.result))
        };

        let lines = vec![self.length.line(focused, &palette), classes_line, output_line];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Password Generator ")
            .border_style(Style::default().fg(focus_color(&palette, focused)));

        RatatuiWidget::render(Paragraph::new(lines).block(block), area, buf);
    }

    fn preferred_height(&self) -> u16 {
        5
    }

    fn needs_update(&self) -> bool {
        self.copied_until.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn pool_order_is_lower_upper_digit_symbol() {
        let config = PasswordConfig {
            length: 1,
            lower: true,
            upper: true,
            digit: true,
            symbol: true,
        };
        let pool = build_pool(&config);
        assert!(pool.starts_with(LOWER));
        assert!(pool.ends_with(SYMBOLS));
        assert_eq!(pool.len(), 26 + 26 + 10 + SYMBOLS.len());
    }

    #[test]
    fn zero_classes_yield_empty_output() {
        let config = PasswordConfig {
            length: 64,
            lower: false,
            upper: false,
            digit: false,
            symbol: false,
        };
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(generate(&config, &mut rng), "");
    }

    #[test]
    fn length_is_respected_and_chars_come_from_pool() {
        let config = PasswordConfig {
            length: 32,
            lower: false,
            upper: false,
            digit: true,
            symbol: false,
        };
        let mut rng = StdRng::seed_from_u64(42);
        let out = generate(&config, &mut rng);
        assert_eq!(out.len(), 32);
        assert!(out.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn length_zero_clamps_to_one() {
        let config = PasswordConfig {
            length: 0,
            lower: true,
            upper: false,
            digit: false,
            symbol: false,
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generate(&config, &mut rng).len(), 1);
    }
}
