// quicktools-widgets/src/common/input.rs
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::colors::Palette;
use super::formatting::{parse_min_1, parse_or_zero};

/// Bridge a crossterm key event into a `tui_textarea::Input`.
///
/// Built by hand instead of `Into<Input>` so this crate's crossterm
/// version never has to match the one tui-textarea was compiled against.
pub fn textarea_input(key: KeyEvent) -> tui_textarea::Input {
    use tui_textarea::{Input, Key};

    let converted = match key.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Delete => Key::Delete,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        _ => Key::Null,
    };

    Input {
        key: converted,
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
        shift: key.modifiers.contains(KeyModifiers::SHIFT),
    }
}

/// What characters a field accepts. Numeric/date fields reject letters,
/// which keeps single-letter widget shortcuts usable next to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Numeric,
    Date,
}

/// Single-line labeled input with a character cursor.
///
/// Multi-line tools use `tui_textarea::TextArea` instead; this exists for
/// the one-value-per-row calculator forms.
#[derive(Debug, Clone)]
pub struct Field {
    label: String,
    kind: FieldKind,
    value: String,
    cursor: usize, // char index into value
}

impl Field {
    pub fn text(label: &str, initial: &str) -> Self {
        Self::new(label, initial, FieldKind::Text)
    }

    pub fn numeric(label: &str, initial: &str) -> Self {
        Self::new(label, initial, FieldKind::Numeric)
    }

    pub fn date(label: &str) -> Self {
        Self::new(label, "", FieldKind::Date)
    }

    fn new(label: &str, initial: &str, kind: FieldKind) -> Self {
        Self {
            label: label.to_string(),
            kind,
            value: initial.to_string(),
            cursor: initial.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.chars().count();
    }

    pub fn f64_or_zero(&self) -> f64 {
        parse_or_zero(&self.value)
    }

    pub fn f64_min_1(&self) -> f64 {
        parse_min_1(&self.value)
    }

    fn accepts(&self, c: char) -> bool {
        match self.kind {
            FieldKind::Text => !c.is_control(),
            FieldKind::Numeric => c.is_ascii_digit() || c == '.' || c == '-' || c == '+',
            FieldKind::Date => c.is_ascii_digit() || c == '-',
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Returns true when the key was consumed by the field
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }

        match key.code {
            KeyCode::Char(c) if self.accepts(c) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let at = self.byte_index(self.cursor - 1);
                    self.value.remove(at);
                    self.cursor -= 1;
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.value.chars().count() {
                    let at = self.byte_index(self.cursor);
                    self.value.remove(at);
                }
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.value.chars().count());
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.value.chars().count();
                true
            }
            _ => false,
        }
    }

    /// One display row: "Label: value", cursor rendered reversed when focused
    pub fn line(&self, focused: bool, palette: &Palette) -> Line<'static> {
        let mut spans = vec![Span::styled(
            format!("{}: ", self.label),
            Style::default().fg(palette.label),
        )];

        let text_style = Style::default().fg(palette.text);
        if focused {
            let at = self.byte_index(self.cursor);
            let (before, rest) = self.value.split_at(at);
            let mut chars = rest.chars();
            let under = chars.next();
            let after: String = chars.collect();

            spans.push(Span::styled(before.to_string(), text_style));
            spans.push(Span::styled(
                under.map(String::from).unwrap_or_else(|| " ".to_string()),
                text_style.add_modifier(Modifier::REVERSED),
            ));
            spans.push(Span::styled(after, text_style));
        } else {
            spans.push(Span::styled(self.value.clone(), text_style));
        }

        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_inserts_at_cursor() {
        let mut f = Field::numeric("Weight (kg)", "65");
        assert!(f.handle_key(key(KeyCode::Char('0'))));
        assert_eq!(f.value(), "650");
        f.handle_key(key(KeyCode::Left));
        f.handle_key(key(KeyCode::Left));
        f.handle_key(key(KeyCode::Char('1')));
        assert_eq!(f.value(), "6150");
    }

    #[test]
    fn numeric_field_rejects_letters() {
        let mut f = Field::numeric("Rate (%)", "10");
        assert!(!f.handle_key(key(KeyCode::Char('x'))));
        assert_eq!(f.value(), "10");
        // so the letter stays available as a widget shortcut
    }

    #[test]
    fn backspace_and_delete() {
        let mut f = Field::text("Path", "abc");
        f.handle_key(key(KeyCode::Backspace));
        assert_eq!(f.value(), "ab");
        f.handle_key(key(KeyCode::Home));
        f.handle_key(key(KeyCode::Delete));
        assert_eq!(f.value(), "b");
    }

    #[test]
    fn control_chords_fall_through() {
        let mut f = Field::text("Data", "x");
        let chord = KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL);
        assert!(!f.handle_key(chord));
        assert_eq!(f.value(), "x");
    }

    #[test]
    fn numeric_accessors_coerce() {
        let mut f = Field::numeric("People", "2");
        assert_eq!(f.f64_or_zero(), 2.0);
        f.set_value("junk");
        assert_eq!(f.f64_or_zero(), 0.0);
        assert_eq!(f.f64_min_1(), 1.0);
    }

    #[test]
    fn cursor_handles_multibyte() {
        let mut f = Field::text("Data", "héllo");
        f.handle_key(key(KeyCode::End));
        f.handle_key(key(KeyCode::Backspace));
        assert_eq!(f.value(), "héll");
        f.handle_key(key(KeyCode::Home));
        f.handle_key(key(KeyCode::Right));
        f.handle_key(key(KeyCode::Delete));
        assert_eq!(f.value(), "hll");
    }
}
