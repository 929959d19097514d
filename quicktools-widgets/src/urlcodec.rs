// quicktools-widgets/src/urlcodec.rs
use crossterm::event::{KeyCode, KeyModifiers};
use quicktools_core::{Event, EventResult, ThemeMode, Widget};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::Widget as RatatuiWidget,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tui_textarea::TextArea;

use crate::common::{Palette, focus_color, textarea_input};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlDecodeError {
    #[error("malformed percent escape at byte {0}")]
    MalformedEscape(usize),
    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}

/// Percent-encode for use as a URL component
pub fn encode_component(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

/// Percent-decode a URL component.
///
/// `urlencoding::decode` passes malformed escapes through untouched, so
/// every `%` is checked for two hex digits first; the decode failure has
/// to surface to the user instead of silently mangling the text.
pub fn decode_component(text: &str) -> Result<String, UrlDecodeError> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len()
                || !bytes[i + 1].is_ascii_hexdigit()
                || !bytes[i + 2].is_ascii_hexdigit()
            {
                return Err(UrlDecodeError::MalformedEscape(i));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    urlencoding::decode(text)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| UrlDecodeError::InvalidUtf8)
}

/// URL encoder / decoder widget
///
/// # Keyboard Shortcuts
/// - `Ctrl+E` - Encode in place
/// - `Ctrl+D` - Decode in place; on failure the text is left unchanged
///   and the error is shown
pub struct UrlWidget {
    textarea: TextArea<'static>,
    error: Option<String>,
    mode: ThemeMode,
}

impl Default for UrlWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlWidget {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_text("Type text, then Ctrl+E / Ctrl+D");
        Self {
            textarea,
            error: None,
            mode: ThemeMode::default(),
        }
    }

    fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    fn replace_text(&mut self, text: String) {
        self.textarea = TextArea::from(text.lines().map(String::from).collect::<Vec<_>>());
        self.textarea.set_cursor_line_style(Style::default());
    }
}

impl Widget for UrlWidget {
    fn on_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Theme(mode) => {
                self.mode = mode;
                EventResult::Consumed
            }
            Event::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    match key.code {
                        KeyCode::Char('e') => {
                            let encoded = encode_component(&self.text());
                            self.replace_text(encoded);
                            self.error = None;
                            return EventResult::Consumed;
                        }
                        KeyCode::Char('d') => {
                            match decode_component(&self.text()) {
                                Ok(decoded) => {
                                    self.replace_text(decoded);
                                    self.error = None;
                                }
                                // Input stays as typed
                                Err(e) => self.error = Some(format!("Invalid encoded string: {e}")),
                            }
                            return EventResult::Consumed;
                        }
                        _ => {}
                    }
                }
                self.textarea.input(textarea_input(key));
                self.error = None;
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.render_focused(area, buf, false);
    }

    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        let palette = Palette::for_mode(self.mode);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" URL Encoder / Decoder ")
            .border_style(Style::default().fg(focus_color(&palette, focused)));
        let inner = block.inner(area);
        RatatuiWidget::render(block, area, buf);

        if inner.height < 2 {
            return;
        }

        let text_area = Rect {
            height: inner.height - 1,
            ..inner
        };
        let status_area = Rect {
            y: inner.y + inner.height - 1,
            height: 1,
            ..inner
        };

        if focused {
            self.textarea
                .set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
        } else {
            self.textarea.set_cursor_style(Style::default());
        }
        self.textarea.set_style(Style::default().fg(palette.text));
        RatatuiWidget::render(&self.textarea, text_area, buf);

        let status = match &self.error {
            Some(message) => Paragraph::new(message.clone())
                .style(Style::default().fg(palette.error).add_modifier(Modifier::BOLD)),
            None => Paragraph::new("Ctrl+E encode · Ctrl+D decode")
                .style(Style::default().fg(palette.hint)),
        };
        RatatuiWidget::render(status, status_area, buf);
    }

    fn preferred_height(&self) -> u16 {
        6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_escapes_reserved_characters() {
        assert_eq!(encode_component("a b&c"), "a%20b%26c");
        assert_eq!(encode_component("héllo"), "h%C3%A9llo");
    }

    #[test]
    fn decode_round_trips() {
        let original = "key=value& spaced héllo";
        assert_eq!(
            decode_component(&encode_component(original)).unwrap(),
            original
        );
    }

    #[test]
    fn malformed_escape_is_an_error() {
        assert_eq!(
            decode_component("100%"),
            Err(UrlDecodeError::MalformedEscape(3))
        );
        assert_eq!(
            decode_component("%GG"),
            Err(UrlDecodeError::MalformedEscape(0))
        );
        assert_eq!(
            decode_component("a%2"),
            Err(UrlDecodeError::MalformedEscape(1))
        );
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        assert_eq!(decode_component("%FF"), Err(UrlDecodeError::InvalidUtf8));
    }

    #[test]
    fn plain_text_decodes_to_itself() {
        assert_eq!(decode_component("nothing-here").unwrap(), "nothing-here");
    }
}
