// quicktools-widgets/src/qr.rs
use crossterm::event::{KeyCode, KeyModifiers};
use quicktools_core::{BusEvent, ClipboardCopy, Event, EventBus, EventResult, ThemeMode, Widget};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::Widget as RatatuiWidget,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::time::{Duration, Instant};

use crate::common::{Field, Palette, clipboard, focus_color};

/// Pixel edge lengths the external service is asked for
pub const QR_SIZES: [u32; 3] = [150, 200, 300];

/// Link to the external QR image service. Only the reference is built
/// here; nothing checks that the endpoint is reachable.
pub fn qr_link(data: &str, size: u32) -> String {
    format!(
        "https://api.qrserver.com/v1/create-qr-code/?size={size}x{size}&data={}",
        urlencoding::encode(data)
    )
}

/// QR code helper widget
///
/// # Keyboard Shortcuts
/// - `Enter` - Build the image link for the typed text
/// - `Ctrl+S` - Cycle the image size (150 / 200 / 300)
/// - `Ctrl+Y` - Copy the link
pub struct QrWidget {
    data: Field,
    size_index: usize,
    link: Option<String>,
    copied_until: Option<Instant>,
    event_bus: EventBus,
    mode: ThemeMode,
}

const COPY_FLASH: Duration = Duration::from_millis(1200);

impl QrWidget {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            data: Field::text("Text", "Hello from QuickTools!"),
            size_index: 1, // 200
            link: None,
            copied_until: None,
            event_bus,
            mode: ThemeMode::default(),
        }
    }

    fn build_link(&mut self) {
        self.link = Some(qr_link(self.data.value(), QR_SIZES[self.size_index]));
    }

    fn copy_link(&mut self) {
        let Some(link) = self.link.clone() else {
            return;
        };
        if clipboard::copy(&link) {
            self.copied_until = Some(Instant::now() + COPY_FLASH);
            self.event_bus.publish(BusEvent::new(
                "tool.clipboard",
                ClipboardCopy {
                    tool: "QR Code Helper".to_string(),
                    bytes: link.len(),
                },
            ));
        }
    }
}

impl Widget for QrWidget {
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
            Event::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    match key.code {
                        KeyCode::Char('s') => {
                            self.size_index = (self.size_index + 1) % QR_SIZES.len();
                            EventResult::Consumed
                        }
                        KeyCode::Char('y') => {
                            self.copy_link();
                            EventResult::Consumed
                        }
                        _ => EventResult::Ignored,
                    }
                } else {
                    match key.code {
                        KeyCode::Enter => {
                            self.build_link();
                            EventResult::Consumed
                        }
                        _ => {
                            if self.data.handle_key(key) {
                                EventResult::Consumed
                            } else {
                                EventResult::Ignored
                            }
                        }
                    }
                }
            }
            _ => EventResult::Ignored,
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.render_focused(area, buf, false);
    }

    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        let palette = Palette::for_mode(self.mode);

        let size_line = Line::from(vec![
            Span::styled("Size [Ctrl+S]: ", Style::default().fg(palette.label)),
            Span::styled(
                format!("{0}x{0}", QR_SIZES[self.size_index]),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let link_line = match &self.link {
            Some(link) if self.copied_until.is_some() => Line::from(vec![
                Span::styled(link.clone(), Style::default().fg(palette.result)),
                Span::styled("  ✔ copied", Style::default().fg(palette.accent)),
            ]),
            Some(link) => Line::styled(link.clone(), Style::default().fg(palette.result)),
            None => Line::styled(
                "Enter to build the link · Ctrl+Y to copy",
                Style::default().fg(palette.hint),
            ),
        };

        let lines = vec![self.data.line(focused, &palette), size_line, link_line];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" QR Code Helper ")
            .border_style(Style::default().fg(focus_color(&palette, focused)));

        RatatuiWidget::render(
            Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
            area,
            buf,
        );
    }

    fn preferred_height(&self) -> u16 {
        7
    }

    fn needs_update(&self) -> bool {
        self.copied_until.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_carries_size_and_encoded_data() {
        let link = qr_link("Hello from QuickTools!", 200);
        assert_eq!(
            link,
            "https://api.qrserver.com/v1/create-qr-code/?size=200x200&data=Hello%20from%20QuickTools%21"
        );
    }

    #[test]
    fn empty_data_still_builds() {
        assert_eq!(
            qr_link("", 150),
            "https://api.qrserver.com/v1/create-qr-code/?size=150x150&data="
        );
    }

    #[test]
    fn reserved_characters_are_escaped() {
        let link = qr_link("a&b=c", 300);
        assert!(link.ends_with("data=a%26b%3Dc"));
    }
}
