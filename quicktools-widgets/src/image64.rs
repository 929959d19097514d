// quicktools-widgets/src/image64.rs
//
// Image to Base64: reads an image file off the UI loop, encodes it as a
// data URI, and shows a short preview (format, dimensions, size). The read
// happens on a spawned thread reporting over a crossbeam channel; a newer
// request supersedes any older in-flight one (last-write-wins).

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use crossbeam::channel::{Receiver, Sender, unbounded};
use crossterm::event::{KeyCode, KeyModifiers};
use quicktools_core::{BusEvent, ClipboardCopy, Event, EventBus, EventResult, ThemeMode, Widget};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::Widget as RatatuiWidget,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use std::time::{Duration, Instant};

use crate::common::{Field, Palette, clipboard, focus_color, format_number};

const COPY_FLASH: Duration = Duration::from_millis(1200);

/// Result of encoding one image file
#[derive(Debug, Clone)]
pub struct ImageLoad {
    pub mime: String,
    pub dimensions: Option<(u32, u32)>,
    pub bytes: usize,
    pub data_uri: String,
}

/// Base64 data URI plus best-effort preview info. Unrecognized formats
/// still encode, they just lose the mime/dimension details.
pub fn encode_image(bytes: &[u8]) -> ImageLoad {
    let mime = image::guess_format(bytes)
        .map(|f| f.to_mime_type().to_string())
        .unwrap_or_else(|_| "application/octet-stream".to_string());
    let dimensions = {
        use image::GenericImageView;
        image::load_from_memory(bytes).ok().map(|img| img.dimensions())
    };
    let data_uri = format!("data:{};base64,{}", mime, STANDARD.encode(bytes));

    ImageLoad {
        mime,
        dimensions,
        bytes: bytes.len(),
        data_uri,
    }
}

type LoadReply = (u64, Result<ImageLoad, String>);

/// Image to Base64 widget
///
/// # Keyboard Shortcuts
/// - `Enter` - Read the file at the typed path
/// - `Ctrl+Y` - Copy the full data URI
pub struct ImageWidget {
    path: Field,
    seq: u64,
    pending: bool,
    result: Option<Result<ImageLoad, String>>,
    tx: Sender<LoadReply>,
    rx: Receiver<LoadReply>,
    copied_until: Option<Instant>,
    event_bus: EventBus,
    mode: ThemeMode,
}

impl ImageWidget {
    pub fn new(event_bus: EventBus) -> Self {
        let (tx, rx) = unbounded();
        Self {
            path: Field::text("Image path", ""),
            seq: 0,
            pending: false,
            result: None,
            tx,
            rx,
            copied_until: None,
            event_bus,
            mode: ThemeMode::default(),
        }
    }

    fn request_load(&mut self) {
        let path = self.path.value().trim().to_string();
        if path.is_empty() {
            return;
        }

        self.seq += 1;
        self.pending = true;
        let seq = self.seq;
        let tx = self.tx.clone();

        std::thread::spawn(move || {
            let reply = match std::fs::read(&path) {
                Ok(bytes) => Ok(encode_image(&bytes)),
                Err(e) => Err(format!("{path}: {e}")),
            };
            // Receiver may be gone during teardown
            let _ = tx.send((seq, reply));
        });
    }

    fn copy_data_uri(&mut self) {
        let Some(Ok(load)) = &self.result else {
            return;
        };
        let uri = load.data_uri.clone();
        if clipboard::copy(&uri) {
            self.copied_until = Some(Instant::now() + COPY_FLASH);
            self.event_bus.publish(BusEvent::new(
                "tool.clipboard",
                ClipboardCopy {
                    tool: "Image to Base64".to_string(),
                    bytes: uri.len(),
                },
            ));
        }
    }

    fn info_line(&self, palette: &Palette) -> Line<'static> {
        match &self.result {
            _ if self.pending => Line::styled("reading...", Style::default().fg(palette.hint)),
            Some(Ok(load)) => {
                let dims = match load.dimensions {
                    Some((w, h)) => format!("{w}x{h}"),
                    None => "?".to_string(),
                };
                Line::styled(
                    format!(
                        "{} · {} · {} bytes",
                        load.mime,
                        dims,
                        format_number(load.bytes as u64)
                    ),
                    Style::default().fg(palette.result),
                )
            }
            Some(Err(message)) => Line::styled(message.clone(), Style::default().fg(palette.error)),
            None => Line::styled(
                "Enter to read · Ctrl+Y to copy the data URI",
                Style::default().fg(palette.hint),
            ),
        }
    }

    fn uri_line(&self, palette: &Palette) -> Line<'static> {
        let Some(Ok(load)) = &self.result else {
            return Line::default();
        };
        let mut preview: String = load.data_uri.chars().take(60).collect();
        if load.data_uri.len() > 60 {
            preview.push('…');
        }
        if self.copied_until.is_some() {
            Line::styled(
                format!("{preview}  ✔ copied"),
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
            )
        } else {
            Line::styled(preview, Style::default().fg(palette.text))
        }
    }
}

impl Widget for ImageWidget {
    fn on_update(&mut self, _delta: Duration) {
        // Drain the channel; only the reply for the newest request counts
        while let Ok((seq, reply)) = self.rx.try_recv() {
            if seq == self.seq {
                self.result = Some(reply);
                self.pending = false;
            }
        }

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
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('y') {
                    self.copy_data_uri();
                    return EventResult::Consumed;
                }
                match key.code {
                    KeyCode::Enter => {
                        self.request_load();
                        EventResult::Consumed
                    }
                    _ => {
                        if self.path.handle_key(key) {
                            EventResult::Consumed
                        } else {
                            EventResult::Ignored
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

        let lines = vec![
            self.path.line(focused, &palette),
            self.info_line(&palette),
            self.uri_line(&palette),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Image to Base64 ")
            .border_style(Style::default().fg(focus_color(&palette, focused)));

        RatatuiWidget::render(Paragraph::new(lines).block(block), area, buf);
    }

    fn preferred_height(&self) -> u16 {
        5
    }

    fn needs_update(&self) -> bool {
        self.pending || self.copied_until.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn one_pixel_png() -> Vec<u8> {
        let img = image::DynamicImage::ImageRgba8(image::ImageBuffer::from_pixel(
            1,
            1,
            image::Rgba([10, 20, 30, 255]),
        ));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn png_is_recognized_with_dimensions() {
        let bytes = one_pixel_png();
        let load = encode_image(&bytes);
        assert_eq!(load.mime, "image/png");
        assert_eq!(load.dimensions, Some((1, 1)));
        assert_eq!(load.bytes, bytes.len());
        assert!(load.data_uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn unknown_bytes_still_encode() {
        let load = encode_image(b"definitely not an image");
        assert_eq!(load.mime, "application/octet-stream");
        assert_eq!(load.dimensions, None);
        let b64 = load
            .data_uri
            .strip_prefix("data:application/octet-stream;base64,")
            .unwrap();
        assert_eq!(
            STANDARD.decode(b64).unwrap(),
            b"definitely not an image".to_vec()
        );
    }
}
