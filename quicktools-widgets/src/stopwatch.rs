// quicktools-widgets/src/stopwatch.rs
use crossterm::event::KeyCode;
use quicktools_core::{Event, EventResult, Stopwatch, ThemeMode, Widget};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::Widget as RatatuiWidget,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::common::{Palette, focus_color, format_clock};

/// Stopwatch widget around the [`Stopwatch`] state machine; the display
/// refreshes on the 50 ms update cadence while running.
///
/// # Keyboard Shortcuts
/// - `s` - Start (no-op while running)
/// - `p` - Stop (no-op while stopped)
/// - `r` - Reset to zero
pub struct StopwatchWidget {
    stopwatch: Stopwatch,
    mode: ThemeMode,
}

impl Default for StopwatchWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwatchWidget {
    pub fn new() -> Self {
        Self {
            stopwatch: Stopwatch::new(),
            mode: ThemeMode::default(),
        }
    }
}

impl Widget for StopwatchWidget {
    fn on_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Theme(mode) => {
                self.mode = mode;
                EventResult::Consumed
            }
            Event::Key(key) => match key.code {
                KeyCode::Char('s') => {
                    self.stopwatch.start();
                    EventResult::Consumed
                }
                KeyCode::Char('p') => {
                    self.stopwatch.stop();
                    EventResult::Consumed
                }
                KeyCode::Char('r') => {
                    self.stopwatch.reset();
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            },
            _ => EventResult::Ignored,
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.render_focused(area, buf, false);
    }

    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        let palette = Palette::for_mode(self.mode);

        let state = if self.stopwatch.is_running() {
            "running"
        } else {
            "stopped"
        };

        let display_line = Line::from(vec![
            Span::styled(
                format_clock(self.stopwatch.elapsed()),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  ({state})"), Style::default().fg(palette.label)),
        ]);

        let hint_line = Line::styled("s start · p stop · r reset", Style::default().fg(palette.hint));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Stopwatch ")
            .border_style(Style::default().fg(focus_color(&palette, focused)));

        RatatuiWidget::render(
            Paragraph::new(vec![display_line, hint_line]).block(block),
            area,
            buf,
        );
    }

    fn preferred_height(&self) -> u16 {
        4
    }

    fn needs_update(&self) -> bool {
        self.stopwatch.is_running()
    }
}
