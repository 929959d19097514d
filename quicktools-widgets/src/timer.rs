// quicktools-widgets/src/timer.rs
use crossterm::event::KeyCode;
use quicktools_core::{
    BusEvent, Countdown, CountdownTick, Event, EventBus, EventResult, Phase, ThemeMode,
    TimerFinished, Widget,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::Widget as RatatuiWidget,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::time::Duration;

use crate::common::{Field, Palette, focus_color};

/// Countdown timer widget around the [`Countdown`] state machine.
///
/// # Keyboard Shortcuts
/// - `s` - Start from the configured seconds
/// - `p` - Stop, keeping the remaining value
/// - `r` - Reset to the configured seconds
pub struct CountdownWidget {
    seconds: Field,
    countdown: Countdown,
    event_bus: EventBus,
    mode: ThemeMode,
}

impl CountdownWidget {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            seconds: Field::numeric("Seconds", "60"),
            countdown: Countdown::new(),
            event_bus,
            mode: ThemeMode::default(),
        }
    }

    /// Invalid or zero input falls back to 60 seconds
    fn configured_seconds(&self) -> u64 {
        self.seconds
            .value()
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|&n| n > 0)
            .unwrap_or(60)
    }

    fn display(&self) -> String {
        match self.countdown.phase() {
            Phase::Idle => format!("{}s", self.configured_seconds()),
            _ => format!("{}s", self.countdown.remaining()),
        }
    }

    fn phase_label(&self) -> &'static str {
        match self.countdown.phase() {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Stopped => "stopped",
        }
    }
}

impl Widget for CountdownWidget {
    fn on_update(&mut self, delta: Duration) {
        if self.countdown.advance(delta) == CountdownTick::Finished {
            self.event_bus.publish(BusEvent::new(
                "tool.timer.finished",
                TimerFinished {
                    tool: "Countdown Timer".to_string(),
                },
            ));
        }
    }

    fn on_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Theme(mode) => {
                self.mode = mode;
                EventResult::Consumed
            }
            Event::Key(key) => match key.code {
                KeyCode::Char('s') => {
                    self.countdown.start(self.configured_seconds());
                    EventResult::Consumed
                }
                KeyCode::Char('p') => {
                    self.countdown.stop();
                    EventResult::Consumed
                }
                KeyCode::Char('r') => {
                    self.countdown.reset(self.configured_seconds());
                    EventResult::Consumed
                }
                _ => {
                    if self.seconds.handle_key(key) {
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

        let display_line = Line::from(vec![
            Span::styled(
                self.display(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({})", self.phase_label()),
                Style::default().fg(palette.label),
            ),
        ]);

        let lines = vec![self.seconds.line(focused, &palette), display_line];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Countdown Timer ")
            .border_style(Style::default().fg(focus_color(&palette, focused)));

        RatatuiWidget::render(Paragraph::new(lines).block(block), area, buf);
    }

    fn preferred_height(&self) -> u16 {
        4
    }

    fn needs_update(&self) -> bool {
        self.countdown.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quicktools_core::EventBus;

    #[test]
    fn finish_publishes_once() {
        let bus = EventBus::new();
        let (_sub, rx) = bus.subscribe("tool.timer.finished");

        let mut w = CountdownWidget::new(bus);
        w.seconds.set_value("2");
        w.countdown.start(w.configured_seconds());

        w.on_update(Duration::from_secs(1));
        assert!(rx.try_recv().is_err());
        w.on_update(Duration::from_secs(1));
        assert!(rx.try_recv().is_ok());
        // Stopped now; further updates publish nothing
        w.on_update(Duration::from_secs(5));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn invalid_seconds_default_to_sixty() {
        let mut w = CountdownWidget::new(EventBus::new());
        w.seconds.set_value("junk");
        assert_eq!(w.configured_seconds(), 60);
        w.seconds.set_value("0");
        assert_eq!(w.configured_seconds(), 60);
        w.seconds.set_value("15");
        assert_eq!(w.configured_seconds(), 15);
    }
}
