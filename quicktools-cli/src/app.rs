// quicktools-cli/src/app.rs
use crossbeam::channel::Receiver;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use quicktools_core::{
    BusEvent, ClipboardCopy, Event, EventBus, EventResult, Preferences, ScrollState, Subscription,
    ThemeMode, TimerFinished, WidgetContainer, arrange, center_offset, clip_offset, filter,
    total_height,
};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use std::time::{Duration, Instant};

/// How long a bus notification stays in the header
const STATUS_FLASH: Duration = Duration::from_millis(2500);

#[derive(Default)]
struct SearchBar {
    active: bool,
    query: String,
}

/// The shared container: owns the mounted tool list, the search filter,
/// the scroll state, and the theme preference.
pub struct App {
    widgets: Vec<WidgetContainer>,
    bus_rx: Receiver<BusEvent>,
    _bus_sub: Subscription,
    prefs: Preferences,
    theme: ThemeMode,
    search: SearchBar,
    scroll: ScrollState,
    focused: usize,
    viewport: u16,
    status: Option<(String, Instant)>,
    quit: bool,
}

impl App {
    pub fn new(widgets: Vec<WidgetContainer>, bus: EventBus, prefs: Preferences) -> Self {
        let (sub, rx) = bus.subscribe("tool.*");
        let theme = prefs.theme;
        Self {
            widgets,
            bus_rx: rx,
            _bus_sub: sub,
            prefs,
            theme,
            search: SearchBar::default(),
            scroll: ScrollState::default(),
            focused: 0,
            viewport: 0,
            status: None,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn mount(&mut self) {
        let theme = self.theme;
        for widget in self.widgets.iter_mut() {
            widget.mount();
            widget.handle_event(Event::Theme(theme));
        }
    }

    pub fn unmount(&mut self) {
        for widget in self.widgets.iter_mut() {
            widget.unmount();
        }
    }

    pub fn handle_resize(&mut self, width: u16, height: u16) {
        for widget in self.widgets.iter_mut() {
            widget.handle_event(Event::Resize(width, height));
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.quit = true;
            return;
        }

        if key.code == KeyCode::F(2) {
            self.toggle_theme();
            return;
        }

        if self.search.active {
            self.handle_search_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('f') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.active = true;
            }
            KeyCode::Tab => self.cycle_focus(1),
            KeyCode::BackTab => self.cycle_focus(-1),
            KeyCode::PageDown => self.scroll_page(1),
            KeyCode::PageUp => self.scroll_page(-1),
            _ => {
                let consumed = match self.widgets.get_mut(self.focused) {
                    Some(widget) => widget.handle_event(Event::Key(key)),
                    None => EventResult::Ignored,
                };
                if consumed == EventResult::Consumed {
                    return;
                }
                // Keys no widget wanted: plain q quits, / opens search
                // (text-entry widgets consume both for themselves)
                match key.code {
                    KeyCode::Char('q') => self.quit = true,
                    KeyCode::Char('/') => self.search.active = true,
                    _ => {}
                }
            }
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                // Clear the filter entirely: everything visible again
                self.search.active = false;
                self.search.query.clear();
                self.apply_filter();
            }
            KeyCode::Enter => {
                // Keep the filter, move on to the matched widget
                self.search.active = false;
            }
            KeyCode::Backspace => {
                self.search.query.pop();
                self.apply_filter();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.query.push(c);
                self.apply_filter();
            }
            _ => {}
        }
    }

    /// Re-run the filter over the labels, apply visibility, and glide the
    /// viewport to the first match. An empty query never scrolls.
    fn apply_filter(&mut self) {
        let outcome = filter(&self.search.query, self.widgets.iter().map(|w| w.label()));

        for (widget, visible) in self.widgets.iter_mut().zip(&outcome.visible) {
            widget.set_visible(*visible);
        }

        if let Some(index) = outcome.first_match {
            self.focused = index;
            self.scroll_to(index);
        } else if !self.widgets.get(self.focused).is_some_and(|w| w.is_visible()) {
            // Focus landed on a hidden widget; move it to the first visible one
            if let Some(first) = self.widgets.iter().position(|w| w.is_visible()) {
                self.focused = first;
            }
        }
    }

    fn visible_heights(&self) -> Vec<u16> {
        self.widgets
            .iter()
            .filter(|w| w.is_visible())
            .map(|w| w.preferred_height())
            .collect()
    }

    /// Index of `widget_index` within the visible subset
    fn visible_position(&self, widget_index: usize) -> Option<usize> {
        if !self.widgets.get(widget_index)?.is_visible() {
            return None;
        }
        Some(
            self.widgets[..widget_index]
                .iter()
                .filter(|w| w.is_visible())
                .count(),
        )
    }

    fn scroll_to(&mut self, widget_index: usize) {
        if let Some(pos) = self.visible_position(widget_index) {
            let heights = self.visible_heights();
            let offset = center_offset(&heights, pos, self.viewport.max(1));
            self.scroll.animate_to(offset);
        }
    }

    fn cycle_focus(&mut self, direction: i32) {
        let visible: Vec<usize> = self
            .widgets
            .iter()
            .enumerate()
            .filter(|(_, w)| w.is_visible())
            .map(|(i, _)| i)
            .collect();
        if visible.is_empty() {
            return;
        }

        let current = visible.iter().position(|&i| i == self.focused).unwrap_or(0);
        let next = if direction >= 0 {
            (current + 1) % visible.len()
        } else {
            (current + visible.len() - 1) % visible.len()
        };
        self.focused = visible[next];
        self.scroll_to(self.focused);
    }

    fn scroll_page(&mut self, direction: i32) {
        let page = self.viewport.saturating_sub(2).max(1);
        let target = if direction >= 0 {
            self.scroll.target().saturating_add(page)
        } else {
            self.scroll.target().saturating_sub(page)
        };
        self.scroll.animate_to(target);
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.prefs.theme = self.theme;
        if let Err(e) = self.prefs.save() {
            tracing::warn!("failed to persist theme preference: {e}");
        }
        let theme = self.theme;
        for widget in self.widgets.iter_mut() {
            widget.handle_event(Event::Theme(theme));
        }
    }

    pub fn on_tick(&mut self) {
        for widget in self.widgets.iter_mut() {
            widget.update();
        }
        self.scroll.tick();

        while let Ok(event) = self.bus_rx.try_recv() {
            let message = if let Some(t) = event.payload.downcast::<TimerFinished>() {
                Some(format!("{} finished", t.tool))
            } else {
                event
                    .payload
                    .downcast::<ClipboardCopy>()
                    .map(|c| format!("Copied {} bytes from {}", c.bytes, c.tool))
            };
            if let Some(message) = message {
                self.status = Some((message, Instant::now() + STATUS_FLASH));
            }
        }

        if let Some((_, until)) = &self.status
            && Instant::now() >= *until
        {
            self.status = None;
        }
    }

    fn chrome_style(&self) -> (Style, Style) {
        match self.theme {
            ThemeMode::Light => (
                Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::DarkGray),
            ),
            ThemeMode::Dark => (
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Gray),
            ),
        }
    }

    pub fn render(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();
        if area.height < 3 {
            return;
        }

        let header = Rect { height: 1, ..area };
        let footer = Rect {
            y: area.y + area.height - 1,
            height: 1,
            ..area
        };
        let list = Rect {
            y: area.y + 1,
            height: area.height - 2,
            ..area
        };
        self.viewport = list.height;

        self.render_header(frame, header);
        self.render_footer(frame, footer);
        self.render_list(frame.buffer_mut(), list);
    }

    fn render_header(&self, frame: &mut Frame<'_>, area: Rect) {
        let (title_style, dim_style) = self.chrome_style();

        let mut spans = vec![
            Span::styled(" QuickTools ", title_style),
            Span::styled(format!(" {} ", self.theme.glyph()), dim_style),
        ];

        if self.search.active {
            spans.push(Span::styled("  Search: ", dim_style));
            spans.push(Span::styled(self.search.query.clone(), title_style));
            spans.push(Span::styled("▏", title_style));
        } else if !self.search.query.is_empty() {
            spans.push(Span::styled(
                format!("  Filter: {}", self.search.query),
                dim_style,
            ));
        }

        if let Some((message, _)) = &self.status {
            spans.push(Span::styled(format!("   {message}"), dim_style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_footer(&self, frame: &mut Frame<'_>, area: Rect) {
        let (_, dim_style) = self.chrome_style();
        let hints = " Tab next tool · / search · F2 theme · PgUp/PgDn scroll · Ctrl+Q quit";
        frame.render_widget(Paragraph::new(hints).style(dim_style), area);
    }

    fn render_list(&mut self, buf: &mut Buffer, list: Rect) {
        let heights = self.visible_heights();
        let max_scroll = total_height(&heights).saturating_sub(list.height);
        self.scroll.clamp_to(max_scroll);

        let scroll = self.scroll.current();
        let rects = arrange(list, &heights, scroll);

        let focused_index = self.focused;
        let visible_indices: Vec<usize> = self
            .widgets
            .iter()
            .enumerate()
            .filter(|(_, w)| w.is_visible())
            .map(|(i, _)| i)
            .collect();

        for (pos, widget_index) in visible_indices.into_iter().enumerate() {
            let Some(rect) = rects[pos] else {
                continue;
            };
            let clip = clip_offset(&heights, pos, scroll);
            let is_focused = widget_index == focused_index;
            let widget = &mut self.widgets[widget_index];

            let fully_inside =
                clip == 0 && rect.y + rect.height <= list.y + list.height;
            if fully_inside {
                widget.render_focused(rect, buf, is_focused);
            } else {
                render_clipped(widget, rect, list, clip, is_focused, buf);
            }
        }
    }
}

/// Render a partially visible widget at full height into an offscreen
/// buffer, then copy only the rows inside the viewport.
fn render_clipped(
    widget: &mut WidgetContainer,
    rect: Rect,
    list: Rect,
    clip: u16,
    focused: bool,
    buf: &mut Buffer,
) {
    let full = Rect::new(0, 0, rect.width, rect.height);
    let mut offscreen = Buffer::empty(full);
    widget.render_focused(full, &mut offscreen, focused);

    let below = (list.y + list.height).saturating_sub(rect.y);
    let rows = rect.height.saturating_sub(clip).min(below);

    for row in 0..rows {
        for col in 0..rect.width {
            if let (Some(src), Some(dst)) = (
                offscreen.cell((col, clip + row)),
                buf.cell_mut((rect.x + col, rect.y + row)),
            ) {
                *dst = src.clone();
            }
        }
    }
}
