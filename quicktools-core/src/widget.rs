// quicktools-core/src/widget.rs
use ratatui::{buffer::Buffer, layout::Rect};
use std::time::Duration;

use crate::config::ThemeMode;

/// Core tool widget trait with lifecycle hooks
pub trait Widget: Send {
    /// Called once when the widget is added to the tool list
    fn on_mount(&mut self) {}

    /// Called every frame with delta time since last update
    fn on_update(&mut self, _delta: Duration) {}

    /// Handle input events (keyboard, resize, theme changes)
    fn on_event(&mut self, _event: Event) -> EventResult {
        EventResult::Ignored
    }

    /// Render the widget to the buffer
    fn render(&mut self, area: Rect, buf: &mut Buffer);

    /// Render the widget with focus awareness (default implementation calls render)
    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, _focused: bool) {
        self.render(area, buf);
    }

    /// Rows the widget wants in the tool list, borders included
    fn preferred_height(&self) -> u16;

    /// Whether widget needs regular updates (for ticking/animations)
    fn needs_update(&self) -> bool {
        false
    }

    /// Cleanup when widget is removed
    fn on_unmount(&mut self) {}
}

#[derive(Debug, Clone)]
pub enum Event {
    Key(crossterm::event::KeyEvent),
    Resize(u16, u16),
    /// Broadcast at mount and on every toggle so widgets can restyle
    Theme(ThemeMode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed, // Stop propagation
    Ignored,  // Fall through to app-level handling
}

/// Container for managing widget lifecycle and filter visibility
pub struct WidgetContainer {
    widget: Box<dyn Widget>,
    last_update: std::time::Instant,
    mounted: bool,
    visible: bool,
    key: String,
    label: String,
}

impl WidgetContainer {
    pub fn new(key: String, label: String, widget: Box<dyn Widget>) -> Self {
        Self {
            widget,
            last_update: std::time::Instant::now(),
            mounted: false,
            visible: true,
            key,
            label,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display label, the search filter matches against this
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn preferred_height(&self) -> u16 {
        self.widget.preferred_height()
    }

    pub fn mount(&mut self) {
        if !self.mounted {
            self.widget.on_mount();
            self.mounted = true;
        }
    }

    /// Hidden widgets still tick (a filtered-out countdown keeps counting),
    /// they are only skipped at render.
    pub fn update(&mut self) {
        let now = std::time::Instant::now();
        let delta = now.duration_since(self.last_update);

        if self.widget.needs_update() {
            self.widget.on_update(delta);
        }

        self.last_update = now;
    }

    pub fn handle_event(&mut self, event: Event) -> EventResult {
        self.widget.on_event(event)
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.widget.render(area, buf);
    }

    pub fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        self.widget.render_focused(area, buf, focused);
    }

    pub fn unmount(&mut self) {
        if self.mounted {
            self.widget.on_unmount();
            self.mounted = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Clone, Default)]
    struct Counters {
        mounts: Arc<AtomicU32>,
        unmounts: Arc<AtomicU32>,
        updates: Arc<AtomicU32>,
    }

    struct Probe {
        counters: Counters,
        ticking: bool,
    }

    impl Widget for Probe {
        fn on_mount(&mut self) {
            self.counters.mounts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_update(&mut self, _delta: Duration) {
            self.counters.updates.fetch_add(1, Ordering::SeqCst);
        }

        fn render(&mut self, _area: Rect, _buf: &mut Buffer) {}

        fn preferred_height(&self) -> u16 {
            5
        }

        fn needs_update(&self) -> bool {
            self.ticking
        }

        fn on_unmount(&mut self) {
            self.counters.unmounts.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn probe(ticking: bool) -> (WidgetContainer, Counters) {
        let counters = Counters::default();
        let container = WidgetContainer::new(
            "probe".into(),
            "Probe".into(),
            Box::new(Probe {
                counters: counters.clone(),
                ticking,
            }),
        );
        (container, counters)
    }

    #[test]
    fn mount_and_unmount_fire_once() {
        let (mut c, counters) = probe(false);
        c.mount();
        c.mount();
        assert_eq!(counters.mounts.load(Ordering::SeqCst), 1);
        c.unmount();
        c.unmount();
        assert_eq!(counters.unmounts.load(Ordering::SeqCst), 1);
        c.mount();
        assert_eq!(counters.mounts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn hidden_container_still_updates() {
        let (mut c, counters) = probe(true);
        c.mount();
        c.set_visible(false);
        c.update();
        assert!(!c.is_visible());
        assert_eq!(counters.updates.load(Ordering::SeqCst), 1);
        assert_eq!(c.preferred_height(), 5);
    }

    #[test]
    fn non_ticking_widget_gets_no_updates() {
        let (mut c, counters) = probe(false);
        c.mount();
        c.update();
        assert_eq!(counters.updates.load(Ordering::SeqCst), 0);
    }
}
