use crate::{EventBus, Widget};
use std::collections::HashMap;

pub type WidgetFactory = Box<dyn Fn(&EventBus) -> Box<dyn Widget>>;

/// Tool registry: key -> (display label, constructor).
///
/// Registration order is preserved and doubles as document order for the
/// search filter and scroll target. Keys are not checked for uniqueness;
/// a duplicate key shadows the earlier factory on `create`.
pub struct WidgetRegistry {
    factories: HashMap<String, (String, WidgetFactory)>,
    order: Vec<String>,
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn register(&mut self, key: &str, label: &str, factory: WidgetFactory) {
        self.order.push(key.to_string());
        self.factories
            .insert(key.to_string(), (label.to_string(), factory));
    }

    pub fn create(&self, key: &str, bus: &EventBus) -> Option<Box<dyn Widget>> {
        self.factories.get(key).map(|(_, f)| f(bus))
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.factories.get(key).map(|(label, _)| label.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    /// Tool keys in registration order
    pub fn keys(&self) -> &[String] {
        &self.order
    }
}

#[macro_export]
macro_rules! register_tool {
    ($registry:expr, $key:expr, $label:expr, $widget_type:ty) => {
        $registry.register(
            $key,
            $label,
            Box::new(|bus| Box::new(<$widget_type>::new(bus.clone()))),
        );
    };
}

#[macro_export]
macro_rules! register_tool_no_bus {
    ($registry:expr, $key:expr, $label:expr, $widget_type:ty) => {
        $registry.register(
            $key,
            $label,
            Box::new(|_bus| Box::new(<$widget_type>::new())),
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{Event, EventResult};
    use ratatui::{buffer::Buffer, layout::Rect};
    use std::time::Duration;

    struct Dummy;

    impl Widget for Dummy {
        fn on_update(&mut self, _delta: Duration) {}
        fn on_event(&mut self, _event: Event) -> EventResult {
            EventResult::Ignored
        }
        fn render(&mut self, _area: Rect, _buf: &mut Buffer) {}
        fn preferred_height(&self) -> u16 {
            3
        }
    }

    #[test]
    fn registration_order_is_preserved() {
        let mut reg = WidgetRegistry::new();
        reg.register("b", "Tool B", Box::new(|_| Box::new(Dummy)));
        reg.register("a", "Tool A", Box::new(|_| Box::new(Dummy)));
        assert_eq!(reg.keys(), &["b".to_string(), "a".to_string()]);
        assert_eq!(reg.label("a"), Some("Tool A"));
    }

    #[test]
    fn unknown_key_yields_none() {
        let reg = WidgetRegistry::new();
        let bus = EventBus::new();
        assert!(reg.create("nope", &bus).is_none());
        assert!(!reg.contains("nope"));
    }
}
