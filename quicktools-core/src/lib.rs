pub mod config;
pub mod event;
pub mod layout;
pub mod registry;
pub mod search;
pub mod timing;
pub mod widget;

pub use config::{ConfigError, Preferences, ThemeMode};
pub use event::{BusEvent, ClipboardCopy, EventBus, EventPayload, Subscription, TimerFinished};
pub use layout::{ScrollState, arrange, center_offset, clip_offset, total_height};
pub use registry::{WidgetFactory, WidgetRegistry};
pub use search::{FilterOutcome, filter};
pub use timing::{Countdown, CountdownTick, Phase, Stopwatch};
pub use widget::{Event, EventResult, Widget, WidgetContainer};
