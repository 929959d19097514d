// quicktools-cli/src/main.rs
mod app;

use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io,
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;

use app::App;
use quicktools_core::{
    EventBus, Preferences, WidgetContainer, WidgetRegistry, register_tool, register_tool_no_bus,
};
use quicktools_widgets::{
    AgeWidget, BmiWidget, ByteCountWidget, CaseWidget, CountdownWidget, DaysBetweenWidget,
    EmiWidget, GstWidget, ImageWidget, PasswordWidget, PercentWidget, QrWidget, SlugWidget,
    StopwatchWidget, TipWidget, UnitWidget, UrlWidget, WordCountWidget,
};

/// Logs go to a file; stdout belongs to the terminal UI while raw mode is on
fn init_logging() {
    let Some(dir) = dirs::config_dir().map(|d| d.join("quicktools")) else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(dir.join("quicktools.log")) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn build_registry() -> WidgetRegistry {
    let mut registry = WidgetRegistry::new();
    register_tool_no_bus!(registry, "bmi", "BMI Calculator", BmiWidget);
    register_tool_no_bus!(registry, "age", "Age Calculator", AgeWidget);
    register_tool_no_bus!(registry, "days", "Days Between Dates", DaysBetweenWidget);
    register_tool_no_bus!(registry, "percent", "Percentage Calculator", PercentWidget);
    register_tool_no_bus!(registry, "units", "Unit Converter", UnitWidget);
    register_tool_no_bus!(registry, "emi", "EMI Calculator", EmiWidget);
    register_tool_no_bus!(registry, "gst", "GST Calculator", GstWidget);
    register_tool_no_bus!(registry, "words", "Word Counter", WordCountWidget);
    register_tool_no_bus!(registry, "case", "Text Case Converter", CaseWidget);
    register_tool!(registry, "password", "Password Generator", PasswordWidget);
    register_tool_no_bus!(registry, "url", "URL Encoder / Decoder", UrlWidget);
    register_tool_no_bus!(registry, "tip", "Tip & Split Calculator", TipWidget);
    register_tool!(registry, "timer", "Countdown Timer", CountdownWidget);
    register_tool_no_bus!(registry, "stopwatch", "Stopwatch", StopwatchWidget);
    register_tool!(registry, "image64", "Image to Base64", ImageWidget);
    register_tool_no_bus!(registry, "slug", "Slug Generator", SlugWidget);
    register_tool_no_bus!(registry, "bytes", "Character & Byte Counter", ByteCountWidget);
    register_tool!(registry, "qr", "QR Code Helper", QrWidget);
    registry
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let prefs = Preferences::load().unwrap_or_else(|e| {
        eprintln!("Warning: failed to load preferences: {}. Using defaults.", e);
        Preferences::default()
    });

    let bus = EventBus::new();
    let registry = build_registry();

    // Preference list selects and orders the tools; default is everything
    let keys: Vec<String> = prefs
        .tools
        .clone()
        .unwrap_or_else(|| registry.keys().to_vec());

    let mut widgets = Vec::new();
    for key in &keys {
        match registry.create(key, &bus) {
            Some(widget) => {
                let label = registry.label(key).unwrap_or(key).to_string();
                widgets.push(WidgetContainer::new(key.clone(), label, widget));
            }
            None => eprintln!("Warning: unknown tool '{}' in config", key),
        }
    }

    tracing::info!(tools = widgets.len(), "starting quicktools");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(widgets, bus, prefs);
    let result = run(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    // 50 ms drives the stopwatch display; slower tickers accumulate deltas
    let tick_rate = Duration::from_millis(50);
    let mut last_tick = Instant::now();

    app.mount();

    loop {
        terminal.draw(|f| app.render(f))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                // Only handle key press events, not key release
                CEvent::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                CEvent::Resize(width, height) => app.handle_resize(width, height),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }

        if app.should_quit() {
            break;
        }
    }

    app.unmount();
    Ok(())
}
