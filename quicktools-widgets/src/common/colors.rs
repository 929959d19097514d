// quicktools-widgets/src/common/colors.rs
use quicktools_core::ThemeMode;
use ratatui::style::Color;

/// Common color palette for consistent styling across tool widgets.
///
/// Two variants exist, one per display mode; widgets pick theirs from the
/// `Event::Theme` broadcast.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Border color for the focused widget
    pub focus: Color,
    /// Border color for unfocused widgets
    pub unfocus: Color,
    /// Regular field text
    pub text: Color,
    /// Field labels and secondary chrome
    pub label: Color,
    /// Computed results
    pub result: Color,
    /// The one user-surfaced failure (URL decode) and file-read notices
    pub error: Color,
    /// Dim hints (placeholder formats, empty states)
    pub hint: Color,
    /// Accents: selected options, the copied flash, timer display
    pub accent: Color,
}

pub const LIGHT_PALETTE: Palette = Palette {
    focus: Color::Blue,
    unfocus: Color::Gray,
    text: Color::Black,
    label: Color::DarkGray,
    result: Color::Blue,
    error: Color::Red,
    hint: Color::Gray,
    accent: Color::Magenta,
};

pub const DARK_PALETTE: Palette = Palette {
    focus: Color::Yellow,
    unfocus: Color::DarkGray,
    text: Color::White,
    label: Color::Gray,
    result: Color::Cyan,
    error: Color::LightRed,
    hint: Color::DarkGray,
    accent: Color::LightMagenta,
};

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => LIGHT_PALETTE,
            ThemeMode::Dark => DARK_PALETTE,
        }
    }
}

/// Border color for the current focus state
pub fn focus_color(palette: &Palette, focused: bool) -> Color {
    if focused {
        palette.focus
    } else {
        palette.unfocus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_per_mode() {
        assert_eq!(Palette::for_mode(ThemeMode::Dark).focus, Color::Yellow);
        assert_eq!(Palette::for_mode(ThemeMode::Light).focus, Color::Blue);
    }

    #[test]
    fn test_focus_color() {
        let p = DARK_PALETTE;
        assert_eq!(focus_color(&p, true), Color::Yellow);
        assert_eq!(focus_color(&p, false), Color::DarkGray);
    }
}
