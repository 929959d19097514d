pub mod clipboard;
pub mod colors;
pub mod formatting;
pub mod input;

pub use colors::{DARK_PALETTE, LIGHT_PALETTE, Palette, focus_color};
pub use formatting::{
    format_clock, format_money, format_number, format_trimmed, parse_min_1, parse_or_zero,
};
pub use input::{Field, FieldKind, textarea_input};
