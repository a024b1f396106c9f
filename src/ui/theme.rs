/// Brand colors and the palette derived from them
use iced::theme::Palette;
use iced::{Color, Theme};

/// `#5ADBFF`, background of the upload panel
pub const PRIMARY: Color = Color {
    r: 0x5A as f32 / 255.0,
    g: 0xDB as f32 / 255.0,
    b: 0xFF as f32 / 255.0,
    a: 1.0,
};

/// `#FFDD4A`
pub const SECONDARY: Color = Color {
    r: 0xFF as f32 / 255.0,
    g: 0xDD as f32 / 255.0,
    b: 0x4A as f32 / 255.0,
    a: 1.0,
};

/// `#FE9000`
pub const ACCENT: Color = Color {
    r: 0xFE as f32 / 255.0,
    g: 0x90 as f32 / 255.0,
    b: 0x00 as f32 / 255.0,
    a: 1.0,
};

/// Near-black of the submit button (`#020617`)
pub const INK: Color = Color {
    r: 0x02 as f32 / 255.0,
    g: 0x06 as f32 / 255.0,
    b: 0x17 as f32 / 255.0,
    a: 1.0,
};

/// Backdrop behind the preview (`#93C5FD`)
pub const PREVIEW_BACKGROUND: Color = Color {
    r: 0x93 as f32 / 255.0,
    g: 0xC5 as f32 / 255.0,
    b: 0xFD as f32 / 255.0,
    a: 1.0,
};

pub fn theme() -> Theme {
    Theme::custom(
        "Extractify".to_owned(),
        Palette {
            background: Color::WHITE,
            text: Color::BLACK,
            primary: INK,
            success: SECONDARY,
            danger: ACCENT,
        },
    )
}
