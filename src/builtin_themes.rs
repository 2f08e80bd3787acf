//! Built-in themes for tunesheet
//!
//! Pre-defined palettes for popular color schemes, selected by name in the
//! config file.

use crate::theme::Theme;
use ratatui::style::Color;

// Helper function to convert hex RGB to Color::Rgb
const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(r, g, b)
}

pub const THEME_NAMES: [&str; 6] = [
    "catppuccin-mocha",
    "catppuccin-latte",
    "dracula",
    "gruvbox-dark",
    "nord",
    "tokyo-night",
];

pub fn by_name(name: &str) -> Option<Theme> {
    match name {
        "catppuccin-mocha" => Some(catppuccin_mocha()),
        "catppuccin-latte" => Some(catppuccin_latte()),
        "dracula" => Some(dracula()),
        "gruvbox-dark" => Some(gruvbox_dark()),
        "nord" => Some(nord()),
        "tokyo-night" => Some(tokyo_night()),
        _ => None,
    }
}

/// Catppuccin Mocha theme
///
/// A soothing pastel theme with warm, cozy colors.
/// Based on [Catppuccin](https://github.com/catppuccin/catppuccin)
pub fn catppuccin_mocha() -> Theme {
    Theme {
        background: rgb(30, 30, 46), // #1e1e2e
        foreground: rgb(205, 214, 244), // #cdd6f4
        highlight: rgb(250, 179, 135), // #fab387 (peach)
        muted: rgb(108, 112, 134),   // #6c7086 (overlay0)
        surface: rgb(49, 50, 68),    // #313244 (surface0)
    }
}

/// Catppuccin Latte theme
///
/// The light flavour of Catppuccin.
pub fn catppuccin_latte() -> Theme {
    Theme {
        background: rgb(239, 241, 245), // #eff1f5 (base)
        foreground: rgb(76, 79, 105),   // #4c4f69 (text)
        highlight: rgb(254, 100, 11),   // #fe640b (peach)
        muted: rgb(156, 160, 176),      // #9ca0b0 (overlay0)
        surface: rgb(204, 208, 218),    // #ccd0da (surface0)
    }
}

/// Dracula theme
///
/// Based on [Dracula Theme](https://draculatheme.com/)
pub fn dracula() -> Theme {
    Theme {
        background: rgb(40, 42, 54),   // #282a36
        foreground: rgb(248, 248, 242), // #f8f8f2
        highlight: rgb(255, 184, 108), // #ffb86c (orange)
        muted: rgb(98, 114, 164),      // #6272a4 (comment)
        surface: rgb(68, 71, 90),      // #44475a (current line)
    }
}

/// Gruvbox Dark theme
///
/// A warm, retro theme designed to be easy on the eyes.
pub fn gruvbox_dark() -> Theme {
    Theme {
        background: rgb(40, 40, 40),   // #282828
        foreground: rgb(235, 219, 178), // #ebdbb2
        highlight: rgb(254, 128, 25),  // #fe8019 (orange)
        muted: rgb(146, 131, 116),     // #928374
        surface: rgb(60, 56, 54),      // #3c3836 (bg1)
    }
}

/// Nord theme
///
/// An arctic, north-bluish color palette.
/// Based on [Nord](https://github.com/arcticicestudio/nord)
pub fn nord() -> Theme {
    Theme {
        background: rgb(46, 52, 64),   // #2E3440 (nord0)
        foreground: rgb(216, 222, 233), // #D8DEE9 (nord4)
        highlight: rgb(208, 135, 112), // #D08770 (nord12)
        muted: rgb(76, 86, 106),       // #4C566A (nord3)
        surface: rgb(59, 66, 82),      // #3B4252 (nord1)
    }
}

/// Tokyo Night theme
///
/// Based on [tokyonight.nvim](https://github.com/folke/tokyonight.nvim)
pub fn tokyo_night() -> Theme {
    Theme {
        background: rgb(26, 27, 38),   // #1a1b26
        foreground: rgb(192, 202, 245), // #c0caf5
        highlight: rgb(255, 158, 100), // #ff9e64 (orange)
        muted: rgb(86, 95, 137),       // #565f89 (comment)
        surface: rgb(41, 46, 66),      // #292e42
    }
}
