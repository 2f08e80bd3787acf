use ratatui::style::{Color, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    /// Accent: played part of the waveform, active toggles, selection.
    pub highlight: Color,
    /// Secondary text and the unplayed part of the waveform.
    pub muted: Color,
    /// Background of the player sheet.
    pub surface: Color,
}

impl Default for Theme {
    fn default() -> Self {
        crate::builtin_themes::catppuccin_mocha()
    }
}

impl Theme {
    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn sheet(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.surface)
    }

    /// `color` drawn at `opacity` over the sheet surface.
    pub fn faded(&self, color: Color, opacity: f32) -> Color {
        blend(self.surface, color, opacity)
    }
}

/// Mixes `to` over `from`. Non-RGB colours cannot be mixed and switch at 0.5.
pub fn blend(from: Color, to: Color, amount: f32) -> Color {
    let amount = amount.clamp(0., 1.);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * amount).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if amount >= 0.5 => to,
        _ => from,
    }
}
