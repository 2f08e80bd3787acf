//! Bar rendering of a waveform profile with played/unplayed colouring.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;

const EIGHTHS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Bar height in eighths of a cell. Never zero so silent parts stay visible.
pub fn bar_level(value: f32, rows: u16) -> u16 {
    let rows = rows.max(1);
    let total = rows as f32 * 8.;
    ((value.clamp(0., 1.) * total).round() as u16).clamp(1, rows * 8)
}

/// Glyph of a bar of `level` eighths in the row `row_from_top` of `rows`.
pub fn cell_glyph(level: u16, rows: u16, row_from_top: u16) -> char {
    let below = (rows - 1 - row_from_top) * 8;
    let fill = level.saturating_sub(below).min(8);
    EIGHTHS[fill as usize]
}

/// Which bar a terminal column shows when `width` columns display `count` bars.
pub fn bar_for_column(column: u16, width: u16, count: usize) -> usize {
    column as usize * count / width.max(1) as usize
}

pub fn is_played(bar: usize, count: usize, progress: f64) -> bool {
    bar < (count as f64 * progress.clamp(0., 1.)) as usize
}

/// Column offset inside `area` converted to a playback fraction.
pub fn fraction_at(area: Rect, column: u16) -> f64 {
    let offset = column.saturating_sub(area.x).min(area.width.saturating_sub(1));
    offset as f64 / area.width.saturating_sub(1).max(1) as f64
}

pub struct WaveformBars<'a> {
    pub profile: &'a [f32],
    pub progress: f64,
    pub played: Color,
    pub unplayed: Color,
}

impl Widget for WaveformBars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let count = self.profile.len();
        if count == 0 || area.is_empty() {
            return;
        }
        for column in 0..area.width {
            let bar = bar_for_column(column, area.width, count);
            let level = bar_level(self.profile[bar], area.height);
            let color = if is_played(bar, count, self.progress) {
                self.played
            } else {
                self.unplayed
            };
            for row in 0..area.height {
                if let Some(cell) = buf.cell_mut((area.x + column, area.y + row)) {
                    cell.set_char(cell_glyph(level, area.height, row)).set_fg(color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_levels() {
        assert_eq!(bar_level(0., 3), 1);
        assert_eq!(bar_level(1., 3), 24);
        assert_eq!(bar_level(0.5, 2), 8);
        assert_eq!(bar_level(9., 2), 16);
    }

    #[test]
    fn test_glyphs_fill_from_bottom() {
        // 12 eighths over 2 rows: full bottom cell, half top cell
        assert_eq!(cell_glyph(12, 2, 1), '█');
        assert_eq!(cell_glyph(12, 2, 0), '▄');
        assert_eq!(cell_glyph(1, 2, 0), ' ');
        assert_eq!(cell_glyph(1, 2, 1), '▁');
    }

    #[test]
    fn test_columns_map_onto_bars() {
        assert_eq!(bar_for_column(0, 40, 80), 0);
        assert_eq!(bar_for_column(39, 40, 80), 78);
        assert_eq!(bar_for_column(119, 120, 80), 79);
    }

    #[test]
    fn test_played_split() {
        assert!(!is_played(0, 80, 0.));
        assert!(is_played(39, 80, 0.5));
        assert!(!is_played(40, 80, 0.5));
        assert!(is_played(79, 80, 1.));
    }

    #[test]
    fn test_fraction_at_edges() {
        let area = Rect::new(10, 0, 11, 1);
        assert_eq!(fraction_at(area, 10), 0.);
        assert_eq!(fraction_at(area, 15), 0.5);
        assert_eq!(fraction_at(area, 20), 1.);
        assert_eq!(fraction_at(area, 3), 0.);
        assert_eq!(fraction_at(area, 99), 1.);
    }

    #[test]
    fn test_render_colours_played_bars() {
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        WaveformBars {
            profile: &[1., 1., 1., 1.],
            progress: 0.5,
            played: Color::Red,
            unplayed: Color::Gray,
        }
        .render(area, &mut buf);
        assert_eq!(buf[(0, 0)].fg, Color::Red);
        assert_eq!(buf[(1, 0)].fg, Color::Red);
        assert_eq!(buf[(2, 0)].fg, Color::Gray);
        assert_eq!(buf[(3, 0)].symbol(), "█");
    }
}
