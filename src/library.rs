use ratatui::widgets::ListState;

use crate::playlist::Playlist;

/// Selection state of the track list plus the duration column.
#[derive(Debug, Default)]
pub struct LibraryView {
    pub list_state: ListState,
    durations: Vec<String>,
    len: usize,
}

impl LibraryView {
    /// `durations` holds one `M:SS` text (possibly empty) per track.
    pub fn new(playlist: &Playlist, durations: Vec<String>) -> Self {
        let mut durations = durations;
        durations.resize(playlist.len(), String::new());
        Self {
            list_state: ListState::default().with_selected(Some(0)),
            durations,
            len: playlist.len(),
        }
    }

    pub fn selected(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    pub fn duration(&self, index: usize) -> &str {
        self.durations.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.list_state.select(Some(index));
        }
    }

    pub fn select_next(&mut self) {
        if self.len > 0 {
            self.list_state.select(Some((self.selected() + 1) % self.len));
        }
    }

    pub fn select_previous(&mut self) {
        if self.len > 0 {
            self.list_state.select(Some((self.selected() + self.len - 1) % self.len));
        }
    }

    /// Index to hand to the engine for the highlighted row.
    pub fn activate(&self) -> Option<usize> {
        (self.len > 0).then(|| self.selected())
    }

    /// Maps a terminal row inside the list area to a track index.
    pub fn index_at_row(&self, row_in_list: u16, rows_per_item: u16) -> Option<usize> {
        let index = self.list_state.offset() + (row_in_list / rows_per_item.max(1)) as usize;
        (index < self.len).then_some(index)
    }
}
