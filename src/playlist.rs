use std::collections::HashSet;

use crate::error::PlayerError;

/// One playable entry. `source_id` is the audio asset name without extension
/// and identifies the track inside a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub source_id: String,
    pub image_ref: String,
    pub description: String,
}

impl Track {
    pub fn new(title: &str, source_id: &str, image_ref: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            source_id: source_id.to_string(),
            image_ref: image_ref.to_string(),
            description: description.to_string(),
        }
    }
}

/// Fixed, non-empty, ordered collection of tracks. Traversal wraps around.
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Result<Self, PlayerError> {
        if tracks.is_empty() {
            return Err(PlayerError::InvalidPlaylist("playlist is empty".to_string()));
        }
        let mut seen = HashSet::new();
        for track in &tracks {
            if !seen.insert(track.source_id.as_str()) {
                return Err(PlayerError::InvalidPlaylist(format!(
                    "duplicate source id {}",
                    track.source_id
                )));
            }
        }
        Ok(Self { tracks })
    }

    pub fn builtin() -> Result<Self, PlayerError> {
        let tracks = BUILTIN_TRACKS
            .iter()
            .map(|(title, source_id, image, description)| {
                Track::new(title, source_id, image, description)
            })
            .collect();
        Self::new(tracks)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn index_of(&self, source_id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.source_id == source_id)
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.len()
    }

    pub fn previous_index(&self, index: usize) -> usize {
        (index + self.len() - 1) % self.len()
    }
}

// (title, audio asset id, image id, description)
const BUILTIN_TRACKS: [(&str, &str, &str, &str); 10] = [
    (
        "Blinding Lights",
        "The_Weeknd_-_Blinding_Lights",
        "Blinding_Lights",
        "The Weeknd, Canadian singer known for his unique voice and 80s-style pop",
    ),
    (
        "Shape of You",
        "Ed_Sheeran_-_Shape_of_You",
        "Shape_of_You",
        "Ed Sheeran, English singer-songwriter known for acoustic pop hits",
    ),
    (
        "Bad Guy",
        "Billie_Eilish_-_bad_guy",
        "Bad_Guy",
        "Billie Eilish, American singer known for dark pop and whispery vocals",
    ),
    (
        "Dance Monkey",
        "Tones_and_I_-_Dance_Monkey",
        "Dance_Monkey",
        "Tones and I, Australian singer with a unique voice and viral debut",
    ),
    (
        "Levitating",
        "Dua_Lipa_-_Levitating",
        "Levitating",
        "Dua Lipa, British-Albanian singer blending disco and modern pop",
    ),
    (
        "Senorita",
        "Inna_-_Senorita",
        "Senorita",
        "Inna, Romanian pop singer with a romantic summer hit",
    ),
    (
        "Believer",
        "Imagine_Dragons_-_Believer",
        "Believer",
        "Imagine Dragons, American rock band with energetic anthems",
    ),
    (
        "Stay",
        "The_Kid_LAROI_Justin_Bieber_-_Stay",
        "Stay",
        "The Kid LAROI & Justin Bieber, collaboration between a rising star and a pop icon",
    ),
    (
        "Peaches",
        "Justin_Bieber_Daniel_Caesar_Giveon_-_Peaches",
        "Peaches",
        "Justin Bieber, Canadian pop sensation with smooth R&B influences",
    ),
    (
        "Easy On Me",
        "Adele_-_Easy_On_Me",
        "Easy_On_Me",
        "Adele, British singer-songwriter known for emotional ballads",
    ),
];
