//! Paged introduction shown before the library.

use crate::assets::AssetLibrary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingPage {
    pub title: &'static str,
    pub detail: &'static str,
    pub video_id: &'static str,
}

pub const PAGES: [OnboardingPage; 3] = [
    OnboardingPage {
        title: "OnBoarding",
        detail: "Move from one screen to the next by swiping left. Each screen shows a short video explaining a part of the app.",
        video_id: "v1",
    },
    OnboardingPage {
        title: "Expandable Player",
        detail: "After selecting a song the player appears at the bottom. Drag it up to expand it and reach more controls.",
        video_id: "v2",
    },
    OnboardingPage {
        title: "Music control",
        detail: "Go to the next or previous song, play or pause, and repeat the current song from the player controls.",
        video_id: "v3",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewStatus {
    Available,
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselAction {
    None,
    Completed,
}

#[derive(Debug)]
pub struct Carousel {
    pages: Vec<OnboardingPage>,
    current: usize,
    previews: Vec<PreviewStatus>,
}

impl Carousel {
    pub fn new(pages: Vec<OnboardingPage>, assets: &AssetLibrary) -> Self {
        let previews = pages
            .iter()
            .map(|page| match assets.resolve_video(page.video_id) {
                Ok(_) => PreviewStatus::Available,
                Err(err) => {
                    log::warn!("onboarding preview unavailable: {}", err);
                    PreviewStatus::Missing
                }
            })
            .collect();
        Self {
            pages,
            current: 0,
            previews,
        }
    }

    pub fn builtin(assets: &AssetLibrary) -> Self {
        Self::new(PAGES.to_vec(), assets)
    }

    pub fn pages(&self) -> &[OnboardingPage] {
        &self.pages
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_page(&self) -> Option<&OnboardingPage> {
        self.pages.get(self.current)
    }

    pub fn is_last_page(&self) -> bool {
        self.current + 1 >= self.pages.len()
    }

    /// Only the visible page plays its preview.
    pub fn is_preview_playing(&self, index: usize) -> bool {
        index == self.current && self.previews.get(index) == Some(&PreviewStatus::Available)
    }

    pub fn preview_status(&self, index: usize) -> Option<PreviewStatus> {
        self.previews.get(index).copied()
    }

    pub fn next_page(&mut self) {
        if !self.is_last_page() {
            self.current += 1;
        }
    }

    pub fn previous_page(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// The "Get Started" button; only present on the last page.
    pub fn activate(&mut self) -> CarouselAction {
        if self.is_last_page() {
            log::info!("onboarding completed");
            CarouselAction::Completed
        } else {
            CarouselAction::None
        }
    }
}
