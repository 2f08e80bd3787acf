//! Playlist-driven playback: transport state, progress polling and change
//! notifications.
//!
//! The engine is owned by the root controller and borrowed by views. It is the
//! only writer of [`PlaybackState`]; views learn about changes through
//! [`PlaybackEngine::subscribe`].

use std::time::{Duration, Instant};

use crate::assets::AssetLibrary;
use crate::audio_player::MediaBackend;
use crate::decoder;
use crate::playlist::{Playlist, Track};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Idle,
    /// Only held inside `load_index` while the backend opens the file; a
    /// failed open restores the previous state.
    Loading,
    Playing,
    Paused,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    TrackChanged { source_id: String },
    TransportChanged { is_playing: bool, is_repeating: bool },
    Progress { fraction: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current_index: usize,
    pub is_playing: bool,
    pub is_repeating: bool,
    pub position_secs: f64,
    pub duration_secs: f64,
    pub playback_fraction: f64,
    pub current_time_display: String,
    pub total_time_display: String,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_index: 0,
            is_playing: false,
            is_repeating: false,
            position_secs: 0.,
            duration_secs: 0.,
            playback_fraction: 0.,
            current_time_display: format_time(0.),
            total_time_display: format_time(0.),
        }
    }
}

/// `M:SS`, whole seconds, minutes unpadded.
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Handle of a running progress poll. The poll exists exactly as long as the
/// handle; dropping it cancels the poll.
#[derive(Debug)]
pub struct ProgressPoll {
    interval: Duration,
    next_due: Instant,
}

impl ProgressPoll {
    fn start(interval: Duration, now: Instant) -> Self {
        log::trace!("progress poll started ({:?})", interval);
        Self {
            interval,
            next_due: now + interval,
        }
    }

    fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    fn reschedule(&mut self, now: Instant) {
        self.next_due = now + self.interval;
    }

    pub fn deadline(&self) -> Instant {
        self.next_due
    }
}

impl Drop for ProgressPoll {
    fn drop(&mut self) {
        log::trace!("progress poll cancelled");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&PlayerEvent)>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl Subscribers {
    fn add(&mut self, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, callback));
        id
    }

    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sub, _)| *sub != id);
        before != self.callbacks.len()
    }

    fn publish(&mut self, event: PlayerEvent) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(&event);
        }
    }
}

pub struct PlaybackEngine<B: MediaBackend> {
    playlist: Playlist,
    assets: AssetLibrary,
    backend: B,
    state: PlaybackState,
    transport: TransportState,
    // the backend's source ran to its end and must be restarted before playing
    at_end: bool,
    poll: Option<ProgressPoll>,
    poll_interval: Duration,
    subscribers: Subscribers,
}

impl<B: MediaBackend> PlaybackEngine<B> {
    pub fn new(playlist: Playlist, assets: AssetLibrary, backend: B, poll_interval: Duration) -> Self {
        Self {
            playlist,
            assets,
            backend,
            state: PlaybackState::default(),
            transport: TransportState::Idle,
            at_end: false,
            poll: None,
            poll_interval,
            subscribers: Subscribers::default(),
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn assets(&self) -> &AssetLibrary {
        &self.assets
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn transport(&self) -> TransportState {
        self.transport
    }

    /// The loaded track, `None` until the first successful load.
    pub fn current_track(&self) -> Option<&Track> {
        match self.transport {
            TransportState::Idle => None,
            _ => self.playlist.get(self.state.current_index),
        }
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&PlayerEvent) + 'static) -> SubscriptionId {
        self.subscribers.add(Box::new(callback))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    /// Profile of the loaded track from the samples the backend already
    /// decoded, if it kept them.
    pub fn waveform(&self, sample_count: usize) -> Option<Vec<f32>> {
        if !self.is_loaded() {
            return None;
        }
        self.backend.waveform(sample_count)
    }

    pub fn next_poll_deadline(&self) -> Option<Instant> {
        self.poll.as_ref().map(ProgressPoll::deadline)
    }

    pub fn load_track(&mut self, track: &Track) {
        match self.playlist.index_of(&track.source_id) {
            Some(index) => self.load_index(index),
            None => log::warn!("track {} is not part of the playlist", track.source_id),
        }
    }

    pub fn load_index(&mut self, index: usize) {
        let Some(track) = self.playlist.get(index).cloned() else {
            log::warn!("no track at index {}", index);
            return;
        };
        let path = match self.assets.resolve_audio(&track.source_id) {
            Ok(path) => path,
            Err(err) => {
                log::warn!("cannot load {}: {}", track.title, err);
                return;
            }
        };

        let previous = self.transport;
        self.transport = TransportState::Loading;
        let duration = match self.backend.open(&path) {
            Ok(duration) => duration,
            Err(err) => {
                log::error!("cannot load {}: {}", track.title, err);
                self.transport = previous;
                return;
            }
        };
        log::info!("loaded {} ({})", track.title, format_time(duration));

        self.state.current_index = index;
        self.state.position_secs = 0.;
        self.state.duration_secs = duration.max(0.);
        self.at_end = false;
        self.update_displays();

        self.backend.play();
        self.transport = TransportState::Playing;
        self.state.is_playing = true;
        self.poll = Some(ProgressPoll::start(self.poll_interval, Instant::now()));

        self.subscribers.publish(PlayerEvent::TrackChanged {
            source_id: track.source_id,
        });
        self.publish_transport();
        self.publish_progress();
    }

    pub fn play(&mut self) {
        if self.state.is_playing || !self.is_loaded() {
            return;
        }
        if self.at_end {
            self.backend.restart();
            if self.state.position_secs < self.state.duration_secs {
                self.backend.seek(self.state.position_secs);
            } else {
                self.state.position_secs = 0.;
                self.update_displays();
            }
            self.at_end = false;
        } else {
            self.backend.play();
        }
        self.state.is_playing = true;
        self.transport = TransportState::Playing;
        self.poll = Some(ProgressPoll::start(self.poll_interval, Instant::now()));
        self.publish_transport();
    }

    pub fn pause(&mut self) {
        if !self.state.is_playing {
            return;
        }
        self.backend.pause();
        self.poll = None;
        self.state.is_playing = false;
        self.transport = TransportState::Paused;
        self.publish_transport();
    }

    pub fn toggle_play_pause(&mut self) {
        if self.state.is_playing {
            self.pause()
        } else {
            self.play()
        }
    }

    pub fn toggle_repeat(&mut self) {
        self.state.is_repeating = !self.state.is_repeating;
        self.publish_transport();
    }

    /// Moves to `fraction` of the track and refreshes the displayed time
    /// without waiting for the next poll.
    pub fn seek(&mut self, fraction: f64) {
        if !self.is_loaded() {
            return;
        }
        let fraction = fraction.clamp(0., 1.);
        self.state.position_secs = fraction * self.state.duration_secs;
        if !self.at_end {
            self.backend.seek(self.state.position_secs);
        }
        self.update_displays();
        self.publish_progress();
    }

    pub fn next(&mut self) {
        let index = self.playlist.next_index(self.state.current_index);
        self.load_index(index);
    }

    pub fn previous(&mut self) {
        let index = self.playlist.previous_index(self.state.current_index);
        self.load_index(index);
    }

    /// Natural end of the current track.
    pub fn on_track_finished(&mut self) {
        if !self.is_loaded() {
            return;
        }
        if self.state.is_repeating {
            self.backend.restart();
            self.state.position_secs = 0.;
            self.state.is_playing = true;
            self.transport = TransportState::Playing;
            if self.poll.is_none() {
                self.poll = Some(ProgressPoll::start(self.poll_interval, Instant::now()));
            }
            self.update_displays();
            self.publish_progress();
        } else {
            self.at_end = true;
            self.poll = None;
            self.state.position_secs = self.state.duration_secs;
            self.state.is_playing = false;
            self.transport = TransportState::Paused;
            self.update_displays();
            self.publish_transport();
            self.publish_progress();
        }
    }

    /// Drives the progress poll; call from the UI loop.
    pub fn tick(&mut self, now: Instant) {
        match &mut self.poll {
            Some(poll) if poll.is_due(now) => poll.reschedule(now),
            _ => return,
        }

        if self.backend.take_finished() {
            self.on_track_finished();
            return;
        }

        let position = self.backend.position();
        self.state.position_secs = if self.state.duration_secs > 0. {
            position.clamp(0., self.state.duration_secs)
        } else {
            0.
        };
        self.update_displays();
        self.publish_progress();
    }

    /// `M:SS` duration of a playlist entry read from its headers, empty when
    /// it cannot be determined.
    pub fn duration_text(&self, track: &Track) -> String {
        let duration = self
            .assets
            .resolve_audio(&track.source_id)
            .and_then(|path| decoder::probe_duration(&path));
        match duration {
            Ok(secs) => format_time(secs),
            Err(err) => {
                log::debug!("no duration for {}: {}", track.source_id, err);
                String::new()
            }
        }
    }

    fn is_loaded(&self) -> bool {
        !matches!(self.transport, TransportState::Idle | TransportState::Loading)
    }

    fn update_displays(&mut self) {
        self.state.playback_fraction = if self.state.duration_secs > 0. {
            self.state.position_secs / self.state.duration_secs
        } else {
            0.
        };
        self.state.current_time_display = format_time(self.state.position_secs);
        self.state.total_time_display = format_time(self.state.duration_secs);
    }

    fn publish_transport(&mut self) {
        self.subscribers.publish(PlayerEvent::TransportChanged {
            is_playing: self.state.is_playing,
            is_repeating: self.state.is_repeating,
        });
    }

    fn publish_progress(&mut self) {
        self.subscribers.publish(PlayerEvent::Progress {
            fraction: self.state.playback_fraction,
        });
    }
}

impl<B: MediaBackend> Drop for PlaybackEngine<B> {
    fn drop(&mut self) {
        self.poll = None;
        self.backend.stop();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::PlayerError;
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    #[derive(Default)]
    pub(crate) struct FakeMedia {
        pub duration: f64,
        pub position: f64,
        pub playing: bool,
        pub finished: bool,
        pub undecodable: Vec<String>,
        pub opened: Vec<PathBuf>,
        pub restarts: usize,
        pub stopped: bool,
        pub profile: Option<Vec<f32>>,
    }

    /// Backend double; the test keeps a second handle on the shared state.
    #[derive(Clone)]
    pub(crate) struct FakeBackend(pub Rc<RefCell<FakeMedia>>);

    impl MediaBackend for FakeBackend {
        fn open(&mut self, path: &Path) -> Result<f64, PlayerError> {
            let mut media = self.0.borrow_mut();
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            if media.undecodable.contains(&name) {
                return Err(PlayerError::DecodeFailure(name));
            }
            media.opened.push(path.to_path_buf());
            media.position = 0.;
            media.playing = false;
            media.finished = false;
            Ok(media.duration)
        }

        fn play(&mut self) {
            self.0.borrow_mut().playing = true;
        }

        fn pause(&mut self) {
            self.0.borrow_mut().playing = false;
        }

        fn stop(&mut self) {
            let mut media = self.0.borrow_mut();
            media.playing = false;
            media.stopped = true;
        }

        fn restart(&mut self) {
            let mut media = self.0.borrow_mut();
            media.restarts += 1;
            media.position = 0.;
            media.playing = true;
        }

        fn seek(&mut self, seconds: f64) {
            self.0.borrow_mut().position = seconds;
        }

        fn position(&self) -> f64 {
            self.0.borrow().position
        }

        fn take_finished(&mut self) -> bool {
            std::mem::take(&mut self.0.borrow_mut().finished)
        }

        fn waveform(&self, sample_count: usize) -> Option<Vec<f32>> {
            let media = self.0.borrow();
            media.profile.as_ref().map(|profile| profile[..sample_count.min(profile.len())].to_vec())
        }
    }

    pub(crate) struct Fixture {
        pub engine: PlaybackEngine<FakeBackend>,
        pub media: Rc<RefCell<FakeMedia>>,
        pub events: Rc<RefCell<Vec<PlayerEvent>>>,
        pub dir: tempfile::TempDir,
    }

    pub(crate) fn fixture(ids: &[&str]) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        for id in ids {
            std::fs::write(dir.path().join(format!("{id}.mp3")), b"").unwrap();
        }
        let tracks = ids
            .iter()
            .map(|id| Track::new(&id.to_uppercase(), id, id, ""))
            .collect();
        let playlist = Playlist::new(tracks).unwrap();
        let media = Rc::new(RefCell::new(FakeMedia {
            duration: 200.,
            ..Default::default()
        }));
        let mut engine = PlaybackEngine::new(
            playlist,
            AssetLibrary::new(dir.path()),
            FakeBackend(Rc::clone(&media)),
            DEFAULT_POLL_INTERVAL,
        );
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        engine.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        Fixture {
            engine,
            media,
            events,
            dir,
        }
    }

    fn later() -> Instant {
        Instant::now() + Duration::from_secs(1)
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.), "0:00");
        assert_eq!(format_time(9.99), "0:09");
        assert_eq!(format_time(65.4), "1:05");
        assert_eq!(format_time(600.), "10:00");
        assert_eq!(format_time(-3.), "0:00");
    }

    #[test]
    fn test_initial_state_is_idle() {
        let f = fixture(&["a", "b"]);
        assert_eq!(f.engine.transport(), TransportState::Idle);
        assert!(f.engine.current_track().is_none());
        assert_eq!(f.engine.state().duration_secs, 0.);
        assert!(f.engine.next_poll_deadline().is_none());
    }

    #[test]
    fn test_load_starts_playback_and_notifies() {
        let mut f = fixture(&["a", "b"]);
        f.engine.load_index(1);

        let state = f.engine.state();
        assert_eq!(state.current_index, 1);
        assert!(state.is_playing);
        assert_eq!(state.position_secs, 0.);
        assert_eq!(state.duration_secs, 200.);
        assert_eq!(state.total_time_display, "3:20");
        assert_eq!(f.engine.transport(), TransportState::Playing);
        assert!(f.engine.next_poll_deadline().is_some());
        assert!(f.media.borrow().playing);
        assert_eq!(f.engine.current_track().unwrap().source_id, "b");
        assert_eq!(
            f.events.borrow()[0],
            PlayerEvent::TrackChanged {
                source_id: "b".to_string()
            }
        );
    }

    #[test]
    fn test_load_track_by_identity() {
        let mut f = fixture(&["a", "b", "c"]);
        let track = f.engine.playlist().get(2).unwrap().clone();
        f.engine.load_track(&track);
        assert_eq!(f.engine.state().current_index, 2);

        f.engine.load_track(&Track::new("X", "unknown", "", ""));
        assert_eq!(f.engine.state().current_index, 2);
        assert_eq!(f.media.borrow().opened.len(), 1);
    }

    #[test]
    fn test_missing_asset_keeps_previous_state() {
        let mut f = fixture(&["a", "b"]);
        f.engine.load_index(0);
        f.engine.seek(0.5);
        std::fs::remove_file(f.engine.assets().root().join("b.mp3")).unwrap();
        let before = f.engine.state().clone();
        let events = f.events.borrow().len();

        f.engine.next();

        assert_eq!(f.engine.state(), &before);
        assert_eq!(f.engine.transport(), TransportState::Playing);
        assert_eq!(f.media.borrow().opened.len(), 1);
        assert_eq!(f.events.borrow().len(), events);
    }

    #[test]
    fn test_decode_failure_keeps_previous_state() {
        let mut f = fixture(&["a", "b"]);
        f.media.borrow_mut().undecodable.push("b.mp3".to_string());
        f.engine.load_index(1);
        assert_eq!(f.engine.transport(), TransportState::Idle);
        assert!(!f.engine.state().is_playing);
        assert!(f.events.borrow().is_empty());
    }

    #[test]
    fn test_loading_never_outlives_a_load() {
        let mut f = fixture(&["a", "b"]);
        f.media.borrow_mut().undecodable.push("b.mp3".to_string());
        f.engine.load_index(0);
        assert_eq!(f.engine.transport(), TransportState::Playing);
        f.engine.pause();
        f.engine.load_index(1);
        assert_eq!(f.engine.transport(), TransportState::Paused);
        f.engine.load_index(0);
        assert_eq!(f.engine.transport(), TransportState::Playing);
    }

    #[test]
    fn test_play_pause_are_idempotent_and_drive_the_poll() {
        let mut f = fixture(&["a"]);
        f.engine.play();
        assert!(!f.engine.state().is_playing, "nothing loaded yet");

        f.engine.load_index(0);
        f.engine.pause();
        f.engine.pause();
        assert!(!f.engine.state().is_playing);
        assert_eq!(f.engine.transport(), TransportState::Paused);
        assert!(f.engine.next_poll_deadline().is_none());
        assert!(!f.media.borrow().playing);

        f.engine.toggle_play_pause();
        assert!(f.engine.state().is_playing);
        assert!(f.engine.next_poll_deadline().is_some());
        f.engine.play();
        assert!(f.engine.state().is_playing);
    }

    #[test]
    fn test_seek_sets_position_and_display() {
        let mut f = fixture(&["a"]);
        f.engine.load_index(0);
        for fraction in [0., 0.1, 0.25, 0.5, 0.777, 1.] {
            f.engine.seek(fraction);
            let state = f.engine.state();
            let expected = fraction * 200.;
            assert!((state.position_secs - expected).abs() < 1e-9);
            assert!((state.playback_fraction - fraction).abs() < 1e-9);
            assert_eq!(state.current_time_display, format_time(expected));
            assert!((f.media.borrow().position - expected).abs() < 1e-9);
        }
        f.engine.seek(3.);
        assert_eq!(f.engine.state().position_secs, 200.);
    }

    #[test]
    fn test_next_cycles_back_for_every_size() {
        let ids = ["a", "b", "c", "d", "e"];
        for size in 1..=ids.len() {
            let mut f = fixture(&ids[..size]);
            for start in 0..size {
                f.engine.load_index(start);
                for _ in 0..size {
                    f.engine.next();
                }
                assert_eq!(f.engine.state().current_index, start);
            }
        }
    }

    #[test]
    fn test_previous_undoes_next() {
        let mut f = fixture(&["a", "b", "c", "d"]);
        for start in 0..4 {
            f.engine.load_index(start);
            f.engine.next();
            f.engine.previous();
            assert_eq!(f.engine.state().current_index, start);
        }
    }

    #[test]
    fn test_three_track_wrap() {
        let mut f = fixture(&["a", "b", "c"]);
        f.engine.load_index(0);
        f.engine.next();
        f.engine.next();
        assert_eq!(f.engine.state().current_index, 2);
        f.engine.next();
        assert_eq!(f.engine.state().current_index, 0);
    }

    #[test]
    fn test_poll_publishes_position() {
        let mut f = fixture(&["a"]);
        f.engine.load_index(0);
        f.media.borrow_mut().position = 65.4;

        f.engine.tick(Instant::now());
        assert_eq!(f.engine.state().position_secs, 0., "poll not due yet");

        f.engine.tick(later());
        let state = f.engine.state();
        assert_eq!(state.position_secs, 65.4);
        assert_eq!(state.current_time_display, "1:05");
        assert!((state.playback_fraction - 65.4 / 200.).abs() < 1e-9);
        assert!(matches!(
            f.events.borrow().last(),
            Some(PlayerEvent::Progress { .. })
        ));
    }

    #[test]
    fn test_position_is_clamped_to_duration() {
        let mut f = fixture(&["a"]);
        f.engine.load_index(0);
        f.media.borrow_mut().position = 250.;
        f.engine.tick(later());
        assert_eq!(f.engine.state().position_secs, 200.);
    }

    #[test]
    fn test_natural_end_with_repeat_restarts() {
        let mut f = fixture(&["a", "b"]);
        f.engine.load_index(1);
        f.engine.toggle_repeat();
        assert!(f.engine.state().is_repeating);
        f.media.borrow_mut().finished = true;

        f.engine.tick(later());

        let state = f.engine.state();
        assert_eq!(state.position_secs, 0.);
        assert!(state.is_playing);
        assert_eq!(state.current_index, 1);
        assert_eq!(f.media.borrow().restarts, 1);
        assert!(f.engine.next_poll_deadline().is_some());
    }

    #[test]
    fn test_natural_end_without_repeat_stops() {
        let mut f = fixture(&["a", "b"]);
        f.engine.load_index(0);
        f.media.borrow_mut().finished = true;

        f.engine.tick(later());

        let state = f.engine.state();
        assert!(!state.is_playing);
        assert_eq!(state.position_secs, state.duration_secs);
        assert_eq!(state.current_time_display, "3:20");
        assert_eq!(state.current_index, 0);
        assert!(f.engine.next_poll_deadline().is_none());
        assert_eq!(f.media.borrow().restarts, 0);
    }

    #[test]
    fn test_play_after_end_starts_over() {
        let mut f = fixture(&["a"]);
        f.engine.load_index(0);
        f.engine.on_track_finished();
        f.engine.play();
        assert!(f.engine.state().is_playing);
        assert_eq!(f.engine.state().position_secs, 0.);
        assert_eq!(f.media.borrow().restarts, 1);
    }

    #[test]
    fn test_seek_after_end_resumes_there() {
        let mut f = fixture(&["a"]);
        f.engine.load_index(0);
        f.engine.on_track_finished();
        f.engine.seek(0.25);
        f.engine.play();
        assert!(f.engine.state().is_playing);
        assert_eq!(f.media.borrow().position, 50.);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut f = fixture(&["a"]);
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        let id = f.engine.subscribe(move |_| *counter.borrow_mut() += 1);
        f.engine.load_index(0);
        let seen = *count.borrow();
        assert!(seen > 0);

        assert!(f.engine.unsubscribe(id));
        assert!(!f.engine.unsubscribe(id));
        f.engine.toggle_repeat();
        assert_eq!(*count.borrow(), seen);
    }

    #[test]
    fn test_waveform_comes_from_loaded_backend() {
        let mut f = fixture(&["a"]);
        f.media.borrow_mut().profile = Some(vec![0.25; 10]);
        assert_eq!(f.engine.waveform(4), None, "nothing loaded yet");
        f.engine.load_index(0);
        assert_eq!(f.engine.waveform(4), Some(vec![0.25; 4]));
    }

    #[test]
    fn test_drop_stops_backend() {
        let f = fixture(&["a"]);
        let media = Rc::clone(&f.media);
        drop(f);
        assert!(media.borrow().stopped);
    }

    #[test]
    fn test_duration_text_without_headers_is_empty() {
        let f = fixture(&["a"]);
        let track = f.engine.playlist().get(0).unwrap().clone();
        assert_eq!(f.engine.duration_text(&track), "");
    }

    #[test]
    fn test_duration_text_from_headers() {
        let f = fixture(&["a"]);
        let samples = vec![0i16; 8000 * 75];
        let wav = crate::decoder::tests::write_wav(f.engine.assets().root(), "a.wav", 1, 8000, &samples);
        std::fs::rename(wav, f.engine.assets().root().join("a.mp3")).unwrap();
        let track = f.engine.playlist().get(0).unwrap().clone();
        assert_eq!(f.engine.duration_text(&track), "1:15");
    }
}
