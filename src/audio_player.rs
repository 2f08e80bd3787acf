use crossbeam::channel::{Receiver, Sender, unbounded};
use rodio::Source;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::decoder::{self, SampleRate};
use crate::error::PlayerError;
use crate::waveform;

/// What the playback engine needs from an audio output.
pub trait MediaBackend {
    /// Replaces the current track with the file at `path`, positioned at 0 and
    /// paused. Returns the duration in seconds. On error the previous track
    /// keeps playing.
    fn open(&mut self, path: &Path) -> Result<f64, PlayerError>;
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    /// Starts the current track again from 0 after it has finished.
    fn restart(&mut self);
    fn seek(&mut self, seconds: f64);
    /// Current position in seconds.
    fn position(&self) -> f64;
    /// True once per natural end of the current track.
    fn take_finished(&mut self) -> bool;
    /// Waveform profile of the open track, for backends that keep its samples.
    fn waveform(&self, _sample_count: usize) -> Option<Vec<f32>> {
        None
    }
}

/// Decoded track handed to the sink. Position is a shared cursor into the
/// interleaved samples so the UI thread can read and move it.
struct TrackSource {
    samples: Arc<Vec<f32>>,
    sample_rate: SampleRate,
    channels: u16,
    cursor: Arc<AtomicUsize>,
    generation: u64,
    finished_tx: Sender<u64>,
    finished: bool,
}

impl Iterator for TrackSource {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.cursor.fetch_add(1, Ordering::AcqRel);
        match self.samples.get(pos) {
            Some(sample) => Some(*sample),
            None => {
                self.cursor.store(self.samples.len(), Ordering::Release);
                if !self.finished {
                    self.finished = true;
                    // the receiver lives as long as the backend
                    let _ = self.finished_tx.send(self.generation);
                }
                None
            }
        }
    }
}

impl Source for TrackSource {
    fn current_span_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> rodio::ChannelCount {
        self.channels
    }

    fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

struct LoadedTrack {
    samples: Arc<Vec<f32>>,
    sample_rate: SampleRate,
    channels: u16,
    cursor: Arc<AtomicUsize>,
}

impl LoadedTrack {
    fn samples_per_second(&self) -> f64 {
        self.sample_rate as f64 * self.channels as f64
    }
}

struct Output {
    _stream_handle: rodio::OutputStream,
    sink: rodio::Sink,
}

/// `MediaBackend` on the default output device.
pub struct RodioBackend {
    output: Option<Output>,
    session_error: Option<PlayerError>,
    current: Option<LoadedTrack>,
    generation: u64,
    finished_tx: Sender<u64>,
    finished_rx: Receiver<u64>,
}

impl RodioBackend {
    /// Opens the default output stream. A missing device is not fatal: the
    /// backend is created anyway and every `open` reports the failure.
    pub fn new() -> Self {
        let (finished_tx, finished_rx) = unbounded::<u64>();
        let (output, session_error) = match rodio::OutputStreamBuilder::open_default_stream() {
            Ok(stream_handle) => {
                let sink = rodio::Sink::connect_new(stream_handle.mixer());
                sink.pause();
                let output = Output {
                    _stream_handle: stream_handle,
                    sink,
                };
                (Some(output), None)
            }
            Err(err) => {
                let err = PlayerError::SessionConfigurationFailure(err.to_string());
                log::error!("{}", err);
                (None, Some(err))
            }
        };
        Self {
            output,
            session_error,
            current: None,
            generation: 0,
            finished_tx,
            finished_rx,
        }
    }

    fn append_current(&mut self) {
        let (Some(output), Some(track)) = (&self.output, &self.current) else {
            return;
        };
        self.generation += 1;
        output.sink.stop();
        output.sink.clear();
        output.sink.append(TrackSource {
            samples: Arc::clone(&track.samples),
            sample_rate: track.sample_rate,
            channels: track.channels,
            cursor: Arc::clone(&track.cursor),
            generation: self.generation,
            finished_tx: self.finished_tx.clone(),
            finished: false,
        });
        // drop signals from the source that was just replaced
        while self.finished_rx.try_recv().is_ok() {}
    }
}

impl Default for RodioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaBackend for RodioBackend {
    fn open(&mut self, path: &Path) -> Result<f64, PlayerError> {
        if let Some(err) = &self.session_error {
            return Err(err.clone());
        }
        let audio = decoder::decode_file(path)?;
        let duration = audio.duration_secs();
        self.current = Some(LoadedTrack {
            samples: Arc::new(audio.samples),
            sample_rate: audio.sample_rate,
            channels: audio.channels,
            cursor: Arc::new(AtomicUsize::new(0)),
        });
        self.append_current();
        // sink.clear() leaves the sink paused
        Ok(duration)
    }

    fn play(&mut self) {
        if let Some(output) = &self.output {
            output.sink.play();
        }
    }

    fn pause(&mut self) {
        if let Some(output) = &self.output {
            output.sink.pause();
        }
    }

    fn stop(&mut self) {
        if let Some(output) = &self.output {
            output.sink.stop();
            output.sink.clear();
        }
        self.current = None;
    }

    fn restart(&mut self) {
        if let Some(track) = &self.current {
            track.cursor.store(0, Ordering::Release);
        }
        self.append_current();
        self.play();
    }

    fn seek(&mut self, seconds: f64) {
        if let Some(track) = &self.current {
            let frame = (seconds.max(0.) * track.sample_rate as f64) as usize;
            let index = (frame * track.channels as usize).min(track.samples.len());
            track.cursor.store(index, Ordering::Release);
        }
    }

    fn position(&self) -> f64 {
        match &self.current {
            Some(track) if track.sample_rate > 0 => {
                let index = track.cursor.load(Ordering::Acquire).min(track.samples.len());
                index as f64 / track.samples_per_second()
            }
            _ => 0.,
        }
    }

    fn take_finished(&mut self) -> bool {
        let mut finished = false;
        while let Ok(generation) = self.finished_rx.try_recv() {
            finished |= generation == self.generation;
        }
        finished
    }

    fn waveform(&self, sample_count: usize) -> Option<Vec<f32>> {
        let track = self.current.as_ref()?;
        Some(waveform::profile_from_interleaved(
            &track.samples,
            track.channels,
            sample_count,
        ))
    }
}
