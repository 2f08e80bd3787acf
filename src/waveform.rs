//! Reduces a track to a short amplitude profile for the sheet's visualizer.
//!
//! The reduction is a point sample: one frame of the first channel every
//! `frames / sample_count` frames, taken as an absolute value. It is not an
//! RMS or peak envelope and is recomputed on every track change.

use std::path::Path;

use crate::decoder;

pub const DEFAULT_SAMPLE_COUNT: usize = 80;

/// Value used for every bar when the track cannot be decoded.
pub const FLAT_LEVEL: f32 = 0.5;

pub fn flat_profile(sample_count: usize) -> Vec<f32> {
    vec![FLAT_LEVEL; sample_count]
}

/// Decodes `path` and samples it down to `sample_count` values in `[0, 1]`.
/// Never fails: undecodable input yields the flat profile.
pub fn compute_profile(path: &Path, sample_count: usize) -> Vec<f32> {
    match decoder::decode_file(path) {
        Ok(audio) => sample_frames(&audio.channel(0), sample_count),
        Err(err) => {
            log::warn!("waveform for {:?} unavailable: {}", path, err);
            flat_profile(sample_count)
        }
    }
}

/// Same reduction over samples that are already decoded, interleaved with
/// `channels` channels.
pub fn profile_from_interleaved(samples: &[f32], channels: u16, sample_count: usize) -> Vec<f32> {
    let first_channel: Vec<f32> = samples.iter().step_by(channels.max(1) as usize).copied().collect();
    sample_frames(&first_channel, sample_count)
}

pub fn sample_frames(frames: &[f32], sample_count: usize) -> Vec<f32> {
    if frames.is_empty() {
        return flat_profile(sample_count);
    }

    let stride = frames.len() / sample_count.max(1);
    (0..sample_count)
        .map(|i| {
            // Shorter than the profile: spread the frames instead of repeating frame 0.
            let index = if stride == 0 {
                i * frames.len() / sample_count
            } else {
                i * stride
            };
            frames[index].abs().clamp(0., 1.)
        })
        .collect()
}
