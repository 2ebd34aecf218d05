//! Synthetic completion chime: a short sine sweep, no decoding involved.

use crate::audio::SPEECH_SAMPLE_RATE;

const START_HZ: f32 = 880.0;
const END_HZ: f32 = 1760.0;
const DURATION_SECS: f32 = 0.4;
const PEAK_GAIN: f32 = 0.3;
const FLOOR_GAIN: f32 = 0.001;

/// Render the chime into f32 samples at the shared 24 kHz rate.
///
/// Frequency ramps exponentially from `START_HZ` to `END_HZ` over the full
/// duration while amplitude decays exponentially from `PEAK_GAIN` toward
/// `FLOOR_GAIN`, so the sweep rings out instead of clicking off.
pub fn chime_samples() -> Vec<f32> {
    let rate = SPEECH_SAMPLE_RATE as f32;
    let total = (DURATION_SECS * rate) as usize;
    let freq_ratio = END_HZ / START_HZ;
    let gain_ratio = FLOOR_GAIN / PEAK_GAIN;

    let mut samples = Vec::with_capacity(total);
    let mut phase = 0.0f32;
    for i in 0..total {
        let progress = i as f32 / total as f32;
        let freq = START_HZ * freq_ratio.powf(progress);
        let gain = PEAK_GAIN * gain_ratio.powf(progress);
        phase += 2.0 * std::f32::consts::PI * freq / rate;
        samples.push(phase.sin() * gain);
    }
    samples
}

/// Duration of the chime in samples at [`SPEECH_SAMPLE_RATE`].
pub fn chime_len() -> usize {
    (DURATION_SECS * SPEECH_SAMPLE_RATE as f32) as usize
}
