//! Shared audio output built on cpal.
//!
//! The output device and its configuration are opened once and reused for
//! every playback. Each playback gets its own stream, so rapid repeated
//! triggers overlap rather than queue or cancel each other.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, SampleFormat, SizedSample, Stream, StreamConfig, SupportedStreamConfig};
use rubato::{FftFixedIn, Resampler};

/// Process-wide audio output resource.
///
/// Construction can fail on machines without an output device; callers treat
/// that as "no sound" rather than an error (the construction attempt is made
/// once and the outcome is remembered by the owner).
pub struct AudioOutput {
    device: Device,
    supported_config: SupportedStreamConfig,
}

/// Live playback handle. Dropping it stops the sound, so the owner holds it
/// until `finished` flips.
pub struct Playback {
    _stream: Stream,
    finished: Arc<AtomicBool>,
}

impl Playback {
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    /// Wait for the stream to drain.
    pub async fn wait(&self) {
        while !self.is_finished() {
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }
    }
}

impl AudioOutput {
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .context("no output device available")?;
        let supported_config = device
            .default_output_config()
            .context("failed to get default output config")?;

        Ok(Self {
            device,
            supported_config,
        })
    }

    /// Play mono f32 samples recorded at `source_rate`, exactly once.
    ///
    /// The samples are resampled to the device's native rate (matching the
    /// source encoding avoids pitch distortion) and duplicated across output
    /// channels. Returns immediately; the sound plays until the returned
    /// handle reports finished or is dropped.
    pub fn play(&self, samples: &[f32], source_rate: u32) -> Result<Playback> {
        let native_rate = self.supported_config.sample_rate().0;
        let channels = self.supported_config.channels() as usize;
        let sample_format = self.supported_config.sample_format();
        let config: StreamConfig = self.supported_config.clone().into();

        let mono = if source_rate == native_rate {
            samples.to_vec()
        } else {
            resample(samples, source_rate, native_rate)?
        };
        let interleaved = interleave(&mono, channels);

        let queue = Arc::new(interleaved);
        let position = Arc::new(AtomicUsize::new(0));
        let finished = Arc::new(AtomicBool::new(false));

        let stream = match sample_format {
            SampleFormat::F32 => {
                self.build_stream::<f32>(&config, queue, position, finished.clone())?
            }
            SampleFormat::I16 => {
                self.build_stream::<i16>(&config, queue, position, finished.clone())?
            }
            format => anyhow::bail!("unsupported sample format: {format:?}"),
        };

        stream.play().context("failed to start playback stream")?;

        Ok(Playback {
            _stream: stream,
            finished,
        })
    }

    fn build_stream<T>(
        &self,
        config: &StreamConfig,
        queue: Arc<Vec<f32>>,
        position: Arc<AtomicUsize>,
        finished: Arc<AtomicBool>,
    ) -> Result<Stream>
    where
        T: SizedSample + FromSample<f32> + Default + Send + 'static,
    {
        self.device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let pos = position.load(Ordering::SeqCst);
                    let remaining = queue.len().saturating_sub(pos);

                    if remaining == 0 {
                        data.fill(T::default());
                        finished.store(true, Ordering::SeqCst);
                        return;
                    }

                    let to_copy = remaining.min(data.len());
                    for (out, &sample) in data.iter_mut().zip(&queue[pos..pos + to_copy]) {
                        *out = T::from_sample(sample);
                    }
                    if to_copy < data.len() {
                        data[to_copy..].fill(T::default());
                    }

                    position.store(pos + to_copy, Ordering::SeqCst);
                },
                move |err| {
                    tracing::error!(error = ?err, "playback stream error");
                },
                None,
            )
            .context("failed to build output stream")
    }
}

fn resample(samples: &[f32], source_rate: u32, target_rate: u32) -> Result<Vec<f32>> {
    let chunk_size = 1024;
    let mut resampler =
        FftFixedIn::<f32>::new(source_rate as usize, target_rate as usize, chunk_size, 2, 1)
            .context("failed to create resampler")?;

    let mut output = Vec::new();
    let mut pos = 0;
    while pos < samples.len() {
        let frames = resampler.input_frames_next();
        let end = (pos + frames).min(samples.len());

        let mut chunk = samples[pos..end].to_vec();
        chunk.resize(frames, 0.0);

        let resampled = resampler
            .process(&[chunk], None)
            .map_err(|e| anyhow::anyhow!("resampling failed: {e:?}"))?;
        if let Some(channel) = resampled.into_iter().next() {
            output.extend(channel);
        }

        pos = end;
    }

    Ok(output)
}

/// Duplicate a mono signal across every output channel.
fn interleave(mono: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return mono.to_vec();
    }
    let mut out = Vec::with_capacity(mono.len() * channels);
    for &sample in mono {
        for _ in 0..channels {
            out.push(sample);
        }
    }
    out
}
