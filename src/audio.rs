use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{error, info, warn};
use stripchart::SampleRing;

/// Feeds the ring from a cpal input stream: one peak level per callback.
pub struct InputCapture {
    _stream: cpal::Stream,
    pub device_name: String,
}

impl InputCapture {
    pub fn new(ring: Arc<SampleRing>) -> Result<Self, String> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| "No audio input device available".to_string())?;
        let device_name = device
            .name()
            .unwrap_or_else(|_| "<unknown input>".to_string());
        let supported_config = device
            .default_input_config()
            .map_err(|err| format!("Could not query default input: {err}"))?;
        let sample_format = supported_config.sample_format();
        let config: cpal::StreamConfig = supported_config.into();

        let err_fn = |err| error!("Audio input stream error: {err}");
        let stream = match sample_format {
            cpal::SampleFormat::F32 => device
                .build_input_stream(
                    &config,
                    move |data: &[f32], _| ring.append(peak(data.iter().copied())),
                    err_fn,
                    None,
                )
                .map_err(|err| format!("Failed to build f32 stream: {err}"))?,
            cpal::SampleFormat::I16 => device
                .build_input_stream(
                    &config,
                    move |data: &[i16], _| {
                        ring.append(peak(data.iter().map(|&s| s as f32 / i16::MAX as f32)))
                    },
                    err_fn,
                    None,
                )
                .map_err(|err| format!("Failed to build i16 stream: {err}"))?,
            cpal::SampleFormat::U16 => device
                .build_input_stream(
                    &config,
                    move |data: &[u16], _| {
                        ring.append(peak(
                            data.iter().map(|&s| s as f32 / u16::MAX as f32 * 2.0 - 1.0),
                        ))
                    },
                    err_fn,
                    None,
                )
                .map_err(|err| format!("Failed to build u16 stream: {err}"))?,
            other => {
                return Err(format!("Unsupported sample format: {other:?}"));
            }
        };
        stream
            .play()
            .map_err(|err| format!("Failed to start audio input: {err}"))?;
        info!("capturing input levels from '{device_name}'");
        Ok(Self {
            _stream: stream,
            device_name,
        })
    }
}

fn peak(block: impl Iterator<Item = f32>) -> f32 {
    block.fold(0.0_f32, |acc, s| acc.max(s.abs()))
}

/// Background thread appending a generated signal at a fixed tick.
pub struct SyntheticFeed {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SyntheticFeed {
    pub fn spawn(ring: Arc<SampleRing>, interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            let mut tick: u64 = 0;
            while !flag.load(Ordering::Relaxed) {
                ring.append(synthetic_level(tick));
                tick = tick.wrapping_add(1);
                thread::sleep(interval);
            }
        });
        info!("synthetic producer running every {interval:?}");
        Self {
            stop,
            handle: Some(handle),
        }
    }
}

impl Drop for SyntheticFeed {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("synthetic producer thread panicked");
            }
        }
    }
}

/// Slow swell with a faster ripple, kept inside `[0, 1]`.
fn synthetic_level(tick: u64) -> f32 {
    let t = tick as f32 * 0.01;
    let swell = 0.5 + 0.35 * (t * 0.7).sin();
    let ripple = 0.15 * (t * 5.3).sin() * (t * 0.23).cos();
    (swell + ripple).clamp(0.0, 1.0)
}

pub enum Producer {
    Input(InputCapture),
    Synthetic(SyntheticFeed),
}

impl Producer {
    pub fn label(&self) -> String {
        match self {
            Producer::Input(capture) => format!("input: {}", capture.device_name),
            Producer::Synthetic(_) => "synthetic".to_string(),
        }
    }
}
