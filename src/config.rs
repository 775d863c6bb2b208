use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::chart::{ChartTheme, Labels, LiveChart};
use crate::color::Color;
use crate::error::ConfigError;
use crate::gradient::{ColorStop, Domain};
use crate::ring::SampleRing;

const APP_DIR: &str = "stripchart";

/// Where the producer's samples come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleSource {
    /// Peak level of the default audio input, one sample per callback block.
    #[default]
    Input,
    /// Generated waveform on a background thread.
    Synthetic,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StopConfig {
    pub threshold: f32,
    pub color: [u8; 4],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub capacity: usize,
    pub range_low: f32,
    pub range_high: f32,
    pub reference: f32,
    pub caption: String,
    pub header: String,
    pub footer: String,
    pub background: [u8; 4],
    pub foreground: [u8; 4],
    pub text: [u8; 4],
    pub source: SampleSource,
    pub sample_interval_ms: u64,
    // serialized as [[stops]] tables, so it must stay the last field
    pub stops: Vec<StopConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let theme = ChartTheme::default();
        Self {
            capacity: 1000,
            range_low: 0.0,
            range_high: 1.0,
            reference: 0.0,
            caption: "Input level".to_string(),
            header: String::new(),
            footer: String::new(),
            background: theme.background.to_rgba8(),
            foreground: theme.foreground.to_rgba8(),
            text: theme.text.to_rgba8(),
            source: SampleSource::default(),
            sample_interval_ms: 10,
            stops: vec![
                StopConfig {
                    threshold: 0.0,
                    color: [40, 120, 255, 200],
                },
                StopConfig {
                    threshold: 0.6,
                    color: [80, 200, 120, 200],
                },
                StopConfig {
                    threshold: 0.9,
                    color: [255, 95, 95, 220],
                },
            ],
        }
    }
}

impl AppConfig {
    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Ok(toml::from_str(&raw)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self)?;
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, raw).map_err(io_err)
    }

    pub fn domain(&self) -> Result<Domain, ConfigError> {
        Ok(Domain::new(self.range_low, self.range_high)?)
    }

    pub fn theme(&self) -> ChartTheme {
        ChartTheme {
            background: Color::from(self.background),
            foreground: Color::from(self.foreground),
            text: Color::from(self.text),
        }
    }

    pub fn labels(&self) -> Labels {
        Labels {
            caption: self.caption.clone(),
            header: self.header.clone(),
            footer: self.footer.clone(),
        }
    }

    pub fn color_stops(&self) -> Vec<ColorStop> {
        self.stops
            .iter()
            .map(|stop| ColorStop::new(stop.threshold, Color::from(stop.color)))
            .collect()
    }

    /// Ring sized by `capacity`; fails for capacities below two.
    pub fn build_ring(&self) -> Result<Arc<SampleRing>, ConfigError> {
        Ok(Arc::new(SampleRing::new(self.capacity)?))
    }

    pub fn build_live_chart(&self, ring: Arc<SampleRing>) -> Result<LiveChart, ConfigError> {
        let mut chart = LiveChart::new(ring, self.domain()?, self.theme());
        chart.set_stops(&self.color_stops());
        chart.set_reference(self.reference);
        chart.labels = self.labels();
        Ok(chart)
    }
}

fn app_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

pub fn default_config_path() -> PathBuf {
    app_dir().join("config.toml")
}

/// Chart state saved between runs.
pub fn default_state_path() -> PathBuf {
    app_dir().join("chart_state.cfg")
}
