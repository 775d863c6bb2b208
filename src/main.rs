mod audio;
mod ui;

use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use stripchart::config::{AppConfig, SampleSource, default_config_path, default_state_path};
use stripchart::persist::{Persistent, SettingsFile};

use audio::{InputCapture, Producer, SyntheticFeed};
use ui::StripChartApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config_path = default_config_path();
    let config = AppConfig::load(&config_path).unwrap_or_else(|err| {
        warn!("{}: {err}; using defaults", config_path.display());
        AppConfig::default()
    });
    if !config_path.exists() {
        match config.save(&config_path) {
            Ok(()) => info!("wrote default config to {}", config_path.display()),
            Err(err) => warn!("could not write default config: {err}"),
        }
    }

    let (ring, mut live) = match config
        .build_ring()
        .and_then(|ring| Ok((Arc::clone(&ring), config.build_live_chart(ring)?)))
    {
        Ok(built) => built,
        Err(err) => {
            error!("invalid chart configuration ({err}); using defaults");
            let fallback = AppConfig::default();
            let ring = fallback
                .build_ring()
                .expect("default capacity is valid");
            let live = fallback
                .build_live_chart(Arc::clone(&ring))
                .expect("default range is valid");
            (ring, live)
        }
    };

    let state_path = default_state_path();
    match SettingsFile::open(&state_path) {
        Ok(state) if state.is_empty() => {}
        Ok(state) => {
            // a partial restore keeps whatever loaded before the failure
            if let Err(err) = live.load(&state) {
                warn!("chart state not fully restored: {err}");
            }
        }
        Err(err) => warn!("could not read chart state: {err}"),
    }

    let interval = Duration::from_millis(config.sample_interval_ms.max(1));
    let producer = match config.source {
        SampleSource::Input => match InputCapture::new(Arc::clone(&ring)) {
            Ok(capture) => Producer::Input(capture),
            Err(err) => {
                warn!("{err}; falling back to synthetic samples");
                Producer::Synthetic(SyntheticFeed::spawn(Arc::clone(&ring), interval))
            }
        },
        SampleSource::Synthetic => {
            Producer::Synthetic(SyntheticFeed::spawn(Arc::clone(&ring), interval))
        }
    };

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Strip Chart",
        options,
        Box::new(move |cc| Box::new(StripChartApp::new(cc, live, producer, state_path))),
    )
}
