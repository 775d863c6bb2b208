use std::path::PathBuf;

use egui::{self, Color32, RichText, Rounding, Stroke};
use log::{info, warn};
use stripchart::chart::PREFERRED_SIZE;
use stripchart::persist::{Persistent, SettingsFile};
use stripchart::surface::EguiSurface;
use stripchart::{ChartRenderer, ChartTheme, Color, Labels, LiveChart, StaticChart};

use crate::audio::Producer;

const LIVE_HEIGHT: f32 = 140.0;
const HISTORY_HEIGHT: f32 = 90.0;

pub struct StripChartApp {
    live: LiveChart,
    history: StaticChart,
    _producer: Producer,
    producer_label: String,
    state_path: PathBuf,
    frozen: bool,
}

impl StripChartApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        live: LiveChart,
        producer: Producer,
        state_path: PathBuf,
    ) -> Self {
        apply_chart_theme(&cc.egui_ctx, &live.theme());
        let mut history = StaticChart::new(live.theme());
        history.labels = Labels::captioned("History (oldest → newest)");
        history.set_stops(&unit_stops(&live));
        let producer_label = producer.label();
        Self {
            live,
            history,
            _producer: producer,
            producer_label,
            state_path,
            frozen: false,
        }
    }

    fn refresh_history(&mut self) {
        let domain = self.live.domain();
        let values = self
            .live
            .ring()
            .snapshot()
            .chronological()
            .into_iter()
            .map(|v| domain.normalize(v))
            .collect();
        self.history.set_values(values);
    }

    fn save_state(&self) {
        let mut file = match SettingsFile::open(&self.state_path) {
            Ok(file) => file,
            Err(err) => {
                warn!("could not open chart state: {err}");
                return;
            }
        };
        self.live.save(&mut file);
        match file.save() {
            Ok(()) => info!("chart state saved to {}", file.path().display()),
            Err(err) => warn!("could not save chart state: {err}"),
        }
    }
}

/// The live gradient re-expressed over `[0, 1]` for the history strip.
fn unit_stops(live: &LiveChart) -> Vec<stripchart::ColorStop> {
    let domain = live.domain();
    live.mapper()
        .stops()
        .iter()
        .map(|stop| stripchart::ColorStop::new(domain.normalize(stop.threshold), stop.color))
        .collect()
}

impl eframe::App for StripChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            let accent = Color32::from(self.live.theme().foreground);
            self.live.labels.header = format!("{:.3}", self.live.ring().latest());
            self.live.labels.footer = format!(
                "{} samples · [{}, {}] · ref {}",
                self.live.ring().capacity(),
                self.live.domain().low(),
                self.live.domain().high(),
                self.live.reference()
            );
            let source = format!("source: {}", self.producer_label);
            card(
                ui,
                accent,
                "Live",
                |ui| {
                    ui.weak(source);
                },
                |ui| draw_chart(ui, &self.live, LIVE_HEIGHT),
            );

            if !self.frozen {
                self.refresh_history();
            }
            ui.add_space(8.0);
            let frozen = &mut self.frozen;
            card(
                ui,
                accent,
                "History",
                |ui| {
                    ui.checkbox(frozen, "Freeze");
                },
                |ui| draw_chart(ui, &self.history, HISTORY_HEIGHT),
            );
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_state();
    }
}

fn draw_chart(ui: &mut egui::Ui, chart: &impl ChartRenderer, height: f32) {
    let desired = egui::vec2(
        ui.available_width().max(PREFERRED_SIZE.x),
        height.max(PREFERRED_SIZE.y),
    );
    let (rect, _) = ui.allocate_exact_size(desired, egui::Sense::hover());
    let painter = ui.painter_at(rect);
    chart.render(rect).replay(&mut EguiSurface::new(&painter));
}

/// Titled panel around one chart; `controls` sit right-aligned in the title row.
fn card(
    ui: &mut egui::Ui,
    accent: Color32,
    title: &str,
    controls: impl FnOnce(&mut egui::Ui),
    chart: impl FnOnce(&mut egui::Ui),
) {
    egui::Frame::group(ui.style())
        .rounding(Rounding::same(4.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(title).color(accent).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), controls);
            });
            chart(ui);
        });
}

/// Window chrome picked from the chart colors so the widgets sit on a
/// matching backdrop.
fn apply_chart_theme(ctx: &egui::Context, theme: &ChartTheme) {
    let opaque = |color: Color| Color32::from(Color { a: 1.0, ..color });
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = opaque(Color::lerp(theme.background, Color::BLACK, 0.6));
    visuals.override_text_color = Some(opaque(theme.text));
    visuals.selection.bg_fill = opaque(theme.foreground);
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, opaque(theme.background));
    ctx.set_visuals(visuals);
}
