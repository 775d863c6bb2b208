use std::sync::Arc;

use crate::color::Color;
use crate::gradient::{ColorStop, Domain, GradientMapper};
use crate::ring::SampleRing;

/// Size a chart asks for when the host has no better idea.
pub const PREFERRED_SIZE: egui::Vec2 = egui::vec2(180.0, 45.0);

/// Colors a chart is drawn with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartTheme {
    pub background: Color,
    /// Fill when no gradient applies.
    pub foreground: Color,
    pub text: Color,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: Color::gray(20, 128),
            foreground: Color::from_rgba8(255, 192, 0, 128),
            text: Color::gray(240, 192),
        }
    }
}

/// Caption (top left), header (top right) and footer (bottom right).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Labels {
    pub caption: String,
    pub header: String,
    pub footer: String,
}

impl Labels {
    pub fn captioned(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            ..Self::default()
        }
    }
}

/// Scrolling chart over a shared ring, colored by a range-aware gradient.
pub struct LiveChart {
    ring: Arc<SampleRing>,
    mapper: GradientMapper,
    reference: f32,
    pub labels: Labels,
    theme: ChartTheme,
}

impl LiveChart {
    pub fn new(ring: Arc<SampleRing>, domain: Domain, theme: ChartTheme) -> Self {
        Self {
            ring,
            mapper: GradientMapper::new(domain, theme.foreground),
            reference: 0.0,
            labels: Labels::default(),
            theme,
        }
    }

    pub fn ring(&self) -> &Arc<SampleRing> {
        &self.ring
    }

    pub fn mapper(&self) -> &GradientMapper {
        &self.mapper
    }

    pub fn domain(&self) -> Domain {
        self.mapper.domain()
    }

    /// Changes the range; the stops are re-pruned against it and the
    /// reference marker re-clamps on the next render.
    pub fn set_range(&mut self, domain: Domain) {
        self.mapper.set_domain(domain);
    }

    pub fn set_stops(&mut self, stops: &[ColorStop]) {
        self.mapper.set_stops(stops);
    }

    pub fn reference(&self) -> f32 {
        self.reference
    }

    pub fn set_reference(&mut self, reference: f32) {
        self.reference = reference;
    }

    /// Normalized height of the reference line, always within `0.0..=1.0`.
    pub fn reference_position(&self) -> f32 {
        self.mapper.domain().normalize(self.reference)
    }

    pub fn theme(&self) -> ChartTheme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: ChartTheme) {
        self.theme = theme;
        self.mapper.set_fallback(theme.foreground);
    }
}

/// Whole-buffer chart of values already scaled to `[0, 1]`.
pub struct StaticChart {
    values: Vec<f32>,
    mapper: GradientMapper,
    pub labels: Labels,
    theme: ChartTheme,
}

impl StaticChart {
    pub fn new(theme: ChartTheme) -> Self {
        Self {
            values: Vec::new(),
            mapper: GradientMapper::unit(theme.foreground),
            labels: Labels::default(),
            theme,
        }
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn set_values(&mut self, values: Vec<f32>) {
        self.values = values;
    }

    pub fn mapper(&self) -> &GradientMapper {
        &self.mapper
    }

    pub fn set_stops(&mut self, stops: &[ColorStop]) {
        self.mapper.set_stops(stops);
    }

    /// Segments are colored only when at least one stop lies in `[0, 1]`.
    pub fn has_gradient(&self) -> bool {
        !self.mapper.stops().is_empty()
    }

    pub fn theme(&self) -> ChartTheme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: ChartTheme) {
        self.theme = theme;
        self.mapper.set_fallback(theme.foreground);
    }
}
