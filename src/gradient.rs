//! Piecewise-linear color gradients over a numeric range.

use log::debug;

use crate::color::Color;
use crate::error::ChartError;

/// Closed numeric range `[low, high]` that samples are normalized against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    low: f32,
    high: f32,
}

impl Domain {
    pub fn new(low: f32, high: f32) -> Result<Self, ChartError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(ChartError::NonFiniteRange { low, high });
        }
        if low > high {
            return Err(ChartError::InvertedRange { low, high });
        }
        Ok(Self { low, high })
    }

    pub const fn unit() -> Self {
        Self {
            low: 0.0,
            high: 1.0,
        }
    }

    pub fn low(&self) -> f32 {
        self.low
    }

    pub fn high(&self) -> f32 {
        self.high
    }

    /// Maps `value` into `0.0..=1.0`.
    ///
    /// A zero-width range yields 0.5 for every input; NaN maps to 0.0 and
    /// infinities saturate.
    pub fn normalize(&self, value: f32) -> f32 {
        if self.low == self.high {
            return 0.5;
        }
        let t = (value - self.low) / (self.high - self.low);
        if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::unit()
    }
}

/// Anchor of a gradient: samples at `threshold` get exactly `color`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub threshold: f32,
    pub color: Color,
}

impl ColorStop {
    pub fn new(threshold: f32, color: Color) -> Self {
        Self { threshold, color }
    }
}

/// Maps sample values to colors by interpolating between sorted stops.
///
/// The canonical stop list is rebuilt from the last raw list whenever the
/// stops or the domain change. With no stops inside the domain every value
/// maps to the fallback color.
#[derive(Clone, Debug)]
pub struct GradientMapper {
    domain: Domain,
    raw: Vec<ColorStop>,
    stops: Vec<ColorStop>,
    fallback: Color,
}

impl GradientMapper {
    pub fn new(domain: Domain, fallback: Color) -> Self {
        Self {
            domain,
            raw: Vec::new(),
            stops: Vec::new(),
            fallback,
        }
    }

    /// Mapper over the fixed `[0, 1]` domain.
    pub fn unit(fallback: Color) -> Self {
        Self::new(Domain::unit(), fallback)
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn set_fallback(&mut self, fallback: Color) {
        self.fallback = fallback;
    }

    pub fn set_stops(&mut self, raw: &[ColorStop]) {
        self.raw = raw.to_vec();
        self.rebuild();
    }

    pub fn set_domain(&mut self, domain: Domain) {
        self.domain = domain;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.stops = canonical_stops(&self.raw, self.domain);
        if self.stops.len() != self.raw.len() {
            debug!(
                "gradient kept {} of {} stops inside [{}, {}]",
                self.stops.len(),
                self.raw.len(),
                self.domain.low,
                self.domain.high
            );
        }
    }

    pub fn color_at(&self, value: f32) -> Color {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return self.fallback;
        };
        let j = self.stops.partition_point(|stop| stop.threshold < value);
        let lower = if j > 0 { &self.stops[j - 1] } else { first };
        let upper = self.stops.get(j).unwrap_or(last);

        let m = if lower.threshold != upper.threshold {
            (value - lower.threshold) / (upper.threshold - lower.threshold)
        } else {
            0.5
        };
        Color::lerp(lower.color, upper.color, m)
    }
}

/// Sorts descending, drops the tail below `low`, reverses to ascending and
/// drops the tail above `high`. Equal thresholds collapse to the first stop
/// of each run in the ascending list.
fn canonical_stops(raw: &[ColorStop], domain: Domain) -> Vec<ColorStop> {
    let mut stops: Vec<ColorStop> = raw
        .iter()
        .filter(|stop| !stop.threshold.is_nan())
        .copied()
        .collect();

    stops.sort_by(|a, b| b.threshold.total_cmp(&a.threshold));
    while stops.last().is_some_and(|stop| stop.threshold < domain.low) {
        stops.pop();
    }
    stops.reverse();
    while stops.last().is_some_and(|stop| stop.threshold > domain.high) {
        stops.pop();
    }

    stops.dedup_by(|later, earlier| later.threshold == earlier.threshold);
    stops
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_to_white() -> GradientMapper {
        let mut mapper = GradientMapper::unit(Color::from_rgba8(255, 192, 0, 128));
        mapper.set_stops(&[
            ColorStop::new(1.0, Color::WHITE),
            ColorStop::new(0.0, Color::BLACK),
        ]);
        mapper
    }

    fn thresholds(mapper: &GradientMapper) -> Vec<f32> {
        mapper.stops().iter().map(|s| s.threshold).collect()
    }

    #[test]
    fn domain_rejects_bad_bounds() {
        assert_eq!(
            Domain::new(2.0, 1.0),
            Err(ChartError::InvertedRange {
                low: 2.0,
                high: 1.0
            })
        );
        assert!(matches!(
            Domain::new(f32::NEG_INFINITY, 1.0),
            Err(ChartError::NonFiniteRange { .. })
        ));
        assert!(Domain::new(3.0, 3.0).is_ok());
    }

    #[test]
    fn normalize_clamps_and_guards_zero_width() {
        let domain = Domain::new(0.0, 10.0).unwrap();
        assert_eq!(domain.normalize(5.0), 0.5);
        assert_eq!(domain.normalize(12.0), 1.0);
        assert_eq!(domain.normalize(-4.0), 0.0);
        assert_eq!(domain.normalize(f32::INFINITY), 1.0);
        assert_eq!(domain.normalize(f32::NEG_INFINITY), 0.0);
        assert_eq!(domain.normalize(f32::NAN), 0.0);

        let flat = Domain::new(3.0, 3.0).unwrap();
        assert_eq!(flat.normalize(3.0), 0.5);
        assert_eq!(flat.normalize(-100.0), 0.5);
        assert_eq!(flat.normalize(f32::NAN), 0.5);
    }

    #[test]
    fn interpolates_between_stops() {
        let mapper = black_to_white();
        assert_eq!(mapper.color_at(0.5), Color::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(mapper.color_at(-5.0), Color::BLACK);
        assert_eq!(mapper.color_at(5.0), Color::WHITE);
        assert_eq!(mapper.color_at(0.0), Color::BLACK);
        assert_eq!(mapper.color_at(1.0), Color::WHITE);
    }

    #[test]
    fn converges_on_a_stop_from_both_sides() {
        let red = Color::new(1.0, 0.0, 0.0, 1.0);
        let mut mapper = GradientMapper::unit(Color::TRANSPARENT);
        mapper.set_stops(&[
            ColorStop::new(0.0, Color::BLACK),
            ColorStop::new(0.5, red),
            ColorStop::new(1.0, Color::WHITE),
        ]);
        assert_eq!(mapper.color_at(0.5), red);
        for eps in [1e-2_f32, 1e-3, 1e-4] {
            for c in [mapper.color_at(0.5 - eps), mapper.color_at(0.5 + eps)] {
                assert!((c.r - red.r).abs() < eps * 4.0);
                assert!((c.g - red.g).abs() < eps * 4.0);
                assert!((c.b - red.b).abs() < eps * 4.0);
            }
        }
    }

    #[test]
    fn empty_gradient_uses_fallback_for_anything() {
        let fallback = Color::from_rgba8(255, 192, 0, 128);
        let mapper = GradientMapper::unit(fallback);
        for v in [0.0, 0.3, -1.0, f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert_eq!(mapper.color_at(v), fallback);
        }
    }

    #[test]
    fn single_stop_is_constant() {
        let mut mapper = GradientMapper::unit(Color::TRANSPARENT);
        mapper.set_stops(&[ColorStop::new(0.25, Color::WHITE)]);
        for v in [0.0, 0.25, 1.0, f32::NAN] {
            assert_eq!(mapper.color_at(v), Color::WHITE);
        }
    }

    #[test]
    fn prunes_out_of_range_and_sorts() {
        let mut mapper =
            GradientMapper::new(Domain::new(-1.0, 1.0).unwrap(), Color::TRANSPARENT);
        mapper.set_stops(&[
            ColorStop::new(5.0, Color::WHITE),
            ColorStop::new(0.5, Color::WHITE),
            ColorStop::new(-3.0, Color::BLACK),
            ColorStop::new(-1.0, Color::BLACK),
            ColorStop::new(1.0, Color::WHITE),
            ColorStop::new(f32::NAN, Color::WHITE),
            ColorStop::new(0.0, Color::BLACK),
        ]);
        assert_eq!(thresholds(&mapper), vec![-1.0, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn everything_out_of_range_falls_back() {
        let fallback = Color::gray(20, 128);
        let mut mapper = GradientMapper::unit(fallback);
        mapper.set_stops(&[
            ColorStop::new(-2.0, Color::BLACK),
            ColorStop::new(3.0, Color::WHITE),
        ]);
        assert!(mapper.stops().is_empty());
        assert_eq!(mapper.color_at(0.5), fallback);
    }

    #[test]
    fn later_duplicate_wins() {
        let red = Color::new(1.0, 0.0, 0.0, 1.0);
        let mut mapper = GradientMapper::unit(Color::TRANSPARENT);
        mapper.set_stops(&[
            ColorStop::new(0.5, Color::BLACK),
            ColorStop::new(0.0, Color::BLACK),
            ColorStop::new(0.5, red),
        ]);
        assert_eq!(thresholds(&mapper), vec![0.0, 0.5]);
        assert_eq!(mapper.stops()[1].color, red);
    }

    #[test]
    fn pruning_is_idempotent() {
        let mut mapper =
            GradientMapper::new(Domain::new(0.0, 10.0).unwrap(), Color::TRANSPARENT);
        mapper.set_stops(&[
            ColorStop::new(11.0, Color::WHITE),
            ColorStop::new(4.0, Color::gray(128, 255)),
            ColorStop::new(4.0, Color::gray(64, 255)),
            ColorStop::new(0.0, Color::BLACK),
            ColorStop::new(-0.5, Color::BLACK),
            ColorStop::new(10.0, Color::WHITE),
        ]);
        let once = mapper.stops().to_vec();
        mapper.set_stops(&once);
        assert_eq!(mapper.stops(), once.as_slice());
    }

    #[test]
    fn domain_change_rebuilds_from_raw_stops() {
        let mut mapper = GradientMapper::unit(Color::TRANSPARENT);
        mapper.set_stops(&[
            ColorStop::new(0.0, Color::BLACK),
            ColorStop::new(5.0, Color::WHITE),
        ]);
        assert_eq!(thresholds(&mapper), vec![0.0]);

        mapper.set_domain(Domain::new(0.0, 10.0).unwrap());
        assert_eq!(thresholds(&mapper), vec![0.0, 5.0]);
        assert_eq!(mapper.color_at(2.5), Color::new(0.5, 0.5, 0.5, 1.0));
    }
}
