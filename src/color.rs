/// Straight (non-premultiplied) RGBA color with channels in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Gray level and alpha, both as bytes.
    pub fn gray(level: u8, alpha: u8) -> Self {
        Self::from_rgba8(level, level, level, alpha)
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let quantize = |c: f32| -> u8 { (c.clamp(0.0, 1.0) * 255.0).round() as u8 };
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }

    /// Channel-wise linear blend from `from` (t = 0) to `to` (t = 1).
    ///
    /// `t` is clamped; a NaN factor blends halfway.
    pub fn lerp(from: Color, to: Color, t: f32) -> Color {
        let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
        let mix = |a: f32, b: f32| -> f32 { a + (b - a) * t };
        Color::new(
            mix(from.r, to.r),
            mix(from.g, to.g),
            mix(from.b, to.b),
            mix(from.a, to.a),
        )
    }
}

impl From<[u8; 4]> for Color {
    fn from(rgba: [u8; 4]) -> Self {
        Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
    }
}
