//! Display list produced by the renderer and the surface that consumes it.

use egui::{Pos2, Rect};

use crate::color::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    LeftTop,
    RightTop,
    RightBottom,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f32,
    },
    /// Closed convex polygon.
    FillPath {
        points: Vec<Pos2>,
        color: Color,
    },
    /// Region between a left-to-right polyline and the horizontal line
    /// `y = floor`, filled as one piece.
    FillArea {
        points: Vec<Pos2>,
        floor: f32,
        color: Color,
    },
    /// Open polyline.
    StrokePath {
        points: Vec<Pos2>,
        color: Color,
        width: f32,
    },
    Text {
        pos: Pos2,
        text: String,
        size: f32,
        align: TextAlign,
        color: Color,
    },
}

/// Primitive drawing operations a chart needs from its host.
pub trait DrawSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);
    fn fill_path(&mut self, points: &[Pos2], color: Color);
    fn fill_area(&mut self, points: &[Pos2], floor: f32, color: Color);
    fn stroke_path(&mut self, points: &[Pos2], color: Color, width: f32);
    fn text(&mut self, pos: Pos2, text: &str, size: f32, align: TextAlign, color: Color);
}

/// Ordered primitives for one rendered frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    primitives: Vec<Primitive>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn replay<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        for primitive in &self.primitives {
            match primitive {
                Primitive::FillRect { rect, color } => surface.fill_rect(*rect, *color),
                Primitive::StrokeRect { rect, color, width } => {
                    surface.stroke_rect(*rect, *color, *width)
                }
                Primitive::FillPath { points, color } => surface.fill_path(points, *color),
                Primitive::FillArea {
                    points,
                    floor,
                    color,
                } => surface.fill_area(points, *floor, *color),
                Primitive::StrokePath {
                    points,
                    color,
                    width,
                } => surface.stroke_path(points, *color, *width),
                Primitive::Text {
                    pos,
                    text,
                    size,
                    align,
                    color,
                } => surface.text(*pos, text, *size, *align, *color),
            }
        }
    }
}

/// Surface that records every call back into a frame.
#[derive(Debug, Default)]
pub struct Recorder {
    pub frame: Frame,
}

impl DrawSurface for Recorder {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.frame.push(Primitive::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.frame.push(Primitive::StrokeRect { rect, color, width });
    }

    fn fill_path(&mut self, points: &[Pos2], color: Color) {
        self.frame.push(Primitive::FillPath {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_area(&mut self, points: &[Pos2], floor: f32, color: Color) {
        self.frame.push(Primitive::FillArea {
            points: points.to_vec(),
            floor,
            color,
        });
    }

    fn stroke_path(&mut self, points: &[Pos2], color: Color, width: f32) {
        self.frame.push(Primitive::StrokePath {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn text(&mut self, pos: Pos2, text: &str, size: f32, align: TextAlign, color: Color) {
        self.frame.push(Primitive::Text {
            pos,
            text: text.to_string(),
            size,
            align,
            color,
        });
    }
}
