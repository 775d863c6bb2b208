use egui::{Align2, Color32, FontId, Mesh, Painter, Pos2, Rect, Rounding, Shape, Stroke, pos2};

use crate::color::Color;
use crate::frame::{DrawSurface, TextAlign};

impl From<Color> for Color32 {
    fn from(color: Color) -> Self {
        let [r, g, b, a] = color.to_rgba8();
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}

impl From<TextAlign> for Align2 {
    fn from(align: TextAlign) -> Self {
        match align {
            TextAlign::LeftTop => Align2::LEFT_TOP,
            TextAlign::RightTop => Align2::RIGHT_TOP,
            TextAlign::RightBottom => Align2::RIGHT_BOTTOM,
        }
    }
}

/// Draws chart frames with an egui painter.
pub struct EguiSurface<'a> {
    painter: &'a Painter,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a Painter) -> Self {
        Self { painter }
    }
}

impl DrawSurface for EguiSurface<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.painter.rect_filled(rect, Rounding::ZERO, color);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.painter
            .rect_stroke(rect, Rounding::ZERO, Stroke::new(width, color));
    }

    fn fill_path(&mut self, points: &[Pos2], color: Color) {
        if points.len() < 3 {
            return;
        }
        self.painter
            .add(Shape::convex_polygon(points.to_vec(), color, Stroke::NONE));
    }

    fn fill_area(&mut self, points: &[Pos2], floor: f32, color: Color) {
        if points.len() < 2 {
            return;
        }
        // one unfeathered mesh, so neighbouring columns share edges without seams
        let fill = Color32::from(color);
        let mut mesh = Mesh::default();
        for p in points {
            mesh.colored_vertex(*p, fill);
            mesh.colored_vertex(pos2(p.x, floor), fill);
        }
        for i in 0..points.len() as u32 - 1 {
            let (top, bottom) = (2 * i, 2 * i + 1);
            mesh.add_triangle(top, bottom, top + 2);
            mesh.add_triangle(bottom, top + 3, top + 2);
        }
        self.painter.add(Shape::mesh(mesh));
    }

    fn stroke_path(&mut self, points: &[Pos2], color: Color, width: f32) {
        if points.len() < 2 {
            return;
        }
        self.painter
            .add(Shape::line(points.to_vec(), Stroke::new(width, color)));
    }

    fn text(&mut self, pos: Pos2, text: &str, size: f32, align: TextAlign, color: Color) {
        self.painter.text(
            pos,
            Align2::from(align),
            text,
            FontId::proportional(size),
            Color32::from(color),
        );
    }
}
