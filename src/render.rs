//! Turns chart state into frame geometry.

use egui::{Pos2, Rect, pos2, vec2};
use log::trace;

use crate::chart::{Labels, LiveChart, StaticChart};
use crate::color::Color;
use crate::frame::{Frame, Primitive, TextAlign};
use crate::gradient::Domain;

const CURSOR_COLOR: [u8; 4] = [255, 0, 0, 192];
const CURSOR_WIDTH: f32 = 4.0;
const BASELINE_GRAY: (u8, u8) = (192, 192);
const OUTLINE_GRAY: (u8, u8) = (100, 255);

const CAPTION_SIZE: f32 = 14.0;
const HEADER_SIZE: f32 = 18.0;
const FOOTER_SIZE: f32 = 15.0;
const TEXT_INSET: f32 = 3.0;

pub trait ChartRenderer {
    /// Geometry and colors for one frame inside `bounds`.
    fn render(&self, bounds: Rect) -> Frame;
}

impl ChartRenderer for LiveChart {
    fn render(&self, bounds: Rect) -> Frame {
        let mut frame = Frame::new();
        push_background(&mut frame, bounds, self.theme().background);

        let snapshot = self.ring().snapshot();
        let capacity = snapshot.capacity();
        let cursor = snapshot.cursor;
        let domain = self.domain();
        let baseline = y_for(bounds, self.reference_position());

        let slots = SlotGeometry {
            bounds,
            span: (capacity - 1) as f32,
            baseline,
            domain,
        };
        // slot 0 has no column to its left
        for range in [1..cursor, (cursor + capacity / 10).max(1)..capacity] {
            for i in range {
                let value = snapshot.values[i];
                frame.push(Primitive::FillPath {
                    points: slots.quad(i, value),
                    color: self.mapper().color_at(value),
                });
            }
        }

        let cursor_x = bounds.min.x + cursor as f32 * bounds.width() / slots.span;
        frame.push(Primitive::FillRect {
            rect: Rect::from_min_size(
                pos2(cursor_x - CURSOR_WIDTH / 2.0, bounds.min.y),
                vec2(CURSOR_WIDTH, bounds.height()),
            ),
            color: Color::from(CURSOR_COLOR),
        });
        frame.push(Primitive::FillRect {
            rect: Rect::from_min_size(pos2(bounds.min.x, baseline), vec2(bounds.width(), 1.0)),
            color: Color::gray(BASELINE_GRAY.0, BASELINE_GRAY.1),
        });

        push_labels(&mut frame, bounds, &self.labels, self.theme().text);
        push_border(&mut frame, bounds);
        frame
    }
}

impl ChartRenderer for StaticChart {
    fn render(&self, bounds: Rect) -> Frame {
        let mut frame = Frame::new();
        push_background(&mut frame, bounds, self.theme().background);

        let values = self.values();
        if values.len() >= 2 {
            let domain = Domain::unit();
            let span = (values.len() - 1) as f32;
            let bottom = bounds.max.y;
            let point = |i: usize| {
                pos2(
                    bounds.min.x + i as f32 * bounds.width() / span,
                    y_for(bounds, domain.normalize(values[i])),
                )
            };

            let outline: Vec<Pos2> = (0..values.len()).map(point).collect();
            if self.has_gradient() {
                for (i, pair) in outline.windows(2).enumerate() {
                    let (u, v) = (pair[0], pair[1]);
                    let color = self.mapper().color_at((values[i] + values[i + 1]) / 2.0);
                    frame.push(Primitive::FillPath {
                        points: vec![pos2(u.x, bottom), u, v, pos2(v.x, bottom)],
                        color,
                    });
                    frame.push(Primitive::StrokePath {
                        points: vec![u, v],
                        color,
                        width: 1.0,
                    });
                }
            } else {
                frame.push(Primitive::FillArea {
                    points: outline.clone(),
                    floor: bottom,
                    color: self.theme().foreground,
                });
                frame.push(Primitive::StrokePath {
                    points: outline,
                    color: Color::gray(OUTLINE_GRAY.0, OUTLINE_GRAY.1),
                    width: 1.0,
                });
            }
        } else {
            trace!("static chart has {} values, nothing to plot", values.len());
        }

        push_labels(&mut frame, bounds, &self.labels, self.theme().text);
        push_border(&mut frame, bounds);
        frame
    }
}

struct SlotGeometry {
    bounds: Rect,
    span: f32,
    baseline: f32,
    domain: Domain,
}

impl SlotGeometry {
    /// Bar from the baseline to the sample, covering the slot's column.
    fn quad(&self, index: usize, value: f32) -> Vec<Pos2> {
        let left = self.bounds.min.x + (index as f32 - 1.0) * self.bounds.width() / self.span;
        let right = self.bounds.min.x + index as f32 * self.bounds.width() / self.span;
        let top = y_for(self.bounds, self.domain.normalize(value));
        vec![
            pos2(left, self.baseline),
            pos2(left, top),
            pos2(right, top),
            pos2(right, self.baseline),
        ]
    }
}

/// Screen y of a normalized height; 1.0 is the top edge.
fn y_for(bounds: Rect, normalized: f32) -> f32 {
    bounds.min.y + (1.0 - normalized) * bounds.height()
}

fn push_background(frame: &mut Frame, bounds: Rect, color: Color) {
    frame.push(Primitive::FillRect {
        rect: bounds,
        color,
    });
}

fn push_labels(frame: &mut Frame, bounds: Rect, labels: &Labels, color: Color) {
    if !labels.caption.is_empty() {
        frame.push(Primitive::Text {
            pos: pos2(bounds.min.x + TEXT_INSET, bounds.min.y + 1.0),
            text: labels.caption.clone(),
            size: CAPTION_SIZE,
            align: TextAlign::LeftTop,
            color,
        });
    }
    if !labels.header.is_empty() {
        frame.push(Primitive::Text {
            pos: pos2(bounds.max.x - TEXT_INSET, bounds.min.y + 1.0),
            text: labels.header.clone(),
            size: HEADER_SIZE,
            align: TextAlign::RightTop,
            color,
        });
    }
    if !labels.footer.is_empty() {
        frame.push(Primitive::Text {
            pos: pos2(bounds.max.x - TEXT_INSET, bounds.max.y - 1.0),
            text: labels.footer.clone(),
            size: FOOTER_SIZE,
            align: TextAlign::RightBottom,
            color,
        });
    }
}

fn push_border(frame: &mut Frame, bounds: Rect) {
    frame.push(Primitive::StrokeRect {
        rect: bounds,
        color: Color::gray(OUTLINE_GRAY.0, OUTLINE_GRAY.1),
        width: 1.0,
    });
}
