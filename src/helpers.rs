//! Rendering of a [`Scene`] with macroquad.
//!
//! Scene coordinates are already canvas pixels, so the only transform is a
//! translation to where the canvas sits inside the window.

use macroquad::prelude::*;

use crate::scene::{Scene, SegmentKind};

const AXIS_THICKNESS: f32 = 2.0;
const RAY_THICKNESS: f32 = 2.0;
const LABEL_FONT_SIZE: f32 = 16.0;

pub fn segment_color(kind: SegmentKind) -> Color {
    match kind {
        SegmentKind::Normal | SegmentKind::Boundary => BLUE,
        SegmentKind::Incident | SegmentKind::Mirror => RED,
        SegmentKind::Refracted => GREEN,
    }
}

/// Draws every segment and label of `scene` with the canvas origin placed
/// at `(offset_x, offset_y)` in window coordinates.
pub fn draw_scene(scene: &Scene, offset_x: f32, offset_y: f32) {
    for segment in &scene.segments {
        let thickness = match segment.kind {
            SegmentKind::Normal | SegmentKind::Boundary => AXIS_THICKNESS,
            _ => RAY_THICKNESS,
        };
        draw_line(
            segment.start.x as f32 + offset_x,
            segment.start.y as f32 + offset_y,
            segment.end.x as f32 + offset_x,
            segment.end.y as f32 + offset_y,
            thickness,
            segment_color(segment.kind),
        );
    }

    for label in &scene.labels {
        draw_text(
            &label.text,
            label.anchor.x as f32 + offset_x,
            label.anchor.y as f32 + offset_y,
            LABEL_FONT_SIZE,
            ORANGE,
        );
    }
}

/// Writes the input values and readout in the top-left corner of the window.
pub fn draw_readout(scene: &Scene, font_size: f32) {
    let readout = &scene.readout;
    let lines = [
        format!("alpha = {:.2} deg  [Up/Down]", readout.alpha),
        format!("n1 = {:.3}  [Q/A]", readout.n1),
        format!("n2 = {:.3}  [W/S]", readout.n2),
        readout.to_string(),
    ];
    for (i, line) in lines.iter().enumerate() {
        draw_text(line, 10.0, font_size * (i as f32 + 1.0), font_size, WHITE);
    }
}
