//! Drawable geometry for one input state.
//!
//! A [`Scene`] is a list of line segments and text labels in canvas pixel
//! coordinates, with the origin at the top-left corner and y growing
//! downward. The interface lies along the horizontal axis through the canvas
//! centre and the normal along the vertical axis. The incident ray arrives
//! from above, the refracted ray leaves below.
//!
//! Nothing here depends on a graphics toolkit; a renderer only has to walk
//! [`Scene::segments`] and [`Scene::labels`].

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::readout::Readout;
use crate::snell::Refraction;

/// Offset of the critical angle label from the canvas centre, in pixels.
pub const LABEL_OFFSET: (f64, f64) = (10.0, -10.0);


/// Drawing surface dimensions, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    /// Length of each drawn ray.
    #[serde(default = "default_ray_length")]
    pub ray_length: f64,
}

fn default_ray_length() -> f64 {
    100.0
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            ray_length: default_ray_length(),
        }
    }
}

impl Canvas {
    pub fn centre(&self) -> Point2<f64> {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SegmentKind {
    /// Vertical axis through the centre.
    Normal,
    /// Horizontal axis through the centre, the interface itself.
    Boundary,
    Incident,
    /// Incident ray reflected in the normal.
    Mirror,
    Refracted,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl Segment {
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub anchor: Point2<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub readout: Readout,
    pub segments: Vec<Segment>,
    pub labels: Vec<Label>,
}

impl Scene {
    /// Lays out the axes and rays for an incidence angle `alpha` (degrees)
    /// travelling from index `n1` into `n2`.
    pub fn build(canvas: &Canvas, alpha: f64, n1: f64, n2: f64) -> Result<Self> {
        let readout = Readout::new(alpha, n1, n2)?;
        let centre = canvas.centre();
        let length = canvas.ray_length;

        let mut segments = vec![
            Segment {
                kind: SegmentKind::Normal,
                start: Point2::new(centre.x, 0.0),
                end: Point2::new(centre.x, canvas.height),
            },
            Segment {
                kind: SegmentKind::Boundary,
                start: Point2::new(0.0, centre.y),
                end: Point2::new(canvas.width, centre.y),
            },
        ];

        let (sin_a, cos_a) = alpha.to_radians().sin_cos();
        segments.push(Segment {
            kind: SegmentKind::Incident,
            start: centre,
            end: centre + Vector2::new(sin_a, -cos_a) * length,
        });
        segments.push(Segment {
            kind: SegmentKind::Mirror,
            start: centre,
            end: centre + Vector2::new(-sin_a, -cos_a) * length,
        });

        let mut labels = Vec::new();
        match readout.refraction {
            Refraction::Refracted(beta) => {
                let (sin_b, cos_b) = beta.to_radians().sin_cos();
                segments.push(Segment {
                    kind: SegmentKind::Refracted,
                    start: centre,
                    end: centre + Vector2::new(sin_b, cos_b) * length,
                });
            }
            Refraction::TotalInternalReflection => {
                if readout.exceeds_critical() {
                    if let Some(text) = readout.critical_label() {
                        labels.push(Label {
                            text,
                            anchor: centre + Vector2::new(LABEL_OFFSET.0, LABEL_OFFSET.1),
                        });
                    }
                }
            }
        }

        Ok(Self {
            readout,
            segments,
            labels,
        })
    }
}
