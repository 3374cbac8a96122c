use crate::{
    config::model::CompositeMode,
    foundation::core::{Point, Rgb8, SurfaceDesc},
};

/// Fill or stroke color with a straight alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub color: Rgb8,
    pub alpha: f64,
}

impl Paint {
    pub fn alpha_u8(self) -> u8 {
        (crate::foundation::core::clamp01(self.alpha) * 255.0).round() as u8
    }
}

/// One immediate-mode draw, in logical surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawOp {
    Circle {
        center: Point,
        radius: f64,
        paint: Paint,
    },
    /// Axis-aligned square of side `size` centered on `center`.
    Square {
        center: Point,
        size: f64,
        paint: Paint,
    },
    /// Round-capped line segment.
    Segment {
        from: Point,
        to: Point,
        width: f64,
        paint: Paint,
    },
}

impl DrawOp {
    pub fn paint(&self) -> Paint {
        match *self {
            Self::Circle { paint, .. } | Self::Square { paint, .. } | Self::Segment { paint, .. } => {
                paint
            }
        }
    }
}

/// Everything a backend needs to draw one frame.
///
/// Backends clear the surface before executing `ops` in order; `composite` applies to every op.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    pub surface: SurfaceDesc,
    pub composite: CompositeMode,
    pub ops: Vec<DrawOp>,
}

impl FramePlan {
    pub fn new(surface: SurfaceDesc, composite: CompositeMode) -> Self {
        Self {
            surface,
            composite,
            ops: Vec::new(),
        }
    }

    /// `true` when the frame only clears the surface.
    pub fn is_blank(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawOp> + '_ {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { .. }))
    }

    pub fn segments(&self) -> impl Iterator<Item = &DrawOp> + '_ {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Segment { .. }))
    }

    pub fn squares(&self) -> impl Iterator<Item = &DrawOp> + '_ {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Square { .. }))
    }
}
