use crate::{
    compile::plan::{DrawOp, Paint},
    config::model::{Palette, TrailConfig, Variant},
    foundation::core::{Point, clamp01},
    trail::{particles::ParticlePool, points::TrailQueue},
};

/// Alpha multiplier for the connecting line drawn under particles.
pub const PARTICLE_TRAIL_ALPHA: f64 = 0.15;
/// Narrowest stroke, as a share of the configured width, when width fading is on.
pub const MIN_WIDTH_SCALE: f64 = 0.3;

/// Shared inputs of every strategy.
#[derive(Clone, Copy, Debug)]
pub struct StyleCtx<'a> {
    pub config: &'a TrailConfig,
    pub palette: Palette,
}

impl StyleCtx<'_> {
    /// Alpha for the point at normalized position `t` with remaining `life`.
    pub fn point_alpha(&self, t: f64, life: f64) -> f64 {
        let life = if self.config.auto_fade { life } else { 1.0 };
        clamp01(self.config.easing.apply(t) * life)
    }

    pub fn stroke_width(&self, alpha: f64) -> f64 {
        let w = self.config.line_width;
        if self.config.fade_width {
            w * (MIN_WIDTH_SCALE + (1.0 - MIN_WIDTH_SCALE) * clamp01(alpha))
        } else {
            w
        }
    }
}

/// Normalized index: `0` at the oldest point, `1` at the newest. A lone point is the newest.
pub fn position_t(idx: usize, len: usize) -> f64 {
    if len <= 1 {
        1.0
    } else {
        idx as f64 / (len - 1) as f64
    }
}

/// Snap `p` to the nearest multiple of `cell` on each axis.
pub fn snap_to_grid(p: Point, cell: f64) -> Point {
    if !(cell.is_finite() && cell > 0.0) {
        return p;
    }
    Point::new((p.x / cell).round() * cell, (p.y / cell).round() * cell)
}

/// Emit draw ops for `variant` in back-to-front order.
pub fn compile_ops(
    variant: Variant,
    style: StyleCtx<'_>,
    queue: &TrailQueue,
    particles: &ParticlePool,
    ops: &mut Vec<DrawOp>,
) {
    if queue.is_empty() {
        return;
    }
    match variant {
        Variant::Line => line(style, queue, 1.0, ops),
        Variant::Dots => dots(style, queue, ops),
        Variant::Pixel => pixel(style, queue, ops),
        Variant::Particles => {
            line(style, queue, PARTICLE_TRAIL_ALPHA, ops);
            particle_dots(style, particles, ops);
        }
    }
}

fn push_visible(ops: &mut Vec<DrawOp>, op: DrawOp, extent: f64) {
    if op.paint().alpha > 0.0 && extent > 0.0 {
        ops.push(op);
    }
}

fn line(style: StyleCtx<'_>, queue: &TrailQueue, alpha_scale: f64, ops: &mut Vec<DrawOp>) {
    let n = queue.len();
    let mut points = queue.iter();

    if n == 1 {
        let Some(p) = points.next() else {
            return;
        };
        let alpha = clamp01(style.point_alpha(1.0, p.life) * alpha_scale);
        let radius = style.config.line_width / 2.0;
        push_visible(
            ops,
            DrawOp::Circle {
                center: p.pos(),
                radius,
                paint: Paint {
                    color: style.palette.at(1.0),
                    alpha,
                },
            },
            radius,
        );
        return;
    }

    let Some(mut prev) = points.next() else {
        return;
    };
    for (i, cur) in points.enumerate() {
        let idx = i + 1;
        let t = position_t(idx, n);
        let base = style.point_alpha(t, cur.life);
        let width = style.stroke_width(base);
        push_visible(
            ops,
            DrawOp::Segment {
                from: prev.pos(),
                to: cur.pos(),
                width,
                paint: Paint {
                    color: style.palette.at(t),
                    alpha: clamp01(base * alpha_scale),
                },
            },
            width,
        );
        prev = cur;
    }
}

fn dots(style: StyleCtx<'_>, queue: &TrailQueue, ops: &mut Vec<DrawOp>) {
    let n = queue.len();
    for (i, p) in queue.iter().enumerate() {
        let t = position_t(i, n);
        let alpha = style.point_alpha(t, p.life);
        let radius = style.config.dot_size / 2.0 * alpha;
        push_visible(
            ops,
            DrawOp::Circle {
                center: p.pos(),
                radius,
                paint: Paint {
                    color: style.palette.at(t),
                    alpha,
                },
            },
            radius,
        );
    }
}

fn pixel(style: StyleCtx<'_>, queue: &TrailQueue, ops: &mut Vec<DrawOp>) {
    let n = queue.len();
    let cell = style.config.pixel_size;
    for (i, p) in queue.iter().enumerate() {
        let t = position_t(i, n);
        let alpha = style.point_alpha(t, p.life);
        let center = if style.config.grid_snap {
            snap_to_grid(p.pos(), cell)
        } else {
            p.pos()
        };
        let size = cell * alpha;
        push_visible(
            ops,
            DrawOp::Square {
                center,
                size,
                paint: Paint {
                    color: style.palette.at(t),
                    alpha,
                },
            },
            size,
        );
    }
}

fn particle_dots(style: StyleCtx<'_>, particles: &ParticlePool, ops: &mut Vec<DrawOp>) {
    for p in particles.iter() {
        let alpha = clamp01(p.life);
        let radius = p.radius();
        push_visible(
            ops,
            DrawOp::Circle {
                center: p.pos(),
                radius,
                paint: Paint {
                    color: style.palette.at(alpha),
                    alpha,
                },
            },
            radius,
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/strategy.rs"]
mod tests;
