use vello_cpu::kurbo::Shape as _;

use crate::{
    compile::plan::{DrawOp, FramePlan, Paint},
    config::model::CompositeMode,
    foundation::core::{Point, SurfaceDesc},
    foundation::error::{TrailError, TrailResult},
    render::backend::{FrameRGBA, RenderSettings, TrailBackend},
};

/// Flattening tolerance for circles, in physical pixels.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// CPU raster backend powered by `vello_cpu`.
pub struct CpuBackend {
    settings: RenderSettings,
    surface: Option<CpuSurface>,
}

struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CpuBackend {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            surface: None,
        }
    }

    /// Physical size of the current backing store.
    pub fn surface_size(&self) -> Option<(u32, u32)> {
        self.surface
            .as_ref()
            .map(|s| (u32::from(s.width), u32::from(s.height)))
    }
}

impl TrailBackend for CpuBackend {
    fn ensure_surface(&mut self, desc: &SurfaceDesc) -> TrailResult<()> {
        if desc.is_empty() {
            self.surface = None;
            return Ok(());
        }

        let width: u16 = desc
            .pixel_width
            .try_into()
            .map_err(|_| TrailError::surface("surface width exceeds u16"))?;
        let height: u16 = desc
            .pixel_height
            .try_into()
            .map_err(|_| TrailError::surface("surface height exceeds u16"))?;

        match &self.surface {
            Some(s) if s.width == width && s.height == height => {}
            _ => {
                tracing::debug!(width, height, "allocating trail surface");
                self.surface = Some(CpuSurface {
                    width,
                    height,
                    pixmap: vello_cpu::Pixmap::new(width, height),
                });
            }
        }
        Ok(())
    }

    fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    fn exec_frame(&mut self, plan: &FramePlan) -> TrailResult<()> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };

        let clear = self
            .settings
            .clear_rgba
            .map(|[r, g, b, a]| premul_rgba8(r, g, b, a))
            .unwrap_or([0, 0, 0, 0]);
        clear_pixmap(&mut surface.pixmap, clear);
        if plan.ops.is_empty() {
            return Ok(());
        }

        let mut ctx = vello_cpu::RenderContext::new(surface.width, surface.height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        // The rendered scene replaces the pixmap, so the backdrop is its first fill.
        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(surface.width),
                f64::from(surface.height),
            ));
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::scale(plan.surface.scale));
        ctx.set_blend_mode(blend_mode(plan.composite));
        for op in &plan.ops {
            draw_op(&mut ctx, op);
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut surface.pixmap);
        Ok(())
    }

    fn readback_rgba8(&mut self) -> TrailResult<Option<FrameRGBA>> {
        Ok(self.surface.as_ref().map(|s| FrameRGBA {
            width: u32::from(s.width),
            height: u32::from(s.height),
            data: s.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }))
    }
}

fn blend_mode(mode: CompositeMode) -> vello_cpu::peniko::BlendMode {
    use vello_cpu::peniko::{BlendMode, Compose, Mix};

    match mode {
        CompositeMode::Normal => BlendMode::default(),
        CompositeMode::Additive => BlendMode::new(Mix::Normal, Compose::Plus),
        CompositeMode::Screen => BlendMode::new(Mix::Screen, Compose::SrcOver),
    }
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, op: &DrawOp) {
    match *op {
        DrawOp::Circle {
            center,
            radius,
            paint,
        } => {
            set_paint(ctx, paint);
            let circle = vello_cpu::kurbo::Circle::new(point_to_cpu(center), radius.max(0.0));
            ctx.fill_path(&circle.to_path(CIRCLE_TOLERANCE));
        }
        DrawOp::Square {
            center,
            size,
            paint,
        } => {
            set_paint(ctx, paint);
            let half = size.max(0.0) / 2.0;
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                center.x - half,
                center.y - half,
                center.x + half,
                center.y + half,
            ));
        }
        DrawOp::Segment {
            from,
            to,
            width,
            paint,
        } => {
            set_paint(ctx, paint);
            ctx.set_stroke(
                vello_cpu::kurbo::Stroke::new(width.max(0.0))
                    .with_caps(vello_cpu::kurbo::Cap::Round),
            );
            let mut path = vello_cpu::kurbo::BezPath::new();
            path.move_to(point_to_cpu(from));
            path.line_to(point_to_cpu(to));
            ctx.stroke_path(&path);
        }
    }
}

fn set_paint(ctx: &mut vello_cpu::RenderContext, paint: Paint) {
    let c = paint.color;
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        c.r,
        c.g,
        c.b,
        paint.alpha_u8(),
    ));
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn premul_rgba8(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    let premul = |c: u8| -> u8 { ((u16::from(c) * u16::from(a) + 127) / 255) as u8 };
    [premul(r), premul(g), premul(b), a]
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}
