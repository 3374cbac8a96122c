use crate::{
    compile::plan::FramePlan,
    foundation::core::SurfaceDesc,
    foundation::error::TrailResult,
};

/// A rendered overlay frame as RGBA8 pixels at physical resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Convert to straight alpha, as image encoders expect.
    pub fn to_straight_alpha(&self) -> Self {
        let mut data = self.data.clone();
        if self.premultiplied {
            for px in data.chunks_exact_mut(4) {
                let a = u32::from(px[3]);
                if a == 0 {
                    px[..3].fill(0);
                    continue;
                }
                for c in &mut px[..3] {
                    *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
                }
            }
        }
        Self {
            width: self.width,
            height: self.height,
            data,
            premultiplied: false,
        }
    }

    /// Straight-alpha RGBA at pixel `(x, y)`, if in range.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Immediate-mode drawing target for frame plans.
///
/// Most callers go through [`execute_plan`], which skips frames the backend cannot draw.
pub trait TrailBackend {
    /// Create or resize the backing store. A zero-sized `desc` releases it.
    fn ensure_surface(&mut self, desc: &SurfaceDesc) -> TrailResult<()>;

    /// `true` once a non-empty backing store exists.
    fn has_surface(&self) -> bool;

    /// Clear the surface and draw every op of `plan`.
    fn exec_frame(&mut self, plan: &FramePlan) -> TrailResult<()>;

    /// Copy out the current surface contents, or `None` without a surface.
    fn readback_rgba8(&mut self) -> TrailResult<Option<FrameRGBA>>;
}

impl<B: TrailBackend + ?Sized> TrailBackend for Box<B> {
    fn ensure_surface(&mut self, desc: &SurfaceDesc) -> TrailResult<()> {
        (**self).ensure_surface(desc)
    }

    fn has_surface(&self) -> bool {
        (**self).has_surface()
    }

    fn exec_frame(&mut self, plan: &FramePlan) -> TrailResult<()> {
        (**self).exec_frame(plan)
    }

    fn readback_rgba8(&mut self) -> TrailResult<Option<FrameRGBA>> {
        (**self).readback_rgba8()
    }
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    Cpu,
}

/// Backend-agnostic settings.
#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// If set, frames clear to this straight RGBA8 color instead of transparent.
    pub clear_rgba: Option<[u8; 4]>,
}

/// Create a rendering backend implementation.
pub fn create_backend(kind: BackendKind, settings: &RenderSettings) -> Box<dyn TrailBackend> {
    match kind {
        BackendKind::Cpu => Box::new(crate::render::cpu::CpuBackend::new(settings.clone())),
    }
}

/// Draw `plan`, silently skipping zero-sized plans and backends without a surface.
///
/// Returns whether the frame reached the backend.
pub fn execute_plan<B: TrailBackend + ?Sized>(
    backend: &mut B,
    plan: &FramePlan,
) -> TrailResult<bool> {
    if plan.surface.is_empty() || !backend.has_surface() {
        return Ok(false);
    }
    backend.exec_frame(plan)?;
    Ok(true)
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
