use crate::{
    compile::{
        plan::FramePlan,
        strategy::{StyleCtx, compile_ops},
    },
    config::model::{Palette, TrailConfig, Variant},
    foundation::{
        core::{Point, SurfaceDesc},
        rng::{RandomSource, Rng64},
    },
    trail::{
        particles::{BurstParams, ParticlePool},
        points::{Insertion, TrailQueue},
    },
};

/// Owns the trail queue, the particle pool and the resolved palette.
///
/// All mutation happens through `&mut self`, so a renderer is confined to whichever thread or task
/// holds it.
pub struct TrailRenderer {
    config: TrailConfig,
    palette: Palette,
    queue: TrailQueue,
    particles: ParticlePool,
    rng: Box<dyn RandomSource>,
}

impl std::fmt::Debug for TrailRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrailRenderer")
            .field("variant", &self.config.variant)
            .field("points", &self.queue.len())
            .field("particles", &self.particles.len())
            .finish()
    }
}

impl TrailRenderer {
    /// Renderer seeded from `config.seed`.
    pub fn new(config: TrailConfig) -> Self {
        let rng = Rng64::new(config.seed);
        Self::with_rng(config, Box::new(rng))
    }

    /// Renderer drawing particle randomness from `rng` instead of the configured seed.
    pub fn with_rng(config: TrailConfig, rng: Box<dyn RandomSource>) -> Self {
        let config = config.sanitized();
        Self {
            palette: config.palette(),
            queue: TrailQueue::new(config.trail_length),
            particles: ParticlePool::new(),
            rng,
            config,
        }
    }

    /// Active configuration, after sanitizing.
    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    /// Resolved start and end colors.
    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Trail points, oldest first.
    pub fn queue(&self) -> &TrailQueue {
        &self.queue
    }

    /// Live particles.
    pub fn particles(&self) -> &ParticlePool {
        &self.particles
    }

    /// Swap configuration in place, keeping the newest points that fit the new capacity.
    ///
    /// Particles survive only while the variant stays `Particles`.
    pub fn reconfigure(&mut self, config: TrailConfig) {
        let config = config.sanitized();
        self.queue.set_capacity(config.trail_length);
        if config.variant != Variant::Particles {
            self.particles.clear();
        }
        self.palette = config.palette();
        self.config = config;
    }

    /// Drop every point and particle.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.particles.clear();
    }

    /// Record a surface-local pointer position.
    pub fn add_point(&mut self, x: f64, y: f64) {
        let spacing = match self.config.variant {
            Variant::Dots => Some(self.config.dot_spacing),
            _ => None,
        };
        let Insertion::Inserted { prev, point } =
            self.queue
                .push(Point::new(x, y), self.config.smoothing, spacing)
        else {
            return;
        };

        if self.config.variant == Variant::Particles
            && let Some(prev) = prev
        {
            self.particles.spawn_burst(
                point,
                point - prev,
                BurstParams {
                    count: self.config.particle_count,
                    size: self.config.particle_size,
                    spread_deg: self.config.spread_deg,
                },
                self.rng.as_mut(),
            );
        }
    }

    /// Apply `dt` seconds of decay and integration, then compile this frame's draw ops.
    ///
    /// Non-finite or negative `dt` counts as zero; clamping long pauses is the frame driver's job.
    pub fn render_frame(&mut self, dt: f64, surface: SurfaceDesc) -> FramePlan {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut plan = FramePlan::new(surface, self.config.composite);

        if self.config.auto_fade {
            let amount = if self.config.fade_duration > 0.0 {
                dt / self.config.fade_duration
            } else if dt > 0.0 {
                f64::INFINITY
            } else {
                0.0
            };
            self.queue.decay(amount);
        }
        self.particles.step(dt, self.config.drift);

        if self.queue.is_empty() {
            return plan;
        }

        let style = StyleCtx {
            config: &self.config,
            palette: self.palette,
        };
        compile_ops(
            self.config.variant,
            style,
            &self.queue,
            &self.particles,
            &mut plan.ops,
        );
        plan
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trail/engine.rs"]
mod tests;
