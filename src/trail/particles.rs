use crate::foundation::{
    core::{Point, Vec2},
    rng::RandomSource,
};

/// Displacement (px between consecutive recorded points) above which a burst spawns.
pub const SPEED_THRESHOLD: f64 = 2.0;
/// Share of the displacement magnitude carried into initial particle speed.
pub const VELOCITY_SCALE: f64 = 0.15;
/// Upper bound of the random speed added on top of the scaled displacement.
pub const VELOCITY_JITTER: f64 = 1.0;
/// Initial life is drawn from `[LIFE_MIN, LIFE_MAX)`.
pub const LIFE_MIN: f64 = 0.6;
pub const LIFE_MAX: f64 = 1.0;
/// Particle size is the configured size times a factor drawn from `[SIZE_MIN, SIZE_MAX)`.
pub const SIZE_MIN: f64 = 0.5;
pub const SIZE_MAX: f64 = 1.5;
/// Life lost per second.
pub const LIFE_DECAY_PER_SEC: f64 = 1.5;
/// Velocity multiplier per reference frame.
pub const DAMPING_PER_FRAME: f64 = 0.94;
/// Velocities and drift are expressed per reference frame of this length.
pub const REFERENCE_FRAME_SECS: f64 = 1.0 / 60.0;

/// A free-flying dot spawned by fast pointer movement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Pixels per reference frame.
    pub vx: f64,
    pub vy: f64,
    pub life: f64,
    pub size: f64,
}

impl Particle {
    /// Current position.
    pub fn pos(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Radius shrinks linearly with remaining life.
    pub fn radius(self) -> f64 {
        (self.size * self.life).max(0.0)
    }
}

/// Per-burst parameters taken from configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstParams {
    pub count: usize,
    pub size: f64,
    pub spread_deg: f64,
}

/// Particles spawned by fast pointer motion, aged once per frame.
#[derive(Clone, Debug, Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    /// Empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// `true` when no particle is alive.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Live particles in spawn order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Particle> + '_ {
        self.particles.iter()
    }

    /// Drop every particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Spawn `params.count` particles at `origin` when `displacement` exceeds
    /// [`SPEED_THRESHOLD`]. Returns the number spawned.
    pub fn spawn_burst(
        &mut self,
        origin: Point,
        displacement: Vec2,
        params: BurstParams,
        rng: &mut dyn RandomSource,
    ) -> usize {
        let speed = displacement.hypot();
        if speed.is_nan() || speed <= SPEED_THRESHOLD || params.count == 0 {
            return 0;
        }

        let heading = displacement.atan2();
        let spread = params.spread_deg.max(0.0).to_radians();
        self.particles.reserve(params.count);
        for _ in 0..params.count {
            let angle = heading + (rng.next_f64_01() - 0.5) * spread;
            let magnitude = speed * VELOCITY_SCALE + rng.next_f64_01() * VELOCITY_JITTER;
            let v = Vec2::from_angle(angle) * magnitude;
            self.particles.push(Particle {
                x: origin.x,
                y: origin.y,
                vx: v.x,
                vy: v.y,
                life: rng.range(LIFE_MIN, LIFE_MAX),
                size: params.size.max(0.0) * rng.range(SIZE_MIN, SIZE_MAX),
            });
        }
        tracing::trace!(count = params.count, speed, "particle burst");
        params.count
    }

    /// Advance every particle by `dt` seconds and drop the expired ones.
    ///
    /// Position integrates velocity, velocity decays by [`DAMPING_PER_FRAME`] per reference
    /// frame, `drift` is added to `vy` per reference frame and life decays linearly.
    pub fn step(&mut self, dt: f64, drift: f64) {
        let frames = dt / REFERENCE_FRAME_SECS;
        let damping = DAMPING_PER_FRAME.powf(frames);
        for p in &mut self.particles {
            p.x += p.vx * frames;
            p.y += p.vy * frames;
            p.vx *= damping;
            p.vy *= damping;
            p.vy += drift * frames;
            p.life -= dt * LIFE_DECAY_PER_SEC;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trail/particles.rs"]
mod tests;
