//! Pointer-trail overlay engine.
//!
//! A [`TrailRenderer`] records pointer positions into a bounded queue, decays them over time and,
//! once per display frame, compiles its state into a backend-agnostic [`FramePlan`] for one of
//! four visual variants (line, dots, particles, pixel).
//!
//! # Pipeline overview
//!
//! 1. **Ingest**: pointer events -> [`TrailRenderer::add_point`] (spacing gate, smoothing,
//!    eviction, particle bursts)
//! 2. **Step**: [`TrailRenderer::render_frame`] decays life, integrates particles and compiles a
//!    [`FramePlan`]
//! 3. **Render**: [`execute_plan`] draws the plan through a [`TrailBackend`] ([`CpuBackend`] by
//!    default)
//!
//! [`Mounted`] ties the pipeline to a [`Host`] (event subscription, frame scheduling, surface
//! measurement) and releases every binding when it goes away. [`Scene`] replays recorded pointer
//! activity headlessly.
//!
//! The engine never fails for cosmetic reasons: unparseable colors resolve to black, degenerate
//! numbers are clamped and frames on an absent or zero-sized surface are skipped.
#![forbid(unsafe_code)]

mod animation;
mod compile;
mod config;
mod foundation;
mod host;
mod render;
mod trail;

pub use animation::ease::Ease;
pub use compile::plan::{DrawOp, FramePlan, Paint};
pub use compile::strategy::{
    MIN_WIDTH_SCALE, PARTICLE_TRAIL_ALPHA, StyleCtx, compile_ops, position_t, snap_to_grid,
};
pub use config::color::{parse_color, resolve_color};
pub use config::model::{CompositeMode, FillMode, Palette, TrailConfig, Variant};
pub use foundation::core::{
    Point, Rect, Rgb8, SurfaceBounds, SurfaceDesc, Vec2, Viewport, clamp01,
};
pub use foundation::error::{TrailError, TrailResult};
pub use foundation::rng::{RandomSource, Rng64, SequenceRng};
pub use host::lifecycle::{
    FrameHandle, Host, HostEvent, ListenerId, ListenerKind, Mounted, Overlay,
};
pub use host::script::{
    Cue, MAX_SCENE_FRAMES, PointerSample, ResizeSample, Scene, ScriptedHost,
};
pub use render::backend::{
    BackendKind, FrameRGBA, RenderSettings, TrailBackend, create_backend, execute_plan,
};
pub use render::cpu::CpuBackend;
pub use trail::engine::TrailRenderer;
pub use trail::particles::{BurstParams, Particle, ParticlePool};
pub use trail::points::{Insertion, TrailPoint, TrailQueue};

/// Tunables of particle bursts and integration.
pub mod particle_consts {
    pub use crate::trail::particles::{
        DAMPING_PER_FRAME, LIFE_DECAY_PER_SEC, LIFE_MAX, LIFE_MIN, REFERENCE_FRAME_SECS,
        SIZE_MAX, SIZE_MIN, SPEED_THRESHOLD, VELOCITY_JITTER, VELOCITY_SCALE,
    };
}
