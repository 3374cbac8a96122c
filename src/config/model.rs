use crate::{
    animation::ease::Ease,
    config::color::resolve_color,
    foundation::core::Rgb8,
    foundation::error::TrailResult,
};

/// Rendering strategy, dispatched once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Line,
    Dots,
    Particles,
    Pixel,
}

/// How trail color is chosen along the sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    #[default]
    Solid,
    /// Interpolate `color` (oldest) to `color_end` (newest).
    Gradient,
}

/// Pixel-blending rule applied to every draw in a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositeMode {
    #[default]
    Normal,
    Additive,
    Screen,
}

/// Trail renderer configuration.
///
/// Every field is optional in JSON; missing fields take the values of [`TrailConfig::default`].
/// camelCase spellings are accepted as aliases.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub variant: Variant,
    #[serde(alias = "fillMode")]
    pub fill: FillMode,
    pub color: String,
    #[serde(alias = "colorEnd", alias = "color2")]
    pub color_end: String,
    /// Point capacity of the trail queue.
    #[serde(alias = "trailLength")]
    pub trail_length: usize,
    #[serde(alias = "lineWidth")]
    pub line_width: f64,
    /// Scale stroke width from 30% to 100% along the trail.
    #[serde(alias = "fadeOut", alias = "fade_out", alias = "fadeWidth")]
    pub fade_width: bool,
    /// First-order low-pass factor in `[0, 1)`; `0` disables smoothing.
    pub smoothing: f64,
    #[serde(alias = "dotSize")]
    pub dot_size: f64,
    /// Minimum distance between recorded points (dots variant only).
    #[serde(alias = "dotSpacing")]
    pub dot_spacing: f64,
    #[serde(alias = "particleCount")]
    pub particle_count: usize,
    #[serde(alias = "particleSize")]
    pub particle_size: f64,
    /// Burst spread in degrees, centered on the movement direction.
    #[serde(alias = "spreadAngle", alias = "spread")]
    pub spread_deg: f64,
    /// Downward velocity added per reference frame (1/60 s).
    #[serde(alias = "particleDrift")]
    pub drift: f64,
    #[serde(alias = "pixelSize")]
    pub pixel_size: f64,
    #[serde(alias = "gridSnap")]
    pub grid_snap: bool,
    #[serde(alias = "blendMode", alias = "composite_mode")]
    pub composite: CompositeMode,
    #[serde(alias = "autoFade")]
    pub auto_fade: bool,
    /// Seconds for a point's life to decay from 1 to 0.
    #[serde(alias = "fadeDuration")]
    pub fade_duration: f64,
    pub easing: Ease,
    /// Upper bound for the frame delta derived from frame timestamps, in seconds.
    #[serde(alias = "maxFrameDt")]
    pub max_frame_dt: f64,
    /// Seed for particle burst randomization.
    pub seed: u64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Line,
            fill: FillMode::Solid,
            color: "#ffffff".to_owned(),
            color_end: "#a855f7".to_owned(),
            trail_length: 24,
            line_width: 4.0,
            fade_width: true,
            smoothing: 0.35,
            dot_size: 6.0,
            dot_spacing: 4.0,
            particle_count: 3,
            particle_size: 3.0,
            spread_deg: 60.0,
            drift: 0.05,
            pixel_size: 8.0,
            grid_snap: true,
            composite: CompositeMode::Normal,
            auto_fade: true,
            fade_duration: 0.6,
            easing: Ease::OutQuad,
            max_frame_dt: 0.05,
            seed: 0x5EED_7A11,
        }
    }
}

impl TrailConfig {
    pub fn from_json_str(s: &str) -> TrailResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_value(v: serde_json::Value) -> TrailResult<Self> {
        Ok(serde_json::from_value(v)?)
    }

    /// Copy with values that would corrupt geometry clamped into range.
    ///
    /// Non-finite numbers take their defaults; sizes and durations are floored at zero and
    /// smoothing is confined to `[0, 1]`.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        let non_neg = |v: f64, fallback: f64| -> f64 {
            if v.is_finite() { v.max(0.0) } else { fallback }
        };

        Self {
            smoothing: if self.smoothing.is_finite() {
                self.smoothing.clamp(0.0, 1.0)
            } else {
                d.smoothing
            },
            line_width: non_neg(self.line_width, d.line_width),
            dot_size: non_neg(self.dot_size, d.dot_size),
            dot_spacing: non_neg(self.dot_spacing, d.dot_spacing),
            particle_size: non_neg(self.particle_size, d.particle_size),
            spread_deg: non_neg(self.spread_deg, d.spread_deg),
            drift: if self.drift.is_finite() {
                self.drift
            } else {
                d.drift
            },
            pixel_size: non_neg(self.pixel_size, d.pixel_size),
            fade_duration: non_neg(self.fade_duration, d.fade_duration),
            max_frame_dt: non_neg(self.max_frame_dt, d.max_frame_dt),
            ..self.clone()
        }
    }

    pub fn palette(&self) -> Palette {
        Palette {
            start: resolve_color(&self.color),
            end: resolve_color(&self.color_end),
            fill: self.fill,
        }
    }
}

/// Colors resolved once per configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub start: Rgb8,
    pub end: Rgb8,
    pub fill: FillMode,
}

impl Palette {
    /// Color at normalized trail position `t` (0 = oldest, 1 = newest).
    pub fn at(self, t: f64) -> Rgb8 {
        match self.fill {
            FillMode::Solid => self.start,
            FillMode::Gradient => self.start.lerp(self.end, t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
