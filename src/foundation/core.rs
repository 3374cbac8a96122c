pub use kurbo::{Point, Rect, Vec2};

/// Clamp to `[0, 1]`, mapping NaN to `0`.
pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Straight (non-premultiplied) RGB triple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Per-channel linear interpolation, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = clamp01(t);
        let ch = |a: u8, b: u8| -> u8 {
            let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: ch(self.r, other.r),
            g: ch(self.g, other.g),
            b: ch(self.b, other.b),
        }
    }
}

/// Logical viewport plus the display pixel density used for the backing store.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    #[serde(default = "one", alias = "devicePixelRatio")]
    pub device_pixel_ratio: f64,
}

fn one() -> f64 {
    1.0
}

impl Viewport {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel ratio with non-finite or non-positive values mapped to `1`.
    pub fn scale(self) -> f64 {
        let r = self.device_pixel_ratio;
        if r.is_finite() && r > 0.0 { r } else { 1.0 }
    }

    pub fn surface_desc(self) -> SurfaceDesc {
        let scale = self.scale();
        SurfaceDesc {
            width: self.width,
            height: self.height,
            pixel_width: (f64::from(self.width) * scale).round() as u32,
            pixel_height: (f64::from(self.height) * scale).round() as u32,
            scale,
        }
    }
}

/// Bounding rectangle of the overlay surface in client (page) coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceBounds {
    pub fn from_viewport(viewport: Viewport) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: f64::from(viewport.width),
            height: f64::from(viewport.height),
        }
    }

    /// Inclusive on all four edges.
    pub fn contains(self, client: Point) -> bool {
        client.x >= self.left
            && client.x <= self.left + self.width
            && client.y >= self.top
            && client.y <= self.top + self.height
    }

    pub fn to_local(self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }
}

/// Logical and physical dimensions of the drawing surface for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceDesc {
    pub width: u32,
    pub height: u32,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub scale: f64,
}

impl SurfaceDesc {
    pub const EMPTY: Self = Self {
        width: 0,
        height: 0,
        pixel_width: 0,
        pixel_height: 0,
        scale: 1.0,
    };

    pub fn is_empty(self) -> bool {
        self.pixel_width == 0 || self.pixel_height == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
