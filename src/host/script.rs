use std::{collections::HashMap, ops::ControlFlow};

use crate::{
    config::model::TrailConfig,
    foundation::core::{Point, SurfaceBounds, Viewport},
    foundation::error::{TrailError, TrailResult},
    host::lifecycle::{FrameHandle, Host, HostEvent, ListenerId, ListenerKind, Mounted, Overlay},
    render::backend::TrailBackend,
};

/// Pointer position at time `t` (seconds from scene start), in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerSample {
    pub t: f64,
    pub x: f64,
    pub y: f64,
    /// Deliver as a pointer-down instead of a move.
    #[serde(default)]
    pub down: bool,
}

/// Window resize at time `t`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResizeSample {
    pub t: f64,
    pub viewport: Viewport,
}

/// A headless recording of pointer activity to replay through an overlay.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub viewport: Viewport,
    /// Overlay rectangle in client coordinates; defaults to the whole viewport.
    #[serde(default)]
    pub bounds: Option<SurfaceBounds>,
    #[serde(default = "default_fps")]
    pub fps: f64,
    #[serde(alias = "duration")]
    pub duration_s: f64,
    #[serde(default)]
    pub trail: TrailConfig,
    #[serde(default)]
    pub pointer: Vec<PointerSample>,
    #[serde(default)]
    pub resizes: Vec<ResizeSample>,
    /// Backdrop color for exported frames; transparent when absent.
    #[serde(default)]
    pub background: Option<String>,
}

/// Upper bound on rendered frames per scene; the replay timeline is built up front.
pub const MAX_SCENE_FRAMES: u64 = 1_000_000;

fn default_fps() -> f64 {
    60.0
}

/// One entry of a scene's replay timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cue {
    Input(HostEvent),
    Resize(Viewport),
    Frame { index: u64, timestamp_s: f64 },
}

impl Scene {
    #[tracing::instrument(skip_all)]
    pub fn from_json_str(s: &str) -> TrailResult<Self> {
        let scene: Self = serde_json::from_str(s)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn validate(&self) -> TrailResult<()> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(TrailError::validation("scene fps must be finite and > 0"));
        }
        if !(self.duration_s.is_finite() && self.duration_s >= 0.0) {
            return Err(TrailError::validation(
                "scene duration must be finite and >= 0",
            ));
        }
        let frames = (self.duration_s * self.fps).ceil();
        if !(frames.is_finite() && frames <= MAX_SCENE_FRAMES as f64) {
            return Err(TrailError::validation(format!(
                "scene spans {frames} frames, limit is {MAX_SCENE_FRAMES}"
            )));
        }
        let viewports =
            std::iter::once(&self.viewport).chain(self.resizes.iter().map(|r| &r.viewport));
        for vp in viewports {
            if !(vp.device_pixel_ratio.is_finite() && vp.device_pixel_ratio > 0.0) {
                return Err(TrailError::validation(
                    "device_pixel_ratio must be finite and > 0",
                ));
            }
        }
        if self
            .pointer
            .iter()
            .any(|p| !(p.t.is_finite() && p.x.is_finite() && p.y.is_finite()))
        {
            return Err(TrailError::validation("pointer samples must be finite"));
        }
        Ok(())
    }

    /// Number of frames in `[0, duration_s)` at `fps`.
    pub fn frame_count(&self) -> u64 {
        (self.duration_s * self.fps).ceil().max(0.0) as u64
    }

    /// Inputs, resizes and frames in time order; at equal times inputs precede frames.
    pub fn timeline(&self) -> Vec<Cue> {
        // Rank orders same-instant cues: resize, then pointer input, then frame.
        let mut cues: Vec<(f64, u8, Cue)> = Vec::new();
        for r in &self.resizes {
            cues.push((r.t, 0, Cue::Resize(r.viewport)));
        }
        for p in &self.pointer {
            let pos = Point::new(p.x, p.y);
            let event = if p.down {
                HostEvent::PointerDown(pos)
            } else {
                HostEvent::PointerMove(pos)
            };
            cues.push((p.t, 1, Cue::Input(event)));
        }
        for index in 0..self.frame_count() {
            let timestamp_s = index as f64 / self.fps;
            cues.push((timestamp_s, 2, Cue::Frame { index, timestamp_s }));
        }
        cues.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        cues.into_iter().map(|(_, _, cue)| cue).collect()
    }

    /// Mount an overlay on a [`ScriptedHost`] and replay the timeline.
    ///
    /// `on_frame` runs after each rendered frame; returning `Break` stops playback early.
    pub fn replay<B, F>(&self, backend: B, mut on_frame: F) -> TrailResult<()>
    where
        B: TrailBackend,
        F: FnMut(u64, &mut Overlay<B>) -> TrailResult<ControlFlow<()>>,
    {
        let mut host = ScriptedHost::new(self.viewport, self.bounds);
        let overlay = Overlay::new(self.trail.clone(), backend);
        let mut mounted = Mounted::mount(&mut host, overlay)?;

        for cue in self.timeline() {
            match cue {
                Cue::Input(event) => mounted.dispatch(event)?,
                Cue::Resize(viewport) => {
                    mounted.host_mut().set_viewport(viewport);
                    mounted.dispatch(HostEvent::Resize)?;
                }
                Cue::Frame { index, timestamp_s } => {
                    mounted.dispatch(HostEvent::Frame { timestamp_s })?;
                    if on_frame(index, mounted.overlay_mut())?.is_break() {
                        break;
                    }
                }
            }
        }
        mounted.unmount();
        Ok(())
    }
}

/// Deterministic [`Host`] driven by a [`Scene`] timeline.
#[derive(Debug)]
pub struct ScriptedHost {
    viewport: Viewport,
    bounds: Option<SurfaceBounds>,
    next_id: u64,
    listeners: HashMap<ListenerId, ListenerKind>,
    pending_frame: Option<FrameHandle>,
}

impl ScriptedHost {
    pub fn new(viewport: Viewport, bounds: Option<SurfaceBounds>) -> Self {
        Self {
            viewport,
            bounds,
            next_id: 0,
            listeners: HashMap::new(),
            pending_frame: None,
        }
    }

    /// Change the window size; a fixed `bounds` keeps its position but follows the new size.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if let Some(b) = self.bounds.as_mut() {
            b.width = f64::from(viewport.width);
            b.height = f64::from(viewport.height);
        }
    }

    pub fn is_bound(&self, kind: ListenerKind) -> bool {
        self.listeners.values().any(|k| *k == kind)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Host for ScriptedHost {
    fn add_listener(&mut self, kind: ListenerKind) -> TrailResult<ListenerId> {
        let id = ListenerId(self.next_id());
        self.listeners.insert(id, kind);
        Ok(id)
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    fn request_frame(&mut self) -> TrailResult<FrameHandle> {
        let handle = FrameHandle(self.next_id());
        self.pending_frame = Some(handle);
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending_frame == Some(handle) {
            self.pending_frame = None;
        }
    }

    fn measure(&self) -> (SurfaceBounds, Viewport) {
        let bounds = self
            .bounds
            .unwrap_or_else(|| SurfaceBounds::from_viewport(self.viewport));
        (bounds, self.viewport)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/script.rs"]
mod tests;
