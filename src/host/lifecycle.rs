use crate::{
    config::model::TrailConfig,
    foundation::core::{Point, SurfaceBounds, SurfaceDesc, Viewport},
    foundation::error::TrailResult,
    render::backend::{TrailBackend, execute_plan},
    trail::engine::TrailRenderer,
};

/// Global event streams the overlay subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerMove,
    PointerDown,
    Resize,
}

/// Host-issued token for a bound listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Host-issued token for a scheduled display-synchronized callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Events delivered by the host to a mounted overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// Pointer moved, in client coordinates.
    PointerMove(Point),
    /// Pointer pressed, in client coordinates.
    PointerDown(Point),
    /// The window changed size; the overlay re-measures through [`Host::measure`].
    Resize,
    /// Display refresh callback for the pending [`FrameHandle`].
    Frame {
        /// Monotonic timestamp in seconds.
        timestamp_s: f64,
    },
}

/// The hosting page: event subscription, frame scheduling and surface measurement.
pub trait Host {
    fn add_listener(&mut self, kind: ListenerKind) -> TrailResult<ListenerId>;

    fn remove_listener(&mut self, id: ListenerId);

    fn request_frame(&mut self) -> TrailResult<FrameHandle>;

    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Current bounding rectangle of the overlay surface and the viewport it covers.
    fn measure(&self) -> (SurfaceBounds, Viewport);
}

impl<H: Host + ?Sized> Host for &mut H {
    fn add_listener(&mut self, kind: ListenerKind) -> TrailResult<ListenerId> {
        (**self).add_listener(kind)
    }

    fn remove_listener(&mut self, id: ListenerId) {
        (**self).remove_listener(id);
    }

    fn request_frame(&mut self) -> TrailResult<FrameHandle> {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        (**self).cancel_frame(handle);
    }

    fn measure(&self) -> (SurfaceBounds, Viewport) {
        (**self).measure()
    }
}

/// Renderer plus drawing backend, surface geometry and frame clock.
#[derive(Debug)]
pub struct Overlay<B> {
    renderer: TrailRenderer,
    backend: B,
    bounds: SurfaceBounds,
    surface: SurfaceDesc,
    last_timestamp: Option<f64>,
}

impl<B: TrailBackend> Overlay<B> {
    pub fn new(config: TrailConfig, backend: B) -> Self {
        Self::with_renderer(TrailRenderer::new(config), backend)
    }

    pub fn with_renderer(renderer: TrailRenderer, backend: B) -> Self {
        Self {
            renderer,
            backend,
            bounds: SurfaceBounds {
                left: 0.0,
                top: 0.0,
                width: 0.0,
                height: 0.0,
            },
            surface: SurfaceDesc::EMPTY,
            last_timestamp: None,
        }
    }

    pub fn renderer(&self) -> &TrailRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut TrailRenderer {
        &mut self.renderer
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn bounds(&self) -> SurfaceBounds {
        self.bounds
    }

    pub fn surface(&self) -> SurfaceDesc {
        self.surface
    }

    /// Record a client-space pointer position if it falls inside the surface.
    ///
    /// Returns whether the point reached the renderer.
    pub fn handle_pointer(&mut self, client: Point) -> bool {
        if !self.bounds.contains(client) {
            return false;
        }
        let local = self.bounds.to_local(client);
        self.renderer.add_point(local.x, local.y);
        true
    }

    /// Adopt new geometry, drop the trail and rescale the backing store.
    ///
    /// A backing store the backend cannot allocate leaves the overlay without a surface, so
    /// frames are skipped until the next successful resize.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, bounds: SurfaceBounds, viewport: Viewport) {
        let surface = viewport.surface_desc();
        self.bounds = bounds;
        self.renderer.clear();
        match self.backend.ensure_surface(&surface) {
            Ok(()) => {
                self.surface = surface;
                tracing::debug!(
                    pixel_width = surface.pixel_width,
                    pixel_height = surface.pixel_height,
                    "overlay resized"
                );
            }
            Err(err) => {
                self.surface = SurfaceDesc::EMPTY;
                if let Err(release) = self.backend.ensure_surface(&SurfaceDesc::EMPTY) {
                    tracing::debug!(%release, "releasing stale surface failed");
                }
                tracing::warn!(
                    %err,
                    pixel_width = surface.pixel_width,
                    pixel_height = surface.pixel_height,
                    "surface unavailable, skipping frames"
                );
            }
        }
    }

    /// Run one display frame at `timestamp_s`.
    ///
    /// The delta since the previous frame is clamped to `[0, max_frame_dt]`; the first frame
    /// after mount or a clock reset uses zero. Returns whether anything reached the backend.
    pub fn tick(&mut self, timestamp_s: f64) -> TrailResult<bool> {
        let max_dt = self.renderer.config().max_frame_dt;
        let dt = match self.last_timestamp {
            Some(prev) if timestamp_s.is_finite() => (timestamp_s - prev).clamp(0.0, max_dt),
            _ => 0.0,
        };
        if timestamp_s.is_finite() {
            self.last_timestamp = Some(timestamp_s);
        }
        let plan = self.renderer.render_frame(dt, self.surface);
        execute_plan(&mut self.backend, &plan)
    }

    /// Forget the previous frame timestamp.
    pub fn reset_clock(&mut self) {
        self.last_timestamp = None;
    }
}

/// A mounted overlay: listeners bound and a frame pending until [`Mounted::unmount`] or drop.
///
/// Pass `&mut host` to keep access to the host after unmounting.
#[derive(Debug)]
pub struct Mounted<H: Host, B: TrailBackend> {
    host: H,
    overlay: Overlay<B>,
    listeners: Vec<(ListenerKind, ListenerId)>,
    frame: Option<FrameHandle>,
}

impl<H: Host, B: TrailBackend> Mounted<H, B> {
    /// Bind listeners, size the surface and schedule the first frame.
    ///
    /// On error every listener bound so far is released before returning.
    #[tracing::instrument(skip_all)]
    pub fn mount(host: H, overlay: Overlay<B>) -> TrailResult<Self> {
        let mut mounted = Self {
            host,
            overlay,
            listeners: Vec::with_capacity(3),
            frame: None,
        };

        for kind in [
            ListenerKind::PointerMove,
            ListenerKind::PointerDown,
            ListenerKind::Resize,
        ] {
            let id = mounted.host.add_listener(kind)?;
            mounted.listeners.push((kind, id));
        }

        let (bounds, viewport) = mounted.host.measure();
        mounted.overlay.reset_clock();
        mounted.overlay.resize(bounds, viewport);
        mounted.frame = Some(mounted.host.request_frame()?);
        tracing::debug!(listeners = mounted.listeners.len(), "overlay mounted");
        Ok(mounted)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn overlay(&self) -> &Overlay<B> {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut Overlay<B> {
        &mut self.overlay
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.frame
    }

    fn is_listening(&self, kind: ListenerKind) -> bool {
        self.listeners.iter().any(|(k, _)| *k == kind)
    }

    /// Route one host event. Frame events consume the pending handle and schedule the next one;
    /// a frame event with no pending handle is ignored. A frame the backend fails to draw is
    /// logged and skipped; only a failed frame request is returned as an error.
    pub fn dispatch(&mut self, event: HostEvent) -> TrailResult<()> {
        match event {
            HostEvent::PointerMove(p) => {
                if self.is_listening(ListenerKind::PointerMove) {
                    self.overlay.handle_pointer(p);
                }
            }
            HostEvent::PointerDown(p) => {
                if self.is_listening(ListenerKind::PointerDown) {
                    self.overlay.handle_pointer(p);
                }
            }
            HostEvent::Resize => {
                if self.is_listening(ListenerKind::Resize) {
                    let (bounds, viewport) = self.host.measure();
                    self.overlay.resize(bounds, viewport);
                }
            }
            HostEvent::Frame { timestamp_s } => {
                if self.frame.take().is_some() {
                    let ticked = self.overlay.tick(timestamp_s);
                    self.frame = Some(self.host.request_frame()?);
                    if let Err(err) = ticked {
                        tracing::warn!(%err, timestamp_s, "frame failed, skipping");
                    }
                }
            }
        }
        Ok(())
    }

    /// Release listeners and cancel the pending frame.
    pub fn unmount(self) {
        drop(self);
    }

    fn release(&mut self) {
        if self.listeners.is_empty() && self.frame.is_none() {
            return;
        }
        for (_, id) in self.listeners.drain(..) {
            self.host.remove_listener(id);
        }
        if let Some(handle) = self.frame.take() {
            self.host.cancel_frame(handle);
        }
        tracing::debug!("overlay released");
    }
}

impl<H: Host, B: TrailBackend> Drop for Mounted<H, B> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/lifecycle.rs"]
mod tests;
