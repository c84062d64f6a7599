use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Pan offset and zoom of the tile map on the city screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        ViewportTransform {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

/// Handle to the viewport shared by every city screen of one session, so the
/// map stays where the player left it when going back and forth between cities
pub type SharedViewport = Rc<RefCell<ViewportTransform>>;

pub fn new_shared_viewport() -> SharedViewport {
    Rc::new(RefCell::new(ViewportTransform::default()))
}

/// Turns pan and pinch gestures on the city map into viewport changes.
///
/// Neither panning nor zooming is clamped.
#[derive(Debug)]
pub struct CityMapHolder {
    viewport: SharedViewport,
    last_initial_distance: f32,
    last_scale: f32,
}

impl CityMapHolder {
    pub fn new(viewport: SharedViewport) -> Self {
        let last_scale = viewport.borrow().scale;
        CityMapHolder {
            viewport,
            last_initial_distance: 0.0,
            last_scale,
        }
    }

    /// Another handle to the same viewport, for the next screen
    pub fn viewport(&self) -> SharedViewport {
        Rc::clone(&self.viewport)
    }

    pub fn transform(&self) -> ViewportTransform {
        *self.viewport.borrow()
    }

    pub fn scroll_x(&self) -> f32 {
        self.viewport.borrow().x
    }

    pub fn scroll_y(&self) -> f32 {
        self.viewport.borrow().y
    }

    pub fn scale(&self) -> f32 {
        self.viewport.borrow().scale
    }

    /// Moves the map by the drag delta, scaled by the current zoom. The
    /// shared viewport is updated immediately.
    pub fn on_pan_gesture(&mut self, delta_x: f32, delta_y: f32) {
        let mut viewport = self.viewport.borrow_mut();
        viewport.x += delta_x * viewport.scale;
        viewport.y += delta_y * viewport.scale;
        trace!("Panned city map to ({}, {})", viewport.x, viewport.y);
    }

    /// `baseline_scale * sqrt(distance / initial_distance)`, or `None` for a
    /// degenerate gesture
    pub fn zoomed_scale(baseline_scale: f32, initial_distance: f32, distance: f32) -> Option<f32> {
        if initial_distance <= 0.0 || distance < 0.0 {
            return None;
        }
        Some(baseline_scale * (distance / initial_distance).sqrt())
    }

    /// Applies a pinch with an explicitly captured baseline scale
    pub fn on_zoom_gesture(&mut self, initial_distance: f32, distance: f32, baseline_scale: f32) {
        if let Some(scale) = Self::zoomed_scale(baseline_scale, initial_distance, distance) {
            self.viewport.borrow_mut().scale = scale;
            trace!("Zoomed city map to {}", scale);
        }
    }

    /// Applies a pinch as reported by the input layer. The baseline scale is
    /// sampled once per gesture, recognized by a new initial distance, and
    /// reused for every later callback of that gesture.
    pub fn on_zoom(&mut self, initial_distance: f32, distance: f32) {
        if self.last_initial_distance != initial_distance {
            self.last_initial_distance = initial_distance;
            self.last_scale = self.scale();
        }
        self.on_zoom_gesture(initial_distance, distance, self.last_scale);
    }
}
