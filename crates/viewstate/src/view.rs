use std::ops::{Add, AddAssign, Div, Sub};

/// Multiplier applied to the zoom for every scroll-down notch.
pub const ZOOM_OUT_FACTOR: f32 = 0.9;
/// Multiplier applied to the zoom for every scroll-up notch. Zooming in is
/// deliberately faster than zooming out.
pub const ZOOM_IN_FACTOR: f32 = 1.15;
/// Angle of a single rotation increment (two degrees).
pub const ROTATION_STEP: f32 = std::f32::consts::PI / 90.0;

/// Zoom never leaves this range so the view transform stays finite and
/// strictly positive.
pub const MIN_ZOOM: f32 = 1.0e-6;
pub const MAX_ZOOM: f32 = 1.0e6;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Rotates the vector counter-clockwise by `theta` radians.
    pub fn rotated(self, theta: f32) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.y * cos + self.x * sin,
        }
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

/// View transform applied to the quad: zoom, rotation and pan.
///
/// `pan` is what the renderer sees; while a drag is in flight it equals
/// `committed_pan` plus the live drag delta, otherwise the two are equal.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    zoom: f32,
    rotation_steps: i32,
    pan: Vec2,
    committed_pan: Vec2,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            rotation_steps: 0,
            pan: Vec2::ZERO,
            committed_pan: Vec2::ZERO,
        }
    }
}

impl ViewState {
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn rotation_steps(&self) -> i32 {
        self.rotation_steps
    }

    /// Current rotation in radians, always `rotation_steps * π/90`.
    pub fn rotation_angle(&self) -> f32 {
        (f64::from(self.rotation_steps) * std::f64::consts::PI / 90.0) as f32
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn committed_pan(&self) -> Vec2 {
        self.committed_pan
    }

    pub(crate) fn zoom_out(&mut self) {
        self.zoom = (self.zoom * ZOOM_OUT_FACTOR).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub(crate) fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_IN_FACTOR).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub(crate) fn rotate(&mut self, steps: i32) {
        self.rotation_steps = self.rotation_steps.saturating_add(steps);
    }

    pub(crate) fn preview_pan(&mut self, delta: Vec2) {
        self.pan = self.committed_pan + delta;
    }

    pub(crate) fn commit_pan(&mut self, delta: Vec2) {
        self.committed_pan += delta;
        self.pan = self.committed_pan;
    }
}

/// Primary-button drag in normalised cursor coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    pub active: bool,
    pub anchor: Vec2,
    pub current: Vec2,
}

impl DragState {
    pub(crate) fn begin(&mut self, cursor: Vec2) {
        self.active = true;
        self.anchor = cursor;
        self.current = cursor;
    }

    /// Screen-space drag delta with y pointing up, scaled by `1 / zoom`.
    pub(crate) fn raw_delta(&self, zoom: f32) -> Vec2 {
        Vec2::new(
            self.current.x - self.anchor.x,
            self.anchor.y - self.current.y,
        ) / zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_by_quarter_turn_swaps_axes() {
        let rotated = Vec2::new(1.0, 0.0).rotated(std::f32::consts::FRAC_PI_2);
        assert!(rotated.x.abs() < 1e-6);
        assert!((rotated.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zoom_is_clamped_to_positive_range() {
        let mut view = ViewState::default();
        for _ in 0..2000 {
            view.zoom_out();
        }
        assert_eq!(view.zoom(), MIN_ZOOM);
        for _ in 0..2000 {
            view.zoom_in();
        }
        assert_eq!(view.zoom(), MAX_ZOOM);
    }

    #[test]
    fn commit_folds_delta_into_committed_pan() {
        let mut view = ViewState::default();
        view.preview_pan(Vec2::new(0.5, -0.25));
        assert_eq!(view.committed_pan(), Vec2::ZERO);
        assert_eq!(view.pan(), Vec2::new(0.5, -0.25));
        view.commit_pan(Vec2::new(0.5, -0.25));
        assert_eq!(view.committed_pan(), Vec2::new(0.5, -0.25));
        assert_eq!(view.pan(), view.committed_pan());
    }

    #[test]
    fn raw_delta_flips_screen_y() {
        let mut drag = DragState::default();
        drag.begin(Vec2::new(1.0, 1.0));
        drag.current = Vec2::new(1.5, 0.5);
        let delta = drag.raw_delta(2.0);
        assert!((delta.x - 0.25).abs() < 1e-6);
        assert!((delta.y - 0.25).abs() < 1e-6);
    }
}
