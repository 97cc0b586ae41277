use tracing::debug;

use crate::filter::{Channel, FilterMode, FilterState, Nudge};
use crate::image::ImageSlot;
use crate::input::{ButtonAction, Key, KeyAction, MouseButton};
use crate::params::{DirtySlots, ParamSlot, RenderParameters};
use crate::view::{DragState, Vec2, ViewState};

/// Logical viewport edge used to normalise cursor positions.
pub const DEFAULT_LOGICAL_VIEWPORT: f32 = 1025.0;

const MODE_SLOTS: [ParamSlot; 3] = [
    ParamSlot::Grayscale,
    ParamSlot::ChannelFilter,
    ParamSlot::Blur,
];
const BIAS_SLOTS: [ParamSlot; 3] = [
    ParamSlot::RedBias,
    ParamSlot::GreenBias,
    ParamSlot::BlueBias,
];
const PAN_SLOTS: [ParamSlot; 2] = [ParamSlot::PanX, ParamSlot::PanY];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerOptions {
    /// Cursor coordinates are mapped through `x / logical_viewport * 2`.
    pub logical_viewport: f32,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            logical_viewport: DEFAULT_LOGICAL_VIEWPORT,
        }
    }
}

/// Side effect the host must carry out after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Close the window and leave the event loop.
    Close,
    /// Decode `slot` into a new texture and rebuild the quad. On failure the
    /// host should call [`ViewController::restore_image`] with `previous`.
    LoadImage { slot: ImageSlot, previous: ImageSlot },
    /// Recompute the quad geometry for the current texture.
    RebuildGeometry,
}

/// Maps keyboard and pointer events onto view and filter state.
///
/// Every mutation marks the affected [`ParamSlot`]s dirty; the renderer
/// drains them with [`ViewController::take_dirty`] and pushes only those
/// values.
#[derive(Debug, Clone)]
pub struct ViewController {
    options: ControllerOptions,
    view: ViewState,
    drag: DragState,
    filter: FilterState,
    image: ImageSlot,
    rotate_modifier: bool,
    cursor: Vec2,
    dirty: DirtySlots,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new(ControllerOptions::default(), ImageSlot::default())
    }
}

impl ViewController {
    /// Creates a controller with every slot dirty so the first push uploads
    /// the full parameter set.
    pub fn new(options: ControllerOptions, image: ImageSlot) -> Self {
        Self {
            options,
            view: ViewState::default(),
            drag: DragState::default(),
            filter: FilterState::default(),
            image,
            rotate_modifier: false,
            cursor: Vec2::ZERO,
            dirty: DirtySlots::all(),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn image(&self) -> ImageSlot {
        self.image
    }

    pub fn on_key_press(&mut self, key: Key) -> Option<Effect> {
        match key.action() {
            KeyAction::Close => {
                debug!("close requested");
                Some(Effect::Close)
            }
            KeyAction::SelectImage(slot) => self.select_image(slot),
            KeyAction::ClearFilters => {
                self.filter.clear();
                self.dirty.mark_all(&MODE_SLOTS);
                self.dirty.mark_all(&BIAS_SLOTS);
                debug!("filters cleared");
                None
            }
            KeyAction::SetMode(mode) => {
                self.set_mode(mode);
                None
            }
            KeyAction::NudgeBias(direction) => {
                self.nudge_bias(direction);
                None
            }
            KeyAction::RotateModifier => {
                self.rotate_modifier = true;
                None
            }
            KeyAction::HoldChannel(channel) => {
                let before = self.filter.mode();
                self.filter.press_hold(channel);
                self.dirty.mark(ParamSlot::Hue);
                if self.filter.mode() != before {
                    self.dirty.mark_all(&MODE_SLOTS);
                }
                debug!(channel = channel.name(), hue = true, "channel hold started");
                None
            }
        }
    }

    pub fn on_key_release(&mut self, key: Key) {
        match key.action() {
            KeyAction::RotateModifier => self.rotate_modifier = false,
            KeyAction::HoldChannel(channel) => {
                self.filter.release_hold(channel);
                debug!(channel = channel.name(), "channel hold released");
            }
            _ => {}
        }
    }

    /// Zooms (or rotates while `modifier_held`) by one notch in the
    /// direction of `delta`. A zero delta is ignored.
    pub fn on_scroll(&mut self, delta: f32, modifier_held: bool) -> Option<Effect> {
        if delta == 0.0 || delta.is_nan() {
            return None;
        }

        if modifier_held {
            let steps = if delta < 0.0 { -1 } else { 1 };
            self.view.rotate(steps);
            self.dirty.mark(ParamSlot::Rotation);
            self.refresh_drag_preview();
            debug!(
                steps = self.view.rotation_steps(),
                theta = self.view.rotation_angle(),
                "rotated view"
            );
            return None;
        }

        if delta < 0.0 {
            self.view.zoom_out();
        } else {
            self.view.zoom_in();
        }
        self.dirty.mark(ParamSlot::Zoom);
        self.refresh_drag_preview();
        debug!(zoom = self.view.zoom(), "zoomed view");
        Some(Effect::RebuildGeometry)
    }

    /// Scroll using the controller's own rotate-modifier key state.
    pub fn scroll(&mut self, delta: f32) -> Option<Effect> {
        self.on_scroll(delta, self.rotate_modifier)
    }

    /// Records the cursor position in logical window pixels.
    pub fn on_cursor_move(&mut self, x: f64, y: f64) {
        let scale = 2.0 / self.options.logical_viewport;
        self.cursor = Vec2::new(x as f32 * scale, y as f32 * scale);
        if self.drag.active {
            self.drag.current = self.cursor;
            self.refresh_drag_preview();
        }
    }

    pub fn on_mouse_button(&mut self, button: MouseButton, action: ButtonAction) {
        if button != MouseButton::Primary {
            return;
        }

        match action {
            ButtonAction::Press => {
                self.drag.begin(self.cursor);
                debug!(x = self.cursor.x, y = self.cursor.y, "drag started");
            }
            ButtonAction::Release => {
                if !self.drag.active {
                    return;
                }
                let delta = self.drag_delta();
                self.view.commit_pan(delta);
                self.drag.active = false;
                self.dirty.mark_all(&PAN_SLOTS);
                let pan = self.view.committed_pan();
                debug!(pan_x = pan.x, pan_y = pan.y, "drag committed");
            }
        }
    }

    pub fn select_image(&mut self, slot: ImageSlot) -> Option<Effect> {
        let previous = std::mem::replace(&mut self.image, slot);
        debug!(image = %slot, previous = %previous, "image selected");
        Some(Effect::LoadImage { slot, previous })
    }

    /// Rolls the selection back after the host failed to load an image.
    pub fn restore_image(&mut self, slot: ImageSlot) {
        self.image = slot;
    }

    pub fn current_parameters(&self) -> RenderParameters {
        let pan = self.view.pan();
        let bias = self.filter.bias();
        let mode = self.filter.mode();
        RenderParameters {
            zoom: self.view.zoom(),
            rotation: self.view.rotation_angle(),
            pan_x: pan.x,
            pan_y: pan.y,
            red_bias: bias.get(Channel::Red),
            green_bias: bias.get(Channel::Green),
            blue_bias: bias.get(Channel::Blue),
            grayscale: mode.grayscale_variant(),
            channel_filter: mode.channel_variant(),
            blur: mode.blur_variant(),
            hue: self.filter.hue_active(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Returns and clears the set of slots changed since the last call.
    pub fn take_dirty(&mut self) -> DirtySlots {
        std::mem::take(&mut self.dirty)
    }

    fn set_mode(&mut self, mode: FilterMode) {
        self.filter.set_mode(mode);
        self.dirty.mark_all(&MODE_SLOTS);
        debug!(mode = %mode, "filter mode selected");
    }

    fn nudge_bias(&mut self, direction: Nudge) {
        for channel in self.filter.nudge_held(direction) {
            self.dirty.mark(BIAS_SLOTS[channel.index()]);
            debug!(
                channel = channel.name(),
                bias = self.filter.bias().get(channel),
                "channel bias nudged"
            );
        }
    }

    fn drag_delta(&self) -> Vec2 {
        self.drag
            .raw_delta(self.view.zoom())
            .rotated(self.view.rotation_angle())
    }

    fn refresh_drag_preview(&mut self) {
        if self.drag.active {
            let delta = self.drag_delta();
            self.view.preview_pan(delta);
            self.dirty.mark_all(&PAN_SLOTS);
        }
    }
}
