//! Window-system independent interaction state for the filter viewer.
//!
//! The [`ViewController`] consumes abstract key, scroll, cursor and button
//! events and maintains the view transform (zoom, rotation, pan), the active
//! filter selection and per-channel colour bias. It never talks to the GPU:
//! callers read [`RenderParameters`] and the [`DirtySlots`] set after each
//! event and act on any returned [`Effect`].

pub mod controller;
pub mod filter;
pub mod image;
pub mod input;
pub mod params;
pub mod view;

pub use controller::{ControllerOptions, Effect, ViewController, DEFAULT_LOGICAL_VIEWPORT};
pub use filter::{
    BlurFilter, Channel, ChannelBias, ChannelFilter, ChannelHolds, FilterMode, FilterState,
    GrayscaleMode, Nudge, BIAS_STEP,
};
pub use image::{ImageCatalog, ImageSlot, ParseSlotError};
pub use input::{ButtonAction, Key, KeyAction, MouseButton};
pub use params::{DirtySlots, ParamSlot, RenderParameters};
pub use view::{DragState, Vec2, ViewState};
