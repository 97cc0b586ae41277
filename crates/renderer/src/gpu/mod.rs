//! GPU side of the viewer.
//!
//! - `context` owns the wgpu instance, surface, adapter and device and knows
//!   how to reconfigure the swapchain when the window resizes.
//! - `pipeline` links the vertex and fragment stages into a render pipeline
//!   and owns the bind group layouts.
//! - `uniforms` mirrors the `ViewParams` block and maps every parameter slot
//!   to its byte range.
//! - `texture` decodes images and uploads them as sampled textures.
//! - `geometry` builds the aspect-correct quad.
//! - `state` glues everything together behind the `GpuState` API used by
//!   `window`.

mod context;
mod geometry;
mod pipeline;
mod state;
mod texture;
mod uniforms;

pub(crate) use state::GpuState;

#[cfg(test)]
pub(crate) use uniforms::uniform_member_offsets;
