use std::mem::{offset_of, size_of};
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use viewstate::{ParamSlot, RenderParameters};

/// CPU mirror of the `ViewParams` std140 block in both shader stages.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ViewUniforms {
    pub pan: [f32; 2],
    pub zoom: f32,
    pub theta: f32,
    pub bias: [f32; 3],
    pub hue: f32,
    pub grayscale: i32,
    pub channel_filter: i32,
    pub blur: i32,
    pub padding0: i32,
    pub texture_size: [f32; 2],
    pub surface_scale: [f32; 2],
}

unsafe impl Zeroable for ViewUniforms {}
unsafe impl Pod for ViewUniforms {}

pub(crate) const UNIFORM_SIZE: u64 = size_of::<ViewUniforms>() as u64;

impl Default for ViewUniforms {
    fn default() -> Self {
        Self {
            pan: [0.0, 0.0],
            zoom: 1.0,
            theta: 0.0,
            bias: [0.0; 3],
            hue: 0.0,
            grayscale: 0,
            channel_filter: 0,
            blur: 0,
            padding0: 0,
            texture_size: [1.0, 1.0],
            surface_scale: [1.0, 1.0],
        }
    }
}

impl ViewUniforms {
    /// Copies the value behind `slot` out of `params`.
    pub fn apply(&mut self, params: &RenderParameters, slot: ParamSlot) {
        match slot {
            ParamSlot::Zoom => self.zoom = params.zoom,
            ParamSlot::Rotation => self.theta = params.rotation,
            ParamSlot::PanX => self.pan[0] = params.pan_x,
            ParamSlot::PanY => self.pan[1] = params.pan_y,
            ParamSlot::RedBias => self.bias[0] = params.red_bias,
            ParamSlot::GreenBias => self.bias[1] = params.green_bias,
            ParamSlot::BlueBias => self.bias[2] = params.blue_bias,
            ParamSlot::Grayscale => self.grayscale = i32::from(params.grayscale),
            ParamSlot::ChannelFilter => self.channel_filter = i32::from(params.channel_filter),
            ParamSlot::Blur => self.blur = i32::from(params.blur),
            ParamSlot::Hue => self.hue = if params.hue { 1.0 } else { 0.0 },
        }
    }

    pub fn set_texture_size(&mut self, width: u32, height: u32) {
        self.texture_size = [width.max(1) as f32, height.max(1) as f32];
    }

    pub fn set_surface_scale(&mut self, width: u32, height: u32) {
        self.surface_scale = surface_scale(width, height);
    }

    pub fn bytes(&self, range: Range<usize>) -> &[u8] {
        &bytemuck::bytes_of(self)[range]
    }
}

/// Scales clip space so one image unit covers the same number of pixels on
/// both axes.
pub(crate) fn surface_scale(width: u32, height: u32) -> [f32; 2] {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    let side = w.min(h);
    [side / w, side / h]
}

const F32: usize = size_of::<f32>();

/// Byte range of every [`ParamSlot`] inside [`ViewUniforms`], resolved once
/// when the pipeline is built.
#[derive(Debug, Clone)]
pub(crate) struct SlotTable {
    ranges: [Range<usize>; ParamSlot::ALL.len()],
}

impl SlotTable {
    pub fn resolve() -> Self {
        Self {
            ranges: ParamSlot::ALL.map(slot_range),
        }
    }

    pub fn range(&self, slot: ParamSlot) -> Range<usize> {
        let index = ParamSlot::ALL
            .iter()
            .position(|candidate| *candidate == slot)
            .unwrap_or_default();
        self.ranges[index].clone()
    }

    /// Byte ranges for `slots`, with touching ranges merged so adjacent
    /// fields go out in a single write.
    pub fn coalesced(&self, slots: impl IntoIterator<Item = ParamSlot>) -> Vec<Range<usize>> {
        let mut ranges: Vec<Range<usize>> = slots.into_iter().map(|slot| self.range(slot)).collect();
        ranges.sort_by_key(|range| range.start);
        let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
                _ => merged.push(range),
            }
        }
        merged
    }
}

fn slot_range(slot: ParamSlot) -> Range<usize> {
    let start = match slot {
        ParamSlot::Zoom => offset_of!(ViewUniforms, zoom),
        ParamSlot::Rotation => offset_of!(ViewUniforms, theta),
        ParamSlot::PanX => offset_of!(ViewUniforms, pan),
        ParamSlot::PanY => offset_of!(ViewUniforms, pan) + F32,
        ParamSlot::RedBias => offset_of!(ViewUniforms, bias),
        ParamSlot::GreenBias => offset_of!(ViewUniforms, bias) + F32,
        ParamSlot::BlueBias => offset_of!(ViewUniforms, bias) + 2 * F32,
        ParamSlot::Grayscale => offset_of!(ViewUniforms, grayscale),
        ParamSlot::ChannelFilter => offset_of!(ViewUniforms, channel_filter),
        ParamSlot::Blur => offset_of!(ViewUniforms, blur),
        ParamSlot::Hue => offset_of!(ViewUniforms, hue),
    };
    start..start + F32
}

pub(crate) fn texture_size_range() -> Range<usize> {
    let start = offset_of!(ViewUniforms, texture_size);
    start..start + 2 * F32
}

pub(crate) fn surface_scale_range() -> Range<usize> {
    let start = offset_of!(ViewUniforms, surface_scale);
    start..start + 2 * F32
}

/// Member names and offsets as the GLSL block declares them.
#[cfg(test)]
pub(crate) fn uniform_member_offsets() -> Vec<(&'static str, u32)> {
    vec![
        ("pan", offset_of!(ViewUniforms, pan) as u32),
        ("zoom", offset_of!(ViewUniforms, zoom) as u32),
        ("theta", offset_of!(ViewUniforms, theta) as u32),
        ("bias", offset_of!(ViewUniforms, bias) as u32),
        ("hue", offset_of!(ViewUniforms, hue) as u32),
        ("grayscale", offset_of!(ViewUniforms, grayscale) as u32),
        ("channel_filter", offset_of!(ViewUniforms, channel_filter) as u32),
        ("blur", offset_of!(ViewUniforms, blur) as u32),
        ("padding0", offset_of!(ViewUniforms, padding0) as u32),
        ("texture_size", offset_of!(ViewUniforms, texture_size) as u32),
        ("surface_scale", offset_of!(ViewUniforms, surface_scale) as u32),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::align_of;

    use viewstate::{ControllerOptions, ImageSlot, Key, ViewController};

    #[test]
    fn view_uniforms_follow_std140_layout() {
        assert_eq!(align_of::<ViewUniforms>(), 16);
        assert_eq!(size_of::<ViewUniforms>(), 64);
        assert_eq!(offset_of!(ViewUniforms, pan), 0);
        assert_eq!(offset_of!(ViewUniforms, zoom), 8);
        assert_eq!(offset_of!(ViewUniforms, theta), 12);
        assert_eq!(offset_of!(ViewUniforms, bias), 16);
        assert_eq!(offset_of!(ViewUniforms, hue), 28);
        assert_eq!(offset_of!(ViewUniforms, grayscale), 32);
        assert_eq!(offset_of!(ViewUniforms, texture_size), 48);
        assert_eq!(offset_of!(ViewUniforms, surface_scale), 56);
    }

    #[test]
    fn slot_ranges_are_disjoint_and_in_bounds() {
        let table = SlotTable::resolve();
        let mut ranges: Vec<Range<usize>> =
            ParamSlot::ALL.iter().map(|slot| table.range(*slot)).collect();
        ranges.sort_by_key(|range| range.start);
        for pair in ranges.windows(2) {
            assert!(pair[0].end <= pair[1].start, "{pair:?} overlap");
        }
        for range in &ranges {
            assert!(range.end as u64 <= UNIFORM_SIZE);
            assert_eq!(range.start % 4, 0);
            assert_eq!(range.len(), 4);
        }
        assert!(texture_size_range().end <= surface_scale_range().start);
        assert_eq!(surface_scale_range().end as u64, UNIFORM_SIZE);
    }

    #[test]
    fn adjacent_slots_coalesce() {
        let table = SlotTable::resolve();
        let merged = table.coalesced([
            ParamSlot::BlueBias,
            ParamSlot::PanY,
            ParamSlot::RedBias,
            ParamSlot::GreenBias,
            ParamSlot::PanX,
        ]);
        assert_eq!(merged, vec![0..8, 16..28]);

        let merged = table.coalesced([ParamSlot::Zoom, ParamSlot::Blur]);
        assert_eq!(merged, vec![8..12, 40..44]);
        assert!(table.coalesced(Vec::<ParamSlot>::new()).is_empty());
    }

    #[test]
    fn applied_slots_land_in_their_byte_ranges() {
        let mut controller = ViewController::new(ControllerOptions::default(), ImageSlot::Test);
        controller.on_key_press(Key::G);
        controller.on_key_press(Key::Up);
        controller.on_key_press(Key::B);
        let params = controller.current_parameters();

        let mut uniforms = ViewUniforms::default();
        for slot in controller.take_dirty().iter() {
            uniforms.apply(&params, slot);
        }
        let table = SlotTable::resolve();
        let green = uniforms.bytes(table.range(ParamSlot::GreenBias));
        assert!((f32::from_ne_bytes([green[0], green[1], green[2], green[3]]) - 0.05).abs() < 1e-6);
        let blur = uniforms.bytes(table.range(ParamSlot::Blur));
        assert_eq!(i32::from_ne_bytes([blur[0], blur[1], blur[2], blur[3]]), 2);
        assert_eq!(uniforms.hue, 1.0);
        assert_eq!(uniforms.zoom, 1.0);
    }

    #[test]
    fn surface_scale_keeps_pixels_square() {
        assert_eq!(surface_scale(800, 800), [1.0, 1.0]);
        let wide = surface_scale(1000, 500);
        assert!((wide[0] - 0.5).abs() < 1e-6);
        assert!((wide[1] - 1.0).abs() < 1e-6);
        let tall = surface_scale(400, 800);
        assert!((tall[0] - 1.0).abs() < 1e-6);
        assert!((tall[1] - 0.5).abs() < 1e-6);
    }
}
