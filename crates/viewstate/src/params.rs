/// One renderer-facing parameter. The renderer resolves each slot to a byte
/// range of its uniform block once, when the pipeline is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamSlot {
    Zoom,
    Rotation,
    PanX,
    PanY,
    RedBias,
    GreenBias,
    BlueBias,
    Grayscale,
    ChannelFilter,
    Blur,
    Hue,
}

impl ParamSlot {
    pub const ALL: [Self; 11] = [
        Self::Zoom,
        Self::Rotation,
        Self::PanX,
        Self::PanY,
        Self::RedBias,
        Self::GreenBias,
        Self::BlueBias,
        Self::Grayscale,
        Self::ChannelFilter,
        Self::Blur,
        Self::Hue,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Zoom => "zoom",
            Self::Rotation => "theta",
            Self::PanX => "pan_x",
            Self::PanY => "pan_y",
            Self::RedBias => "red_bias",
            Self::GreenBias => "green_bias",
            Self::BlueBias => "blue_bias",
            Self::Grayscale => "grayscale",
            Self::ChannelFilter => "channel_filter",
            Self::Blur => "blur",
            Self::Hue => "hue",
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Set of slots whose values changed since the last push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtySlots(u16);

impl DirtySlots {
    pub const NONE: Self = Self(0);

    pub fn all() -> Self {
        ParamSlot::ALL.into_iter().fold(Self::NONE, |mut acc, slot| {
            acc.mark(slot);
            acc
        })
    }

    pub fn mark(&mut self, slot: ParamSlot) {
        self.0 |= slot.bit();
    }

    pub fn mark_all(&mut self, slots: &[ParamSlot]) {
        for slot in slots {
            self.mark(*slot);
        }
    }

    pub fn contains(self, slot: ParamSlot) -> bool {
        self.0 & slot.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = ParamSlot> {
        ParamSlot::ALL
            .into_iter()
            .filter(move |slot| self.contains(*slot))
    }
}

/// Flattened parameter set consumed by the renderer each time state changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParameters {
    pub zoom: f32,
    /// Rotation in radians.
    pub rotation: f32,
    pub pan_x: f32,
    pub pan_y: f32,
    pub red_bias: f32,
    pub green_bias: f32,
    pub blue_bias: f32,
    /// 0 = off, 1..=6 otherwise.
    pub grayscale: u8,
    /// 0 = off, 1..=3 otherwise.
    pub channel_filter: u8,
    /// 0 = off, 1..=3 otherwise.
    pub blur: u8,
    pub hue: bool,
}

impl RenderParameters {
    pub fn bias(&self) -> [f32; 3] {
        [self.red_bias, self.green_bias, self.blue_bias]
    }

    /// Number of filter families with a non-zero variant; never above one.
    pub fn active_families(&self) -> usize {
        [self.grayscale, self.channel_filter, self.blur]
            .iter()
            .filter(|variant| **variant != 0)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_marks_every_slot() {
        let dirty = DirtySlots::all();
        assert_eq!(dirty.len(), ParamSlot::ALL.len());
        assert!(ParamSlot::ALL.iter().all(|slot| dirty.contains(*slot)));
    }

    #[test]
    fn iter_yields_marked_slots_in_declaration_order() {
        let mut dirty = DirtySlots::NONE;
        dirty.mark(ParamSlot::Hue);
        dirty.mark(ParamSlot::Zoom);
        dirty.mark(ParamSlot::Hue);
        let slots: Vec<ParamSlot> = dirty.iter().collect();
        assert_eq!(slots, vec![ParamSlot::Zoom, ParamSlot::Hue]);
    }

    #[test]
    fn slot_names_are_unique() {
        let mut names: Vec<&str> = ParamSlot::ALL.iter().map(|slot| slot.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ParamSlot::ALL.len());
    }
}
