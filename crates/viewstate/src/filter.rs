use std::fmt;

/// Bias change applied by a single Up/Down press.
pub const BIAS_STEP: f32 = 0.05;
/// Bias is tracked in whole [`BIAS_STEP`]s; twenty steps reach ±1.0.
const BIAS_LIMIT_STEPS: i8 = 20;

/// Grayscale conversions, variants 1 through 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrayscaleMode {
    /// Plain mean of the three channels.
    Average,
    /// Rec. 601 luma weights.
    Rec601,
    /// Rec. 709 luma weights.
    Rec709,
    /// HSL lightness, the midpoint of the largest and smallest channel.
    Lightness,
    MaxChannel,
    MinChannel,
}

impl GrayscaleMode {
    pub const ALL: [Self; 6] = [
        Self::Average,
        Self::Rec601,
        Self::Rec709,
        Self::Lightness,
        Self::MaxChannel,
        Self::MinChannel,
    ];

    pub fn variant(self) -> u8 {
        match self {
            Self::Average => 1,
            Self::Rec601 => 2,
            Self::Rec709 => 3,
            Self::Lightness => 4,
            Self::MaxChannel => 5,
            Self::MinChannel => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Average => "average",
            Self::Rec601 => "rec601",
            Self::Rec709 => "rec709",
            Self::Lightness => "lightness",
            Self::MaxChannel => "max-channel",
            Self::MinChannel => "min-channel",
        }
    }
}

/// Convolution filters, variants 1 through 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelFilter {
    SobelVertical,
    SobelHorizontal,
    UnsharpMask,
}

impl ChannelFilter {
    pub const ALL: [Self; 3] = [Self::SobelVertical, Self::SobelHorizontal, Self::UnsharpMask];

    pub fn variant(self) -> u8 {
        match self {
            Self::SobelVertical => 1,
            Self::SobelHorizontal => 2,
            Self::UnsharpMask => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::SobelVertical => "sobel-vertical",
            Self::SobelHorizontal => "sobel-horizontal",
            Self::UnsharpMask => "unsharp-mask",
        }
    }
}

/// Gaussian blurs of increasing radius, variants 1 through 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlurFilter {
    Gaussian3,
    Gaussian5,
    Gaussian7,
}

impl BlurFilter {
    pub const ALL: [Self; 3] = [Self::Gaussian3, Self::Gaussian5, Self::Gaussian7];

    pub fn variant(self) -> u8 {
        match self {
            Self::Gaussian3 => 1,
            Self::Gaussian5 => 2,
            Self::Gaussian7 => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Gaussian3 => "gaussian-3x3",
            Self::Gaussian5 => "gaussian-5x5",
            Self::Gaussian7 => "gaussian-7x7",
        }
    }
}

/// Active filter. The three families share one enum so at most one of them
/// can ever be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    #[default]
    Off,
    Grayscale(GrayscaleMode),
    Channel(ChannelFilter),
    Blur(BlurFilter),
}

impl FilterMode {
    /// Grayscale variant for the renderer, 0 when another family is active.
    pub fn grayscale_variant(self) -> u8 {
        match self {
            Self::Grayscale(mode) => mode.variant(),
            _ => 0,
        }
    }

    pub fn channel_variant(self) -> u8 {
        match self {
            Self::Channel(filter) => filter.variant(),
            _ => 0,
        }
    }

    pub fn blur_variant(self) -> u8 {
        match self {
            Self::Blur(filter) => filter.variant(),
            _ => 0,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::Grayscale(mode) => write!(f, "grayscale/{}", mode.name()),
            Self::Channel(filter) => write!(f, "filter/{}", filter.name()),
            Self::Blur(filter) => write!(f, "blur/{}", filter.name()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    pub fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Up,
    Down,
}

impl Nudge {
    fn steps(self) -> i8 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// Per-channel colour bias in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelBias {
    steps: [i8; 3],
}

impl ChannelBias {
    pub fn get(&self, channel: Channel) -> f32 {
        f32::from(self.steps[channel.index()]) * BIAS_STEP
    }

    #[cfg(test)]
    pub(crate) fn to_array(&self) -> [f32; 3] {
        Channel::ALL.map(|channel| self.get(channel))
    }

    /// Moves one channel a single step; returns false when already at the limit.
    pub(crate) fn nudge(&mut self, channel: Channel, direction: Nudge) -> bool {
        let slot = &mut self.steps[channel.index()];
        let next = (*slot + direction.steps()).clamp(-BIAS_LIMIT_STEPS, BIAS_LIMIT_STEPS);
        let changed = next != *slot;
        *slot = next;
        changed
    }

    pub(crate) fn reset(&mut self) {
        self.steps = [0; 3];
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelHolds {
    held: [bool; 3],
}

impl ChannelHolds {
    pub fn is_held(&self, channel: Channel) -> bool {
        self.held[channel.index()]
    }

    pub fn held(&self) -> impl Iterator<Item = Channel> + '_ {
        Channel::ALL
            .into_iter()
            .filter(move |channel| self.is_held(*channel))
    }

    pub(crate) fn set(&mut self, channel: Channel, held: bool) {
        self.held[channel.index()] = held;
    }
}

/// Filter selection plus the channel-bias controls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    mode: FilterMode,
    bias: ChannelBias,
    holds: ChannelHolds,
    hue_active: bool,
}

impl FilterState {
    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn bias(&self) -> &ChannelBias {
        &self.bias
    }

    pub fn holds(&self) -> &ChannelHolds {
        &self.holds
    }

    pub fn hue_active(&self) -> bool {
        self.hue_active
    }

    pub(crate) fn set_mode(&mut self, mode: FilterMode) {
        self.mode = mode;
    }

    /// Clears every filter family and zeroes the bias. Hue mode is sticky and
    /// survives.
    pub(crate) fn clear(&mut self) {
        self.mode = FilterMode::Off;
        self.bias.reset();
    }

    /// Starts holding `channel`. Turns hue mode on and drops any channel
    /// filter, leaving grayscale and blur selections alone.
    pub(crate) fn press_hold(&mut self, channel: Channel) {
        self.holds.set(channel, true);
        self.hue_active = true;
        if matches!(self.mode, FilterMode::Channel(_)) {
            self.mode = FilterMode::Off;
        }
    }

    pub(crate) fn release_hold(&mut self, channel: Channel) {
        self.holds.set(channel, false);
    }

    /// Nudges every held channel; returns the channels whose bias changed.
    pub(crate) fn nudge_held(&mut self, direction: Nudge) -> Vec<Channel> {
        let held: Vec<Channel> = self.holds.held().collect();
        held.into_iter()
            .filter(|channel| self.bias.nudge(*channel, direction))
            .collect()
    }
}
