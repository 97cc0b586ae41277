//! Abstract input vocabulary and the fixed keymap.
//!
//! Keys here are layout-independent identifiers; the window layer translates
//! host key codes into them before calling the controller.

use crate::filter::{BlurFilter, Channel, ChannelFilter, FilterMode, GrayscaleMode, Nudge};
use crate::image::ImageSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Q,
    W,
    E,
    R,
    T,
    Y,
    U,
    Z,
    X,
    C,
    V,
    B,
    N,
    Up,
    Down,
    Space,
    F,
    G,
    H,
}

impl Key {
    pub const ALL: [Self; 26] = [
        Self::Escape,
        Self::Digit1,
        Self::Digit2,
        Self::Digit3,
        Self::Digit4,
        Self::Digit5,
        Self::Digit6,
        Self::Q,
        Self::W,
        Self::E,
        Self::R,
        Self::T,
        Self::Y,
        Self::U,
        Self::Z,
        Self::X,
        Self::C,
        Self::V,
        Self::B,
        Self::N,
        Self::Up,
        Self::Down,
        Self::Space,
        Self::F,
        Self::G,
        Self::H,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Escape => "Escape",
            Self::Digit1 => "1",
            Self::Digit2 => "2",
            Self::Digit3 => "3",
            Self::Digit4 => "4",
            Self::Digit5 => "5",
            Self::Digit6 => "6",
            Self::Q => "Q",
            Self::W => "W",
            Self::E => "E",
            Self::R => "R",
            Self::T => "T",
            Self::Y => "Y",
            Self::U => "U",
            Self::Z => "Z",
            Self::X => "X",
            Self::C => "C",
            Self::V => "V",
            Self::B => "B",
            Self::N => "N",
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Space => "Space",
            Self::F => "F",
            Self::G => "G",
            Self::H => "H",
        }
    }

    /// What pressing this key does.
    pub fn action(self) -> KeyAction {
        use KeyAction::*;
        match self {
            Self::Escape => Close,
            Self::Digit1 => SelectImage(ImageSlot::Test),
            Self::Digit2 => SelectImage(ImageSlot::Mandrill),
            Self::Digit3 => SelectImage(ImageSlot::UcLogo),
            Self::Digit4 => SelectImage(ImageSlot::Aerial),
            Self::Digit5 => SelectImage(ImageSlot::Thirsk),
            Self::Digit6 => SelectImage(ImageSlot::Pattern),
            Self::Q => ClearFilters,
            Self::W => SetMode(FilterMode::Grayscale(GrayscaleMode::Average)),
            Self::E => SetMode(FilterMode::Grayscale(GrayscaleMode::Rec601)),
            Self::R => SetMode(FilterMode::Grayscale(GrayscaleMode::Rec709)),
            Self::T => SetMode(FilterMode::Grayscale(GrayscaleMode::Lightness)),
            Self::Y => SetMode(FilterMode::Grayscale(GrayscaleMode::MaxChannel)),
            Self::U => SetMode(FilterMode::Grayscale(GrayscaleMode::MinChannel)),
            Self::Z => SetMode(FilterMode::Channel(ChannelFilter::SobelVertical)),
            Self::X => SetMode(FilterMode::Channel(ChannelFilter::SobelHorizontal)),
            Self::C => SetMode(FilterMode::Channel(ChannelFilter::UnsharpMask)),
            Self::V => SetMode(FilterMode::Blur(BlurFilter::Gaussian3)),
            Self::B => SetMode(FilterMode::Blur(BlurFilter::Gaussian5)),
            Self::N => SetMode(FilterMode::Blur(BlurFilter::Gaussian7)),
            Self::Up => NudgeBias(Nudge::Up),
            Self::Down => NudgeBias(Nudge::Down),
            Self::Space => RotateModifier,
            Self::F => HoldChannel(Channel::Red),
            Self::G => HoldChannel(Channel::Green),
            Self::H => HoldChannel(Channel::Blue),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Close,
    SelectImage(ImageSlot),
    ClearFilters,
    SetMode(FilterMode),
    NudgeBias(Nudge),
    /// Held: scrolling rotates instead of zooming.
    RotateModifier,
    /// Held: Up/Down adjust this channel's bias.
    HoldChannel(Channel),
}

impl KeyAction {
    pub fn describe(&self) -> String {
        match self {
            Self::Close => "close the window".to_string(),
            Self::SelectImage(slot) => format!("load image {} ({})", slot.number(), slot.name()),
            Self::ClearFilters => "clear all filters and channel bias".to_string(),
            Self::SetMode(FilterMode::Grayscale(mode)) => {
                format!("grayscale {} ({})", mode.variant(), mode.name())
            }
            Self::SetMode(FilterMode::Channel(filter)) => {
                format!("channel filter {} ({})", filter.variant(), filter.name())
            }
            Self::SetMode(FilterMode::Blur(filter)) => {
                format!("blur {} ({})", filter.variant(), filter.name())
            }
            Self::SetMode(FilterMode::Off) => "filters off".to_string(),
            Self::NudgeBias(Nudge::Up) => "raise bias of held channels by 0.05".to_string(),
            Self::NudgeBias(Nudge::Down) => "lower bias of held channels by 0.05".to_string(),
            Self::RotateModifier => "hold: scroll rotates instead of zooming".to_string(),
            Self::HoldChannel(channel) => {
                format!("hold: select {} channel for bias, enables hue mode", channel.name())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Press,
    Release,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_select_images_in_order() {
        let digits = [
            Key::Digit1,
            Key::Digit2,
            Key::Digit3,
            Key::Digit4,
            Key::Digit5,
            Key::Digit6,
        ];
        for (index, key) in digits.into_iter().enumerate() {
            match key.action() {
                KeyAction::SelectImage(slot) => assert_eq!(usize::from(slot.number()), index + 1),
                other => panic!("unexpected action {other:?}"),
            }
        }
    }

    #[test]
    fn grayscale_row_covers_all_variants() {
        let keys = [Key::W, Key::E, Key::R, Key::T, Key::Y, Key::U];
        let variants: Vec<u8> = keys
            .iter()
            .map(|key| match key.action() {
                KeyAction::SetMode(mode) => mode.grayscale_variant(),
                _ => 0,
            })
            .collect();
        assert_eq!(variants, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn labels_are_unique() {
        let mut labels: Vec<&str> = Key::ALL.iter().map(|key| key.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), Key::ALL.len());
    }
}
