use viewstate::{ButtonAction, Key, MouseButton};
use winit::event::{ElementState, MouseScrollDelta};
use winit::keyboard::KeyCode;

/// Maps a physical key to the viewer keymap. Physical codes keep the
/// bindings in the same place on every keyboard layout.
pub(crate) fn translate_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::Digit3 => Key::Digit3,
        KeyCode::Digit4 => Key::Digit4,
        KeyCode::Digit5 => Key::Digit5,
        KeyCode::Digit6 => Key::Digit6,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyZ => Key::Z,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyN => Key::N,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::Space => Key::Space,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        _ => return None,
    };
    Some(key)
}

pub(crate) fn translate_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Primary,
        winit::event::MouseButton::Right => MouseButton::Secondary,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        _ => MouseButton::Other,
    }
}

pub(crate) fn translate_state(state: ElementState) -> ButtonAction {
    match state {
        ElementState::Pressed => ButtonAction::Press,
        ElementState::Released => ButtonAction::Release,
    }
}

/// Vertical scroll amount; only the sign matters to the controller.
pub(crate) fn scroll_amount(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(position) => position.y as f32,
    }
}
