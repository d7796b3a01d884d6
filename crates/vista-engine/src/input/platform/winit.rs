use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, Touch, TouchPhase, WindowEvent};

use crate::coords::Vec2;
use crate::input::{InputEvent, InputState, MouseButton, MouseWheelDelta, PointerId};

/// Translates a winit `WindowEvent` into a viewport `InputEvent`.
///
/// `scale_factor` is the window's DPI scale; all positions are converted to
/// logical pixels. Returns `None` for events not represented by the input
/// subsystem.
///
/// Wheel deltas are normalized so that positive `y` means "scroll down /
/// towards the user" (winit reports the opposite sign).
pub fn translate_window_event(
    scale_factor: f64,
    state: &mut InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => {
            let was_down = state.set_focused(*f);
            was_down.then_some(InputEvent::PointerCancel { id: PointerId::MOUSE })
        }

        WindowEvent::CursorMoved { position, .. } => {
            let pos = to_logical(scale_factor, *position);
            state.cursor = Some(pos);
            Some(InputEvent::PointerMove { id: PointerId::MOUSE, pos })
        }

        WindowEvent::MouseInput { state: st, button, .. } => {
            let button = map_mouse_button(*button);
            // winit 0.30 does not expose cursor query; use tracked pointer position.
            let pos = state.cursor.unwrap_or_default();

            match st {
                ElementState::Pressed => state
                    .press(button)
                    .then_some(InputEvent::PointerDown { id: PointerId::MOUSE, pos }),
                ElementState::Released => state
                    .release(button)
                    .then_some(InputEvent::PointerUp { id: PointerId::MOUSE }),
            }
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let pos = state.cursor.unwrap_or_default();
            let delta = match delta {
                MouseScrollDelta::LineDelta(x, y) => MouseWheelDelta::Line { x: -*x, y: -*y },
                MouseScrollDelta::PixelDelta(p) => {
                    let d = to_logical(scale_factor, *p);
                    MouseWheelDelta::Pixel { x: -d.x, y: -d.y }
                }
            };
            Some(InputEvent::Wheel { delta, pos })
        }

        WindowEvent::Touch(touch) => Some(translate_touch(scale_factor, touch)),

        _ => None,
    }
}

fn translate_touch(scale_factor: f64, touch: &Touch) -> InputEvent {
    let id = PointerId::touch(touch.id);
    let pos = to_logical(scale_factor, touch.location);
    match touch.phase {
        TouchPhase::Started => InputEvent::PointerDown { id, pos },
        TouchPhase::Moved => InputEvent::PointerMove { id, pos },
        TouchPhase::Ended => InputEvent::PointerUp { id },
        TouchPhase::Cancelled => InputEvent::PointerCancel { id },
    }
}

fn to_logical(scale_factor: f64, pos: PhysicalPosition<f64>) -> Vec2 {
    let logical = pos.to_logical::<f64>(scale_factor);
    Vec2::new(logical.x as f32, logical.y as f32)
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}
