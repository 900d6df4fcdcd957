use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

/// Pixel distance below which a press-release pair still counts as a click
pub const CLICK_TOLERANCE: f32 = 10.0;

/// Engine-level input, decoupled from the windowing library
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerMoved { x: f32, y: f32 },
    /// `click` is true when the pointer barely moved since the press
    PointerUp { x: f32, y: f32, click: bool },
    PointerLeft,
    Scrolled { delta: f32 },
    Resized { width: u32, height: u32 },
}

/// Bridges winit window events to engine `InputEvent`s.
///
/// Tracks the cursor between events and discriminates clicks from drags
/// by how far the pointer travelled while pressed.
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    cursor: Option<(f32, f32)>,
    press_origin: Option<(f32, f32)>,
    max_travel: f32,
}

impl InputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate one window event; most events map to at most one
    /// engine event.
    pub fn process_event(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                self.cursor = Some((x, y));
                if let Some((ox, oy)) = self.press_origin {
                    let travel = ((x - ox).powi(2) + (y - oy).powi(2)).sqrt();
                    self.max_travel = self.max_travel.max(travel);
                }
                Some(InputEvent::PointerMoved { x, y })
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = self.cursor?;
                match state {
                    ElementState::Pressed => {
                        self.press_origin = Some((x, y));
                        self.max_travel = 0.0;
                        Some(InputEvent::PointerDown { x, y })
                    }
                    ElementState::Released => {
                        let click =
                            self.press_origin.take().is_some() && self.max_travel < CLICK_TOLERANCE;
                        Some(InputEvent::PointerUp { x, y, click })
                    }
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.press_origin = None;
                Some(InputEvent::PointerLeft)
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y * 40.0,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                Some(InputEvent::Scrolled { delta: amount })
            }
            WindowEvent::Resized(size) => Some(InputEvent::Resized {
                width: size.width,
                height: size.height,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Winit events cannot be constructed outside the library, so the
    // click/drag discrimination is tested through the internal state.

    #[test]
    fn short_travel_is_a_click() {
        let mut adapter = InputAdapter::new();
        adapter.cursor = Some((100.0, 100.0));
        adapter.press_origin = Some((100.0, 100.0));
        adapter.max_travel = 4.0;

        let click = adapter.press_origin.take().is_some() && adapter.max_travel < CLICK_TOLERANCE;
        assert!(click);
    }

    #[test]
    fn long_travel_is_a_drag() {
        let mut adapter = InputAdapter::new();
        adapter.cursor = Some((100.0, 100.0));
        adapter.press_origin = Some((100.0, 100.0));
        adapter.max_travel = 80.0;

        let click = adapter.press_origin.take().is_some() && adapter.max_travel < CLICK_TOLERANCE;
        assert!(!click);
    }

    #[test]
    fn travel_is_peak_not_final() {
        // Moving far away and back should still count as a drag
        let mut adapter = InputAdapter::new();
        adapter.press_origin = Some((0.0, 0.0));
        for x in [50.0f32, 0.0] {
            if let Some((ox, oy)) = adapter.press_origin {
                let travel = ((x - ox).powi(2) + (0.0 - oy).powi(2)).sqrt();
                adapter.max_travel = adapter.max_travel.max(travel);
            }
        }
        assert!(adapter.max_travel >= 50.0);
    }
}
