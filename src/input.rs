use egui::{Context, Pos2, Rect};

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in screen coordinates
    pub position: Pos2,
}

impl InputLocation {
    pub fn new(position: Pos2) -> Self {
        Self { position }
    }
}

/// Pointer events the whiteboard reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed over the canvas
    PointerDown { location: InputLocation },
    /// Pointer moved over the canvas
    PointerMove { location: InputLocation },
    /// Primary button was released over the canvas
    PointerUp { location: InputLocation },
    /// Pointer left the canvas (or the window)
    PointerLeave { last_known_location: InputLocation },
}

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(Rect::NOTHING)
    }
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        ctx.input(|input| {
            let hover = input
                .pointer
                .hover_pos()
                .filter(|pos| self.canvas_rect.contains(*pos));
            self.translate(
                hover,
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
            )
        })
    }

    /// Turn one frame's pointer snapshot into events, in down, move, up, leave order.
    fn translate(&mut self, hover: Option<Pos2>, pressed: bool, released: bool) -> Vec<InputEvent> {
        let mut events = Vec::new();

        match (hover, self.last_pointer_pos) {
            (Some(pos), last) => {
                if pressed {
                    events.push(InputEvent::PointerDown {
                        location: InputLocation::new(pos),
                    });
                }
                if last != Some(pos) {
                    events.push(InputEvent::PointerMove {
                        location: InputLocation::new(pos),
                    });
                }
                if released {
                    events.push(InputEvent::PointerUp {
                        location: InputLocation::new(pos),
                    });
                }
                self.last_pointer_pos = Some(pos);
            }
            (None, Some(last)) => {
                events.push(InputEvent::PointerLeave {
                    last_known_location: InputLocation::new(last),
                });
                self.last_pointer_pos = None;
            }
            (None, None) => {}
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> InputHandler {
        InputHandler::new(Rect::from_min_max(Pos2::ZERO, Pos2::new(100.0, 100.0)))
    }

    #[test]
    fn test_press_then_move_then_release() {
        let mut input = handler();
        let p = Pos2::new(10.0, 10.0);
        let q = Pos2::new(20.0, 15.0);

        assert_eq!(
            input.translate(Some(p), true, false),
            vec![
                InputEvent::PointerDown { location: InputLocation::new(p) },
                InputEvent::PointerMove { location: InputLocation::new(p) },
            ]
        );
        assert_eq!(
            input.translate(Some(q), false, false),
            vec![InputEvent::PointerMove { location: InputLocation::new(q) }]
        );
        assert_eq!(
            input.translate(Some(q), false, true),
            vec![InputEvent::PointerUp { location: InputLocation::new(q) }]
        );
    }

    #[test]
    fn test_leaving_reports_last_position() {
        let mut input = handler();
        let p = Pos2::new(99.0, 50.0);
        input.translate(Some(p), false, false);

        assert_eq!(
            input.translate(None, false, false),
            vec![InputEvent::PointerLeave {
                last_known_location: InputLocation::new(p)
            }]
        );
        assert!(input.translate(None, false, false).is_empty());
    }
}
