use egui::{Color32, Pos2};

use crate::config::WhiteboardConfig;
use crate::error::{Result, WhiteboardError};
use crate::history::{Snapshot, SnapshotHistory};
use crate::input::InputEvent;
use crate::shape::Shape;
use crate::state::GestureState;
use crate::stroke::StrokeSession;
use crate::surface::Surface;
use crate::text::TextRasterizer;
use crate::tools::{Tool, ToolSettings};
use crate::viewport::Viewport;

/// The pixel buffer together with its history.
#[derive(Debug)]
struct Canvas {
    surface: Surface,
    history: SnapshotHistory,
    /// Undo/redo target not yet decoded into the surface.
    pending_restore: Option<Snapshot>,
}

/// One drawing session: tool settings, gesture state, viewport and canvas.
///
/// Pointer positions come in as screen coordinates and are mapped through the
/// viewport before they reach the surface. Until [`Whiteboard::initialize`] has
/// created a surface every drawing operation is a no-op.
///
/// Undo and redo only move the history stacks; the surface catches up on the
/// next [`Whiteboard::settle`]. Everything that writes to or reads from the
/// surface settles first, so a gesture never draws onto a buffer that a restore
/// is about to replace. Undo, redo and clear are ignored while a pointer
/// gesture is held down.
#[derive(Debug)]
pub struct Whiteboard {
    config: WhiteboardConfig,
    settings: ToolSettings,
    viewport: Viewport,
    state: GestureState,
    canvas: Option<Canvas>,
    text: Option<TextRasterizer>,
}

impl Whiteboard {
    pub fn new(config: WhiteboardConfig) -> Self {
        let config = config.sanitized();
        let text = TextRasterizer::from_egui_defaults()
            .inspect_err(|err| log::warn!("Text tool disabled: {err}"))
            .ok();
        Self {
            settings: ToolSettings::new(&config),
            viewport: Viewport::new(&config),
            state: GestureState::Idle,
            canvas: None,
            text,
            config,
        }
    }

    /// A session with a surface of the configured size already in place.
    pub fn with_surface(config: WhiteboardConfig) -> Self {
        let (width, height) = (config.canvas_width, config.canvas_height);
        let mut whiteboard = Self::new(config);
        whiteboard.initialize(width, height);
        whiteboard
    }

    /// (Re)create the surface cleared to the background color, with a history
    /// holding only that blank state.
    pub fn initialize(&mut self, width: u32, height: u32) {
        let surface = Surface::new(width, height, self.config.background_color());
        match Snapshot::capture(&surface) {
            Ok(initial) => {
                log::info!("Surface initialized at {}x{}", surface.width(), surface.height());
                self.canvas = Some(Canvas {
                    surface,
                    history: SnapshotHistory::new(initial),
                    pending_restore: None,
                });
            }
            Err(err) => {
                log::warn!("Could not snapshot a blank surface: {err}");
                self.canvas = None;
            }
        }
        self.state = GestureState::Idle;
    }

    pub fn config(&self) -> &WhiteboardConfig {
        &self.config
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ToolSettings {
        &mut self.settings
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.canvas.as_ref().map(|canvas| &canvas.surface)
    }

    pub fn history(&self) -> Option<&SnapshotHistory> {
        self.canvas.as_ref().map(|canvas| &canvas.history)
    }

    pub fn can_undo(&self) -> bool {
        self.history().is_some_and(SnapshotHistory::can_undo)
    }

    pub fn can_redo(&self) -> bool {
        self.history().is_some_and(SnapshotHistory::can_redo)
    }

    pub fn is_restore_pending(&self) -> bool {
        self.canvas
            .as_ref()
            .is_some_and(|canvas| canvas.pending_restore.is_some())
    }

    /// Switch tools. A text prompt still waiting for input is dropped.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.state.is_awaiting_text() {
            self.cancel_text();
        }
        self.settings.set_tool(tool);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { location } => self.pointer_down(location.position),
            InputEvent::PointerMove { location } => self.pointer_move(location.position),
            InputEvent::PointerUp { location } => self.pointer_up(location.position),
            InputEvent::PointerLeave { last_known_location } => {
                self.pointer_leave(last_known_location.position)
            }
        }
    }

    pub fn pointer_down(&mut self, screen: Pos2) {
        self.settle();

        if self.state.is_awaiting_text() {
            self.cancel_text();
        }
        if self.state.is_active_gesture() {
            log::debug!("Ignoring pointer down during {}", self.state.name());
            return;
        }

        let tool = self.settings.tool();
        if tool == Tool::Grab {
            self.transition(GestureState::Panning { last: screen });
            return;
        }
        if self.canvas.is_none() {
            return;
        }

        let at = self.viewport.screen_to_canvas(screen);
        let next = if tool.is_freehand() {
            GestureState::Drawing(StrokeSession::begin(
                at,
                self.settings.stroke_color(),
                self.settings.stroke_width(),
            ))
        } else if let Some(kind) = tool.shape_kind() {
            GestureState::DraggingShape {
                kind,
                start: at,
                current: at,
                color: self.settings.color(),
                width: self.settings.brush_size(),
            }
        } else {
            GestureState::Pressed { tool }
        };
        self.transition(next);
    }

    pub fn pointer_move(&mut self, screen: Pos2) {
        let at = self.viewport.screen_to_canvas(screen);
        match &mut self.state {
            GestureState::Drawing(stroke) => {
                let Some((from, to)) = stroke.extend_to(at) else {
                    return;
                };
                let (width, color) = (stroke.width(), stroke.color());
                if let Some(canvas) = self.canvas.as_mut() {
                    canvas.surface.stroke_segment(from, to, width, color);
                }
            }
            GestureState::DraggingShape { current, .. } => *current = at,
            GestureState::Panning { last } => {
                let delta = screen - *last;
                *last = screen;
                self.viewport.pan_by(delta);
            }
            GestureState::Idle | GestureState::Pressed { .. } | GestureState::AwaitingText { .. } => {}
        }
    }

    pub fn pointer_up(&mut self, screen: Pos2) {
        let at = self.viewport.screen_to_canvas(screen);
        match std::mem::take(&mut self.state) {
            GestureState::Drawing(stroke) => {
                log::debug!("Stroke finished with {} points", stroke.points().len());
                self.commit("stroke");
            }
            GestureState::DraggingShape { kind, start, color, width, .. } => {
                let shape = Shape::from_drag(kind, start, at, self.config.polygon_sides);
                if let Some(canvas) = self.canvas.as_mut() {
                    canvas.surface.stroke_shape(&shape, width, color);
                }
                self.commit("shape");
            }
            GestureState::Panning { .. } => {}
            GestureState::Pressed { tool: Tool::Text } => {
                self.transition(GestureState::AwaitingText { at });
            }
            GestureState::Pressed { tool: Tool::Fill } => self.fill_at(at),
            GestureState::Pressed { tool } => {
                log::debug!("Nothing to do on release for {tool}");
            }
            state @ (GestureState::Idle | GestureState::AwaitingText { .. }) => self.state = state,
        }
    }

    /// Leaving the canvas ends a held gesture the same way releasing does.
    /// A pending fill or text click is abandoned instead.
    pub fn pointer_leave(&mut self, screen: Pos2) {
        match self.state {
            GestureState::Drawing(_) | GestureState::DraggingShape { .. } | GestureState::Panning { .. } => {
                self.pointer_up(screen);
            }
            GestureState::Pressed { .. } => self.transition(GestureState::Idle),
            GestureState::Idle | GestureState::AwaitingText { .. } => {}
        }
    }

    /// Position the text prompt is for, if one is open.
    pub fn text_prompt(&self) -> Option<Pos2> {
        match self.state {
            GestureState::AwaitingText { at } => Some(at),
            _ => None,
        }
    }

    /// Answer the text prompt. `None` or an empty string cancels it.
    pub fn submit_text(&mut self, text: Option<&str>) {
        let GestureState::AwaitingText { at } = self.state else {
            return;
        };
        self.transition(GestureState::Idle);

        let Some(text) = text.filter(|text| !text.is_empty()) else {
            log::debug!("Text prompt cancelled");
            return;
        };
        let Some(rasterizer) = self.text.as_ref() else {
            log::warn!("No font loaded; dropping text {text:?}");
            return;
        };
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        let size = self.settings.brush_size() * self.config.text_scale;
        canvas.surface.fill_text(rasterizer, text, at, size, self.settings.color());
        self.commit("text");
    }

    pub fn cancel_text(&mut self) {
        self.submit_text(None);
    }

    fn fill_at(&mut self, at: Pos2) {
        let color = self.settings.color();
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        canvas.surface.flood_fill(at, color);
        self.commit("fill");
    }

    /// Fill the whole surface with the background color as one undoable step.
    pub fn clear(&mut self) {
        if self.gesture_in_progress("clear") {
            return;
        }
        self.settle();
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        canvas.surface.clear();
        self.commit("clear");
    }

    pub fn undo(&mut self) {
        self.step_history(SnapshotHistory::undo, "undo");
    }

    pub fn redo(&mut self) {
        self.step_history(SnapshotHistory::redo, "redo");
    }

    fn step_history(&mut self, step: fn(&mut SnapshotHistory) -> Option<Snapshot>, what: &str) {
        if self.gesture_in_progress(what) {
            return;
        }
        self.settle();
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        match step(&mut canvas.history) {
            Some(target) => {
                log::info!(
                    "{what}: {} undo / {} redo entries",
                    canvas.history.undo_stack().len(),
                    canvas.history.redo_stack().len()
                );
                canvas.pending_restore = Some(target);
            }
            None => log::debug!("Nothing to {what}"),
        }
    }

    /// Decode an outstanding undo/redo target into the surface.
    /// Returns true if the surface changed.
    pub fn settle(&mut self) -> bool {
        let Some(canvas) = self.canvas.as_mut() else {
            return false;
        };
        let Some(target) = canvas.pending_restore.take() else {
            return false;
        };
        match restore(&mut canvas.surface, &target) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Could not restore snapshot: {err}");
                false
            }
        }
    }

    /// Encode the current surface as PNG. `None` when there is no surface or
    /// encoding fails.
    pub fn export_png(&mut self) -> Option<Vec<u8>> {
        self.settle();
        self.surface()
            .ok_or(WhiteboardError::MissingSurface)
            .and_then(Surface::encode_png)
            .inspect_err(|err| log::warn!("Export failed: {err}"))
            .ok()
    }

    fn commit(&mut self, what: &str) {
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        match Snapshot::capture(&canvas.surface) {
            Ok(snapshot) => {
                log::info!("Committed {what} ({} bytes)", snapshot.byte_len());
                canvas.history.push(snapshot);
            }
            Err(err) => log::warn!("Committed {what} without a history entry: {err}"),
        }
    }

    /// History and clear wait until the pointer is released; a restore landing
    /// mid-stroke would wipe the part already painted.
    fn gesture_in_progress(&self, what: &str) -> bool {
        let busy = self.state.is_active_gesture();
        if busy {
            log::debug!("Ignoring {what} during {}", self.state.name());
        }
        busy
    }

    fn transition(&mut self, next: GestureState) {
        log::debug!("Gesture {} -> {}", self.state.name(), next.name());
        self.state = next;
    }

    /// Color under a canvas position, for tests and eyedropping.
    pub fn color_at(&self, at: Pos2) -> Option<Color32> {
        if at.x < 0.0 || at.y < 0.0 {
            return None;
        }
        let pixel = self.surface()?.pixel(at.x as u32, at.y as u32)?;
        Some(Color32::from_rgba_unmultiplied(pixel[0], pixel[1], pixel[2], pixel[3]))
    }
}

fn restore(surface: &mut Surface, target: &Snapshot) -> Result<()> {
    surface.replace_pixels(target.decode()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Whiteboard {
        Whiteboard::with_surface(WhiteboardConfig {
            canvas_width: 16,
            canvas_height: 16,
            ..Default::default()
        })
    }

    #[test]
    fn test_initialize_resets_history_and_pending_restore() {
        let mut board = board();
        board.pointer_down(Pos2::new(1.0, 1.0));
        board.pointer_move(Pos2::new(10.0, 1.0));
        board.pointer_up(Pos2::new(10.0, 1.0));
        board.undo();
        assert!(board.is_restore_pending());

        board.initialize(8, 4);
        assert!(!board.is_restore_pending());
        assert!(!board.can_undo());
        assert!(!board.can_redo());
        assert_eq!(board.surface().map(Surface::size), Some(egui::vec2(8.0, 4.0)));
    }

    #[test]
    fn test_settle_without_pending_restore_reports_nothing() {
        let mut board = board();
        assert!(!board.settle());

        board.clear();
        board.undo();
        assert!(board.settle());
        assert!(!board.settle());
    }

    #[test]
    fn test_switching_tool_drops_text_prompt() {
        let mut board = board();
        board.set_tool(Tool::Text);
        board.pointer_down(Pos2::new(2.0, 8.0));
        board.pointer_up(Pos2::new(2.0, 8.0));
        assert!(board.text_prompt().is_some());

        board.set_tool(Tool::Pencil);
        assert!(board.state().is_idle());
        assert!(!board.can_undo());
    }

    #[test]
    fn test_mismatched_snapshot_is_rejected() {
        let mut surface = Surface::new(4, 4, Color32::WHITE);
        let other = Surface::new(2, 2, Color32::BLACK);
        let snapshot = Snapshot::capture(&other).unwrap();

        assert!(restore(&mut surface, &snapshot).is_err());
        assert_eq!(surface.pixel(0, 0).map(|p| p.0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_inverted_config_ranges_do_not_panic() {
        let mut board = Whiteboard::with_surface(WhiteboardConfig {
            canvas_width: 8,
            canvas_height: 8,
            zoom_min: -1.0,
            zoom_max: -0.5,
            brush_size_min: 10.0,
            brush_size_max: 2.0,
            ..Default::default()
        });
        board.zoom_in();
        board.zoom_out();
        board.settings_mut().set_brush_size(0.0);

        assert_eq!(board.viewport().zoom(), 0.01);
        assert_eq!(board.settings().brush_size(), 2.0);
        assert_eq!(board.config().zoom_max, 0.01);
    }
}
