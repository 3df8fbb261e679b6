//! The gesture state machine for the drawing surface.
//!
//! One pointer-down to pointer-up cycle moves through these states:
//!
//! ```text
//!                 pencil/brush/eraser      ┌───────────────┐
//!              ┌──────────────────────────►│    Drawing    ├──┐
//!              │                           └───────────────┘  │
//!              │  circle/rectangle/polygon ┌───────────────┐  │
//!              ├──────────────────────────►│ DraggingShape ├──┤ up / leave
//! ┌──────────┐ │                           └───────────────┘  │ ┌──────────┐
//! │   Idle   ├─┤  grab                     ┌───────────────┐  ├─►   Idle   │
//! └──────────┘ ├──────────────────────────►│    Panning    ├──┤ └──────────┘
//!              │                           └───────────────┘  │
//!              │  fill/text                ┌───────────────┐  │
//!              └──────────────────────────►│    Pressed    ├──┘ up (fill)
//!                                          └───────┬───────┘
//!                                            up (text)
//!                                          ┌───────▼───────┐
//!                                          │ AwaitingText  ├──► Idle on submit / cancel
//!                                          └───────────────┘
//! ```
//!
//! Fill and text first sit in `Pressed` until the button comes back up. Fill
//! then runs and commits immediately; text waits for its prompt.
use egui::{Color32, Pos2};

use crate::shape::ShapeKind;
use crate::stroke::StrokeSession;
use crate::tools::Tool;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Freehand path in progress.
    Drawing(StrokeSession),
    /// Shape drag in progress; nothing is painted until release.
    DraggingShape {
        kind: ShapeKind,
        start: Pos2,
        current: Pos2,
        color: Color32,
        width: f32,
    },
    /// Grab tool drag; `last` is the previous screen position.
    Panning { last: Pos2 },
    /// Click tool (fill or text) held down; acts on release.
    Pressed { tool: Tool },
    /// Text tool released; waiting for the user to type something.
    AwaitingText { at: Pos2 },
}

impl GestureState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Drawing(_) => "Drawing",
            Self::DraggingShape { .. } => "DraggingShape",
            Self::Panning { .. } => "Panning",
            Self::Pressed { .. } => "Pressed",
            Self::AwaitingText { .. } => "AwaitingText",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// True while a pointer gesture is held down.
    pub fn is_active_gesture(&self) -> bool {
        matches!(
            self,
            Self::Drawing(_) | Self::DraggingShape { .. } | Self::Panning { .. } | Self::Pressed { .. }
        )
    }

    pub fn is_awaiting_text(&self) -> bool {
        matches!(self, Self::AwaitingText { .. })
    }

    /// The in-progress shape drag, for drawing a preview.
    pub fn shape_drag(&self) -> Option<(ShapeKind, Pos2, Pos2)> {
        match self {
            Self::DraggingShape { kind, start, current, .. } => Some((*kind, *start, *current)),
            _ => None,
        }
    }
}
