#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod error;
pub mod file_handler;
pub mod fill;
pub mod history;
pub mod input;
pub mod panels;
pub mod profile;
pub mod renderer;
pub mod shape;
pub mod state;
pub mod stroke;
pub mod surface;
pub mod text;
pub mod tools;
pub mod viewport;
pub mod whiteboard;

pub use app::WhiteboardApp;
pub use config::WhiteboardConfig;
pub use error::WhiteboardError;
pub use history::{Snapshot, SnapshotHistory};
pub use input::{InputEvent, InputLocation};
pub use profile::Profile;
pub use renderer::Renderer;
pub use shape::{Shape, ShapeKind};
pub use state::GestureState;
pub use surface::Surface;
pub use tools::{Tool, ToolSettings};
pub use viewport::Viewport;
pub use whiteboard::Whiteboard;
