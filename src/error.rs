use thiserror::Error;

/// Errors that can occur inside the whiteboard engine.
///
/// None of these ever reach the user: the public operations log them and
/// leave the canvas untouched.
#[derive(Debug, Error)]
pub enum WhiteboardError {
    #[error("Failed to encode surface: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Failed to decode snapshot: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Snapshot is {found:?} but the surface is {expected:?}")]
    SnapshotSize {
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error("Drawing surface is not available")]
    MissingSurface,

    #[error("No font available for text rendering")]
    MissingFont,

    #[error("Failed to read config: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, WhiteboardError>;
