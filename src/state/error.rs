//! State management-specific error types.

/// Errors that can occur during state operations.
///
/// None of these reach the user: callers log them and carry on.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Anchor target not present on the page
    #[error("Anchor not found: {anchor}")]
    AnchorNotFound { anchor: String },

    /// Slide index outside the slide list
    #[error("Slide {index} out of range (carousel has {len} slides)")]
    SlideOutOfRange { index: usize, len: usize },

    /// Navigation link index outside the link list
    #[error("Navigation link {0} does not exist")]
    LinkOutOfRange(usize),
}
