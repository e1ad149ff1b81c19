//! UI movie consumer
//!
//! Menus are authored as movies that render into a pixel rectangle of the
//! backbuffer. Scenes only need to tell the movie where that rectangle is.

/// Normalized rectangle in `[0, 1]` of the render target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderArea {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Right edge
    pub right: f32,
    /// Bottom edge
    pub bottom: f32,
}

impl RenderArea {
    /// The whole render target
    pub const FULL: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 1.0,
        bottom: 1.0,
    };
}

impl Default for RenderArea {
    fn default() -> Self {
        Self::FULL
    }
}

/// Pixel viewport of a movie within its buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Buffer width in pixels
    pub buffer_width: u32,
    /// Buffer height in pixels
    pub buffer_height: u32,
    /// Left edge in pixels
    pub left: i32,
    /// Top edge in pixels
    pub top: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

/// Consumer of viewport updates
pub trait UiMovie {
    /// Apply a new viewport
    fn set_viewport(&mut self, viewport: Viewport);
}
