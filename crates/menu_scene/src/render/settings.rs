//! Render settings collaborator
//!
//! Scenes query backbuffer dimensions every time they need them rather
//! than caching, so a resize is picked up by the next viewport or
//! unprojection call.

use parking_lot::RwLock;

use super::features::FeatureSetup;
use crate::foundation::math::Vec2;

/// Window and backbuffer dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSettings {
    /// Backbuffer width in pixels
    pub backbuffer_width: u32,
    /// Backbuffer height in pixels
    pub backbuffer_height: u32,
}

impl WindowSettings {
    /// Backbuffer size as floats
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.backbuffer_width as f32, self.backbuffer_height as f32)
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            backbuffer_width: 1920,
            backbuffer_height: 1080,
        }
    }
}

/// Read access to the renderer's global settings
pub trait RenderSettings: Send + Sync {
    /// Current window and backbuffer dimensions
    fn window_settings(&self) -> WindowSettings;

    /// Features currently enabled on the renderer
    fn renderer_features(&self) -> FeatureSetup;
}

/// Thread-safe holder of the current render settings
#[derive(Debug, Default)]
pub struct RenderSettingsManager {
    window: RwLock<WindowSettings>,
    features: RwLock<FeatureSetup>,
}

impl RenderSettingsManager {
    /// Create a manager with the given backbuffer size and all features enabled
    pub fn new(backbuffer_width: u32, backbuffer_height: u32) -> Self {
        Self {
            window: RwLock::new(WindowSettings { backbuffer_width, backbuffer_height }),
            features: RwLock::new(FeatureSetup::default()),
        }
    }

    /// Record a backbuffer resize
    pub fn resize(&self, backbuffer_width: u32, backbuffer_height: u32) {
        log::debug!("Backbuffer resized to {}x{}", backbuffer_width, backbuffer_height);
        *self.window.write() = WindowSettings { backbuffer_width, backbuffer_height };
    }

    /// Replace the global feature set
    pub fn set_features(&self, features: FeatureSetup) {
        *self.features.write() = features;
    }
}

impl RenderSettings for RenderSettingsManager {
    fn window_settings(&self) -> WindowSettings {
        *self.window.read()
    }

    fn renderer_features(&self) -> FeatureSetup {
        *self.features.read()
    }
}
