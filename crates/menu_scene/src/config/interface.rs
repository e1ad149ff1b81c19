//! Interface camera settings

use serde::{Deserialize, Serialize};

use super::Config;

/// Camera and anti-aliasing settings shared by every menu scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceSettings {
    /// Field of view in degrees used when a scene asks for `fov <= 0`
    pub default_fov: f32,

    /// Near plane distance of UI cameras, in meters
    pub ui_camera_near_distance: f32,

    /// Far plane distance of UI cameras, in meters
    pub ui_camera_far_distance: f32,

    /// Whether menu scenes render with temporal anti-aliasing
    pub temporal_aa: bool,
}

impl Default for InterfaceSettings {
    fn default() -> Self {
        Self {
            default_fov: 75.0,
            ui_camera_near_distance: 0.214,
            ui_camera_far_distance: 214.3125,
            temporal_aa: true,
        }
    }
}

impl Config for InterfaceSettings {}
