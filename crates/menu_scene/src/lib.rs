//! # Menu Scene
//!
//! Named 3D scenes for user interface menus, each with its own UI camera
//! bound to a renderer camera view.
//!
//! ## Features
//!
//! - **Scene registry**: thread-safe lookup of live scenes by name
//! - **UI cameras**: perspective frustum derived from FOV and backbuffer aspect
//! - **Renderer binding**: camera-view, image-space and feature records per scene
//! - **Render to texture**: offscreen menu targets shown on scene geometry
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use menu_scene::prelude::*;
//!
//! let manager = Arc::new(SceneManager::new());
//! let renderer = HeadlessRenderer::new(1920, 1080);
//! let services = renderer.services(manager.clone(), InterfaceSettings::default());
//!
//! let scene = Scene::new("MainMenu", services, None, 0.0);
//! scene.write().set_active(true);
//!
//! let found = manager.get_by_name("MainMenu").expect("scene is registered");
//! assert!(found.read().is_active());
//!
//! drop(found);
//! drop(scene);
//! assert!(manager.get_by_name("MainMenu").is_none());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod render;
pub mod scene;

use thiserror::Error;

/// Errors raised by menu scene operations
#[derive(Debug, Error)]
pub enum SceneError {
    /// Texture database rejected a request
    #[error("texture error: {0}")]
    Texture(#[from] render::TextureError),

    /// Operation needs an offscreen target that was never requested
    #[error("scene '{0}' has no offscreen render target")]
    MissingRenderTarget(String),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        SceneError,
        config::{Config, ConfigError, InterfaceSettings},
        foundation::math::{Vec2, Vec3},
        render::{
            ClearColor, FeatureSetup, Features, RenderArea, RenderSettings, StorageTable,
            TextureDb, UiMovie, Viewport,
        },
        scene::{HeadlessRenderer, Node, NodeRef, Scene, SceneManager, SceneRef, SceneServices},
    };
}
