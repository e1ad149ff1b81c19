//! Collaborators shared by every menu scene

use std::sync::Arc;

use crate::config::InterfaceSettings;
use crate::render::{
    MemoryStorageTable, MemoryTextureDb, RenderSettings, RenderSettingsManager, StorageTable,
    TextureDb,
};

use super::scene_manager::SceneManager;

/// Services a scene is constructed against
///
/// Cloning is cheap; every field is shared.
#[derive(Clone)]
pub struct SceneServices {
    /// Registry scenes add themselves to
    pub manager: Arc<SceneManager>,
    /// Backbuffer size and global feature toggles
    pub render_settings: Arc<dyn RenderSettings>,
    /// Renderer record storage
    pub storage: Arc<dyn StorageTable>,
    /// Render target allocation and material overrides
    pub textures: Arc<dyn TextureDb>,
    /// Camera configuration
    pub interface: Arc<InterfaceSettings>,
}

impl std::fmt::Debug for SceneServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneServices")
            .field("manager", &self.manager)
            .field("window", &self.render_settings.window_settings())
            .field("interface", &self.interface)
            .finish_non_exhaustive()
    }
}

/// In-process renderer collaborators, for tools and tests
#[derive(Debug, Clone)]
pub struct HeadlessRenderer {
    /// Render settings
    pub settings: Arc<RenderSettingsManager>,
    /// Record storage
    pub storage: Arc<MemoryStorageTable>,
    /// Texture database
    pub textures: Arc<MemoryTextureDb>,
}

impl HeadlessRenderer {
    /// Create headless collaborators with the given backbuffer size
    pub fn new(backbuffer_width: u32, backbuffer_height: u32) -> Self {
        Self {
            settings: Arc::new(RenderSettingsManager::new(backbuffer_width, backbuffer_height)),
            storage: Arc::new(MemoryStorageTable::new()),
            textures: Arc::new(MemoryTextureDb::new()),
        }
    }

    /// Bundle these collaborators with a registry and configuration
    pub fn services(&self, manager: Arc<SceneManager>, interface: InterfaceSettings) -> SceneServices {
        SceneServices {
            manager,
            render_settings: self.settings.clone(),
            storage: self.storage.clone(),
            textures: self.textures.clone(),
            interface: Arc::new(interface),
        }
    }
}
