//! Rendering collaborators of the menu scene layer
//!
//! This module holds the camera and frustum math used by menu scenes and
//! the interfaces through which scenes talk to the renderer:
//!
//! - [`RenderSettings`]: backbuffer size and global feature toggles
//! - [`StorageTable`]: renderer-owned camera-view and image-space records
//! - [`TextureDb`]: offscreen render targets and material texture overrides
//! - [`UiMovie`]: the movie that receives viewport updates
//!
//! In-process implementations are provided for each interface so the scene
//! layer can run headless.

pub mod camera;
pub mod features;
pub mod frustum;
pub mod keys;
pub mod movie;
pub mod settings;
pub mod storage;
pub mod texture;

pub use camera::{Camera, Ray};
pub use features::{FeatureSetup, Features};
pub use frustum::{compute_frustum, Frustum, FOV_SCALE};
pub use keys::{MaterialInstanceKey, RendererKey};
pub use movie::{RenderArea, UiMovie, Viewport};
pub use settings::{RenderSettings, RenderSettingsManager, WindowSettings};
pub use storage::{
    CameraViewData, CameraViewHandle, CameraViewKey, CameraViewRecord, ClearColor,
    ImageSpaceData, ImageSpaceHandle, ImageSpaceKey, MemoryStorageTable, StorageTable,
};
pub use texture::{
    ImageFormat, MemoryTextureDb, RenderTargetHandle, RenderTargetId, RenderTargetRequest,
    TextureDb, TextureError, TextureSlot,
};
