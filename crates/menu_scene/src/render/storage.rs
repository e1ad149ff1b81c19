//! Renderer storage table
//!
//! The renderer owns per-view records (camera binding, image-space binding,
//! clear color, feature toggles). Clients register a slot, write into it
//! with write-discard semantics (each write replaces the previous content
//! of that component outright) and release it when done.
//!
//! [`CameraViewHandle`] and [`ImageSpaceHandle`] wrap slot registration so
//! that a slot is released exactly when its handle is dropped.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use parking_lot::RwLock;
use slotmap::{new_key_type, SlotMap};

use super::features::FeatureSetup;
use super::keys::RendererKey;

new_key_type! {
    /// Slot of a camera-view record
    pub struct CameraViewKey;

    /// Slot of an image-space configuration
    pub struct ImageSpaceKey;
}

/// Binding between a scene graph, the camera looking at it and validity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraViewData {
    /// Root node of the rendered scene graph
    pub scene_graph: RendererKey,
    /// Camera used to render it
    pub camera: RendererKey,
    /// Whether the view should be rendered
    pub valid: bool,
    /// Scene name, kept in debug builds for renderer diagnostics
    #[cfg(debug_assertions)]
    pub debug_name: String,
}

/// Clear color of a camera view, laid out for direct upload
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ClearColor {
    /// Red, green, blue, alpha
    pub rgba: [f32; 4],
}

impl ClearColor {
    /// Create a clear color from components
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { rgba: [r, g, b, a] }
    }

    /// Raw bytes as uploaded to the renderer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Post-processing and color grading parameters of a view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSpaceData {
    /// Exposure multiplier
    pub brightness: f32,
    /// Saturation multiplier
    pub saturation: f32,
    /// Contrast multiplier
    pub contrast: f32,
    /// Tint color (rgb) and tint strength (a)
    pub tint: [f32; 4],
}

impl Default for ImageSpaceData {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            saturation: 1.0,
            contrast: 1.0,
            tint: [0.0; 4],
        }
    }
}

/// Everything written to one camera-view slot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraViewRecord {
    /// Scene and camera binding
    pub view: Option<CameraViewData>,
    /// Bound image-space configuration
    pub image_space: Option<ImageSpaceKey>,
    /// Clear color override
    pub clear_color: Option<ClearColor>,
    /// Feature toggles for this view
    pub features: Option<FeatureSetup>,
}

/// Renderer-side record storage
///
/// Every write returns `false` without side effects when the target slot
/// is not registered.
pub trait StorageTable: Send + Sync {
    /// Allocate an empty camera-view slot
    fn register_camera_view(&self) -> CameraViewKey;

    /// Release a camera-view slot; returns whether it existed
    fn unregister_camera_view(&self, key: CameraViewKey) -> bool;

    /// Whether a camera-view slot is currently registered
    fn is_camera_view_registered(&self, key: CameraViewKey) -> bool;

    /// Snapshot of a camera-view slot
    fn camera_view(&self, key: CameraViewKey) -> Option<CameraViewRecord>;

    /// Write-discard the scene/camera binding
    fn write_camera_view(&self, key: CameraViewKey, data: CameraViewData) -> bool;

    /// Write-discard the image-space binding
    fn write_image_space_binding(&self, key: CameraViewKey, image_space: ImageSpaceKey) -> bool;

    /// Write-discard the clear color
    fn write_clear_color(&self, key: CameraViewKey, color: ClearColor) -> bool;

    /// Write-discard the feature toggles
    fn write_feature_setup(&self, key: CameraViewKey, features: FeatureSetup) -> bool;

    /// Allocate an image-space configuration
    fn register_image_space(&self, data: ImageSpaceData) -> ImageSpaceKey;

    /// Release an image-space configuration; returns whether it existed
    fn unregister_image_space(&self, key: ImageSpaceKey) -> bool;

    /// Whether an image-space key refers to a live configuration
    fn is_image_space_valid(&self, key: ImageSpaceKey) -> bool;
}

/// In-process storage table backed by slot maps
#[derive(Debug, Default)]
pub struct MemoryStorageTable {
    camera_views: RwLock<SlotMap<CameraViewKey, CameraViewRecord>>,
    image_spaces: RwLock<SlotMap<ImageSpaceKey, ImageSpaceData>>,
}

impl MemoryStorageTable {
    /// Create an empty storage table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered camera views
    pub fn camera_view_count(&self) -> usize {
        self.camera_views.read().len()
    }

    /// Number of registered image-space configurations
    pub fn image_space_count(&self) -> usize {
        self.image_spaces.read().len()
    }

    /// Image-space data stored under `key`
    pub fn image_space(&self, key: ImageSpaceKey) -> Option<ImageSpaceData> {
        self.image_spaces.read().get(key).copied()
    }

    fn write_record(&self, key: CameraViewKey, write: impl FnOnce(&mut CameraViewRecord)) -> bool {
        match self.camera_views.write().get_mut(key) {
            Some(record) => {
                write(record);
                true
            }
            None => {
                log::debug!("Discarding write to unregistered camera view {:?}", key);
                false
            }
        }
    }
}

impl StorageTable for MemoryStorageTable {
    fn register_camera_view(&self) -> CameraViewKey {
        self.camera_views.write().insert(CameraViewRecord::default())
    }

    fn unregister_camera_view(&self, key: CameraViewKey) -> bool {
        self.camera_views.write().remove(key).is_some()
    }

    fn is_camera_view_registered(&self, key: CameraViewKey) -> bool {
        self.camera_views.read().contains_key(key)
    }

    fn camera_view(&self, key: CameraViewKey) -> Option<CameraViewRecord> {
        self.camera_views.read().get(key).cloned()
    }

    fn write_camera_view(&self, key: CameraViewKey, data: CameraViewData) -> bool {
        self.write_record(key, |record| record.view = Some(data))
    }

    fn write_image_space_binding(&self, key: CameraViewKey, image_space: ImageSpaceKey) -> bool {
        self.write_record(key, |record| record.image_space = Some(image_space))
    }

    fn write_clear_color(&self, key: CameraViewKey, color: ClearColor) -> bool {
        self.write_record(key, |record| record.clear_color = Some(color))
    }

    fn write_feature_setup(&self, key: CameraViewKey, features: FeatureSetup) -> bool {
        self.write_record(key, |record| record.features = Some(features))
    }

    fn register_image_space(&self, data: ImageSpaceData) -> ImageSpaceKey {
        self.image_spaces.write().insert(data)
    }

    fn unregister_image_space(&self, key: ImageSpaceKey) -> bool {
        self.image_spaces.write().remove(key).is_some()
    }

    fn is_image_space_valid(&self, key: ImageSpaceKey) -> bool {
        self.image_spaces.read().contains_key(key)
    }
}

/// Scoped registration of a camera-view slot
pub struct CameraViewHandle {
    storage: Arc<dyn StorageTable>,
    key: Option<CameraViewKey>,
}

impl CameraViewHandle {
    /// Create an unregistered handle
    pub fn new(storage: Arc<dyn StorageTable>) -> Self {
        Self { storage, key: None }
    }

    /// Allocate the slot; registering twice keeps the first slot
    pub fn register(&mut self) -> CameraViewKey {
        *self.key.get_or_insert_with(|| self.storage.register_camera_view())
    }

    /// Whether the slot is registered and still live in storage
    pub fn is_registered(&self) -> bool {
        self.key.is_some_and(|key| self.storage.is_camera_view_registered(key))
    }

    /// Slot key, if registered
    pub const fn key(&self) -> Option<CameraViewKey> {
        self.key
    }

    /// Write-discard the scene/camera binding
    pub fn write_view(&self, data: CameraViewData) -> bool {
        self.with_key(|storage, key| storage.write_camera_view(key, data))
    }

    /// Write-discard the image-space binding
    pub fn write_image_space(&self, image_space: ImageSpaceKey) -> bool {
        self.with_key(|storage, key| storage.write_image_space_binding(key, image_space))
    }

    /// Write-discard the clear color
    pub fn write_clear_color(&self, color: ClearColor) -> bool {
        self.with_key(|storage, key| storage.write_clear_color(key, color))
    }

    /// Write-discard the feature toggles
    pub fn write_features(&self, features: FeatureSetup) -> bool {
        self.with_key(|storage, key| storage.write_feature_setup(key, features))
    }

    fn with_key(&self, write: impl FnOnce(&dyn StorageTable, CameraViewKey) -> bool) -> bool {
        match self.key {
            Some(key) => write(self.storage.as_ref(), key),
            None => {
                log::warn!("Write to a camera view that was never registered");
                false
            }
        }
    }
}

impl Drop for CameraViewHandle {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            self.storage.unregister_camera_view(key);
        }
    }
}

impl std::fmt::Debug for CameraViewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraViewHandle").field("key", &self.key).finish()
    }
}

/// Scoped registration of an image-space configuration
pub struct ImageSpaceHandle {
    storage: Arc<dyn StorageTable>,
    key: ImageSpaceKey,
}

impl ImageSpaceHandle {
    /// Register `data` and take ownership of the slot
    pub fn register(storage: Arc<dyn StorageTable>, data: ImageSpaceData) -> Self {
        let key = storage.register_image_space(data);
        Self { storage, key }
    }

    /// Key other records use to reference this configuration
    pub const fn key(&self) -> ImageSpaceKey {
        self.key
    }
}

impl Drop for ImageSpaceHandle {
    fn drop(&mut self) {
        self.storage.unregister_image_space(self.key);
    }
}

impl std::fmt::Debug for ImageSpaceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageSpaceHandle").field("key", &self.key).finish()
    }
}
