//! Texture allocation collaborator
//!
//! Offscreen render targets are requested asynchronously: the returned
//! handle is busy until the texture database finishes creating it, after
//! which it reports available. Handles are shared; cloning one replicates
//! the reference rather than the texture.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use thiserror::Error;

use super::keys::MaterialInstanceKey;

/// Pixel format of a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// 8 bits per channel RGBA, normalized
    R8G8B8A8Unorm,
    /// 8 bits per channel RGBA, sRGB encoded
    R8G8B8A8Srgb,
    /// 16 bit float per channel RGBA
    R16G16B16A16Float,
}

/// Texture slot of a material layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    /// Base color / albedo
    Base,
    /// Tangent-space normal map
    Normal,
    /// Roughness / metalness
    Roughness,
    /// Emissive color
    Emissive,
}

/// Parameters of a render target request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTargetRequest {
    /// Debug name of the target
    pub name: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Number of mip levels
    pub mip_count: u32,
    /// Pixel format
    pub format: ImageFormat,
}

/// Identifier of an allocated render target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTargetId(pub u64);

#[derive(Debug)]
struct RenderTargetSlot {
    id: RenderTargetId,
    request: RenderTargetRequest,
    available: AtomicBool,
}

/// Shared reference to a render target
#[derive(Debug, Clone)]
pub struct RenderTargetHandle {
    slot: Arc<RenderTargetSlot>,
}

impl RenderTargetHandle {
    fn new(id: RenderTargetId, request: RenderTargetRequest) -> Self {
        Self {
            slot: Arc::new(RenderTargetSlot {
                id,
                request,
                available: AtomicBool::new(false),
            }),
        }
    }

    /// Target identifier
    pub fn id(&self) -> RenderTargetId {
        self.slot.id
    }

    /// Request this target was created from
    pub fn request(&self) -> &RenderTargetRequest {
        &self.slot.request
    }

    /// Whether the texture has been created
    pub fn is_available(&self) -> bool {
        self.slot.available.load(Ordering::Acquire)
    }

    /// Whether the texture is still being created
    pub fn is_busy(&self) -> bool {
        !self.is_available()
    }

    /// Another reference to the same target
    pub fn replicate(&self) -> Self {
        self.clone()
    }

    /// Whether two handles refer to the same target
    pub fn same_target(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }

    fn mark_available(&self) {
        self.slot.available.store(true, Ordering::Release);
    }
}

/// Texture database errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextureError {
    /// Render target with a zero dimension
    #[error("render target '{name}' has zero size ({width}x{height})")]
    ZeroSizedTarget {
        /// Target name
        name: String,
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Material instance not known to the texture database
    #[error("unknown material instance {0:?}")]
    UnknownMaterial(MaterialInstanceKey),

    /// Layer index out of range for the material
    #[error("material {material:?} has no layer {layer}")]
    InvalidLayer {
        /// Material instance
        material: MaterialInstanceKey,
        /// Requested layer
        layer: u32,
    },
}

/// Texture allocation and material texture overrides
pub trait TextureDb: Send + Sync {
    /// Start creating a render target
    fn request_render_target(&self, request: RenderTargetRequest) -> Result<RenderTargetHandle, TextureError>;

    /// Point texture slots of a material layer at render targets
    fn request_modify_layer(
        &self,
        material: MaterialInstanceKey,
        layer: u32,
        overrides: Vec<(TextureSlot, RenderTargetHandle)>,
    ) -> Result<(), TextureError>;
}

#[derive(Debug, Default)]
struct MaterialLayers {
    layer_count: u32,
    overrides: HashMap<(u32, TextureSlot), RenderTargetHandle>,
}

/// In-process texture database
///
/// Render targets stay busy until [`MemoryTextureDb::complete_pending`] runs,
/// which stands in for the frame on which the GPU allocation finishes.
#[derive(Debug, Default)]
pub struct MemoryTextureDb {
    next_id: AtomicU64,
    pending: Mutex<Vec<RenderTargetHandle>>,
    materials: RwLock<HashMap<MaterialInstanceKey, MaterialLayers>>,
}

impl MemoryTextureDb {
    /// Create an empty texture database
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a material instance known with the given number of layers
    pub fn register_material(&self, material: MaterialInstanceKey, layer_count: u32) {
        self.materials.write().insert(
            material,
            MaterialLayers {
                layer_count,
                overrides: HashMap::new(),
            },
        );
    }

    /// Finish every outstanding render target request
    ///
    /// Returns the number of targets that became available.
    pub fn complete_pending(&self) -> usize {
        let pending = std::mem::take(&mut *self.pending.lock());
        for handle in &pending {
            handle.mark_available();
            log::debug!(
                "Render target '{}' ({:?}) available",
                handle.request().name,
                handle.id()
            );
        }
        pending.len()
    }

    /// Render target bound to a material texture slot, if overridden
    pub fn layer_override(
        &self,
        material: MaterialInstanceKey,
        layer: u32,
        slot: TextureSlot,
    ) -> Option<RenderTargetHandle> {
        self.materials
            .read()
            .get(&material)
            .and_then(|layers| layers.overrides.get(&(layer, slot)).cloned())
    }
}

impl TextureDb for MemoryTextureDb {
    fn request_render_target(&self, request: RenderTargetRequest) -> Result<RenderTargetHandle, TextureError> {
        if request.width == 0 || request.height == 0 {
            return Err(TextureError::ZeroSizedTarget {
                name: request.name,
                width: request.width,
                height: request.height,
            });
        }

        let id = RenderTargetId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        log::debug!(
            "Render target '{}' requested: {}x{} {:?}, {} mip(s)",
            request.name,
            request.width,
            request.height,
            request.format,
            request.mip_count
        );

        let handle = RenderTargetHandle::new(id, request);
        self.pending.lock().push(handle.clone());
        Ok(handle)
    }

    fn request_modify_layer(
        &self,
        material: MaterialInstanceKey,
        layer: u32,
        overrides: Vec<(TextureSlot, RenderTargetHandle)>,
    ) -> Result<(), TextureError> {
        let mut materials = self.materials.write();
        let layers = materials
            .get_mut(&material)
            .ok_or(TextureError::UnknownMaterial(material))?;

        if layer >= layers.layer_count {
            return Err(TextureError::InvalidLayer { material, layer });
        }

        for (slot, target) in overrides {
            layers.overrides.insert((layer, slot), target);
        }
        Ok(())
    }
}
