//! Opaque keys handed to the renderer for scene-graph objects

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_RENDERER_KEY: AtomicU64 = AtomicU64::new(1);

/// Renderer-facing identity of a scene graph node or camera
///
/// Keys are allocated once per object and never reused within a process.
/// Zero is reserved for "no object".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RendererKey(u64);

impl RendererKey {
    /// The reserved null key
    pub const NULL: Self = Self(0);

    /// Allocate a fresh key
    pub fn next() -> Self {
        Self(NEXT_RENDERER_KEY.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value, for logging and debugging
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Whether this is the null key
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Identity of a material instance whose texture layers can be overridden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialInstanceKey(pub u32);
