//! Scene graph nodes
//!
//! Nodes are shared through [`NodeRef`] and mutated through interior
//! locks, so a subtree can be referenced by a scene and by whoever built
//! it at the same time.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::foundation::math::Transform;
use crate::render::{MaterialInstanceKey, RendererKey};

use super::visit::{traverse_nodes, Traversable, VisitControl};

/// Shared reference to a scene graph node
pub type NodeRef = Arc<Node>;

/// Time step passed down an update pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateData {
    /// Elapsed time in seconds
    pub elapsed: f32,
}

impl UpdateData {
    /// Update with the given elapsed time
    pub const fn new(elapsed: f32) -> Self {
        Self { elapsed }
    }

    /// Zero-time update that only refreshes derived state
    pub const fn settle() -> Self {
        Self::new(0.0)
    }
}

/// What a node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Root of a renderable scene
    SceneRoot,
    /// Plain grouping node
    Group,
    /// Drawable geometry with a material instance
    Geometry {
        /// Material drawn with
        material: MaterialInstanceKey,
    },
}

#[derive(Debug)]
struct NodeState {
    children: Vec<NodeRef>,
    always_draw: bool,
    fade: Option<f32>,
    local: Transform,
    world: Transform,
}

/// Scene graph node
#[derive(Debug)]
pub struct Node {
    name: String,
    key: RendererKey,
    kind: NodeKind,
    state: RwLock<NodeState>,
}

impl Node {
    fn with_kind(name: impl Into<String>, kind: NodeKind, fade: Option<f32>) -> NodeRef {
        Arc::new(Self {
            name: name.into(),
            key: RendererKey::next(),
            kind,
            state: RwLock::new(NodeState {
                children: Vec::new(),
                always_draw: false,
                fade,
                local: Transform::identity(),
                world: Transform::identity(),
            }),
        })
    }

    /// Root node of a scene
    pub fn scene_root(name: impl Into<String>) -> NodeRef {
        Self::with_kind(name, NodeKind::SceneRoot, None)
    }

    /// Empty grouping node
    pub fn group(name: impl Into<String>) -> NodeRef {
        Self::with_kind(name, NodeKind::Group, None)
    }

    /// Grouping node at the top of a fade-controlled hierarchy
    pub fn fade_group(name: impl Into<String>, current_fade: f32) -> NodeRef {
        Self::with_kind(name, NodeKind::Group, Some(current_fade))
    }

    /// Drawable geometry
    pub fn geometry(name: impl Into<String>, material: MaterialInstanceKey) -> NodeRef {
        Self::with_kind(name, NodeKind::Geometry { material }, None)
    }

    /// Node name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renderer key of this node
    pub const fn key(&self) -> RendererKey {
        self.key
    }

    /// Node kind
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Whether this node is drawable geometry
    pub const fn is_geometry(&self) -> bool {
        matches!(self.kind, NodeKind::Geometry { .. })
    }

    /// Material instance of a geometry node
    pub const fn material(&self) -> Option<MaterialInstanceKey> {
        match self.kind {
            NodeKind::Geometry { material } => Some(material),
            _ => None,
        }
    }

    /// Append a child
    ///
    /// # Panics
    ///
    /// If `child` is this node or one of its ancestors.
    pub fn attach_child(&self, child: NodeRef) {
        assert!(
            !child.subtree_contains(self),
            "attaching '{}' under '{}' would create a cycle",
            child.name,
            self.name
        );
        self.state.write().children.push(child);
    }

    /// Whether `node` is this node or one of its descendants
    pub fn subtree_contains(&self, node: &Node) -> bool {
        traverse_nodes(self, |visited| {
            if std::ptr::eq(visited, node) {
                VisitControl::Stop
            } else {
                VisitControl::Continue
            }
        }) == VisitControl::Stop
    }

    /// Remove `child` (by identity); returns it if it was attached here
    pub fn detach_child(&self, child: &NodeRef) -> Option<NodeRef> {
        let mut state = self.state.write();
        let index = state.children.iter().position(|c| Arc::ptr_eq(c, child))?;
        Some(state.children.remove(index))
    }

    /// Remove every child; returns how many were removed
    pub fn detach_all_children(&self) -> usize {
        let removed = std::mem::take(&mut self.state.write().children);
        removed.len()
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.state.read().children.len()
    }

    /// Whether `child` is a direct child of this node
    pub fn has_child(&self, child: &NodeRef) -> bool {
        self.state.read().children.iter().any(|c| Arc::ptr_eq(c, child))
    }

    /// Whether culling is bypassed for this node
    pub fn always_draw(&self) -> bool {
        self.state.read().always_draw
    }

    /// Bypass or re-enable view-frustum culling
    pub fn set_always_draw(&self, always_draw: bool) {
        self.state.write().always_draw = always_draw;
    }

    /// Whether this node is the top of a fade-controlled hierarchy
    pub fn is_top_fade_node(&self) -> bool {
        self.state.read().fade.is_some()
    }

    /// Current fade of a top fade node
    pub fn current_fade(&self) -> Option<f32> {
        self.state.read().fade
    }

    /// Set the fade of a top fade node; ignored on other nodes
    pub fn set_current_fade(&self, fade: f32) {
        if let Some(current) = self.state.write().fade.as_mut() {
            *current = fade.clamp(0.0, 1.0);
        }
    }

    /// Local transform relative to the parent
    pub fn local_transform(&self) -> Transform {
        self.state.read().local
    }

    /// Replace the local transform; takes effect on the next update
    pub fn set_local_transform(&self, transform: Transform) {
        self.state.write().local = transform;
    }

    /// World transform as of the last update
    pub fn world_transform(&self) -> Transform {
        self.state.read().world
    }

    /// Propagate transforms from this node down, treating it as a root
    pub fn update(&self, data: &UpdateData) {
        self.update_from_parent(&Transform::identity(), data);
    }

    fn update_from_parent(&self, parent: &Transform, data: &UpdateData) {
        let (world, children) = {
            let mut state = self.state.write();
            state.world = parent.combine(&state.local);
            (state.world, state.children.clone())
        };

        for child in children {
            child.update_from_parent(&world, data);
        }
    }
}

impl Traversable for Node {
    fn children(&self) -> Vec<Arc<Self>> {
        self.state.read().children.clone()
    }
}
