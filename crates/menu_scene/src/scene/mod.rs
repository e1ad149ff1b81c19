//! Menu scene management
//!
//! Named 3D scenes rendered behind or inside UI menus, and the registry
//! that lets UI and input code find them by name.
//!
//! ## Architecture
//!
//! ```text
//! UI / input code
//!      ↓  get_by_name
//! SceneManager (name → live scene)
//!      ↓
//! Scene ── scene graph root ── objects container
//!   │
//!   ├─ Camera (frustum from FOV and backbuffer aspect)
//!   └─ CameraViewHandle → renderer storage
//! ```
//!
//! Scenes are owned by whoever creates them. Creating a scene registers
//! it; dropping the last [`SceneRef`] unregisters it.

mod graph;
mod menu_scene;
mod scene_manager;
mod services;
pub mod visit;

pub use graph::{Node, NodeKind, NodeRef, UpdateData};
pub use menu_scene::{Scene, SceneId};
pub use scene_manager::{SceneManager, SceneRef};
pub use services::{HeadlessRenderer, SceneServices};
pub use visit::{traverse_geometries, traverse_nodes, Traversable, VisitControl};
