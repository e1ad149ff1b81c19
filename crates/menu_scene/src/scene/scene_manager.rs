//! Scene Manager - registry of live menu scenes
//!
//! Scenes register themselves when constructed and unregister when
//! dropped. The manager never owns a scene: entries are weak references,
//! so a lookup can only hand out scenes that are still alive.
//!
//! All registry access goes through one reader/writer lock. Lookups and
//! iteration share it; registration and removal take it exclusively.
//! The lock is never held while caller code runs: visitors passed to
//! [`SceneManager::for_each_scene`] see a snapshot of the live scenes and
//! may look scenes up or lock them freely.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use super::menu_scene::{Scene, SceneId};

/// Shared, lockable handle to a scene
pub type SceneRef = Arc<RwLock<Scene>>;

#[derive(Debug)]
struct Registration {
    id: SceneId,
    scene: Weak<RwLock<Scene>>,
}

/// Name-keyed registry of live scenes
#[derive(Debug, Default)]
pub struct SceneManager {
    scenes: RwLock<HashMap<String, Registration>>,
}

impl SceneManager {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `scene` under its name
    ///
    /// A scene already registered under the same name is replaced; the
    /// replaced scene stays alive but can no longer be found by name.
    /// The caller must not hold a lock on `scene`.
    pub fn register(&self, scene: &SceneRef) {
        let (name, id) = {
            let scene = scene.read();
            (scene.name().to_string(), scene.id())
        };

        let previous = self.scenes.write().insert(
            name.clone(),
            Registration {
                id,
                scene: Arc::downgrade(scene),
            },
        );

        match previous {
            Some(previous) if previous.id != id => {
                log::warn!("Scene '{}' was already registered and has been replaced", name);
            }
            _ => log::debug!("Registered scene '{}'", name),
        }
    }

    /// Remove `scene` from the registry
    ///
    /// Only the entry belonging to this exact scene is removed: if another
    /// scene has since been registered under the same name it is left in
    /// place. Unregistering a scene that is not registered does nothing.
    pub fn unregister(&self, scene: &Scene) {
        let mut scenes = self.scenes.write();
        let owner = scenes.get(scene.name()).map(|registration| registration.id);
        match owner {
            Some(id) if id == scene.id() => {
                scenes.remove(scene.name());
                log::debug!("Unregistered scene '{}'", scene.name());
            }
            Some(_) => {
                log::debug!(
                    "Scene '{}' was superseded by a newer registration; leaving it in place",
                    scene.name()
                );
            }
            None => log::trace!("Scene '{}' was not registered", scene.name()),
        }
    }

    /// Find a live scene by name
    pub fn get_by_name(&self, name: &str) -> Option<SceneRef> {
        let scenes = self.scenes.read();
        scenes.get(name).and_then(|registration| registration.scene.upgrade())
    }

    /// Call `visitor` once for every live scene, in unspecified order
    ///
    /// Scenes are snapshotted under the read lock and visited after it is
    /// released. Scenes registered during the walk are not visited.
    pub fn for_each_scene<F>(&self, mut visitor: F)
    where
        F: FnMut(&SceneRef),
    {
        let live: Vec<SceneRef> = self
            .scenes
            .read()
            .values()
            .filter_map(|registration| registration.scene.upgrade())
            .collect();

        for scene in &live {
            visitor(scene);
        }
    }

    /// Set the active flag of every registered scene
    pub fn set_active_all(&self, active: bool) {
        self.for_each_scene(|scene| scene.write().set_active(active));
    }

    /// Number of registered names
    pub fn scene_count(&self) -> usize {
        self.scenes.read().len()
    }

    /// Registered names, sorted
    pub fn scene_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.scenes.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Tear the registry down, dropping any remaining entries
    pub fn shutdown(&self) {
        let mut scenes = self.scenes.write();
        if !scenes.is_empty() {
            let mut names: Vec<&String> = scenes.keys().collect();
            names.sort();
            log::warn!("Scene manager shut down with {} live scene(s): {:?}", names.len(), names);
        }
        scenes.clear();
        log::info!("Scene manager shut down");
    }
}
