//! Menu scene
//!
//! A named bundle of a scene graph, the UI camera that looks at it and the
//! renderer camera-view record binding the two. Scenes register with the
//! [`SceneManager`](super::SceneManager) on construction and unregister when
//! dropped.
//!
//! A scene's own state is not synchronized beyond the lock in
//! [`SceneRef`]; callers serialize access to one scene themselves.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::foundation::math::{Vec2, Vec3};
use crate::render::{
    compute_frustum, Camera, CameraViewData, CameraViewHandle, CameraViewKey, ClearColor,
    Features, ImageFormat, ImageSpaceData, ImageSpaceHandle, ImageSpaceKey, RenderArea,
    RenderTargetHandle, RenderTargetRequest, TextureSlot, UiMovie, Viewport,
};
use crate::SceneError;

use super::graph::{Node, NodeRef, UpdateData};
use super::scene_manager::SceneRef;
use super::services::SceneServices;
use super::visit::{traverse_geometries, traverse_nodes, VisitControl};

/// Near plane lower bound of menu cameras, in meters
const MIN_NEAR_PLANE_DIST: f32 = 1.0;

/// Name of the container node that holds attached objects
const OBJECTS_NODE_NAME: &str = "Objects";

static NEXT_SCENE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a scene instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(u64);

impl SceneId {
    fn next() -> Self {
        Self(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A named, independently rendered 3D menu scene
#[derive(Debug)]
pub struct Scene {
    id: SceneId,
    name: String,
    services: SceneServices,
    root: NodeRef,
    objects: Option<NodeRef>,
    camera: Camera,
    camera_view: CameraViewHandle,
    image_space: Option<ImageSpaceHandle>,
    menu_to_texture: Option<RenderTargetHandle>,
    active: bool,
}

impl Scene {
    /// Build a scene with its own root and objects container
    ///
    /// `image_space` binds an existing image-space configuration; when it
    /// is `None` or no longer valid a default configuration is created.
    /// `fov <= 0` selects the configured default field of view.
    pub fn new(
        name: impl Into<String>,
        services: SceneServices,
        image_space: Option<ImageSpaceKey>,
        fov: f32,
    ) -> SceneRef {
        let name = name.into();
        let root = Node::scene_root(name.clone());
        let objects = Node::group(OBJECTS_NODE_NAME);
        root.attach_child(objects.clone());

        Self::build(name, services, root, Some(objects), image_space, fov)
    }

    /// Build a scene that renders an existing scene graph
    ///
    /// The root is shared with the caller. Such a scene has no objects
    /// container, so [`Scene::attach_object`] must not be used on it.
    pub fn with_root(
        name: impl Into<String>,
        root: NodeRef,
        services: SceneServices,
        image_space: Option<ImageSpaceKey>,
        fov: f32,
    ) -> SceneRef {
        Self::build(name.into(), services, root, None, image_space, fov)
    }

    fn build(
        name: String,
        services: SceneServices,
        root: NodeRef,
        objects: Option<NodeRef>,
        image_space: Option<ImageSpaceKey>,
        fov: f32,
    ) -> SceneRef {
        let mut scene = Self {
            id: SceneId::next(),
            camera: Camera::new(name.clone()),
            camera_view: CameraViewHandle::new(services.storage.clone()),
            name,
            services,
            root,
            objects,
            image_space: None,
            menu_to_texture: None,
            active: false,
        };

        scene.setup_camera(image_space, fov);
        scene.update();

        log::info!(
            "Created menu scene '{}' (fov {:.1}, frustum top {:.4})",
            scene.name,
            if fov > 0.0 { fov } else { scene.services.interface.default_fov },
            scene.camera.frustum().top
        );

        let manager = scene.services.manager.clone();
        let scene = Arc::new(RwLock::new(scene));
        manager.register(&scene);
        scene
    }

    fn setup_camera(&mut self, image_space: Option<ImageSpaceKey>, fov: f32) {
        let interface = self.services.interface.clone();

        let target_size = self.render_target_size();
        let screen_aspect = target_size.x / target_size.y;
        let frustum = compute_frustum(
            fov,
            interface.default_fov,
            interface.ui_camera_near_distance,
            interface.ui_camera_far_distance,
            screen_aspect,
        );

        self.camera.set_max_far_near_ratio(frustum.far_near_ratio);
        self.camera.set_view_frustum(frustum);
        self.camera.set_ortho(false);

        self.camera.set_translate(Vec3::zeros());
        self.camera.set_rotate_basis(Vec3::y(), Vec3::z(), Vec3::x());
        self.camera.set_min_near_plane_dist(MIN_NEAR_PLANE_DIST);

        // Distance LOD switches off specular on menu models
        self.camera.set_lod_adjust(0.0);

        self.camera_view.register();
        self.camera_view.write_view(CameraViewData {
            scene_graph: self.root.key(),
            camera: self.camera.key(),
            valid: true,
            #[cfg(debug_assertions)]
            debug_name: self.name.clone(),
        });

        let storage = &self.services.storage;
        match image_space.filter(|key| storage.is_image_space_valid(*key)) {
            Some(key) => {
                self.camera_view.write_image_space(key);
            }
            None => {
                let handle = ImageSpaceHandle::register(storage.clone(), ImageSpaceData::default());
                self.camera_view.write_image_space(handle.key());
                self.image_space = Some(handle);
            }
        }

        let mut features = self.services.render_settings.renderer_features();
        features.set_enabled(Features::TEMPORAL_AA, interface.temporal_aa);
        self.camera_view.write_features(features);
    }

    /// Scene name, unique among registered scenes
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Instance identity
    pub const fn id(&self) -> SceneId {
        self.id
    }

    /// Root of the rendered scene graph
    pub const fn root(&self) -> &NodeRef {
        &self.root
    }

    /// Container of attached objects; absent for scenes built on an existing root
    pub const fn objects(&self) -> Option<&NodeRef> {
        self.objects.as_ref()
    }

    /// The scene's camera
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Camera-view slot in renderer storage
    pub const fn camera_view_key(&self) -> Option<CameraViewKey> {
        self.camera_view.key()
    }

    /// Default image-space configuration created for this scene, if any
    pub fn owned_image_space(&self) -> Option<ImageSpaceKey> {
        self.image_space.as_ref().map(ImageSpaceHandle::key)
    }

    /// Current backbuffer size in pixels
    pub fn render_target_size(&self) -> Vec2 {
        self.services.render_settings.window_settings().size()
    }

    fn objects_node(&self) -> &NodeRef {
        match &self.objects {
            Some(objects) => objects,
            None => panic!("scene '{}' has no objects container", self.name),
        }
    }

    /// Attach an object to the scene
    ///
    /// Every node of the object's subtree is marked always-draw and fade
    /// roots are forced fully visible before the object is attached.
    pub fn attach_object(&mut self, object: NodeRef) {
        let objects = self.objects_node();

        traverse_nodes(&*object, |node| {
            node.set_always_draw(true);
            if node.is_top_fade_node() {
                node.set_current_fade(1.0);
            }
            VisitControl::Continue
        });

        log::trace!("Attaching '{}' to scene '{}'", object.name(), self.name);
        objects.attach_child(object);
    }

    /// Detach an object from the scene; returns it if it was attached
    pub fn detach_object(&mut self, object: &NodeRef) -> Option<NodeRef> {
        self.objects_node().detach_child(object)
    }

    /// Detach every attached object
    pub fn detach_all_objects(&mut self) {
        let removed = self.objects_node().detach_all_children();
        log::trace!("Detached {} object(s) from scene '{}'", removed, self.name);
    }

    /// Request an offscreen target this scene renders into
    ///
    /// # Panics
    ///
    /// If a target was already requested for this scene.
    pub fn setup_menu_to_texture(&mut self, width: u32, height: u32) -> Result<(), SceneError> {
        assert!(
            self.menu_to_texture.is_none(),
            "scene '{}' already has an offscreen render target",
            self.name
        );

        let target = self.services.textures.request_render_target(RenderTargetRequest {
            name: self.name.clone(),
            width,
            height,
            mip_count: 1,
            format: ImageFormat::R8G8B8A8Unorm,
        })?;
        self.menu_to_texture = Some(target);
        Ok(())
    }

    /// Offscreen target of this scene, once requested
    pub const fn menu_to_texture_render_target(&self) -> Option<&RenderTargetHandle> {
        self.menu_to_texture.as_ref()
    }

    /// Show this scene's offscreen target on matching geometry
    ///
    /// Every geometry under the root whose name starts with `object_name`
    /// gets its base texture on layer 0 replaced by the offscreen target.
    /// Returns how many geometries were retargeted.
    ///
    /// # Panics
    ///
    /// If `object_name` is empty.
    pub fn setup_menu_to_texture_on_object(&self, object_name: &str) -> Result<usize, SceneError> {
        assert!(!object_name.is_empty(), "scene '{}': empty object name", self.name);

        let target = self
            .menu_to_texture
            .as_ref()
            .ok_or_else(|| SceneError::MissingRenderTarget(self.name.clone()))?;

        let mut retargeted = 0;
        let mut first_error = None;

        // Several geometries may share the target, so never stop early
        traverse_geometries(&self.root, |geometry| {
            let name = geometry.name();
            if let Some(material) = geometry.material().filter(|_| !name.is_empty() && name.starts_with(object_name)) {
                match self.services.textures.request_modify_layer(
                    material,
                    0,
                    vec![(TextureSlot::Base, target.replicate())],
                ) {
                    Ok(()) => retargeted += 1,
                    Err(error) => {
                        log::warn!("Could not retarget '{}' in scene '{}': {}", name, self.name, error);
                        if first_error.is_none() {
                            first_error = Some(error);
                        }
                    }
                }
            }
            VisitControl::Continue
        });

        match first_error {
            Some(error) => Err(error.into()),
            None => Ok(retargeted),
        }
    }

    /// Mark the scene active or inactive
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Whether the scene is active
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Settle the scene graph and camera without advancing time
    pub fn update(&mut self) {
        let data = UpdateData::settle();
        self.root.update(&data);
        self.camera.update(&data);
    }

    /// Fit a movie's viewport to `render_area` of the render target
    pub fn set_viewport<M>(&self, movie: &mut M, render_area: &RenderArea)
    where
        M: UiMovie + ?Sized,
    {
        let screen_size = self.render_target_size();
        let target_width = screen_size.x as u32;
        let target_height = screen_size.y as u32;
        let width = target_width as f32;
        let height = target_height as f32;

        movie.set_viewport(Viewport {
            buffer_width: target_width,
            buffer_height: target_height,
            left: (width * render_area.left) as i32,
            top: (height * render_area.top) as i32,
            width: (width * (render_area.right - render_area.left)) as i32,
            height: (height * (render_area.bottom - render_area.top)) as i32,
        });
    }

    /// World position `distance` along the camera ray through a screen point
    ///
    /// The screen point is in pixels and truncated to whole pixels. With
    /// `adjust_for_aspect_ratio` the result is scaled by width / height.
    pub fn world_point_from_screen_point(
        &self,
        screen_point: Vec2,
        distance: f32,
        adjust_for_aspect_ratio: bool,
    ) -> Vec3 {
        let screen_size = self.render_target_size();
        let ray = self.camera.window_point_to_ray(
            screen_point.x as i32,
            screen_point.y as i32,
            screen_size.x,
            screen_size.y,
        );

        let aspect = if adjust_for_aspect_ratio { screen_size.x / screen_size.y } else { 1.0 };
        ray.direction * distance * aspect
    }

    /// Set the clear color of the camera view; no-op if the view is not registered
    pub fn set_clear_color(&self, color: ClearColor) {
        if self.camera_view.is_registered() {
            self.camera_view.write_clear_color(color);
        }
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        self.services.manager.unregister(self);
        log::debug!("Dropped menu scene '{}'", self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InterfaceSettings;
    use crate::render::{FeatureSetup, MaterialInstanceKey, StorageTable, FOV_SCALE};
    use crate::scene::{HeadlessRenderer, SceneManager};
    use crate::foundation::math::utils;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    struct Fixture {
        manager: Arc<SceneManager>,
        renderer: HeadlessRenderer,
        services: SceneServices,
    }

    fn fixture_with(interface: InterfaceSettings) -> Fixture {
        let manager = Arc::new(SceneManager::new());
        let renderer = HeadlessRenderer::new(1920, 1080);
        let services = renderer.services(manager.clone(), interface);
        Fixture { manager, renderer, services }
    }

    fn fixture() -> Fixture {
        fixture_with(InterfaceSettings::default())
    }

    #[derive(Default)]
    struct RecordingMovie {
        viewports: Vec<Viewport>,
    }

    impl UiMovie for RecordingMovie {
        fn set_viewport(&mut self, viewport: Viewport) {
            self.viewports.push(viewport);
        }
    }

    #[test]
    fn test_camera_frustum_uses_backbuffer_aspect() {
        let fx = fixture();
        let scene = Scene::new("Aspect", fx.services.clone(), None, 60.0);
        let scene = scene.read();
        let frustum = scene.camera().frustum();

        let expected_top = (utils::deg_to_rad(60.0) * FOV_SCALE).tan();
        assert_relative_eq!(frustum.top, expected_top, epsilon = EPSILON);
        assert_relative_eq!(frustum.right, expected_top * 1920.0 / 1080.0, epsilon = EPSILON);
        assert_relative_eq!(frustum.near, 0.214, epsilon = EPSILON);
        assert_relative_eq!(frustum.far, 214.3125, epsilon = EPSILON);
        assert_relative_eq!(scene.camera().max_far_near_ratio(), 214.3125 / 0.214, epsilon = 1e-2);
        assert_eq!(scene.camera().min_near_plane_dist(), MIN_NEAR_PLANE_DIST);
        assert_eq!(scene.camera().lod_adjust(), 0.0);
        assert_relative_eq!(scene.camera().world_direction(), Vec3::y(), epsilon = EPSILON);
    }

    #[test]
    fn test_camera_view_record_is_populated() {
        let fx = fixture();
        let scene = Scene::new("Record", fx.services.clone(), None, 0.0);
        let scene = scene.read();

        let key = scene.camera_view_key().expect("camera view registered");
        let record = fx.renderer.storage.camera_view(key).expect("record exists");
        let view = record.view.expect("view written");

        assert_eq!(view.scene_graph, scene.root().key());
        assert_eq!(view.camera, scene.camera().key());
        assert!(view.valid);
        assert_eq!(record.image_space, scene.owned_image_space());
        assert!(record.clear_color.is_none());
        assert!(record.features.expect("features written").is_enabled(Features::TEMPORAL_AA));
    }

    #[test]
    fn test_temporal_aa_follows_interface_setting() {
        let fx = fixture_with(InterfaceSettings {
            temporal_aa: false,
            ..Default::default()
        });
        fx.renderer.settings.set_features(FeatureSetup::new(Features::TEMPORAL_AA | Features::BLOOM));

        let scene = Scene::new("NoTaa", fx.services.clone(), None, 0.0);
        let key = scene.read().camera_view_key().expect("registered");
        let features = fx.renderer.storage.camera_view(key).and_then(|r| r.features).expect("features written");

        assert!(!features.is_enabled(Features::TEMPORAL_AA));
        assert!(features.is_enabled(Features::BLOOM));
    }

    #[test]
    fn test_supplied_image_space_is_bound_without_default() {
        let fx = fixture();
        let external = fx.renderer.storage.register_image_space(ImageSpaceData {
            saturation: 0.0,
            ..Default::default()
        });

        let scene = Scene::new("External", fx.services.clone(), Some(external), 0.0);
        let scene = scene.read();
        let record = fx.renderer.storage.camera_view(scene.camera_view_key().expect("registered")).expect("record");

        assert_eq!(record.image_space, Some(external));
        assert!(scene.owned_image_space().is_none());
        assert_eq!(fx.renderer.storage.image_space_count(), 1);
    }

    #[test]
    fn test_stale_image_space_falls_back_to_default() {
        let fx = fixture();
        let stale = fx.renderer.storage.register_image_space(ImageSpaceData::default());
        fx.renderer.storage.unregister_image_space(stale);

        let scene = Scene::new("Stale", fx.services.clone(), Some(stale), 0.0);
        let scene = scene.read();
        let owned = scene.owned_image_space().expect("default created");

        assert_ne!(owned, stale);
        assert!(fx.renderer.storage.is_image_space_valid(owned));
    }

    #[test]
    fn test_drop_releases_renderer_records() {
        let fx = fixture();
        let scene = Scene::new("Transient", fx.services.clone(), None, 0.0);
        assert_eq!(fx.renderer.storage.camera_view_count(), 1);
        assert_eq!(fx.renderer.storage.image_space_count(), 1);

        drop(scene);

        assert_eq!(fx.renderer.storage.camera_view_count(), 0);
        assert_eq!(fx.renderer.storage.image_space_count(), 0);
        assert!(fx.manager.get_by_name("Transient").is_none());
    }

    #[test]
    fn test_attach_marks_subtree_and_forces_fade() {
        let fx = fixture();
        let scene = Scene::new("Attach", fx.services.clone(), None, 0.0);

        let object = Node::group("Model");
        let faded = Node::fade_group("Faded", 0.0);
        let mesh = Node::geometry("Mesh", MaterialInstanceKey(1));
        faded.attach_child(mesh.clone());
        object.attach_child(faded.clone());

        scene.write().attach_object(object.clone());

        for node in [&object, &faded, &mesh] {
            assert!(node.always_draw(), "'{}' should always draw", node.name());
        }
        assert_eq!(faded.current_fade(), Some(1.0));
        assert!(scene.read().objects().expect("objects node").has_child(&object));
    }

    #[test]
    fn test_attach_detach_round_trip() {
        let fx = fixture();
        let scene = Scene::new("RoundTrip", fx.services.clone(), None, 0.0);
        let mut scene = scene.write();
        scene.attach_object(Node::group("Existing"));
        let before = scene.objects().expect("objects node").child_count();

        let object = Node::group("Temporary");
        scene.attach_object(object.clone());
        let detached = scene.detach_object(&object).expect("object was attached");

        assert!(Arc::ptr_eq(&detached, &object));
        assert_eq!(scene.objects().expect("objects node").child_count(), before);

        scene.detach_all_objects();
        assert_eq!(scene.objects().expect("objects node").child_count(), 0);
    }

    #[test]
    #[should_panic(expected = "has no objects container")]
    fn test_attach_to_scene_without_objects_panics() {
        let fx = fixture();
        let scene = Scene::with_root("Override", Node::scene_root("World"), fx.services.clone(), None, 0.0);

        scene.write().attach_object(Node::group("Model"));
    }

    #[test]
    #[should_panic(expected = "would create a cycle")]
    fn test_attach_own_root_panics() {
        let fx = fixture();
        let scene = Scene::new("Cyclic", fx.services.clone(), None, 0.0);
        let root = scene.read().root().clone();

        scene.write().attach_object(root);
    }

    #[test]
    fn test_override_root_is_shared() {
        let fx = fixture();
        let world = Node::scene_root("World");

        let scene = Scene::with_root("Override", world.clone(), fx.services.clone(), None, 0.0);
        let scene = scene.read();

        assert!(Arc::ptr_eq(scene.root(), &world));
        assert!(scene.objects().is_none());
        let record = fx.renderer.storage.camera_view(scene.camera_view_key().expect("registered")).expect("record");
        assert_eq!(record.view.expect("view").scene_graph, world.key());
    }

    #[test]
    fn test_update_settles_scene_graph() {
        let fx = fixture();
        let scene = Scene::new("Settle", fx.services.clone(), None, 0.0);
        let mut scene = scene.write();
        let object = Node::group("Offset");
        object.set_local_transform(crate::foundation::math::Transform::from_translation(Vec3::new(0.0, 3.0, 0.0)));
        scene.attach_object(object.clone());

        scene.update();

        assert_relative_eq!(object.world_transform().translate, Vec3::new(0.0, 3.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_setup_menu_to_texture_requests_rgba_target() {
        let fx = fixture();
        let scene = Scene::new("Offscreen", fx.services.clone(), None, 0.0);
        let mut scene = scene.write();

        scene.setup_menu_to_texture(512, 256).expect("target requested");

        let target = scene.menu_to_texture_render_target().expect("target stored");
        assert_eq!(target.request().width, 512);
        assert_eq!(target.request().height, 256);
        assert_eq!(target.request().mip_count, 1);
        assert_eq!(target.request().format, ImageFormat::R8G8B8A8Unorm);
        assert_eq!(target.request().name, "Offscreen");
        assert!(target.is_busy());
    }

    #[test]
    #[should_panic(expected = "already has an offscreen render target")]
    fn test_setup_menu_to_texture_twice_panics() {
        let fx = fixture();
        let scene = Scene::new("Twice", fx.services.clone(), None, 0.0);
        let mut scene = scene.write();

        scene.setup_menu_to_texture(64, 64).expect("first request succeeds");
        let _ = scene.setup_menu_to_texture(64, 64);
    }

    #[test]
    fn test_failed_target_request_can_be_retried() {
        let fx = fixture();
        let scene = Scene::new("Retry", fx.services.clone(), None, 0.0);
        let mut scene = scene.write();

        assert!(matches!(scene.setup_menu_to_texture(0, 64), Err(SceneError::Texture(_))));
        assert!(scene.menu_to_texture_render_target().is_none());
        scene.setup_menu_to_texture(64, 64).expect("retry succeeds");
    }

    #[test]
    fn test_menu_texture_applied_to_every_prefixed_geometry() {
        let fx = fixture();
        let world = Node::scene_root("World");
        let screen_a = Node::geometry("ScreenMonitor01", MaterialInstanceKey(10));
        let screen_b = Node::geometry("ScreenMonitor02", MaterialInstanceKey(11));
        let other = Node::geometry("Desk", MaterialInstanceKey(12));
        let group = Node::group("Props");
        group.attach_child(screen_b);
        group.attach_child(other);
        world.attach_child(screen_a);
        world.attach_child(group);
        for key in 10..=12 {
            fx.renderer.textures.register_material(MaterialInstanceKey(key), 1);
        }

        let scene = Scene::with_root("Terminal", world, fx.services.clone(), None, 0.0);
        let mut scene = scene.write();
        scene.setup_menu_to_texture(256, 256).expect("target requested");

        let retargeted = scene.setup_menu_to_texture_on_object("ScreenMonitor").expect("materials known");

        assert_eq!(retargeted, 2);
        let target = scene.menu_to_texture_render_target().expect("target");
        for key in [10, 11] {
            let bound = fx.renderer.textures
                .layer_override(MaterialInstanceKey(key), 0, TextureSlot::Base)
                .expect("override recorded");
            assert!(bound.same_target(target));
        }
        assert!(fx.renderer.textures.layer_override(MaterialInstanceKey(12), 0, TextureSlot::Base).is_none());
    }

    #[test]
    fn test_menu_texture_on_object_without_target_is_error() {
        let fx = fixture();
        let scene = Scene::new("NoTarget", fx.services.clone(), None, 0.0);

        let result = scene.read().setup_menu_to_texture_on_object("Screen");

        assert!(matches!(result, Err(SceneError::MissingRenderTarget(name)) if name == "NoTarget"));
    }

    #[test]
    #[should_panic(expected = "empty object name")]
    fn test_menu_texture_on_object_requires_name() {
        let fx = fixture();
        let scene = Scene::new("EmptyName", fx.services.clone(), None, 0.0);
        scene.write().setup_menu_to_texture(32, 32).expect("target requested");

        let _ = scene.read().setup_menu_to_texture_on_object("");
    }

    #[test]
    fn test_set_viewport_maps_normalized_area_to_pixels() {
        let fx = fixture();
        let scene = Scene::new("Viewport", fx.services.clone(), None, 0.0);
        let mut movie = RecordingMovie::default();

        let area = RenderArea { left: 0.25, top: 0.1, right: 0.75, bottom: 0.6 };
        scene.read().set_viewport(&mut movie, &area);

        assert_eq!(
            movie.viewports,
            [Viewport {
                buffer_width: 1920,
                buffer_height: 1080,
                left: 480,
                top: 108,
                width: 960,
                height: 540,
            }]
        );
    }

    #[test]
    fn test_viewport_tracks_backbuffer_resize() {
        let fx = fixture();
        let scene = Scene::new("Resize", fx.services.clone(), None, 0.0);
        let mut movie = RecordingMovie::default();

        fx.renderer.settings.resize(1280, 720);
        scene.read().set_viewport(&mut movie, &RenderArea::FULL);

        assert_eq!(movie.viewports[0].buffer_width, 1280);
        assert_eq!(movie.viewports[0].width, 1280);
        assert_eq!(movie.viewports[0].height, 720);
    }

    #[test]
    fn test_world_point_from_screen_center() {
        let fx = fixture();
        let scene = Scene::new("Unproject", fx.services.clone(), None, 0.0);
        let scene = scene.read();

        let point = scene.world_point_from_screen_point(Vec2::new(960.0, 540.0), 10.0, false);
        assert_relative_eq!(point, Vec3::new(0.0, 10.0, 0.0), epsilon = 1e-4);

        let adjusted = scene.world_point_from_screen_point(Vec2::new(960.0, 540.0), 10.0, true);
        assert_relative_eq!(adjusted, Vec3::new(0.0, 10.0 * 1920.0 / 1080.0, 0.0), epsilon = 1e-4);
    }

    #[test]
    fn test_world_point_scales_direction_not_ray() {
        let fx = fixture();
        let scene = Scene::new("Corner", fx.services.clone(), None, 0.0);
        let scene = scene.read();

        let plain = scene.world_point_from_screen_point(Vec2::new(0.0, 0.0), 2.0, false);
        let adjusted = scene.world_point_from_screen_point(Vec2::new(0.0, 0.0), 2.0, true);

        assert_relative_eq!(plain.norm(), 2.0, epsilon = 1e-5);
        assert_relative_eq!(adjusted, plain * (1920.0 / 1080.0), epsilon = 1e-5);
        assert!(plain.x < 0.0 && plain.z > 0.0);
    }

    #[test]
    fn test_set_clear_color_writes_record() {
        let fx = fixture();
        let scene = Scene::new("Clear", fx.services.clone(), None, 0.0);
        let scene = scene.read();
        let color = ClearColor::new(0.1, 0.2, 0.3, 1.0);

        scene.set_clear_color(color);

        let record = fx.renderer.storage.camera_view(scene.camera_view_key().expect("registered")).expect("record");
        assert_eq!(record.clear_color, Some(color));
    }

    #[test]
    fn test_set_clear_color_after_storage_release_is_noop() {
        let fx = fixture();
        let scene = Scene::new("Released", fx.services.clone(), None, 0.0);
        let scene = scene.read();
        let key = scene.camera_view_key().expect("registered");
        fx.renderer.storage.unregister_camera_view(key);

        scene.set_clear_color(ClearColor::new(1.0, 1.0, 1.0, 1.0));

        assert!(fx.renderer.storage.camera_view(key).is_none());
    }

    #[test]
    fn test_active_flag() {
        let fx = fixture();
        let scene = Scene::new("Active", fx.services.clone(), None, 0.0);

        assert!(!scene.read().is_active());
        scene.write().set_active(true);
        assert!(scene.read().is_active());
        scene.write().set_active(false);
        assert!(!scene.read().is_active());
    }
}
