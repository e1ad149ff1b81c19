//! # UI Camera
//!
//! Camera used by menu scenes. The rotation basis follows a
//! (direction, up, right) column convention: column 0 is the viewing
//! direction, column 1 is up and column 2 is right. A menu camera built
//! from `(UNIT_Y, UNIT_Z, UNIT_X)` therefore looks down +Y with +Z up.
//!
//! Picking works in frustum-window space rather than through an inverted
//! projection matrix: a pixel is mapped onto the `left..right` /
//! `bottom..top` window at unit distance and turned into a world ray.

use crate::foundation::math::{Mat3, Transform, Vec3};
use crate::scene::UpdateData;

use super::frustum::Frustum;
use super::keys::RendererKey;

/// Ray in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin
    pub origin: Vec3,
    /// Normalized direction
    pub direction: Vec3,
}

/// Perspective or orthographic camera with a frustum-window projection
#[derive(Debug, Clone)]
pub struct Camera {
    name: String,
    key: RendererKey,
    frustum: Frustum,
    local: Transform,
    world: Transform,
    world_dir: Vec3,
    world_up: Vec3,
    world_right: Vec3,
    min_near_plane_dist: f32,
    max_far_near_ratio: f32,
    lod_adjust: f32,
}

impl Camera {
    /// Create a camera at the origin with an identity basis
    ///
    /// The camera receives a fresh renderer key so it can be referenced
    /// from camera-view records straight away.
    pub fn new(name: impl Into<String>) -> Self {
        let local = Transform::identity();
        let mut camera = Self {
            name: name.into(),
            key: RendererKey::next(),
            frustum: Frustum::default(),
            local,
            world: local,
            world_dir: Vec3::x(),
            world_up: Vec3::y(),
            world_right: Vec3::z(),
            min_near_plane_dist: 0.1,
            max_far_near_ratio: 10_000.0,
            lod_adjust: 1.0,
        };
        camera.update_world_vectors();
        log::trace!("Camera '{}' registered as render camera {:?}", camera.name, camera.key);
        camera
    }

    /// Camera name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renderer key of this camera
    pub const fn key(&self) -> RendererKey {
        self.key
    }

    /// Current view frustum
    pub const fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Replace the view frustum
    pub fn set_view_frustum(&mut self, frustum: Frustum) {
        self.frustum = frustum;
    }

    /// Switch between perspective and orthographic clip space
    pub fn set_ortho(&mut self, ortho: bool) {
        self.frustum.ortho = ortho;
    }

    /// Local translation
    pub fn set_translate(&mut self, translate: Vec3) {
        self.local.translate = translate;
    }

    /// Local rotation from (direction, up, right) columns
    pub fn set_rotate_basis(&mut self, direction: Vec3, up: Vec3, right: Vec3) {
        self.local.rotate = Mat3::from_columns(&[direction, up, right]);
    }

    /// Local transform
    pub const fn local_transform(&self) -> &Transform {
        &self.local
    }

    /// World transform as of the last update
    pub const fn world_transform(&self) -> &Transform {
        &self.world
    }

    /// World viewing direction
    pub const fn world_direction(&self) -> Vec3 {
        self.world_dir
    }

    /// World up vector
    pub const fn world_up(&self) -> Vec3 {
        self.world_up
    }

    /// World right vector
    pub const fn world_right(&self) -> Vec3 {
        self.world_right
    }

    /// Lower bound applied to the near plane when the renderer adjusts it
    pub const fn min_near_plane_dist(&self) -> f32 {
        self.min_near_plane_dist
    }

    /// Set the near plane lower bound
    pub fn set_min_near_plane_dist(&mut self, distance: f32) {
        self.min_near_plane_dist = distance;
    }

    /// Maximum far/near ratio the renderer may use for this camera
    pub const fn max_far_near_ratio(&self) -> f32 {
        self.max_far_near_ratio
    }

    /// Set the maximum far/near ratio
    pub fn set_max_far_near_ratio(&mut self, ratio: f32) {
        self.max_far_near_ratio = ratio;
    }

    /// Level-of-detail bias; zero disables distance based LOD
    pub const fn lod_adjust(&self) -> f32 {
        self.lod_adjust
    }

    /// Set the level-of-detail bias
    pub fn set_lod_adjust(&mut self, lod_adjust: f32) {
        self.lod_adjust = lod_adjust;
    }

    /// Refresh the world transform and derived vectors
    ///
    /// Cameras are never parented, so the world transform is the local one.
    pub fn update(&mut self, data: &UpdateData) {
        self.world = self.local;
        self.update_world_vectors();
        log::trace!("Camera '{}' updated (dt = {})", self.name, data.elapsed);
    }

    fn update_world_vectors(&mut self) {
        self.world_dir = self.world.rotate.column(0).into_owned();
        self.world_up = self.world.rotate.column(1).into_owned();
        self.world_right = self.world.rotate.column(2).into_owned();
    }

    /// Convert a window pixel into a world-space ray
    ///
    /// `x` grows to the right and `y` grows downward, both in pixels of a
    /// `width` x `height` target.
    pub fn window_point_to_ray(&self, x: i32, y: i32, width: f32, height: f32) -> Ray {
        let unit_x = x as f32 / width;
        let unit_y = 1.0 - y as f32 / height;

        let window_x = self.frustum.left + unit_x * self.frustum.width();
        let window_y = self.frustum.bottom + unit_y * self.frustum.height();

        let offset = self.world_right * window_x + self.world_up * window_y;

        if self.frustum.ortho {
            Ray {
                origin: self.world.translate + offset,
                direction: self.world_dir,
            }
        } else {
            Ray {
                origin: self.world.translate,
                direction: (self.world_dir + offset).normalize(),
            }
        }
    }
}
