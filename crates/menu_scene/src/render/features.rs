//! Renderer feature toggles
//!
//! Each camera view carries its own snapshot of the global feature set so
//! that menus can opt out of effects (temporal AA in particular) without
//! touching the main view.

use bitflags::bitflags;

bitflags! {
    /// Individually switchable renderer features
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Features: u32 {
        /// Temporal anti-aliasing
        const TEMPORAL_AA = 1 << 0;
        /// Screen-space ambient occlusion
        const SSAO = 1 << 1;
        /// Bloom post-process
        const BLOOM = 1 << 2;
        /// Depth of field post-process
        const DEPTH_OF_FIELD = 1 << 3;
        /// Per-object motion blur
        const MOTION_BLUR = 1 << 4;
        /// Volumetric lighting
        const VOLUMETRICS = 1 << 5;
    }
}

/// Feature configuration written to a camera view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSetup {
    enabled: Features,
}

impl FeatureSetup {
    /// Create a setup with exactly the given features enabled
    pub const fn new(enabled: Features) -> Self {
        Self { enabled }
    }

    /// Enable or disable one or more features
    pub fn set_enabled(&mut self, feature: Features, enabled: bool) {
        self.enabled.set(feature, enabled);
    }

    /// Whether every feature in `feature` is enabled
    pub const fn is_enabled(&self, feature: Features) -> bool {
        self.enabled.contains(feature)
    }

    /// All enabled features
    pub const fn enabled(&self) -> Features {
        self.enabled
    }
}

impl Default for FeatureSetup {
    fn default() -> Self {
        Self::new(Features::all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_single_feature_leaves_others() {
        let mut setup = FeatureSetup::new(Features::TEMPORAL_AA | Features::BLOOM);

        setup.set_enabled(Features::TEMPORAL_AA, false);

        assert!(!setup.is_enabled(Features::TEMPORAL_AA));
        assert!(setup.is_enabled(Features::BLOOM));

        setup.set_enabled(Features::TEMPORAL_AA, true);
        assert_eq!(setup.enabled(), Features::TEMPORAL_AA | Features::BLOOM);
    }
}
