//! Foundation module
//!
//! Math aliases and transforms shared by cameras and scene graph nodes,
//! and logger setup for binaries.

pub mod math;
pub mod logging;
