//! glint core - renderer-agnostic scene data.
//!
//! This crate provides:
//!
//! - **Camera settings**: `CameraSettings`, the numeric configuration surface
//! - **Scene description**: `SceneDescription` with named textures and
//!   materials, loadable from JSON
//! - **Image loading**: `ImageData`, decoded RGB used by image textures
//!
//! # Example
//!
//! ```ignore
//! use glint_core::SceneDescription;
//!
//! let scene = SceneDescription::load("scenes/two_spheres.json")?;
//! println!("{} spheres at {}px wide", scene.spheres.len(), scene.camera.image_width);
//! ```

pub mod scene;
pub mod settings;
pub mod texture;

// Re-export commonly used types
pub use scene::{
    ColorSource, MaterialDesc, SceneDescription, SceneError, SceneResult, SphereDesc, TextureDesc,
};
pub use settings::CameraSettings;
pub use texture::{ImageData, TextureError, TextureResult};
