//! Scene description types for glint.
//!
//! A renderer-agnostic, serializable list of textures, materials and
//! spheres plus the camera settings. Materials and textures are referenced
//! by name so many spheres can share one material.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use glint_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::CameraSettings;

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sphere {index} references unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("'{owner}' references unknown texture '{name}'")]
    UnknownTexture { owner: String, name: String },

    #[error("Texture '{0}' refers back to itself")]
    TextureCycle(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Where a color comes from: a constant or a named texture.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSource {
    Color(Vec3),
    Texture(String),
}

impl From<Vec3> for ColorSource {
    fn from(color: Vec3) -> Self {
        ColorSource::Color(color)
    }
}

impl From<&str> for ColorSource {
    fn from(name: &str) -> Self {
        ColorSource::Texture(name.to_string())
    }
}

/// Texture definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextureDesc {
    Solid { color: Vec3 },
    /// 3-D checker with cells of edge length `scale`
    Checker {
        scale: f32,
        even: ColorSource,
        odd: ColorSource,
    },
    /// Image file, resolved through the image search path
    Image { path: String },
}

/// Material definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    Lambertian { albedo: ColorSource },
    Metal { albedo: Vec3, fuzz: f32 },
    Dielectric { refraction_index: f32 },
}

/// A sphere, optionally moving linearly from `center` (time 0) to
/// `center_end` (time 1).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Vec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_end: Option<Vec3>,
    pub radius: f32,
    pub material: String,
}

impl SphereDesc {
    pub fn stationary(center: Vec3, radius: f32, material: impl Into<String>) -> Self {
        Self {
            center,
            center_end: None,
            radius,
            material: material.into(),
        }
    }

    pub fn moving(center: Vec3, center_end: Vec3, radius: f32, material: impl Into<String>) -> Self {
        Self {
            center,
            center_end: Some(center_end),
            radius,
            material: material.into(),
        }
    }
}

fn default_use_bvh() -> bool {
    true
}

/// Complete scene: what to render and how to look at it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub textures: BTreeMap<String, TextureDesc>,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDesc>,
    #[serde(default)]
    pub spheres: Vec<SphereDesc>,
    /// Wrap the spheres in a BVH instead of testing them one by one
    #[serde(default = "default_use_bvh")]
    pub use_bvh: bool,
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self {
            camera: CameraSettings::default(),
            textures: BTreeMap::new(),
            materials: BTreeMap::new(),
            spheres: Vec::new(),
            use_bvh: true,
        }
    }
}

impl SceneDescription {
    pub fn new(camera: CameraSettings) -> Self {
        Self {
            camera,
            ..Default::default()
        }
    }

    /// Parse and validate a scene from JSON text.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let scene: SceneDescription = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load and validate a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let scene = Self::from_json_str(&text)?;
        log::info!(
            "Loaded scene {} ({} spheres, {} materials, {} textures)",
            path.display(),
            scene.spheres.len(),
            scene.materials.len(),
            scene.textures.len()
        );
        Ok(scene)
    }

    pub fn to_json_string(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn add_texture(&mut self, name: impl Into<String>, texture: TextureDesc) -> &mut Self {
        self.textures.insert(name.into(), texture);
        self
    }

    pub fn add_material(&mut self, name: impl Into<String>, material: MaterialDesc) -> &mut Self {
        self.materials.insert(name.into(), material);
        self
    }

    pub fn add_sphere(&mut self, sphere: SphereDesc) -> &mut Self {
        self.spheres.push(sphere);
        self
    }

    /// Check that every name resolves and no texture contains itself.
    pub fn validate(&self) -> SceneResult<()> {
        for (name, material) in &self.materials {
            if let MaterialDesc::Lambertian { albedo } = material {
                self.check_source(name, albedo)?;
            }
        }

        for (name, texture) in &self.textures {
            if let TextureDesc::Checker { even, odd, .. } = texture {
                self.check_source(name, even)?;
                self.check_source(name, odd)?;
            }
            self.check_acyclic(name, &mut BTreeSet::new())?;
        }

        for (index, sphere) in self.spheres.iter().enumerate() {
            if !self.materials.contains_key(&sphere.material) {
                return Err(SceneError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                });
            }
        }

        Ok(())
    }

    fn check_source(&self, owner: &str, source: &ColorSource) -> SceneResult<()> {
        match source {
            ColorSource::Texture(name) if !self.textures.contains_key(name) => {
                Err(SceneError::UnknownTexture {
                    owner: owner.to_string(),
                    name: name.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    fn check_acyclic<'a>(&'a self, name: &'a str, path: &mut BTreeSet<&'a str>) -> SceneResult<()> {
        if !path.insert(name) {
            return Err(SceneError::TextureCycle(name.to_string()));
        }
        if let Some(TextureDesc::Checker { even, odd, .. }) = self.textures.get(name) {
            for source in [even, odd] {
                if let ColorSource::Texture(child) = source {
                    self.check_acyclic(child, path)?;
                }
            }
        }
        path.remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SPHERES: &str = r#"{
        "camera": { "image_width": 32, "vfov": 20.0 },
        "textures": {
            "ground": { "type": "checker", "scale": 0.32, "even": [0.2, 0.3, 0.1], "odd": [0.9, 0.9, 0.9] }
        },
        "materials": {
            "floor": { "type": "lambertian", "albedo": "ground" },
            "glass": { "type": "dielectric", "refraction_index": 1.5 },
            "steel": { "type": "metal", "albedo": [0.7, 0.6, 0.5], "fuzz": 0.0 }
        },
        "spheres": [
            { "center": [0.0, -1000.0, 0.0], "radius": 1000.0, "material": "floor" },
            { "center": [0.0, 1.0, 0.0], "center_end": [0.0, 1.5, 0.0], "radius": 1.0, "material": "glass" }
        ]
    }"#;

    #[test]
    fn test_parse_scene() {
        let scene = SceneDescription::from_json_str(TWO_SPHERES).expect("valid scene");

        assert_eq!(scene.camera.image_width, 32);
        assert_eq!(scene.camera.samples_per_pixel, 10);
        assert!(scene.use_bvh);
        assert_eq!(scene.spheres.len(), 2);
        assert_eq!(scene.spheres[1].center_end, Some(Vec3::new(0.0, 1.5, 0.0)));
        assert_eq!(
            scene.materials["floor"],
            MaterialDesc::Lambertian {
                albedo: ColorSource::Texture("ground".to_string())
            }
        );
        assert!(matches!(
            scene.textures["ground"],
            TextureDesc::Checker { even: ColorSource::Color(_), .. }
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let scene = SceneDescription::from_json_str(TWO_SPHERES).expect("valid scene");
        let text = scene.to_json_string().expect("serializable");
        let again = SceneDescription::from_json_str(&text).expect("valid scene");
        assert_eq!(scene, again);
    }

    #[test]
    fn test_unknown_material() {
        let mut scene = SceneDescription::default();
        scene.add_sphere(SphereDesc::stationary(Vec3::ZERO, 1.0, "missing"));

        let err = scene.validate().unwrap_err();
        assert!(matches!(err, SceneError::UnknownMaterial { index: 0, .. }));
    }

    #[test]
    fn test_unknown_texture() {
        let mut scene = SceneDescription::default();
        scene.add_material("m", MaterialDesc::Lambertian { albedo: "nope".into() });

        let err = scene.validate().unwrap_err();
        assert!(matches!(err, SceneError::UnknownTexture { .. }));
    }

    #[test]
    fn test_texture_cycle() {
        let mut scene = SceneDescription::default();
        scene
            .add_texture(
                "a",
                TextureDesc::Checker { scale: 1.0, even: "b".into(), odd: Vec3::ONE.into() },
            )
            .add_texture(
                "b",
                TextureDesc::Checker { scale: 1.0, even: Vec3::ZERO.into(), odd: "a".into() },
            );

        let err = scene.validate().unwrap_err();
        assert!(matches!(err, SceneError::TextureCycle(_)));
    }

    #[test]
    fn test_shared_texture_is_not_a_cycle() {
        let mut scene = SceneDescription::default();
        scene
            .add_texture("leaf", TextureDesc::Solid { color: Vec3::ONE })
            .add_texture(
                "both",
                TextureDesc::Checker { scale: 1.0, even: "leaf".into(), odd: "leaf".into() },
            );

        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_bad_json() {
        let err = SceneDescription::from_json_str("{ \"spheres\": 3 }").unwrap_err();
        assert!(matches!(err, SceneError::Json(_)));
    }
}
