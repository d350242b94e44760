//! Turns a `SceneDescription` into renderable objects.

use std::collections::HashMap;
use std::sync::Arc;

use glint_core::{
    ColorSource, MaterialDesc, SceneDescription, SceneError, SceneResult, SphereDesc, TextureDesc,
};

use crate::texture::{CheckerTexture, ImageTexture, SolidColor, Texture};
use crate::{BvhNode, Camera, CameraError, Dielectric, Hittable, HittableList, Lambertian, Material, Metal, Sphere};

/// A scene ready to render: its geometry root and its camera.
pub struct Scene {
    pub world: Box<dyn Hittable>,
    pub camera: Camera,
}

/// Failure to turn a description into a renderable scene.
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("invalid camera: {0}")]
    Camera(#[from] CameraError),
}

impl Scene {
    /// Build the geometry and camera described by `desc`.
    pub fn build(desc: &SceneDescription) -> Result<Self, BuildError> {
        let world = build_world(desc)?;
        let camera = Camera::new(&desc.camera)?;
        Ok(Self { world, camera })
    }
}

/// Build the geometry root: a BVH, or a flat list when `use_bvh` is off.
///
/// Textures and materials are created once and shared by every sphere
/// that names them.
pub fn build_world(desc: &SceneDescription) -> SceneResult<Box<dyn Hittable>> {
    desc.validate()?;

    let mut textures = TextureCache::new(desc);
    let mut materials: HashMap<&str, Arc<dyn Material>> = HashMap::new();
    for (name, material) in &desc.materials {
        materials.insert(name, build_material(material, &mut textures)?);
    }

    let mut list = HittableList::new();
    for (index, sphere) in desc.spheres.iter().enumerate() {
        let material = materials
            .get(sphere.material.as_str())
            .cloned()
            .ok_or_else(|| SceneError::UnknownMaterial {
                index,
                name: sphere.material.clone(),
            })?;
        list.add(Box::new(build_sphere(sphere, material)));
    }

    log::info!(
        "Built {} spheres with {} materials and {} textures",
        list.len(),
        materials.len(),
        textures.built.len()
    );

    if desc.use_bvh {
        Ok(Box::new(BvhNode::from_list(list)))
    } else {
        Ok(Box::new(list))
    }
}

fn build_sphere(sphere: &SphereDesc, material: Arc<dyn Material>) -> Sphere {
    match sphere.center_end {
        Some(center_end) => Sphere::moving(sphere.center, center_end, sphere.radius, material),
        None => Sphere::new(sphere.center, sphere.radius, material),
    }
}

fn build_material<'a>(
    desc: &'a MaterialDesc,
    textures: &mut TextureCache<'a>,
) -> SceneResult<Arc<dyn Material>> {
    Ok(match desc {
        MaterialDesc::Lambertian { albedo } => {
            Arc::new(Lambertian::from_texture(textures.resolve("material", albedo)?))
        }
        MaterialDesc::Metal { albedo, fuzz } => Arc::new(Metal::new(*albedo, *fuzz)),
        MaterialDesc::Dielectric { refraction_index } => Arc::new(Dielectric::new(*refraction_index)),
    })
}

/// Builds each named texture at most once.
struct TextureCache<'a> {
    desc: &'a SceneDescription,
    built: HashMap<&'a str, Arc<dyn Texture>>,
}

impl<'a> TextureCache<'a> {
    fn new(desc: &'a SceneDescription) -> Self {
        Self {
            desc,
            built: HashMap::new(),
        }
    }

    fn resolve(&mut self, owner: &str, source: &'a ColorSource) -> SceneResult<Arc<dyn Texture>> {
        match source {
            ColorSource::Color(color) => Ok(Arc::new(SolidColor::new(*color))),
            ColorSource::Texture(name) => self.named(owner, name),
        }
    }

    fn named(&mut self, owner: &str, name: &'a str) -> SceneResult<Arc<dyn Texture>> {
        if let Some(texture) = self.built.get(name) {
            return Ok(texture.clone());
        }

        let desc = self.desc.textures.get(name).ok_or_else(|| SceneError::UnknownTexture {
            owner: owner.to_string(),
            name: name.to_string(),
        })?;

        let texture: Arc<dyn Texture> = match desc {
            TextureDesc::Solid { color } => Arc::new(SolidColor::new(*color)),
            TextureDesc::Checker { scale, even, odd } => {
                let even = self.resolve(name, even)?;
                let odd = self.resolve(name, odd)?;
                Arc::new(CheckerTexture::new(*scale, even, odd))
            }
            TextureDesc::Image { path } => Arc::new(ImageTexture::open(path)),
        };

        self.built.insert(name, texture.clone());
        Ok(texture)
    }
}
