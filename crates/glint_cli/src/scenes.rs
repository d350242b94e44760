//! Built-in scenes, expressed as scene descriptions.

use glint_core::{CameraSettings, MaterialDesc, SceneDescription, SphereDesc, TextureDesc};
use glint_math::Vec3;
use rand::{Rng, RngCore};

/// Names accepted by `--scene` besides a JSON file path.
pub const PRESETS: &[&str] = &["bouncing-spheres", "checkered-spheres", "earth"];

/// Look up a preset by name. The random scene draws from `rng`.
pub fn preset(name: &str, rng: &mut dyn RngCore) -> Option<SceneDescription> {
    match name {
        "bouncing-spheres" => Some(bouncing_spheres(rng)),
        "checkered-spheres" => Some(checkered_spheres()),
        "earth" => Some(earth()),
        _ => None,
    }
}

fn wide_shot(look_from: Vec3) -> CameraSettings {
    CameraSettings::default()
        .with_image(400, 16.0 / 9.0)
        .with_quality(100, 50)
        .with_position(look_from, Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0)
}

fn ground_checker() -> TextureDesc {
    TextureDesc::Checker {
        scale: 0.32,
        even: Vec3::new(0.2, 0.3, 0.1).into(),
        odd: Vec3::splat(0.9).into(),
    }
}

fn random_color(rng: &mut dyn RngCore, min: f32, max: f32) -> Vec3 {
    Vec3::new(rng.gen_range(min..max), rng.gen_range(min..max), rng.gen_range(min..max))
}

/// Checkered ground, a grid of small random spheres and three large ones.
pub fn bouncing_spheres(rng: &mut dyn RngCore) -> SceneDescription {
    let camera = wide_shot(Vec3::new(13.0, 2.0, 3.0)).with_lens(20.0, 0.6, 10.0);
    let mut scene = SceneDescription::new(camera);

    scene
        .add_texture("checker", ground_checker())
        .add_material("ground", MaterialDesc::Lambertian { albedo: "checker".into() })
        .add_sphere(SphereDesc::stationary(Vec3::new(0.0, -1000.0, 0.0), 1000.0, "ground"));

    for a in -11..11 {
        for b in -11..11 {
            let choose_material: f32 = rng.gen();
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let name = format!("small_{}_{}", a + 11, b + 11);
            if choose_material < 0.8 {
                let albedo = random_color(rng, 0.0, 1.0) * random_color(rng, 0.0, 1.0);
                let center_end = center + Vec3::new(0.0, rng.gen_range(0.0..0.5), 0.0);
                scene
                    .add_material(&name, MaterialDesc::Lambertian { albedo: albedo.into() })
                    .add_sphere(SphereDesc::moving(center, center_end, 0.2, &name));
            } else if choose_material < 0.95 {
                let albedo = random_color(rng, 0.5, 1.0);
                let fuzz = rng.gen_range(0.0..0.5);
                scene
                    .add_material(&name, MaterialDesc::Metal { albedo, fuzz })
                    .add_sphere(SphereDesc::stationary(center, 0.2, &name));
            } else {
                scene
                    .add_material(&name, MaterialDesc::Dielectric { refraction_index: 1.5 })
                    .add_sphere(SphereDesc::stationary(center, 0.2, &name));
            }
        }
    }

    scene
        .add_material("glass", MaterialDesc::Dielectric { refraction_index: 1.5 })
        .add_material("brown", MaterialDesc::Lambertian { albedo: Vec3::new(0.4, 0.2, 0.1).into() })
        .add_material("bronze", MaterialDesc::Metal { albedo: Vec3::new(0.7, 0.6, 0.5), fuzz: 0.0 })
        .add_sphere(SphereDesc::stationary(Vec3::new(0.0, 1.0, 0.0), 1.0, "glass"))
        .add_sphere(SphereDesc::stationary(Vec3::new(-4.0, 1.0, 0.0), 1.0, "brown"))
        .add_sphere(SphereDesc::stationary(Vec3::new(4.0, 1.0, 0.0), 1.0, "bronze"));
    scene
}

/// Two large spheres sharing one checker texture.
pub fn checkered_spheres() -> SceneDescription {
    let mut scene = SceneDescription::new(wide_shot(Vec3::new(13.0, 2.0, 3.0)));
    scene
        .add_texture("checker", ground_checker())
        .add_material("checkered", MaterialDesc::Lambertian { albedo: "checker".into() })
        .add_sphere(SphereDesc::stationary(Vec3::new(0.0, -10.0, 0.0), 10.0, "checkered"))
        .add_sphere(SphereDesc::stationary(Vec3::new(0.0, 10.0, 0.0), 10.0, "checkered"));
    scene
}

/// An image-textured globe. Looks for `earth.jpg` on the image search path.
pub fn earth() -> SceneDescription {
    let mut scene = SceneDescription::new(wide_shot(Vec3::new(0.0, 0.0, 12.0)));
    scene.use_bvh = false;
    scene
        .add_texture("earth_map", TextureDesc::Image { path: "earth.jpg".to_string() })
        .add_material("earth_surface", MaterialDesc::Lambertian { albedo: "earth_map".into() })
        .add_sphere(SphereDesc::stationary(Vec3::ZERO, 2.0, "earth_surface"));
    scene
}
