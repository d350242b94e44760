//! Simple path tracer example.
//!
//! Builds three spheres on a checkered ground directly through the
//! renderer API and saves the result as a PPM file.

use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use glint_core::CameraSettings;
use glint_renderer::{
    render_to_ppm, BvhNode, Camera, CheckerTexture, Color, Dielectric, HittableList, Lambertian,
    Metal, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> std::io::Result<()> {
    println!("glint - Simple Example");
    println!("======================");

    let start = std::time::Instant::now();
    let world = build_scene();
    println!("Scene built in {:?}", start.elapsed());

    let settings = CameraSettings::default()
        .with_image(400, 16.0 / 9.0)
        .with_quality(50, 10)
        .with_position(
            Vec3::new(13.0, 2.0, 3.0), // look_from
            Vec3::ZERO,                // look_at
            Vec3::Y,                   // vup
        )
        .with_lens(20.0, 0.6, 10.0);
    let camera = match Camera::new(&settings) {
        Ok(camera) => camera,
        Err(e) => {
            eprintln!("Bad camera: {e}");
            return Ok(());
        }
    };

    println!(
        "Rendering {}x{} @ {} spp...",
        camera.image_width(),
        camera.image_height(),
        camera.samples_per_pixel()
    );

    let filename = "output.ppm";
    let mut out = BufWriter::new(File::create(filename)?);
    let mut rng = StdRng::seed_from_u64(7);

    let start = std::time::Instant::now();
    render_to_ppm(&camera, &world, &mut rng, &mut out)?;
    println!("Rendered in {:?}", start.elapsed());
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> BvhNode {
    let mut world = HittableList::new();

    let checker = CheckerTexture::from_colors(0.32, Color::new(0.2, 0.3, 0.1), Color::splat(0.9));
    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::from_texture(Arc::new(checker))),
    )));

    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    BvhNode::from_list(world)
}
