use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use glint_core::SceneDescription;
use glint_renderer::{render, render_to_ppm, Scene};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

mod scenes;

/// Offline path tracer for sphere scenes.
#[derive(Parser, Debug)]
#[command(name = "glint", version, about)]
struct Args {
    /// Built-in scene name or path to a JSON scene file
    #[arg(short, long, default_value = "bouncing-spheres")]
    scene: String,

    /// Output image; `-` writes PPM to stdout, other extensions go through the image crate
    #[arg(short, long, default_value = "-")]
    output: PathBuf,

    /// Override the image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Override the samples per pixel
    #[arg(long)]
    spp: Option<u32>,

    /// Override the maximum bounce depth
    #[arg(long)]
    depth: Option<u32>,

    /// Seed for a reproducible render
    #[arg(long)]
    seed: Option<u64>,

    /// Print the resolved scene as JSON and exit
    #[arg(long)]
    dump_scene: bool,
}

fn load_scene(name: &str, rng: &mut dyn RngCore) -> Result<SceneDescription> {
    if let Some(scene) = scenes::preset(name, rng) {
        log::info!("Using built-in scene '{}'", name);
        return Ok(scene);
    }

    let path = Path::new(name);
    if !path.exists() {
        bail!(
            "'{}' is neither a scene file nor a built-in scene ({})",
            name,
            scenes::PRESETS.join(", ")
        );
    }
    SceneDescription::load(path).with_context(|| format!("Failed to load scene {}", path.display()))
}

fn apply_overrides(scene: &mut SceneDescription, args: &Args) {
    let camera = &mut scene.camera;
    if let Some(width) = args.width {
        camera.image_width = width;
    }
    if let Some(spp) = args.spp {
        camera.samples_per_pixel = spp;
    }
    if let Some(depth) = args.depth {
        camera.max_depth = depth;
    }
}

fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn is_ppm(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("ppm"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut desc = load_scene(&args.scene, &mut rng)?;
    apply_overrides(&mut desc, &args);

    if args.dump_scene {
        println!("{}", desc.to_json_string()?);
        return Ok(());
    }

    let start = Instant::now();
    let scene = Scene::build(&desc).context("Failed to build scene")?;
    log::info!("Scene built in {:?}", start.elapsed());

    let start = Instant::now();
    if is_stdout(&args.output) {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        render_to_ppm(&scene.camera, scene.world.as_ref(), &mut rng, &mut out)
            .context("Failed to write image to stdout")?;
    } else if is_ppm(&args.output) {
        let file = File::create(&args.output)
            .with_context(|| format!("Failed to create {}", args.output.display()))?;
        let mut out = BufWriter::new(file);
        render_to_ppm(&scene.camera, scene.world.as_ref(), &mut rng, &mut out)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
        out.flush()?;
    } else {
        let image = render(&scene.camera, scene.world.as_ref(), &mut rng);
        image
            .to_rgb_image()
            .save(&args.output)
            .with_context(|| format!("Failed to save {}", args.output.display()))?;
    }
    log::info!("Rendered in {:?}", start.elapsed());

    if !is_stdout(&args.output) {
        log::info!("Saved to {}", args.output.display());
    }
    Ok(())
}
