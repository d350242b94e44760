//! Image loading for image-backed textures.
//!
//! Decodes files through the `image` crate into linear 8-bit RGB so the
//! renderer's image texture can do plain byte lookups.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable naming a directory searched first for images.
pub const IMAGE_DIR_ENV: &str = "GLINT_IMAGES";

/// How many parent directories are searched for an `images/` folder.
const PARENT_SEARCH_DEPTH: usize = 6;

/// Returned by [`ImageData::pixel_data`] when no image is loaded.
pub const MISSING_PIXEL: [u8; 3] = [255, 0, 255];

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Could not find image file {name} in any search location")]
    NotFound { name: String },

    #[error("Pixel buffer holds {actual} values, expected {expected}")]
    BadBuffer { expected: usize, actual: usize },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// Decoded RGB image stored as linear bytes, row-major, top row first.
///
/// An empty image (no data) reports zero width and height and answers every
/// pixel lookup with [`MISSING_PIXEL`].
#[derive(Clone, Debug, Default)]
pub struct ImageData {
    width: usize,
    height: usize,
    bytes: Vec<u8>,
}

impl ImageData {
    const BYTES_PER_PIXEL: usize = 3;

    /// An image with no data.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from linear float RGB triples in `[0, 1]`, row-major.
    pub fn from_linear_rgb(width: usize, height: usize, values: &[f32]) -> TextureResult<Self> {
        let expected = width * height * Self::BYTES_PER_PIXEL;
        if values.len() != expected {
            return Err(TextureError::BadBuffer {
                expected,
                actual: values.len(),
            });
        }

        Ok(Self {
            width,
            height,
            bytes: values.iter().copied().map(float_to_byte).collect(),
        })
    }

    /// Load an image from an exact path.
    pub fn load(path: &Path) -> TextureResult<Self> {
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();

        let linear: Vec<f32> = rgb.as_raw().iter().map(|&b| srgb_to_linear(b)).collect();
        let data = Self::from_linear_rgb(width as usize, height as usize, &linear)?;

        log::debug!("Loaded image {} ({}x{})", path.display(), width, height);
        Ok(data)
    }

    /// Search the usual locations for `name` and load the first one that
    /// decodes.
    pub fn find(name: &str) -> TextureResult<Self> {
        Self::load_first(name, candidate_paths(name))
    }

    /// Try `candidates` in order. A file that exists but fails to load is
    /// skipped; its error is returned only if nothing later succeeds.
    fn load_first(name: &str, candidates: impl IntoIterator<Item = PathBuf>) -> TextureResult<Self> {
        let mut last_error = None;
        for candidate in candidates.into_iter().filter(|path| path.is_file()) {
            match Self::load(&candidate) {
                Ok(data) => return Ok(data),
                Err(err) => {
                    log::warn!("Skipping unreadable image {}: {}", candidate.display(), err);
                    last_error = Some(err);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| TextureError::NotFound {
            name: name.to_string(),
        }))
    }

    /// Like [`ImageData::find`], but a failure is logged and yields an empty
    /// image so rendering can carry on with the debug color.
    pub fn open(name: &str) -> Self {
        Self::find(name).unwrap_or_else(|err| {
            log::error!("Could not load image file {}: {}", name, err);
            Self::empty()
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The three RGB bytes at `(x, y)`, with coordinates clamped into the
    /// image. Returns magenta when there is no data.
    pub fn pixel_data(&self, x: usize, y: usize) -> [u8; 3] {
        if self.is_empty() {
            return MISSING_PIXEL;
        }

        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        let idx = (y * self.width + x) * Self::BYTES_PER_PIXEL;
        [self.bytes[idx], self.bytes[idx + 1], self.bytes[idx + 2]]
    }
}

/// Locations tried for an image name, in order: `$GLINT_IMAGES/name`, `name`,
/// then `images/name` in the working directory and its parents.
pub fn candidate_paths(name: &str) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(PARENT_SEARCH_DEPTH + 3);

    if let Ok(dir) = std::env::var(IMAGE_DIR_ENV) {
        paths.push(Path::new(&dir).join(name));
    }
    paths.push(PathBuf::from(name));

    let mut prefix = PathBuf::new();
    for _ in 0..=PARENT_SEARCH_DEPTH {
        paths.push(prefix.join("images").join(name));
        prefix.push("..");
    }
    paths
}

/// Convert sRGB byte value to linear float.
fn srgb_to_linear(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Quantize a linear float to a byte: `<= 0` is 0, `>= 1` is 255.
fn float_to_byte(value: f32) -> u8 {
    if value <= 0.0 {
        0
    } else if value >= 1.0 {
        255
    } else {
        (256.0 * value) as u8
    }
}
