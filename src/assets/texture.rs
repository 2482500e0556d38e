//! Texture loading
//!
//! Textures are decoded into CPU-side RGBA8 pixels. Uploading them to a GPU
//! is the renderer's business.

use std::fmt;
use std::path::{Path, PathBuf};

use image::GenericImageView;
use rustc_hash::FxHashMap;

use super::handle::AssetHandle;
use super::storage::Assets;

/// Decoded RGBA8 image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    /// Resource name the texture was loaded under
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 rows
    pub rgba: Vec<u8>,
}

impl Texture {
    /// Create a texture from a decoded image
    #[must_use]
    pub fn from_image(name: impl Into<String>, img: &image::DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            name: name.into(),
            width,
            height,
            rgba: img.to_rgba8().into_raw(),
        }
    }

    /// Create a square texture filled with a single color
    #[must_use]
    pub fn solid(name: impl Into<String>, color: [u8; 4], size: u32) -> Self {
        let pixels = pixel_count(size, size);
        Self {
            name: name.into(),
            width: size,
            height: size,
            rgba: color.repeat(pixels),
        }
    }

    /// Width divided by height
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Number of pixels in a `width` x `height` image, computed without `u32` overflow
fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Resolves content names to loaded textures
pub trait TextureLoader {
    /// Load (or fetch from cache) the texture called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::ResourceNotFound`] if nothing backs `name`, or
    /// another [`AssetError`] if the resource exists but cannot be used.
    fn load_texture(&mut self, name: &str) -> Result<AssetHandle<Texture>, AssetError>;
}

/// Loads image files relative to a root directory, caching by name
#[derive(Debug)]
pub struct DiskTextureLoader {
    root: PathBuf,
    cache: Assets<Texture>,
}

impl DiskTextureLoader {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Assets::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of textures decoded so far
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

impl TextureLoader for DiskTextureLoader {
    fn load_texture(&mut self, name: &str) -> Result<AssetHandle<Texture>, AssetError> {
        let root = &self.root;
        self.cache.get_or_try_load(name, || decode(root, name))
    }
}

fn decode(root: &Path, name: &str) -> Result<Texture, AssetError> {
    let path = root.join(name);
    if !path.is_file() {
        return Err(AssetError::ResourceNotFound(name.to_owned()));
    }

    let img = image::open(&path).map_err(|e| match e {
        image::ImageError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
            AssetError::ResourceNotFound(name.to_owned())
        }
        image::ImageError::IoError(io) => AssetError::Io {
            name: name.to_owned(),
            message: io.to_string(),
        },
        other => AssetError::Decode {
            name: name.to_owned(),
            message: other.to_string(),
        },
    })?;

    log::debug!("Decoded texture {} from {}", name, path.display());
    Ok(Texture::from_image(name, &img))
}

/// Textures registered up front, for tests and procedurally generated content
#[derive(Debug, Default)]
pub struct InMemoryTextures {
    textures: FxHashMap<String, AssetHandle<Texture>>,
}

impl InMemoryTextures {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture under its own name, replacing any previous one
    pub fn insert(&mut self, texture: Texture) -> AssetHandle<Texture> {
        let handle = AssetHandle::new(texture);
        self.textures.insert(handle.name.clone(), handle.clone());
        handle
    }

    /// Builder-style [`InMemoryTextures::insert`]
    #[must_use]
    pub fn with(mut self, texture: Texture) -> Self {
        let _ = self.insert(texture);
        self
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.textures.remove(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl TextureLoader for InMemoryTextures {
    fn load_texture(&mut self, name: &str) -> Result<AssetHandle<Texture>, AssetError> {
        self.textures
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::ResourceNotFound(name.to_owned()))
    }
}

/// Errors that can occur while resolving assets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// Nothing backs the requested resource name
    ResourceNotFound(String),
    /// The resource exists but could not be decoded
    Decode { name: String, message: String },
    /// The resource exists but could not be read
    Io { name: String, message: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceNotFound(name) => write!(f, "resource not found: {name}"),
            Self::Decode { name, message } => write!(f, "failed to decode {name}: {message}"),
            Self::Io { name, message } => write!(f, "failed to read {name}: {message}"),
        }
    }
}

impl std::error::Error for AssetError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("anchorplace-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_solid_texture() {
        let texture = Texture::solid("red", [255, 0, 0, 255], 4);
        assert_eq!(texture.rgba.len(), 4 * 4 * 4);
        assert_eq!(&texture.rgba[..4], &[255, 0, 0, 255]);
        assert!((texture.aspect_ratio() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_pixel_count_past_u32() {
        assert_eq!(pixel_count(0, 7), 0);
        assert_eq!(pixel_count(3, 5), 15);
        #[cfg(target_pointer_width = "64")]
        assert_eq!(pixel_count(70_000, 70_000), 4_900_000_000);
    }

    #[test]
    fn test_in_memory_lookup() {
        let mut textures = InMemoryTextures::new().with(Texture::solid("smile.png", [1, 2, 3, 4], 1));

        let first = textures.load_texture("smile.png").unwrap();
        let second = textures.load_texture("smile.png").unwrap();
        assert_eq!(first, second);

        assert_eq!(
            textures.load_texture("turtle.png"),
            Err(AssetError::ResourceNotFound("turtle.png".to_string()))
        );
    }

    #[test]
    fn test_disk_loader_missing_file() {
        let mut loader = DiskTextureLoader::new(scratch_dir("missing"));
        assert_eq!(
            loader.load_texture("nope.png"),
            Err(AssetError::ResourceNotFound("nope.png".to_string()))
        );
        assert_eq!(loader.cached(), 0);
    }

    #[test]
    fn test_disk_loader_decodes_and_caches() {
        let dir = scratch_dir("decode");
        let img = image::RgbaImage::from_pixel(2, 3, image::Rgba([10, 20, 30, 255]));
        img.save(dir.join("tile.png")).unwrap();

        let mut loader = DiskTextureLoader::new(&dir);
        let first = loader.load_texture("tile.png").unwrap();
        assert_eq!((first.width, first.height), (2, 3));
        assert_eq!(&first.rgba[..4], &[10, 20, 30, 255]);

        let second = loader.load_texture("tile.png").unwrap();
        assert_eq!(first, second);
        assert_eq!(loader.cached(), 1);
    }

    #[test]
    fn test_disk_loader_rejects_garbage() {
        let dir = scratch_dir("garbage");
        std::fs::write(dir.join("broken.png"), b"definitely not a png").unwrap();

        let mut loader = DiskTextureLoader::new(&dir);
        assert!(matches!(
            loader.load_texture("broken.png"),
            Err(AssetError::Decode { .. })
        ));
    }
}
