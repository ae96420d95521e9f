//! Avatar generation entry points.

use std::path::Path;

use image::RgbaImage;

use crate::catalog::AssetCatalog;
use crate::encode::{OutputFormat, save_to_file, save_to_file_as};
use crate::error::Result;
use crate::gender::Gender;
use crate::layer::{LayerSelection, compose};
use crate::profile::AvatarProfile;
use crate::seed::{Seed, seed_from_entropy, seed_from_username};

// ============================================================================
// AvatarGenerator
// ============================================================================

/// Main avatar generation engine.
///
/// `AvatarGenerator` owns an immutable [`AssetCatalog`] loaded once at
/// startup. Every call builds its own seeded generator, so one instance can
/// serve any number of threads without locking; calls with the same seed
/// always agree.
///
/// # Example
///
/// ```no_run
/// use avatar_layers::{AvatarGenerator, Gender};
///
/// let generator = AvatarGenerator::from_dir("data")?;
/// let avatar = generator.generate_for_identity(Gender::Female, "username@site.com")?;
/// assert_eq!(avatar.dimensions(), (400, 400));
/// # Ok::<(), avatar_layers::AvatarError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AvatarGenerator {
    catalog: AssetCatalog,
}

impl AvatarGenerator {
    pub fn new(catalog: AssetCatalog) -> Self {
        Self { catalog }
    }

    /// Loads the catalog from an asset directory.
    pub fn from_dir(root: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(AssetCatalog::from_dir(root.as_ref())?))
    }

    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    // ---- Selection ----

    /// Selects layers for `seed` without compositing them.
    pub fn select(&self, gender: Gender, seed: Seed) -> LayerSelection {
        LayerSelection::random(&self.catalog, gender, seed)
    }

    /// The deterministic selection for a username.
    pub fn select_for_identity(&self, gender: Gender, name: &str) -> LayerSelection {
        self.select(gender, seed_from_username(name))
    }

    /// Composites an existing selection.
    pub fn render(&self, selection: &LayerSelection) -> Result<RgbaImage> {
        compose(&self.catalog, selection)
    }

    // ---- Generation ----

    /// Generates a random, non-reproducible avatar.
    pub fn generate(&self, gender: Gender) -> Result<RgbaImage> {
        self.generate_with_seed(gender, seed_from_entropy())
    }

    /// Generates the avatar for an explicit seed.
    pub fn generate_with_seed(&self, gender: Gender, seed: Seed) -> Result<RgbaImage> {
        self.render(&self.select(gender, seed))
    }

    /// Generates the avatar for a username.
    ///
    /// The same name always yields a bit-identical image, across restarts
    /// and across instances sharing the same assets.
    pub fn generate_for_identity(&self, gender: Gender, name: &str) -> Result<RgbaImage> {
        self.render(&self.select_for_identity(gender, name))
    }

    /// Generates an avatar from one explicit index per category, in painter's
    /// order (background, face, clothes, mouth, hair, eye).
    pub fn generate_from_indices(&self, gender: Gender, indices: &[i64]) -> Result<RgbaImage> {
        let selection = LayerSelection::from_indices(&self.catalog, gender, indices)?;
        self.render(&selection)
    }

    /// Rebuilds the avatar described by a profile.
    pub fn generate_from_profile(&self, profile: &AvatarProfile) -> Result<RgbaImage> {
        self.generate_from_indices(profile.gender, &profile.indices())
    }

    // ---- Files ----

    /// Generates a random avatar and saves it; the format follows the
    /// file extension (`jpeg`, `jpg`, `gif`, otherwise `png`).
    pub fn generate_file(&self, gender: Gender, path: impl AsRef<Path>) -> Result<()> {
        let avatar = self.generate(gender)?;
        save_to_file(&avatar, path)
    }

    /// Generates the avatar for a username and saves it; the format follows
    /// the file extension.
    pub fn generate_file_for_identity(
        &self,
        gender: Gender,
        name: &str,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let avatar = self.generate_for_identity(gender, name)?;
        save_to_file(&avatar, path)
    }

    /// Saves an already generated avatar in an explicit format.
    pub fn save_as(
        &self,
        avatar: &RgbaImage,
        path: impl AsRef<Path>,
        format: OutputFormat,
    ) -> Result<()> {
        save_to_file_as(avatar, path, format)
    }
}

// ============================================================================
// Tests
// ============================================================================
