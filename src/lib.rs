//! avatar-layers: deterministic layered avatar generation
//!
//! This crate composes a square 400×400 portrait by stacking pre-authored
//! raster layers (background, face, clothes, mouth, hair, eye), one picked
//! per category by a seeded pseudo-random draw. The same username always
//! produces a bit-identical image.
//!
//! # Example
//!
//! ```no_run
//! use avatar_layers::{AssetCatalog, AvatarGenerator, Gender, OutputFormat};
//!
//! // Load once at startup; share the generator across threads.
//! let catalog = AssetCatalog::from_dir("data")?;
//! let generator = AvatarGenerator::new(catalog);
//!
//! // Deterministic avatar for a username
//! let avatar = generator.generate_for_identity(Gender::Male, "username@site.com")?;
//! avatar_layers::save_to_file(&avatar, "avatar.png")?;
//!
//! // Random avatar, encoded in memory
//! let avatar = generator.generate(Gender::Female)?;
//! let jpeg = avatar_layers::encode_to_vec(&avatar, OutputFormat::jpeg())?;
//! # Ok::<(), avatar_layers::AvatarError>(())
//! ```
//!
//! # Profiles
//!
//! A selection can be captured as an [`AvatarProfile`] and replayed later:
//!
//! ```no_run
//! use avatar_layers::{AvatarGenerator, AvatarProfile, Gender};
//!
//! let generator = AvatarGenerator::from_dir("data")?;
//! let selection = generator.select_for_identity(Gender::Female, "someone");
//! let json = AvatarProfile::from(&selection).to_json()?;
//!
//! let profile = AvatarProfile::from_json(&json)?;
//! let avatar = generator.generate_from_profile(&profile)?;
//! # Ok::<(), avatar_layers::AvatarError>(())
//! ```

mod catalog;
mod encode;
mod error;
mod gender;
mod generator;
pub mod http;
mod layer;
mod natural;
mod profile;
mod seed;

#[cfg(test)]
mod testing;

pub use catalog::{AssetCatalog, AssetSource, DirSource, MemorySource, PersonAssets};
pub use encode::{
    DEFAULT_JPEG_QUALITY, OutputFormat, encode, encode_to_vec, save_to_file, save_to_file_as,
    sniff_content_type,
};
pub use error::{AvatarError, Result};
pub use gender::Gender;
pub use generator::AvatarGenerator;
pub use layer::{
    CANVAS_SIZE, Category, LayerSelection, SelectedLayer, compose, composite_over, new_canvas,
};
pub use natural::{natural_cmp, natural_sort};
pub use profile::AvatarProfile;
pub use seed::{Seed, fnv1a32, seed_from_entropy, seed_from_username};
