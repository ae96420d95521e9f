//! Layer categories and per-avatar layer selection.
//!
//! An avatar is six layers stacked back to front. The same fixed category
//! order is used for the random draws and for compositing:
//!
//! ```text
//! background → face → clothes → mouth → hair → eye
//! ```
//!
//! Selection comes in two modes:
//! - [`LayerSelection::random`] draws one index per category from a generator
//!   seeded for this call only.
//! - [`LayerSelection::from_indices`] looks up caller-supplied indices.

pub mod composite;

pub use composite::{CANVAS_SIZE, compose, composite_over, new_canvas};

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::AssetCatalog;
use crate::error::{AvatarError, Result};
use crate::gender::Gender;
use crate::seed::Seed;

// ============================================================================
// Category
// ============================================================================

/// One of the six fixed layer roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Background,
    Face,
    Clothes,
    Mouth,
    Hair,
    Eye,
}

impl Category {
    /// Draw order and painter's order.
    pub const ORDER: [Category; 6] = [
        Category::Background,
        Category::Face,
        Category::Clothes,
        Category::Mouth,
        Category::Hair,
        Category::Eye,
    ];

    /// Categories stored per gender.
    pub const PERSON: [Category; 5] = [
        Category::Face,
        Category::Clothes,
        Category::Mouth,
        Category::Hair,
        Category::Eye,
    ];

    pub const COUNT: usize = Self::ORDER.len();

    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Background => "background",
            Category::Face => "face",
            Category::Clothes => "clothes",
            Category::Mouth => "mouth",
            Category::Hair => "hair",
            Category::Eye => "eye",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

// ============================================================================
// LayerSelection
// ============================================================================

/// A single chosen asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedLayer {
    pub category: Category,
    /// Position of the asset within its naturally sorted category list.
    pub index: usize,
    pub asset: String,
}

/// The six chosen assets, in [`Category::ORDER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSelection {
    gender: Gender,
    layers: [SelectedLayer; Category::COUNT],
}

impl LayerSelection {
    /// Draws one asset per category from a generator seeded with `seed`.
    ///
    /// The generator is local to this call. Exactly one uniform draw over
    /// `[0, len)` is consumed per category, in [`Category::ORDER`]; reordering
    /// or skipping a draw would change every later pick for the same seed.
    pub fn random(catalog: &AssetCatalog, gender: Gender, seed: Seed) -> Self {
        let mut rng = StdRng::seed_from_u64(seed as u64);
        let layers = Category::ORDER.map(|category| {
            let assets = catalog.assets(gender, category);
            let index = rng.gen_range(0..assets.len());
            SelectedLayer {
                category,
                index,
                asset: assets[index].clone(),
            }
        });

        let selection = Self { gender, layers };
        selection.trace(seed);
        selection
    }

    /// Looks up one explicit index per category, in [`Category::ORDER`].
    ///
    /// Fails with [`AvatarError::IncompleteIndices`] unless exactly six indices
    /// are given, and with [`AvatarError::InvalidAssetIndex`] for the first
    /// index outside `[0, len)`.
    pub fn from_indices(catalog: &AssetCatalog, gender: Gender, indices: &[i64]) -> Result<Self> {
        let indices: &[i64; Category::COUNT] =
            indices.try_into().map_err(|_| AvatarError::IncompleteIndices {
                expected: Category::COUNT,
                got: indices.len(),
            })?;

        let mut resolved = [0usize; Category::COUNT];
        for (slot, (category, &raw)) in resolved
            .iter_mut()
            .zip(Category::ORDER.into_iter().zip(indices))
        {
            let len = catalog.assets(gender, category).len();
            *slot = usize::try_from(raw)
                .ok()
                .filter(|&i| i < len)
                .ok_or(AvatarError::InvalidAssetIndex {
                    category,
                    index: raw,
                    len,
                })?;
        }

        let layers = std::array::from_fn(|i| {
            let category = Category::ORDER[i];
            let index = resolved[i];
            SelectedLayer {
                category,
                index,
                asset: catalog.assets(gender, category)[index].clone(),
            }
        });
        Ok(Self { gender, layers })
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Layers in painter's order, background first.
    pub fn layers(&self) -> &[SelectedLayer] {
        &self.layers
    }

    pub fn get(&self, category: Category) -> &SelectedLayer {
        // Declaration order matches ORDER.
        &self.layers[category as usize]
    }

    /// Asset identifiers in painter's order.
    pub fn assets(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|layer| layer.asset.as_str())
    }

    /// Catalog indices in painter's order.
    pub fn indices(&self) -> [usize; Category::COUNT] {
        std::array::from_fn(|i| self.layers[i].index)
    }

    fn trace(&self, seed: Seed) {
        for layer in &self.layers {
            tracing::debug!(
                seed,
                gender = %self.gender,
                category = %layer.category,
                index = layer.index,
                asset = %layer.asset,
                "layer selected"
            );
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
