//! Error types for avatar generation.

use std::io;
use std::path::PathBuf;

use crate::layer::Category;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AvatarError>;

/// Everything that can go wrong while loading assets or building an avatar.
///
/// No variant is ever recovered from internally: a failed generation never
/// yields a partially composited image.
#[derive(thiserror::Error, Debug)]
pub enum AvatarError {
    /// A gender value outside `{male, female}`.
    #[error("unsupported gender: {0}")]
    UnsupportedGender(String),

    /// An explicit layer index outside its category's range.
    #[error("invalid asset index {index} for {category} (have {len} assets)")]
    InvalidAssetIndex {
        category: Category,
        index: i64,
        len: usize,
    },

    /// An explicit index tuple with the wrong number of entries.
    #[error("invalid asset index tuple: expected {expected} indices, got {got}")]
    IncompleteIndices { expected: usize, got: usize },

    /// An asset's bytes could not be decoded.
    #[error("failed to decode asset {asset}")]
    Decode {
        asset: String,
        #[source]
        source: image::ImageError,
    },

    /// A required asset directory is missing or empty.
    #[error("failed to load asset catalog at {}: {reason}", path.display())]
    CatalogLoad { path: PathBuf, reason: String },

    /// An asset listed in the catalog could not be read from its source.
    #[error("failed to read asset {asset}")]
    AssetRead {
        asset: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode image")]
    Encode(#[source] image::ImageError),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid avatar profile")]
    Profile(#[from] serde_json::Error),
}

impl AvatarError {
    pub(crate) fn catalog_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::CatalogLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for both out-of-range indices and incomplete index tuples.
    pub fn is_invalid_index(&self) -> bool {
        matches!(
            self,
            Self::InvalidAssetIndex { .. } | Self::IncompleteIndices { .. }
        )
    }

    pub fn is_unsupported_gender(&self) -> bool {
        matches!(self, Self::UnsupportedGender(_))
    }
}
