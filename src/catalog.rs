//! Asset catalog: naturally sorted asset identifiers per category and gender.
//!
//! The catalog is built once from an [`AssetSource`] and is immutable
//! afterwards. It can be shared across threads and read by any number of
//! concurrent generation calls.
//!
//! # Layout
//!
//! ```text
//! <root>/
//!   background/
//!   male/{clothes,eye,face,hair,mouth}/
//!   female/{clothes,eye,face,hair,mouth}/
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{AvatarError, Result};
use crate::gender::Gender;
use crate::layer::Category;
use crate::natural::natural_sort;

// ============================================================================
// AssetSource
// ============================================================================

/// Read-only backing store that resolves asset identifiers to encoded bytes.
///
/// Identifiers are `/`-separated paths relative to the source root, e.g.
/// `male/hair/hair3.png`.
pub trait AssetSource: Send + Sync {
    /// Lists identifiers of the assets directly inside `dir`, in any order.
    ///
    /// A missing directory is an error; an empty one is not.
    fn list(&self, dir: &str) -> Result<Vec<String>>;

    /// Returns the raw encoded bytes of one asset.
    fn read(&self, asset: &str) -> Result<Vec<u8>>;
}

/// Names skipped when listing: empty, dotfiles (`.gitkeep`, `.DS_Store`) and
/// `_`-prefixed files.
fn is_ignored(name: &str) -> bool {
    name.is_empty() || name.starts_with('.') || name.starts_with('_')
}

/// An [`AssetSource`] backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirSource {
    fn list(&self, dir: &str) -> Result<Vec<String>> {
        let path = self.root.join(dir);
        let entries =
            fs::read_dir(&path).map_err(|e| AvatarError::catalog_load(&path, e.to_string()))?;

        let mut assets = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AvatarError::catalog_load(&path, e.to_string()))?;
            let file_type = entry
                .file_type()
                .map_err(|e| AvatarError::catalog_load(entry.path(), e.to_string()))?;
            if !file_type.is_file() {
                continue;
            }
            let name = entry.file_name().into_string().map_err(|name| {
                AvatarError::catalog_load(
                    entry.path(),
                    format!("asset name {name:?} is not valid UTF-8"),
                )
            })?;
            if is_ignored(&name) {
                continue;
            }
            assets.push(format!("{dir}/{name}"));
        }
        Ok(assets)
    }

    fn read(&self, asset: &str) -> Result<Vec<u8>> {
        fs::read(self.root.join(asset)).map_err(|source| AvatarError::AssetRead {
            asset: asset.to_string(),
            source,
        })
    }
}

/// An in-memory [`AssetSource`], for assets embedded with `include_bytes!`.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) an asset under the given identifier.
    pub fn insert(&mut self, asset: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(asset.into(), bytes.into());
    }

    pub fn with(mut self, asset: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(asset, bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl AssetSource for MemorySource {
    fn list(&self, dir: &str) -> Result<Vec<String>> {
        let prefix = format!("{}/", dir.trim_end_matches('/'));
        let assets: Vec<String> = self
            .files
            .keys()
            .filter(|key| {
                key.strip_prefix(&prefix)
                    .is_some_and(|name| !name.contains('/') && !is_ignored(name))
            })
            .cloned()
            .collect();
        Ok(assets)
    }

    fn read(&self, asset: &str) -> Result<Vec<u8>> {
        self.files
            .get(asset)
            .cloned()
            .ok_or_else(|| AvatarError::AssetRead {
                asset: asset.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "asset not found"),
            })
    }
}

// ============================================================================
// PersonAssets
// ============================================================================

/// Per-gender asset lists, each naturally sorted and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonAssets {
    pub clothes: Vec<String>,
    pub eye: Vec<String>,
    pub face: Vec<String>,
    pub hair: Vec<String>,
    pub mouth: Vec<String>,
}

impl PersonAssets {
    fn load(source: &dyn AssetSource, gender: Gender) -> Result<Self> {
        let dir = |category: Category| format!("{}/{}", gender.dir_name(), category.dir_name());
        Ok(Self {
            clothes: load_list(source, &dir(Category::Clothes))?,
            eye: load_list(source, &dir(Category::Eye))?,
            face: load_list(source, &dir(Category::Face))?,
            hair: load_list(source, &dir(Category::Hair))?,
            mouth: load_list(source, &dir(Category::Mouth))?,
        })
    }

    /// Returns the list for a person category, or `None` for [`Category::Background`].
    pub fn get(&self, category: Category) -> Option<&[String]> {
        match category {
            Category::Background => None,
            Category::Face => Some(self.face.as_slice()),
            Category::Clothes => Some(self.clothes.as_slice()),
            Category::Mouth => Some(self.mouth.as_slice()),
            Category::Hair => Some(self.hair.as_slice()),
            Category::Eye => Some(self.eye.as_slice()),
        }
    }
}

fn load_list(source: &dyn AssetSource, dir: &str) -> Result<Vec<String>> {
    let mut assets = source.list(dir)?;
    if assets.is_empty() {
        return Err(AvatarError::catalog_load(dir, "directory is empty"));
    }
    natural_sort(&mut assets);
    Ok(assets)
}

// ============================================================================
// AssetCatalog
// ============================================================================

/// The immutable, naturally sorted collection of assets.
///
/// Cloning is cheap: the backing source is shared.
#[derive(Clone)]
pub struct AssetCatalog {
    source: Arc<dyn AssetSource>,
    background: Vec<String>,
    male: PersonAssets,
    female: PersonAssets,
}

impl AssetCatalog {
    /// Enumerates every category of `source`.
    ///
    /// Fails with [`AvatarError::CatalogLoad`] if any required directory is
    /// missing or empty. An incomplete catalog cannot produce an avatar, so
    /// callers should treat this as fatal at startup.
    pub fn load(source: impl AssetSource + 'static) -> Result<Self> {
        Self::from_shared(Arc::new(source))
    }

    /// Loads a catalog from an asset directory on disk.
    pub fn from_dir(root: impl Into<PathBuf>) -> Result<Self> {
        Self::load(DirSource::new(root))
    }

    pub fn from_shared(source: Arc<dyn AssetSource>) -> Result<Self> {
        let background = load_list(source.as_ref(), Category::Background.dir_name())?;
        let male = PersonAssets::load(source.as_ref(), Gender::Male)?;
        let female = PersonAssets::load(source.as_ref(), Gender::Female)?;

        let catalog = Self {
            source,
            background,
            male,
            female,
        };
        for gender in Gender::ALL {
            tracing::info!(
                %gender,
                background = catalog.background.len(),
                face = catalog.person(gender).face.len(),
                clothes = catalog.person(gender).clothes.len(),
                mouth = catalog.person(gender).mouth.len(),
                hair = catalog.person(gender).hair.len(),
                eye = catalog.person(gender).eye.len(),
                "asset catalog loaded"
            );
        }
        Ok(catalog)
    }

    /// Background assets, shared by both genders.
    pub fn backgrounds(&self) -> &[String] {
        &self.background
    }

    pub fn person(&self, gender: Gender) -> &PersonAssets {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        }
    }

    /// The ordered asset list for one layer category.
    pub fn assets(&self, gender: Gender, category: Category) -> &[String] {
        self.person(gender)
            .get(category)
            .unwrap_or(self.background.as_slice())
    }

    /// Resolves an identifier to its encoded bytes.
    pub fn read(&self, asset: &str) -> Result<Vec<u8>> {
        self.source.read(asset)
    }
}

impl fmt::Debug for AssetCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetCatalog")
            .field("background", &self.background)
            .field("male", &self.male)
            .field("female", &self.female)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixture_source, write_fixture_dir};

    #[test]
    fn load_sorts_naturally() {
        let source = MemorySource::new()
            .with("background/bg10.png", vec![0])
            .with("background/bg2.png", vec![0])
            .with("background/bg1.png", vec![0]);
        let source = Gender::ALL.iter().fold(source, |source, gender| {
            Category::PERSON.iter().fold(source, |source, category| {
                source.with(
                    format!("{}/{}/a1.png", gender.dir_name(), category.dir_name()),
                    vec![0],
                )
            })
        });

        let catalog = AssetCatalog::load(source).unwrap();
        assert_eq!(
            catalog.backgrounds(),
            ["background/bg1.png", "background/bg2.png", "background/bg10.png"]
        );
        assert_eq!(catalog.person(Gender::Female).hair, ["female/hair/a1.png"]);
    }

    #[test]
    fn assets_by_category() {
        let catalog = AssetCatalog::load(fixture_source()).unwrap();
        assert_eq!(
            catalog.assets(Gender::Male, Category::Background),
            catalog.backgrounds()
        );
        assert_eq!(
            catalog.assets(Gender::Female, Category::Eye),
            catalog.person(Gender::Female).eye.as_slice()
        );
        for gender in Gender::ALL {
            for category in Category::ORDER {
                assert!(!catalog.assets(gender, category).is_empty());
            }
        }
    }

    #[test]
    fn empty_category_fails_to_load() {
        let mut source = fixture_source();
        source.files.retain(|key, _| !key.starts_with("female/mouth/"));

        let err = AssetCatalog::load(source).unwrap_err();
        assert!(matches!(err, AvatarError::CatalogLoad { .. }));
        assert!(err.to_string().contains("female/mouth"));
    }

    #[test]
    fn memory_source_lists_direct_children_only() {
        let source = MemorySource::new()
            .with("male/eye/e1.png", vec![1])
            .with("male/eye/nested/e2.png", vec![2])
            .with("male/eye/.gitkeep", vec![])
            .with("male/eye/_unused.png", vec![4])
            .with("male/eyebrow/b1.png", vec![3]);
        assert_eq!(source.list("male/eye").unwrap(), ["male/eye/e1.png"]);

        let source = MemorySource::new().with("female/eye/.gitkeep", vec![]);
        assert!(source.list("female/eye").unwrap().is_empty());
        assert!(source.list("female/eye").unwrap().is_empty());
        assert!(source.read("male/eye/missing.png").is_err());
    }

    #[test]
    fn dir_source_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_dir(dir.path());

        let catalog = AssetCatalog::from_dir(dir.path()).unwrap();
        let first = &catalog.backgrounds()[0];
        assert!(first.starts_with("background/"));
        assert!(!catalog.read(first).unwrap().is_empty());
    }

    #[test]
    fn dir_source_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = AssetCatalog::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, AvatarError::CatalogLoad { .. }));
    }

    #[test]
    fn dir_source_skips_hidden_files() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_dir(dir.path());
        let hair = dir.path().join("male/hair");
        std::fs::write(hair.join(".DS_Store"), b"junk").unwrap();
        std::fs::write(hair.join("_draft.png"), b"junk").unwrap();

        let catalog = AssetCatalog::from_dir(dir.path()).unwrap();
        let expected = AssetCatalog::load(fixture_source()).unwrap();
        assert_eq!(
            catalog.person(Gender::Male).hair,
            expected.person(Gender::Male).hair
        );
    }

    #[test]
    fn directory_with_only_gitkeep_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_dir(dir.path());
        let eye = dir.path().join("female/eye");
        std::fs::remove_dir_all(&eye).unwrap();
        std::fs::create_dir(&eye).unwrap();
        std::fs::write(eye.join(".gitkeep"), b"").unwrap();

        let err = AssetCatalog::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, AvatarError::CatalogLoad { .. }));
        assert!(err.to_string().contains("female/eye"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_asset_name_fails_to_load() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        write_fixture_dir(dir.path());
        let name = OsStr::from_bytes(b"bad\xffname.png");
        std::fs::write(dir.path().join("male/mouth").join(name), b"junk").unwrap();

        let err = AssetCatalog::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, AvatarError::CatalogLoad { .. }));
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn catalog_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AssetCatalog>();
    }
}
