//! Icon asset stores.
//!
//! Nodes reference their icon by a logical path of the form
//! `<provider>/<category>/<name>.png`. At render time the icon bytes are read
//! from an [`AssetStore`] and staged next to the graph description.
//!
//! # Overview
//!
//! - [`BundledAssets`] - icons compiled into the library, covering [`crate::catalog`].
//! - [`DirAssets`] - icons read from a directory at runtime.
//! - [`MemoryAssets`] - an in-memory map, handy for tests and embedding.
//! - [`Layered`] - tries one store, then falls back to another.

use std::{
    borrow::Cow,
    collections::HashMap,
    fmt, fs, io,
    path::{Path, PathBuf},
};

/// A read-only key/value store of icon bytes.
///
/// Implementations return an error of kind [`io::ErrorKind::NotFound`] for
/// unknown paths.
pub trait AssetStore {
    fn read(&self, path: &str) -> io::Result<Cow<'static, [u8]>>;
}

fn not_found(path: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("asset `{path}` not found"))
}

macro_rules! bundle {
    ($($path:literal),* $(,)?) => {
        &[$(($path, include_bytes!(concat!("../assets/", $path)) as &[u8])),*]
    };
}

static BUNDLED: &[(&str, &[u8])] = bundle![
    "generic/compute/rack.png",
    "generic/database/sql.png",
    "generic/device/mobile.png",
    "generic/device/tablet.png",
    "generic/network/firewall.png",
    "generic/network/router.png",
    "generic/network/subnet.png",
    "generic/network/switch.png",
    "generic/network/vpn.png",
    "generic/storage/storage.png",
];

impl<S: AssetStore + ?Sized> AssetStore for Box<S> {
    fn read(&self, path: &str) -> io::Result<Cow<'static, [u8]>> {
        (**self).read(path)
    }
}

/// Icons shipped inside the library.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledAssets;

impl BundledAssets {
    /// Logical paths of every bundled icon.
    pub fn paths() -> impl Iterator<Item = &'static str> {
        BUNDLED.iter().map(|(path, _)| *path)
    }
}

impl AssetStore for BundledAssets {
    fn read(&self, path: &str) -> io::Result<Cow<'static, [u8]>> {
        BUNDLED
            .iter()
            .find(|(bundled, _)| *bundled == path)
            .map(|(_, bytes)| Cow::Borrowed(*bytes))
            .ok_or_else(|| not_found(path))
    }
}

/// Icons read from `<root>/<path>`.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetStore for DirAssets {
    fn read(&self, path: &str) -> io::Result<Cow<'static, [u8]>> {
        fs::read(self.root.join(path)).map(Cow::Owned)
    }
}

/// Icons held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the asset at `path`.
    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> &mut Self {
        self.files.insert(path.into(), bytes.into());
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl AssetStore for MemoryAssets {
    fn read(&self, path: &str) -> io::Result<Cow<'static, [u8]>> {
        self.files
            .get(path)
            .map(|bytes| Cow::Owned(bytes.clone()))
            .ok_or_else(|| not_found(path))
    }
}

/// Reads from `primary`, falling back to `fallback` when the asset is missing.
///
/// Other errors from `primary` are returned as-is.
pub struct Layered<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> Layered<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: AssetStore, F: AssetStore> AssetStore for Layered<P, F> {
    fn read(&self, path: &str) -> io::Result<Cow<'static, [u8]>> {
        match self.primary.read(path) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => self.fallback.read(path),
            result => result,
        }
    }
}

impl<P, F> fmt::Debug for Layered<P, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layered").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    #[test]
    fn test_bundled_icons_are_png() {
        for path in BundledAssets::paths() {
            let bytes = BundledAssets.read(path).unwrap();
            assert!(bytes.starts_with(PNG_MAGIC), "{path} is not a PNG");
        }
    }

    #[test]
    fn test_bundled_missing() {
        let err = BundledAssets.read("aws/compute/ec2.png").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_memory_assets() {
        let mut store = MemoryAssets::new();
        store.insert("a/b/c.png", b"icon".to_vec());

        assert_eq!(store.len(), 1);
        assert_eq!(store.read("a/b/c.png").unwrap().as_ref(), b"icon");
        assert_eq!(
            store.read("a/b/d.png").unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }

    #[test]
    fn test_dir_assets() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("custom/net")).unwrap();
        fs::write(dir.path().join("custom/net/box.png"), b"box").unwrap();

        let store = DirAssets::new(dir.path());
        assert_eq!(store.read("custom/net/box.png").unwrap().as_ref(), b"box");
        assert_eq!(
            store.read("custom/net/nope.png").unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }

    #[test]
    fn test_layered_falls_back_on_not_found() {
        let mut overrides = MemoryAssets::new();
        overrides.insert("generic/network/router.png", b"mine".to_vec());
        let store = Layered::new(overrides, BundledAssets);

        assert_eq!(
            store.read("generic/network/router.png").unwrap().as_ref(),
            b"mine"
        );
        assert!(
            store
                .read("generic/network/switch.png")
                .unwrap()
                .starts_with(PNG_MAGIC)
        );
        assert!(store.read("nowhere.png").is_err());
    }
}
