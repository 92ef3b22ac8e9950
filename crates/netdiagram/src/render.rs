//! Shared state for a single render pass.

use std::{collections::HashSet, fs, path::Path};

use log::debug;

use crate::{assets::AssetStore, error::DiagramError};

/// Directory, relative to the output directory, that receives staged icons.
pub const ICON_DIR: &str = "assets";

/// Returns the `image` attribute value for a logical icon path.
pub fn icon_reference(icon: &str) -> String {
    format!("{ICON_DIR}/{icon}")
}

/// State threaded through the tree walk of one render.
pub(crate) struct RenderContext<'a> {
    out_dir: Option<&'a Path>,
    assets: &'a dyn AssetStore,
    staged: HashSet<String>,
}

impl<'a> RenderContext<'a> {
    /// A pass that copies icons into `out_dir`.
    pub(crate) fn staging(out_dir: &'a Path, assets: &'a dyn AssetStore) -> Self {
        Self {
            out_dir: Some(out_dir),
            assets,
            staged: HashSet::new(),
        }
    }

    /// A pass that only builds the description.
    pub(crate) fn in_memory(assets: &'a dyn AssetStore) -> Self {
        Self {
            out_dir: None,
            assets,
            staged: HashSet::new(),
        }
    }

    /// Copies `icon` from the asset store into the output directory.
    ///
    /// Each icon is written at most once; files already present on disk are
    /// left untouched.
    pub(crate) fn stage_icon(&mut self, icon: &str) -> Result<(), DiagramError> {
        let Some(out_dir) = self.out_dir else {
            return Ok(());
        };
        if self.staged.contains(icon) {
            return Ok(());
        }

        let target = out_dir.join(ICON_DIR).join(icon);
        if !target.exists() {
            let bytes = self
                .assets
                .read(icon)
                .map_err(|source| DiagramError::Asset {
                    path: icon.to_string(),
                    source,
                })?;
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|err| DiagramError::io(parent, err))?;
            }
            fs::write(&target, &bytes).map_err(|err| DiagramError::io(&target, err))?;
            debug!(icon, path:? = target; "Icon staged");
        }

        self.staged.insert(icon.to_string());
        Ok(())
    }

    /// Number of distinct icons handled so far.
    pub(crate) fn staged_count(&self) -> usize {
        self.staged.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::assets::MemoryAssets;

    #[test]
    fn test_icon_reference() {
        assert_eq!(
            icon_reference("generic/network/router.png"),
            "assets/generic/network/router.png"
        );
    }

    #[test]
    fn test_stage_icon_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = MemoryAssets::new();
        store.insert("p/c/n.png", b"v1".to_vec());

        let mut ctx = RenderContext::staging(dir.path(), &store);
        ctx.stage_icon("p/c/n.png").unwrap();
        ctx.stage_icon("p/c/n.png").unwrap();

        let staged = dir.path().join("assets/p/c/n.png");
        assert_eq!(fs::read(&staged).unwrap(), b"v1");
        assert_eq!(ctx.staged_count(), 1);
    }

    #[test]
    fn test_existing_icon_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let staged = dir.path().join("assets/p/c/n.png");
        fs::create_dir_all(staged.parent().unwrap()).unwrap();
        fs::write(&staged, b"kept").unwrap();

        let store = MemoryAssets::new();
        let mut ctx = RenderContext::staging(dir.path(), &store);
        ctx.stage_icon("p/c/n.png").unwrap();

        assert_eq!(fs::read(&staged).unwrap(), b"kept");
    }

    #[test]
    fn test_missing_asset() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryAssets::new();
        let mut ctx = RenderContext::staging(dir.path(), &store);

        let err = ctx.stage_icon("p/c/missing.png").unwrap_err();
        assert!(matches!(err, DiagramError::Asset { ref path, .. } if path == "p/c/missing.png"));
        assert!(!dir.path().join("assets/p/c/missing.png").exists());
    }

    #[test]
    fn test_in_memory_skips_disk() {
        let store = MemoryAssets::new();
        let mut ctx = RenderContext::in_memory(&store);
        assert!(ctx.stage_icon("p/c/missing.png").is_ok());
    }
}
