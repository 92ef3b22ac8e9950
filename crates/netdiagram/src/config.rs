//! Configuration types for netdiagram rendering.
//!
//! These structures hold defaults that sit below the options given in code
//! or in a diagram manifest. All types implement [`serde::Deserialize`] so
//! they can be loaded from a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and asset settings.
//! - [`RenderConfig`] - Renderer program, default output format and directory.
//! - [`AssetsConfig`] - Optional directory of icons layered over the bundled set.
//!
//! # Example
//!
//! ```
//! # use netdiagram::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.diagram_overrides().is_empty());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{
    assets::{AssetStore, BundledAssets, DirAssets, Layered},
    options::{DiagramOption, diagram},
};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Asset configuration section.
    #[serde(default)]
    assets: AssetsConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(render: RenderConfig, assets: AssetsConfig) -> Self {
        Self { render, assets }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the asset configuration.
    pub fn assets(&self) -> &AssetsConfig {
        &self.assets
    }

    /// Diagram overrides for every configured value, to be applied before
    /// any caller overrides.
    pub fn diagram_overrides(&self) -> Vec<DiagramOption> {
        let mut overrides = Vec::new();
        if let Some(renderer) = &self.render.renderer {
            overrides.push(diagram::renderer(renderer.as_str()));
        }
        if let Some(format) = &self.render.format {
            overrides.push(diagram::format(format.as_str()));
        }
        if let Some(dir) = &self.render.output_dir {
            overrides.push(diagram::out_dir(dir));
        }
        overrides
    }
}

/// Renderer settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    /// Program used for image formats, e.g. `dot` or `neato`.
    #[serde(default)]
    renderer: Option<String>,

    /// Output format used when none is requested.
    #[serde(default)]
    format: Option<String>,

    /// Output directory used when none is requested.
    #[serde(default)]
    output_dir: Option<PathBuf>,
}

impl RenderConfig {
    pub fn new(
        renderer: Option<String>,
        format: Option<String>,
        output_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            renderer,
            format,
            output_dir,
        }
    }

    pub fn renderer(&self) -> Option<&str> {
        self.renderer.as_deref()
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }
}

/// Icon lookup settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetsConfig {
    /// Directory searched before the bundled icons.
    #[serde(default)]
    dir: Option<PathBuf>,
}

impl AssetsConfig {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// The configured icon directory layered over [`BundledAssets`], or the
    /// bundled icons alone.
    pub fn store(&self) -> Box<dyn AssetStore> {
        match &self.dir {
            Some(dir) => Box::new(Layered::new(DirAssets::new(dir), BundledAssets)),
            None => Box::new(BundledAssets),
        }
    }
}
