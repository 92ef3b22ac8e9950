//! Output files and image rendering.
//!
//! The graph description is always written to `<out_dir>/<file_name>.dot`.
//! Image formats are then produced by an [`ImageRenderer`], by default the
//! Graphviz program named in the diagram options.

pub mod graphviz;

pub use graphviz::Graphviz;

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use log::info;

use crate::error::DiagramError;

/// Extension of the graph description file.
pub const DOT_EXTENSION: &str = "dot";

/// Output formats accepted by [`Diagram::render`](crate::Diagram::render).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Dot,
    Png,
    Jpg,
    Svg,
    Pdf,
}

impl OutputFormat {
    /// File extension, also the value passed to `-T`.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Dot => DOT_EXTENSION,
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }

    /// Returns `true` for formats produced by the external renderer.
    pub fn is_image(self) -> bool {
        self != Self::Dot
    }
}

impl FromStr for OutputFormat {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dot" | "gv" => Ok(Self::Dot),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(DiagramError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A single image conversion.
///
/// `input` and `output` are file names relative to `working_dir`, so paths
/// inside the description (staged icons) resolve the same way for every
/// renderer.
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    pub format: OutputFormat,
    pub working_dir: &'a Path,
    pub input: &'a str,
    pub output: &'a str,
}

impl RenderRequest<'_> {
    /// Absolute location of the expected output file.
    pub fn output_path(&self) -> PathBuf {
        self.working_dir.join(self.output)
    }
}

/// Converts a written graph description into an image.
pub trait ImageRenderer {
    /// Produces `request.output`, or fails with [`DiagramError::Renderer`].
    fn render(&self, request: &RenderRequest<'_>) -> Result<(), DiagramError>;
}

/// Writes `description` to `<out_dir>/<file_name>.dot` and returns its path.
pub fn write_description(
    out_dir: &Path,
    file_name: &str,
    description: &str,
) -> Result<PathBuf, DiagramError> {
    let path = out_dir.join(format!("{file_name}.{DOT_EXTENSION}"));
    info!(path:? = path, bytes = description.len(); "Writing graph description");

    fs::write(&path, description).map_err(|err| DiagramError::io(&path, err))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        let cases = [
            ("dot", OutputFormat::Dot),
            ("png", OutputFormat::Png),
            ("PNG", OutputFormat::Png),
            ("jpeg", OutputFormat::Jpg),
            ("svg", OutputFormat::Svg),
            ("pdf", OutputFormat::Pdf),
        ];
        for (input, expected) in cases {
            assert_eq!(input.parse::<OutputFormat>().unwrap(), expected);
        }
    }

    #[test]
    fn test_unsupported_format() {
        let err = "bmp".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, DiagramError::UnsupportedFormat(ref f) if f == "bmp"));
    }

    #[test]
    fn test_is_image() {
        assert!(!OutputFormat::Dot.is_image());
        assert!(OutputFormat::Svg.is_image());
        assert_eq!(OutputFormat::Jpg.to_string(), "jpg");
    }

    #[test]
    fn test_write_description() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_description(dir.path(), "net", "digraph root {\n}\n").unwrap();

        assert_eq!(path, dir.path().join("net.dot"));
        assert_eq!(fs::read_to_string(path).unwrap(), "digraph root {\n}\n");
    }

    #[test]
    fn test_write_description_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_description(&dir.path().join("absent"), "net", "").unwrap_err();
        assert!(matches!(err, DiagramError::Io { .. }));
    }
}
