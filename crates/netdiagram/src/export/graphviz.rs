//! Graphviz command-line renderer.

use std::process::Command;

use log::{debug, info, warn};

use super::{ImageRenderer, RenderRequest};
use crate::error::{DiagramError, RendererFailure};

/// Runs `<program> -T<format> -o <output> <input>` inside the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graphviz {
    program: String,
}

impl Graphviz {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn failure(failure: RendererFailure, output: String) -> DiagramError {
        DiagramError::Renderer { failure, output }
    }
}

impl Default for Graphviz {
    fn default() -> Self {
        Self::new("dot")
    }
}

impl ImageRenderer for Graphviz {
    fn render(&self, request: &RenderRequest<'_>) -> Result<(), DiagramError> {
        info!(
            program = self.program.as_str(),
            format = request.format.extension(),
            output = request.output;
            "Running renderer"
        );

        let result = Command::new(&self.program)
            .arg(format!("-T{}", request.format.extension()))
            .arg("-o")
            .arg(request.output)
            .arg(request.input)
            .current_dir(request.working_dir)
            .output();

        let output = match result {
            Ok(output) => output,
            Err(source) => {
                let failure = RendererFailure::Spawn {
                    program: self.program.clone(),
                    source,
                };
                return Err(Self::failure(failure, String::new()));
            }
        };

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        let combined = combined.trim().to_string();

        if !output.status.success() {
            warn!(status:? = output.status; "Renderer exited with an error");
            return Err(Self::failure(RendererFailure::Exit(output.status), combined));
        }

        let output_path = request.output_path();
        if !output_path.is_file() {
            return Err(Self::failure(
                RendererFailure::MissingOutput(output_path),
                combined,
            ));
        }

        if !combined.is_empty() {
            debug!(output = combined.as_str(); "Renderer output");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::export::OutputFormat;

    fn request(dir: &std::path::Path) -> RenderRequest<'_> {
        RenderRequest {
            format: OutputFormat::Png,
            working_dir: dir,
            input: "app.dot",
            output: "app.png",
        }
    }

    #[test]
    fn test_default_program() {
        assert_eq!(Graphviz::default().program(), "dot");
    }

    #[test]
    fn test_spawn_failure() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = Graphviz::new("netdiagram-no-such-renderer");

        let err = renderer.render(&request(dir.path())).unwrap_err();
        match err {
            DiagramError::Renderer {
                failure: RendererFailure::Spawn { program, .. },
                ..
            } => assert_eq!(program, "netdiagram-no-such-renderer"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let err = Graphviz::new("false")
            .render(&request(dir.path()))
            .unwrap_err();
        assert!(matches!(
            err,
            DiagramError::Renderer {
                failure: RendererFailure::Exit(_),
                ..
            }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_output() {
        let dir = tempfile::tempdir().unwrap();
        let err = Graphviz::new("true")
            .render(&request(dir.path()))
            .unwrap_err();
        assert!(matches!(
            err,
            DiagramError::Renderer {
                failure: RendererFailure::MissingOutput(_),
                ..
            }
        ));
    }
}
