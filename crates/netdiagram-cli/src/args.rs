//! Command-line argument definitions for the netdiagram CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the manifest, override where and in which
//! format the diagram is written, and control logging verbosity.

use clap::Parser;

/// Command-line arguments for the netdiagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the diagram manifest (TOML)
    #[arg(help = "Path to the input manifest")]
    pub input: String,

    /// Directory that receives the description, the image and staged icons
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Output format (dot, png, jpg, svg, pdf)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["netdiagram", "office.toml"]);
        assert_eq!(args.input, "office.toml");
        assert_eq!(args.output_dir, None);
        assert_eq!(args.format, None);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "netdiagram",
            "office.toml",
            "-o",
            "build",
            "--format",
            "svg",
            "-c",
            "netdiagram.toml",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.output_dir.as_deref(), Some("build"));
        assert_eq!(args.format.as_deref(), Some("svg"));
        assert_eq!(args.config.as_deref(), Some("netdiagram.toml"));
        assert_eq!(args.log_level, "debug");
    }
}
