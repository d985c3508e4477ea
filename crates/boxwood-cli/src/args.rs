//! Command-line argument definitions for the Boxwood CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the secondary
//! outputs, configuration file selection, and logging verbosity.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the Boxwood diagram renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram document (TOML)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output PNG file
    #[arg(short, long, default_value = "out.png")]
    pub output: String,

    /// Path to the PlantUML output; defaults to the PNG path with a `.puml` extension
    #[arg(long, conflicts_with = "no_plantuml")]
    pub plantuml: Option<String>,

    /// Skip the PlantUML output
    #[arg(long)]
    pub no_plantuml: bool,

    /// Also write an SVG rendering to this path
    #[arg(long)]
    pub svg: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Where the PlantUML text goes, or `None` when it is disabled.
    pub fn plantuml_path(&self) -> Option<PathBuf> {
        if self.no_plantuml {
            return None;
        }
        Some(match &self.plantuml {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(&self.output).with_extension("puml"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["boxwood", "model.toml"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_plantuml_path_derived_from_output() {
        let args = args(&["-o", "diagrams/library.png"]);
        assert_eq!(args.plantuml_path(), Some(PathBuf::from("diagrams/library.puml")));
    }

    #[test]
    fn test_explicit_plantuml_path_wins() {
        let args = args(&["--plantuml", "text.txt"]);
        assert_eq!(args.plantuml_path(), Some(PathBuf::from("text.txt")));
    }

    #[test]
    fn test_plantuml_can_be_disabled() {
        let args = args(&["--no-plantuml"]);
        assert_eq!(args.plantuml_path(), None);
        assert_eq!(args.output, "out.png");
    }

    #[test]
    fn test_conflicting_plantuml_flags_rejected() {
        let result = Args::try_parse_from(["boxwood", "m.toml", "--plantuml", "a", "--no-plantuml"]);
        assert!(result.is_err());
    }
}
