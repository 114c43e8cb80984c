use std::path::PathBuf;

pub use clap::{Parser, Subcommand};

#[derive(Parser)]
#[clap(version, about)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Commands,

    /// Do not print error reports
    #[clap(long, global = true)]
    pub quiet: bool,
}

impl Args {
    #[must_use]
    pub fn no_errors(&self) -> bool {
        self.quiet
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a project skeleton from a manifest
    Generate {
        /// Path to the app manifest
        manifest: PathBuf,

        /// key=value pairs overriding manifest entries
        #[clap(default_value = "")]
        cli_keys: Vec<String>,

        /// Where to create the project [default: the manifest's output_path]
        #[clap(long)]
        output: Option<PathBuf>,

        /// Directory holding the template tree [default: ./templates, then
        /// the global config dir]
        #[clap(long, short)]
        templates: Option<PathBuf>,

        /// Overwrite any already existing files
        #[clap(long, short)]
        overwrite: bool,

        /// Report what would be written without touching the filesystem
        #[clap(long, short)]
        dry_run: bool,
    },

    /// Print the tint/shade ramp derived from a base color
    Palette {
        /// Base color in #RRGGBB form
        color: String,
    },

    /// Parse a manifest and dump the resulting configuration
    DebugManifest {
        /// Path to the manifest to inspect
        path: PathBuf,
    },
}
