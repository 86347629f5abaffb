//! Command-line arguments
use clap::Parser;
use std::path::PathBuf;

/// Terminal viewer for triangulated OBJ meshes
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "meshview-terminal", version)]
pub struct Args {
    /// Mesh asset to display
    pub asset: PathBuf,

    /// Optional TOML view configuration
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
