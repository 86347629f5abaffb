/// meshview terminal viewer
///
/// Loads a triangulated OBJ mesh and lets you turn and move it in the
/// terminal.
/// Controls:
///   - Arrow keys: Pitch and yaw around the mesh centre
///   - PageUp/PageDown: Roll
///   - WASD / Q/E: Move along the three axes
///   - Esc / Ctrl-C: Quit
///
/// Logs go to stderr; set RUST_LOG and redirect it, e.g. `2>meshview.log`.
use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use log::info;
use meshview_core::{obj, ViewConfig, Viewer};
use meshview_terminal::{Args, TerminalApp};

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("meshview-terminal: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => ViewConfig::load(path).map_err(meshview_core::Error::from)?,
        None => ViewConfig::default(),
    };
    let mesh = obj::load_obj(&args.asset)?;
    info!("starting viewer for {}", args.asset.display());

    let viewer = Viewer::new(mesh, config);
    let mut app = TerminalApp::new(viewer)?;
    app.run()?;
    Ok(())
}
