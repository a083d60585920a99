//! vkrender bootstrap
//!
//! Opens a window, creates a Vulkan instance after checking validation layers
//! and window-system extensions, then waits for the window to be closed.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p vkrender-bootstrap -- [OPTIONS]
//! ```
//!
//! ## Options
//!
//! - `--validation` / `--no-validation`: Force validation layers on or off
//!   (default: on in debug builds)
//! - `--lenient-validation`: Continue without validation layers if missing
//! - `--strict-extensions`: Abort if a window-system extension is missing
//! - `--width <N>`, `--height <N>`, `--title <T>`: Window settings
//! - `-h, --help`: Print help message
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

use vkrender_app::{run_app, AppConfig};

const TITLE: &str = "Vulkan Test";
const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

fn main() -> anyhow::Result<()> {
    // Check for help flag before starting the app
    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    let config = AppConfig::new(TITLE)
        .with_size(WIDTH, HEIGHT)
        .with_resizable(false)
        .apply_args(std::env::args().skip(1));

    run_app(config)
}

fn print_help() {
    eprintln!(
        "vkrender bootstrap: window + Vulkan instance

USAGE:
    cargo run -p vkrender-bootstrap -- [OPTIONS]

VALIDATION OPTIONS:
    --validation            Request validation layers
    --no-validation         Do not request validation layers
                            Default: requested in debug builds only
    --lenient-validation    Continue without validation layers if missing
                            Default: abort startup

EXTENSION OPTIONS:
    --strict-extensions     Abort if a window-system extension is missing
                            Default: warn and continue

WINDOW OPTIONS:
    --width <N>             Window width (default: {WIDTH})
    --height <N>            Window height (default: {HEIGHT})
    --title <T>             Window title (default: \"{TITLE}\")

OTHER:
    -h, --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}
