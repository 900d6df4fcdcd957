// cli.rs - Command-line interface configuration
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "hero-grid")]
#[command(about = "Interactive tile-grid hero visual", long_about = None)]
pub struct Cli {
    /// Path to a slide deck JSON file; uses the built-in deck when omitted
    #[arg(long)]
    pub slides: Option<String>,

    /// Tiles per grid side
    #[arg(long, default_value_t = 30)]
    pub grid_size: u32,

    /// RNG seed for deterministic ripples and code rain
    #[arg(long)]
    pub seed: Option<u64>,

    /// Initial window width in pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,
}
