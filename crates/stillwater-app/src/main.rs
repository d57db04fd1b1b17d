//! Stillwater - procedural terrain demo with planar water reflections
//!
//! Usage:
//!   stillwater [--config <path>] [--fullscreen]

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use stillwater_app::{DemoApp, DemoConfig};
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "stillwater")]
#[command(about = "Procedural terrain demo with a reflective water surface")]
struct Args {
    /// Path to config file
    #[arg(long, default_value = "stillwater.toml")]
    config: String,

    /// Launch in fullscreen mode
    #[arg(long)]
    fullscreen: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = if Path::new(&args.config).exists() {
        DemoConfig::load(Path::new(&args.config))?
    } else {
        println!("Config not found, using defaults: {}", args.config);
        DemoConfig::default()
    };

    println!("Controls:");
    println!("  WASD       - Move");
    println!("  Q/E        - Down / Up");
    println!("  Right drag - Look");
    println!("  Shift      - Sprint");
    println!("  1 (hold)   - Diffuse-only terrain shading");
    println!("  2 (hold)   - Specular-only terrain shading");
    println!("  Escape     - Exit");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DemoApp::new(config, args.fullscreen);
    event_loop.run_app(&mut app)?;

    Ok(())
}
