//! Beltrami surface viewer CLI
//!
//! Runs the pseudosphere frame loop headlessly, prints mesh statistics, or
//! exports the tessellated surface.
//!
//! # Usage
//!
//! ```bash
//! # Draw 120 frames against the recording device and log statistics
//! beltrami_viewer
//!
//! # Read settings from a TOML file, override the frame count
//! beltrami_viewer --config viewer.toml --frames 600
//!
//! # Show surface and marker statistics as JSON
//! beltrami_viewer --summary
//!
//! # Write the surface mesh to JSON
//! beltrami_viewer --export surface.json
//! ```

mod config;

use std::path::PathBuf;
use std::process;

use beltrami_core::Result;
use beltrami_render::frame::{marker_mesh, surface_mesh};
use beltrami_render::{DeviceCommand, LightState, OrbitMode, RecordingDevice, Trackball, Viewer};
use config::ViewerConfig;

fn print_usage() {
    eprintln!(
        r#"Beltrami Surface Viewer

USAGE:
    beltrami_viewer [OPTIONS]
    beltrami_viewer --summary
    beltrami_viewer --export <surface.json>

OPTIONS:
    --config <file>     Read settings from a TOML file
    --frames <n>        Number of frames to draw (default 120)
    --orbit <mode>      Light orbit: faithful or circular
    --export <file>     Write the surface mesh as JSON and exit
    --summary           Print surface and marker statistics and exit
    --help              Show this help message

ENVIRONMENT:
    RUST_LOG            Log filter (default info)

EXAMPLES:
    # Headless run with per-frame trace output
    RUST_LOG=trace beltrami_viewer --frames 3

    # Circular light orbit
    beltrami_viewer --orbit circular
"#
    );
}

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    help: bool,
    summary: bool,
    config: Option<PathBuf>,
    frames: Option<u64>,
    orbit: Option<OrbitMode>,
    export: Option<PathBuf>,
}

fn parse_orbit(value: &str) -> std::result::Result<OrbitMode, String> {
    match value {
        "faithful" => Ok(OrbitMode::Faithful),
        "circular" => Ok(OrbitMode::Circular),
        other => Err(format!("unknown orbit mode '{}'", other)),
    }
}

fn parse_args(args: &[String]) -> std::result::Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{} requires a value", flag))
        };
        match arg.as_str() {
            "--help" | "-h" => parsed.help = true,
            "--summary" => parsed.summary = true,
            "--config" => parsed.config = Some(PathBuf::from(value("--config")?)),
            "--export" => parsed.export = Some(PathBuf::from(value("--export")?)),
            "--frames" => {
                let raw = value("--frames")?;
                let frames = raw
                    .parse::<u64>()
                    .map_err(|_| format!("invalid frame count '{}'", raw))?;
                parsed.frames = Some(frames);
            }
            "--orbit" => parsed.orbit = Some(parse_orbit(&value("--orbit")?)?),
            other => return Err(format!("unexpected argument '{}'", other)),
        }
    }

    Ok(parsed)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}\n", e);
            print_usage();
            process::exit(1);
        }
    };

    if cli.help {
        print_usage();
        process::exit(0);
    }

    let mut config = match &cli.config {
        Some(path) => match ViewerConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error reading {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => ViewerConfig::default(),
    };
    if let Some(frames) = cli.frames {
        config.frames = frames;
    }
    if let Some(orbit) = cli.orbit {
        config.orbit = orbit;
    }
    if cli.export.is_some() {
        config.export = cli.export.clone();
    }

    let outcome = if cli.summary {
        print_summary(&config)
    } else if let Some(path) = config.export.clone() {
        export_surface(&config, &path)
    } else {
        run_frames(&config)
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn print_summary(config: &ViewerConfig) -> Result<()> {
    let surface = surface_mesh(config.max_radius);
    let marker = marker_mesh(&LightState::at_time(0.0, config.orbit));

    let report = serde_json::json!({
        "max_radius": config.max_radius,
        "surface": surface.summary(),
        "marker": marker.summary(),
    });
    let text = serde_json::to_string_pretty(&report)
        .map_err(|e| beltrami_core::ViewerError::Export(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

fn export_surface(config: &ViewerConfig, path: &std::path::Path) -> Result<()> {
    let surface = surface_mesh(config.max_radius);
    surface.export_json(path)?;
    println!(
        "Wrote {} vertices ({} triangles) to {}",
        surface.vertex_count(),
        surface.triangle_count(),
        path.display()
    );
    Ok(())
}

fn run_frames(config: &ViewerConfig) -> Result<()> {
    log::info!(
        "Starting headless viewer: {} frames, orbit {:?}",
        config.frames,
        config.orbit
    );

    let viewer = Viewer::init(
        || Ok(RecordingDevice::new()),
        Trackball::new(0.0),
        config.options(),
    );
    let mut viewer = match viewer {
        Ok(viewer) => viewer,
        Err(e) => {
            // Initialization failures are reported in place of the canvas.
            log::warn!("viewer initialization failed: {}", e);
            println!("{}", e.user_message());
            return Ok(());
        }
    };
    viewer.device_mut().take_commands();

    let mut commands = 0usize;
    let mut draws = 0usize;
    for index in 0..config.frames {
        viewer.draw(config.frame_time(index));
        let frame = viewer.device_mut().take_commands();
        draws += frame
            .iter()
            .filter(|c| matches!(c, DeviceCommand::Draw(_)))
            .count();
        commands += frame.len();
    }

    let scene = viewer.scene();
    log::info!(
        "Drew {} frames ({} draw calls, {} device commands)",
        scene.frames,
        draws,
        commands
    );
    log::info!(
        "Light at t={:.3}: position {:?}, spot direction {:?}",
        scene.last_time,
        scene.light.position,
        scene.light.spot_direction
    );
    println!("Max radius: {:.2}", config.max_radius);
    Ok(())
}
