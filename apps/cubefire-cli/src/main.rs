use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use cubefire_assets::AssetStore;
use cubefire_input::{InputSnapshot, Key};
use cubefire_kernel::{HeightFieldConfig, Pacing, Simulation, TerrainConfig, World, WorldConfig};
use cubefire_render::{DebugTextRenderer, RecordingSurface, RenderView, Renderer, draw_frame};
use cubefire_terrain::build_terrain;
use cubefire_tools::{EventTally, WorldInspector};
use glam::{Vec2, Vec3};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cubefire-cli", about = "Headless runner for the cubefire simulation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Run a scripted session: walk forward, fire and turn periodically
    Run {
        /// World config file (YAML); defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of frames to simulate
        #[arg(short, long, default_value = "600")]
        frames: u64,
        /// Simulated wall time per frame, in milliseconds
        #[arg(long, default_value = "16")]
        frame_ms: u64,
        /// Press fire every K frames (0 disables)
        #[arg(long, default_value = "30")]
        fire_every: u64,
        /// Turn right for one frame every K frames (0 disables)
        #[arg(long, default_value = "45")]
        turn_every: u64,
        /// Override the configured tick pacing
        #[arg(long, value_enum)]
        pacing: Option<PacingArg>,
        /// Print a text dump of the final frame
        #[arg(long)]
        dump: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build terrain from a height-field image and describe it
    Terrain {
        /// Grayscale height-field image
        #[arg(long)]
        heightmap: PathBuf,
        /// Terrain centre as x,y,z
        #[arg(long, default_value = "0,-5,0", value_parser = parse_vec3)]
        center: Vec3,
        /// Terrain extent as x,y,z
        #[arg(long, default_value = "200,20,200", value_parser = parse_vec3)]
        size: Vec3,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PacingArg {
    FixedStep,
    FrameCoupled,
}

impl From<PacingArg> for Pacing {
    fn from(arg: PacingArg) -> Self {
        match arg {
            PacingArg::FixedStep => Pacing::FixedStep,
            PacingArg::FrameCoupled => Pacing::FrameCoupled,
        }
    }
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<f32> = s
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<Result<_, _>>()?;
    match parts[..] {
        [x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(format!("expected x,y,z, got {s:?}")),
    }
}

struct Script {
    frames: u64,
    frame: Duration,
    fire_every: u64,
    turn_every: u64,
}

fn run_session(world: World, script: &Script) -> (Simulation, EventTally, RecordingSurface) {
    let mut sim = Simulation::new(world);
    let mut tally = EventTally::default();
    let mut surface = RecordingSurface::new();
    let mut input = InputSnapshot::new();
    input.key_event(Key::Forward, true);

    for frame in 0..script.frames {
        if script.fire_every > 0 && frame % script.fire_every == 0 {
            input.key_event(Key::Fire, true);
        }
        let turning = script.turn_every > 0 && frame % script.turn_every == 0;
        input.key_event(Key::RotateRight, turning);

        let report = sim.frame(script.frame, &input);
        surface.begin_frame();
        draw_frame(sim.world(), &mut surface);
        for event in sim.world_mut().drain_events() {
            tally.record(&event);
        }
        tracing::trace!(frame, ticks = report.ticks, "frame");

        input.next_frame();
        input.key_event(Key::Fire, false);
        if report.exit_requested {
            break;
        }
    }
    (sim, tally, surface)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("cubefire-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", cubefire_common::crate_info());
            println!("input: {}", cubefire_input::crate_info());
            println!("kernel: {}", cubefire_kernel::crate_info());
            println!("terrain: {}", cubefire_terrain::crate_info());
            println!("assets: {}", cubefire_assets::crate_info());
            println!("render: {}", cubefire_render::crate_info());
            println!("tools: {}", cubefire_tools::crate_info());
        }
        Commands::Run {
            config,
            frames,
            frame_ms,
            fire_every,
            turn_every,
            pacing,
            dump,
            json,
        } => {
            let mut config = match config {
                Some(path) => WorldConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => WorldConfig::default(),
            };
            if let Some(pacing) = pacing {
                config.pacing = pacing.into();
            }

            let assets = AssetStore::builtin();
            let terrain = build_terrain(&config.terrain, &assets).context("building terrain")?;
            let world = World::new(config, terrain, &assets, &assets)?;
            let script = Script {
                frames,
                frame: Duration::from_millis(frame_ms),
                fire_every,
                turn_every,
            };

            let (sim, tally, surface) = run_session(world, &script);
            let world = sim.world();
            let summary = WorldInspector::summary(world);

            if json {
                let report = serde_json::json!({
                    "summary": summary,
                    "events": tally,
                    "dropped_ticks": sim.clock().dropped_ticks(),
                    "draw_calls": {
                        "last_frame": surface.calls().len(),
                        "textured": surface.textured_calls(),
                        "total": surface.total_calls(),
                    },
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{summary}");
                println!(
                    "Events: ticks={} fired={} annihilated={} expired={} contacts={} bounces={}",
                    tally.ticks,
                    tally.bullets_fired,
                    tally.annihilated,
                    tally.expired,
                    tally.elastic_contacts,
                    tally.bounces
                );
                println!(
                    "Draw calls: last frame={} textured={} total={} over {} frames",
                    surface.calls().len(),
                    surface.textured_calls(),
                    surface.total_calls(),
                    surface.frames()
                );
            }
            if dump {
                let view = RenderView::follow(world);
                print!("{}", DebugTextRenderer::new().render(world, &view));
            }
        }
        Commands::Terrain {
            heightmap,
            center,
            size,
        } => {
            let assets = AssetStore::builtin();
            let config = TerrainConfig::HeightField(HeightFieldConfig {
                center,
                size,
                max_uv: Vec2::new(10.0, 10.0),
                ..HeightFieldConfig::new(&heightmap)
            });
            let terrain = build_terrain(&config, &assets)
                .with_context(|| format!("loading height field {}", heightmap.display()))?;

            println!("Triangles: {}", terrain.len());
            println!("Batches: {}", terrain.batches().len());
            match terrain.height_range() {
                Some((lo, hi)) => println!("Y range: {lo:.3} .. {hi:.3}"),
                None => println!("Y range: empty"),
            }
        }
    }

    Ok(())
}
