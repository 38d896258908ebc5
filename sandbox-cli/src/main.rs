use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec2;
use sandbox_core::{Body, SimulationConfig, World, FIXED_STEP};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sandbox")]
#[command(about = "Headless 2D particle sandbox", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a built-in scene and print body positions
    Run {
        #[arg(long, value_enum, default_value_t = Scenario::Ramp)]
        scenario: Scenario,

        /// Number of rendered frames to simulate
        #[arg(long, default_value_t = 250)]
        frames: u32,

        /// Frame delta in seconds; need not match the fixed step
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,

        /// JSON simulation config; defaults to the sandbox preset
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print positions every N frames (0 prints only the final state)
        #[arg(long, default_value_t = 0)]
        report_every: u32,
    },
    /// Print the sandbox preset config as JSON
    Config,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scenario {
    /// A fluid drop rolling down a ramp onto a floor
    Ramp,
    /// Two overlapping solids pushed apart
    Knock,
    /// A lattice of bonded solids resting on a floor
    Cluster,
    /// Gas bodies in a closed box
    Gas,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            scenario,
            frames,
            dt,
            config,
            report_every,
        } => run_scenario(scenario, frames, dt, config.as_deref(), report_every),
        Commands::Config => print_config(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let source = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&source)?)
        }
        None => Ok(SimulationConfig::sandbox()),
    }
}

fn print_config() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&SimulationConfig::sandbox())?);
    Ok(())
}

fn run_scenario(
    scenario: Scenario,
    frames: u32,
    dt: f32,
    config: Option<&Path>,
    report_every: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut world = World::new(load_config(config)?)?;
    build_scene(&mut world, scenario);

    log::info!(
        "running {:?}: {} bodies, {} barriers, {} frames at dt {}",
        scenario,
        world.bodies.len(),
        world.barriers.len(),
        frames,
        dt
    );

    for frame in 1..=frames {
        world.frame(dt);

        if report_every > 0 && frame % report_every == 0 {
            println!("frame {}", frame);
            print_bodies(&world);
        }
    }

    println!(
        "final after {} steps ({} s simulated at {} s per step)",
        world.bodies.step_count(),
        world.bodies.step_count() as f32 * world.bodies.config().fixed_step,
        FIXED_STEP
    );
    print_bodies(&world);
    println!("{}", world.bodies.stats().summary());

    Ok(())
}

fn print_bodies(world: &World) {
    for body in world.bodies.bodies() {
        println!(
            "  {:?} {:?} pos=({:.3}, {:.3}) vel=({:.3}, {:.3}){}",
            body.id,
            body.phase,
            body.position.x,
            body.position.y,
            body.velocity().x,
            body.velocity().y,
            if body.contact.stuck_to_surface { " stuck" } else { "" }
        );
    }
}

/// Screen coordinates: y grows downwards.
fn build_scene(world: &mut World, scenario: Scenario) {
    match scenario {
        Scenario::Ramp => {
            world.barriers.replace_all([
                (Vec2::new(0.0, 100.0), Vec2::new(200.0, 200.0)),
                (Vec2::new(200.0, 200.0), Vec2::new(400.0, 200.0)),
            ]);
            world.bodies.spawn(Body::fluid(Vec2::new(40.0, 60.0)));
        }
        Scenario::Knock => {
            world.bodies.spawn(Body::solid(Vec2::new(100.0, 100.0)));
            world.bodies.spawn(Body::solid(Vec2::new(105.0, 100.0)));
        }
        Scenario::Cluster => {
            world
                .barriers
                .replace_all([(Vec2::new(0.0, 300.0), Vec2::new(400.0, 300.0))]);

            for row in 0..3 {
                for col in 0..4 {
                    let pos = Vec2::new(140.0 + col as f32 * 32.0, 200.0 + row as f32 * 32.0);
                    world.bodies.spawn(Body::solid(pos).with_bonds(4, 15.0));
                }
            }
        }
        Scenario::Gas => {
            let corners = [
                Vec2::new(0.0, 0.0),
                Vec2::new(300.0, 0.0),
                Vec2::new(300.0, 300.0),
                Vec2::new(0.0, 300.0),
            ];
            // Wound so every normal faces into the box
            world
                .barriers
                .replace_all((0..4).map(|i| (corners[(i + 1) % 4], corners[i])));

            for i in 0..12 {
                let pos = Vec2::new(60.0 + (i % 4) as f32 * 50.0, 80.0 + (i / 4) as f32 * 50.0);
                world.bodies.spawn(Body::gas(pos).with_velocity(Vec2::new(1.5, -0.5)));
            }
        }
    }
}
