//! Zambi CLI - world generation and path queries.
//!
//! - `zambi generate` - build a world and print its summary (or the mesh as JSON)
//! - `zambi path --from X,Y --to X,Y` - search the generated mesh for a route

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use zambi_nav::{NavError, NavMesh, Vec2, World, WorldConfig};

#[derive(Parser)]
#[command(name = "zambi")]
#[command(about = "Procedural obstacle worlds and navigation mesh queries", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    world: WorldArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct WorldArgs {
    /// YAML file with world parameters
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// World width
    #[arg(long, global = true)]
    width: Option<u32>,

    /// World height
    #[arg(long, global = true)]
    height: Option<u32>,

    /// Number of obstacles
    #[arg(long, global = true)]
    obstacles: Option<usize>,

    /// Placement seed
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a world and describe it
    Generate {
        /// Print the world summary and navigation mesh as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find a path through a generated world
    Path {
        /// Start position; snapped to the nearest mesh vertex
        #[arg(long, value_parser = parse_point)]
        from: Vec2,

        /// Goal position
        #[arg(long, value_parser = parse_point)]
        to: Vec2,

        /// Print waypoints as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct Summary {
    width: u32,
    height: u32,
    seed: u64,
    obstacles: usize,
    candidates: usize,
    vertices: usize,
    edges: usize,
    triangles: usize,
}

#[derive(Serialize)]
struct GenerateOutput<'a> {
    summary: Summary,
    mesh: &'a NavMesh,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = resolve_config(&cli.world)?;
    tracing::debug!(?config, "resolved world configuration");

    let world = World::generate(&config).context("Failed to generate world")?;

    match cli.command {
        Commands::Generate { json } => show_world(&world, &config, json),
        Commands::Path { from, to, json } => show_path(&world, from, to, json),
    }
}

fn resolve_config(args: &WorldArgs) -> Result<WorldConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => WorldConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(obstacles) = args.obstacles {
        config.obstacle_count = obstacles;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    config.validate().context("Invalid world configuration")?;
    Ok(config)
}

/// Load world parameters from a YAML file; missing fields take their defaults.
fn load_config(path: &Path) -> Result<WorldConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: WorldConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path.display()))?;
    Ok(config)
}

fn parse_point(s: &str) -> std::result::Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got `{s}`"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x `{x}`: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y `{y}`: {e}"))?;
    if !x.is_finite() || !y.is_finite() {
        return Err(format!("coordinates must be finite, got `{s}`"));
    }
    Ok(Vec2::new(x, y))
}

fn summarize(world: &World, config: &WorldConfig) -> Summary {
    let mesh = world.mesh();
    Summary {
        width: world.width(),
        height: world.height(),
        seed: config.seed,
        obstacles: world.obstacles().len(),
        candidates: world.candidates().len(),
        vertices: mesh.vertex_count(),
        edges: mesh.edge_count(),
        triangles: mesh.triangle_count(),
    }
}

fn show_world(world: &World, config: &WorldConfig, json: bool) -> Result<()> {
    let summary = summarize(world, config);

    if json {
        let output = GenerateOutput {
            summary,
            mesh: world.mesh(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Zambi World");
    println!("===========");
    println!();
    println!("Size:       {}x{} (seed {})", summary.width, summary.height, summary.seed);
    println!("Obstacles:  {}", summary.obstacles);
    println!("Candidates: {}", summary.candidates);
    println!();
    println!("Navigation mesh:");
    println!("  vertices:  {}", summary.vertices);
    println!("  edges:     {}", summary.edges);
    println!("  triangles: {}", summary.triangles);

    Ok(())
}

fn show_path(world: &World, from: Vec2, to: Vec2, json: bool) -> Result<()> {
    let waypoints = match world.find_path(from, to) {
        Ok(waypoints) => waypoints,
        Err(NavError::NoPath { from, to }) => {
            bail!("no path from ({}, {}) to ({}, {})", from.x, from.y, to.x, to.y)
        }
        Err(err) => return Err(err).context("Path query failed"),
    };

    let travel = waypoints.into_travel_order();
    tracing::info!(hops = travel.len(), "path found");

    if json {
        println!("{}", serde_json::to_string_pretty(&travel)?);
        return Ok(());
    }

    for (i, p) in travel.iter().enumerate() {
        println!("{:>3}  {:>8.2} {:>8.2}", i + 1, p.x, p.y);
    }

    Ok(())
}
