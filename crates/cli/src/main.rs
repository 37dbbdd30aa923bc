#![deny(unsafe_code)]
//! CLI binary for the cellblob layout engine.
//!
//! Subcommands:
//! - `simulate`: run a drifting Voronoi layout for N frames, print shapes
//! - `blob`: generate one noise blob, print its SVG path
//! - `backdrop`: tessellate random points and draw a blob in every cell
//! - `params`: print the layout parameter schema

mod error;

use cellblob_blob::{Blob, BlobGenerator};
use cellblob_core::{RandomSource, SceneError, Seed, Xorshift64};
use cellblob_layout::{Layout, LayoutParams, ShapeFrame, Tessellator, VoronoiTessellator};
use clap::{Parser, Subcommand};
use error::CliError;
use glam::DVec2;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "cellblob", about = "Drifting Voronoi layouts and noise blobs")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a layout for N frames and print the shape geometry.
    Simulate {
        /// Canvas width.
        #[arg(short = 'W', long, default_value_t = 1080.0)]
        width: f64,

        /// Canvas height.
        #[arg(short = 'H', long, default_value_t = 1080.0)]
        height: f64,

        /// Initial number of shapes.
        #[arg(short, long, default_value_t = 24)]
        shapes: usize,

        /// Number of frames to run.
        #[arg(short, long, default_value_t = 600)]
        frames: usize,

        /// Frames per second of the layout clock.
        #[arg(long, default_value_t = 60.0)]
        frame_rate: f64,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Layout parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Read the whole run description from a seed JSON file instead.
        #[arg(long, conflicts_with_all = ["width", "height", "shapes", "frames", "frame_rate", "seed", "params"])]
        seed_file: Option<PathBuf>,

        /// Frame indices at which to start an agitation burst.
        #[arg(long, value_delimiter = ',')]
        agitate_at: Vec<usize>,

        /// Frame indices at which to add a shape at a random position.
        #[arg(long, value_delimiter = ',')]
        grow_at: Vec<usize>,

        /// Print every frame instead of only the last one.
        #[arg(long)]
        every: bool,
    },
    /// Generate one blob and print its outline.
    Blob {
        /// Centre x.
        #[arg(long, default_value_t = 0.0)]
        x: f64,

        /// Centre y.
        #[arg(long, default_value_t = 0.0)]
        y: f64,

        /// Largest distance of the outline from the centre.
        #[arg(short, long, default_value_t = 100.0)]
        radius: f64,

        /// Number of outline samples.
        #[arg(long, default_value_t = cellblob_blob::DEFAULT_NUM_POINTS)]
        points: usize,

        /// Spline tension; 1 is uniform Catmull-Rom.
        #[arg(long, default_value_t = 1.0)]
        tension: f64,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Tessellate random points and print one blob per cell.
    Backdrop {
        /// Canvas width.
        #[arg(short = 'W', long, default_value_t = 1080.0)]
        width: f64,

        /// Canvas height.
        #[arg(short = 'H', long, default_value_t = 1080.0)]
        height: f64,

        /// Number of random seed points.
        #[arg(short, long, default_value_t = 12)]
        count: usize,

        /// Number of outline samples per blob.
        #[arg(long, default_value_t = cellblob_blob::DEFAULT_NUM_POINTS)]
        points: usize,

        /// Spline tension; 1 is uniform Catmull-Rom.
        #[arg(long, default_value_t = 1.0)]
        tension: f64,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Print the layout parameter schema.
    Params,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Params => {
            let schema = LayoutParams::param_schema();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&schema)?);
            } else if let Value::Object(entries) = schema {
                for (name, entry) in entries {
                    println!(
                        "{name:<20} default {:<10} range [{}, {}]  {}",
                        entry["default"],
                        entry["min"],
                        entry["max"],
                        entry["description"].as_str().unwrap_or_default()
                    );
                }
            }
        }
        Command::Simulate {
            width,
            height,
            shapes,
            frames,
            frame_rate,
            seed,
            params,
            seed_file,
            agitate_at,
            grow_at,
            every,
        } => {
            let run_seed = match seed_file {
                Some(path) => read_seed(&path)?,
                None => {
                    let params: Value = serde_json::from_str(&params)
                        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
                    Seed {
                        params,
                        frames,
                        frame_rate,
                        ..Seed::new(width, height, shapes, seed)
                    }
                }
            };
            run_seed.validate()?;

            let recorded = simulate(&run_seed, &agitate_at, &grow_at, every)?;

            if cli.json {
                let info = if every {
                    json!({ "seed": run_seed, "frames": recorded })
                } else {
                    json!({ "seed": run_seed, "frame": recorded.last() })
                };
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for (index, frame) in recorded.iter().enumerate() {
                    if every {
                        println!("# frame {index}");
                    }
                    print_frame(frame);
                }
                eprintln!(
                    "simulated {} frames ({}x{}, {} shapes, seed {})",
                    run_seed.frames, run_seed.width, run_seed.height, run_seed.shapes, run_seed.seed
                );
            }
        }
        Command::Blob {
            x,
            y,
            radius,
            points,
            tension,
            seed,
        } => {
            let generator = BlobGenerator::new(points)?;
            let blob = generator.generate(DVec2::new(x, y), radius, &mut Xorshift64::new(seed))?;
            let path = blob.to_spline(tension)?.to_svg_path();
            if cli.json {
                let mut info = blob_json(&blob, &path);
                info["points"] = blob.points.iter().map(|p| json!([p.x, p.y])).collect();
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{path}");
            }
        }
        Command::Backdrop {
            width,
            height,
            count,
            points,
            tension,
            seed,
        } => {
            let generator = BlobGenerator::new(points)?;
            let mut rng = Xorshift64::new(seed);
            let seeds = backdrop_seeds(width, height, count, &mut rng)?;
            let cells = VoronoiTessellator::new().tessellate(&seeds, width, height);
            log::debug!("backdrop: {} cells from {} seeds", cells.len(), seeds.len());

            let mut blobs = Vec::with_capacity(cells.len());
            for cell in &cells {
                let blob = generator.generate(cell.centroid, cell.inscribed_radius, &mut rng)?;
                let path = blob.to_spline(tension)?.to_svg_path();
                blobs.push(blob_json(&blob, &path));
            }

            if cli.json {
                let info = json!({ "width": width, "height": height, "blobs": blobs });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for blob in &blobs {
                    println!("{}", blob["path"].as_str().unwrap_or_default());
                }
            }
        }
    }

    Ok(())
}

/// Runs a layout through every frame of `seed`, returning the last frame or
/// every frame when `every` is set.
fn simulate(
    seed: &Seed,
    agitate_at: &[usize],
    grow_at: &[usize],
    every: bool,
) -> Result<Vec<Vec<ShapeFrame>>, CliError> {
    let mut layout = Layout::from_seed(seed)?;
    let mut placement = Xorshift64::new(seed.seed).fork();
    let mut recorded = Vec::new();

    for index in 0..seed.frames {
        let now = seed.frame_time(index);
        if agitate_at.contains(&index) {
            layout.trigger_agitation(now);
        }
        if grow_at.contains(&index) {
            let added = grow(&mut layout, &mut placement, now);
            log::debug!("frame {index}: added shape {added}");
        }
        let outcome = layout.update(now);
        if !outcome.retargeted {
            log::debug!("frame {index}: tessellation skipped");
        }
        if every {
            recorded.push(layout.frames());
        }
    }

    if !every {
        recorded.push(layout.frames());
    }
    let cancelled = layout.shutdown();
    log::debug!("shutdown cancelled {cancelled} pending tasks");
    Ok(recorded)
}

/// Adds a shape at a random canvas position and stirs the layout so the
/// newcomer gets room. Returns the new shape's index.
fn grow(layout: &mut Layout, rng: &mut impl RandomSource, now: f64) -> usize {
    let x = rng.next_range(0.0, layout.params().width);
    let y = rng.next_range(0.0, layout.params().height);
    let added = layout.add_shape(x, y);
    layout.trigger_agitation(now);
    added
}

/// Uniform random seed points for a backdrop tessellation.
fn backdrop_seeds(
    width: f64,
    height: f64,
    count: usize,
    rng: &mut impl RandomSource,
) -> Result<Vec<DVec2>, CliError> {
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(SceneError::InvalidDimensions { width, height }.into());
    }
    if count == 0 {
        return Err(CliError::Input(
            "backdrop needs at least one seed point (--count)".into(),
        ));
    }
    Ok((0..count)
        .map(|_| DVec2::new(rng.next_range(0.0, width), rng.next_range(0.0, height)))
        .collect())
}

fn read_seed(path: &Path) -> Result<Seed, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Input(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid seed file {}: {e}", path.display())))
}

fn blob_json(blob: &Blob, path: &str) -> Value {
    json!({
        "center": [blob.center.x, blob.center.y],
        "max_radius": blob.max_radius,
        "max_variance": blob.shape.max_variance,
        "offset_mult": blob.shape.offset_mult,
        "noise_seed": blob.shape.noise_seed,
        "path": path,
    })
}

fn print_frame(frame: &[ShapeFrame]) {
    for (index, shape) in frame.iter().enumerate() {
        println!(
            "{index:>3}  x {:>8.2}  y {:>8.2}  r {:>7.2}  rot {:>6.1}",
            shape.center_x, shape.center_y, shape.radius, shape.rotation
        );
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
