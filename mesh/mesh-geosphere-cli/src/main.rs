//! `geosphere` - inspect and export geodesic spheres.
//!
//! # Commands
//!
//! - `geosphere stats --level 3` - Sizes at a level, plus GPU buffer needs
//! - `geosphere walk + + - + =5 reset` - Replay viewer commands step by step
//! - `geosphere export --level 4 --output sphere.obj` - Write an OBJ file
//!
//! Refinement flags shared by every command: `--max-level`,
//! `--shared-midpoints` and `--exact-coarsen`.

mod logging;
mod steps;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use mesh_geosphere::gpu::BufferCapacity;
use mesh_geosphere::{
    obj, CoarsenPolicy, CommandOutcome, GeodesicRefiner, MidpointPolicy, RefineParams,
    SphereCommand, SphereState, DEFAULT_MAX_LEVEL, MAX_SUPPORTED_LEVEL,
};

/// Geodesic sphere refinement tool
#[derive(Debug, Parser)]
#[command(name = "geosphere")]
#[command(about = "Inspect and export geodesic spheres", long_about = None)]
#[command(version)]
struct Cli {
    /// Log refinement steps (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print sizes of the sphere at a level
    Stats {
        /// Level to refine to
        #[arg(long, default_value_t = 0)]
        level: u32,

        #[command(flatten)]
        refine: RefineArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },

    /// Apply a sequence of steps and print the state after each
    Walk {
        /// Steps: `+` subdivide, `-` coarsen, `=N` set level, `reset`
        #[arg(required = true, value_parser = steps::parse_step)]
        steps: Vec<SphereCommand>,

        #[command(flatten)]
        refine: RefineArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },

    /// Write the sphere at a level as Wavefront OBJ
    Export {
        /// Level to refine to
        #[arg(long)]
        level: u32,

        /// Destination file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        refine: RefineArgs,
    },
}

/// Refinement parameters from the command line.
#[derive(Debug, Clone, Args)]
struct RefineArgs {
    /// Highest level subdivision may reach
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_LEVEL,
        value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_SUPPORTED_LEVEL))
    )]
    max_level: u32,

    /// Share edge midpoints between neighbouring faces
    #[arg(long)]
    shared_midpoints: bool,

    /// Make coarsening an exact inverse that releases positions
    #[arg(long)]
    exact_coarsen: bool,
}

impl RefineArgs {
    fn params(&self) -> RefineParams {
        let midpoints = if self.shared_midpoints {
            MidpointPolicy::Shared
        } else {
            MidpointPolicy::PerFace
        };
        let coarsen = if self.exact_coarsen {
            CoarsenPolicy::Restore
        } else {
            CoarsenPolicy::Regroup
        };
        RefineParams::new()
            .with_max_level(self.max_level)
            .with_midpoints(midpoints)
            .with_coarsen(coarsen)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let stdout = std::io::stdout();
    run(cli.command, &mut stdout.lock())
}

fn run<W: Write>(command: Commands, out: &mut W) -> Result<()> {
    match command {
        Commands::Stats {
            level,
            refine,
            format,
        } => stats(level, &refine, format, out),
        Commands::Walk {
            steps,
            refine,
            format,
        } => walk(&steps, &refine, format, out),
        Commands::Export {
            level,
            output,
            refine,
        } => export(level, &output, &refine, out),
    }
}

fn refine_to(level: u32, refine: &RefineArgs) -> Result<GeodesicRefiner> {
    GeodesicRefiner::with_initial_level(refine.params(), level)
        .with_context(|| format!("failed to refine to level {level}"))
}

fn stats<W: Write>(level: u32, refine: &RefineArgs, format: Format, out: &mut W) -> Result<()> {
    let sphere = refine_to(level, refine)?;
    let stats = sphere.stats();
    let capacity = BufferCapacity::for_params(sphere.params())?;

    match format {
        Format::Pretty => {
            writeln!(out, "{stats}")?;
            writeln!(out, "indices: {}", stats.index_count())?;
            writeln!(
                out,
                "buffers for max level {}: {} position bytes, {} index bytes",
                stats.max_level,
                capacity.position_buffer_size(),
                capacity.index_buffer_size()
            )?;
        }
        Format::Json => {
            let json = serde_json::json!({
                "stats": stats,
                "indices": stats.index_count(),
                "position_buffer_bytes": capacity.position_buffer_size(),
                "index_buffer_bytes": capacity.index_buffer_size(),
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
        }
    }
    Ok(())
}

fn walk<W: Write>(
    steps: &[SphereCommand],
    refine: &RefineArgs,
    format: Format,
    out: &mut W,
) -> Result<()> {
    let mut state = SphereState::new(refine.params());

    for &step in steps {
        let outcome = state.update(step);
        let stats = state.refiner().stats();

        match format {
            Format::Pretty => match &outcome {
                CommandOutcome::Changed(_) | CommandOutcome::Unchanged => {
                    writeln!(out, "{step:?}: {stats}")?;
                }
                CommandOutcome::Rejected(err) => {
                    writeln!(out, "{step:?}: rejected ({err})")?;
                }
            },
            Format::Json => {
                let rejected = match &outcome {
                    CommandOutcome::Rejected(err) => Some(err.to_string()),
                    _ => None,
                };
                let json = serde_json::json!({
                    "step": format!("{step:?}"),
                    "changed": outcome.is_changed(),
                    "rejected": rejected,
                    "stats": stats,
                });
                writeln!(out, "{json}")?;
            }
        }
    }
    Ok(())
}

fn export<W: Write>(
    level: u32,
    output: &std::path::Path,
    refine: &RefineArgs,
    out: &mut W,
) -> Result<()> {
    let sphere = refine_to(level, refine)?;
    obj::save_obj(&sphere, output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    writeln!(
        out,
        "wrote {} ({} faces, {} vertices)",
        output.display(),
        sphere.face_count(),
        sphere.vertex_count()
    )?;
    Ok(())
}
