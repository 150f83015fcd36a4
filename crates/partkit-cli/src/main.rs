//! partkit CLI - one-shot geometry utilities for part design
//!
//! Each subcommand reads a selection document (or an airfoil file), runs a
//! single utility and writes one result: a shape document or G-code.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

mod commands;

#[derive(Parser)]
#[command(name = "partkit")]
#[command(about = "Geometry utilities for part design and 2.5D machining", long_about = None)]
struct Cli {
    /// Write the result to a file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Log every step (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Profile {
    Pocket,
    Contour,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten a bend chain (face, edge, face, ...) into the first face's plane
    Unfold {
        /// Selection document (JSON)
        selection: PathBuf,
        /// Output every face of the chain, not just the last
        #[arg(long)]
        all: bool,
        /// Use the rotate-then-correct bend resolution
        #[arg(long)]
        legacy: bool,
    },
    /// Convert a chain of selected edges into G-code
    Gcode {
        /// Selection document (JSON)
        selection: PathBuf,
        /// Machining preset [default: pocket, or contour with --sketch]
        #[arg(long, value_enum)]
        profile: Option<Profile>,
        /// CAM settings file (TOML); overrides --profile
        #[arg(long)]
        config: Option<PathBuf>,
        /// Sketch output: bare feed moves at a fixed depth, using the
        /// --profile feeds
        #[arg(long)]
        sketch: bool,
    },
    /// Remove cavities from the outline of the first selected face
    Simplify {
        /// Selection document (JSON)
        selection: PathBuf,
    },
    /// Merge the selected coplanar faces into one face
    Merge {
        /// Selection document (JSON)
        selection: PathBuf,
    },
    /// Make a triangular face from three selected vertices
    Triangle {
        /// Selection document (JSON)
        selection: PathBuf,
    },
    /// Close the selected faces into a solid
    Solid {
        /// Selection document (JSON)
        selection: PathBuf,
    },
    /// Turn every selected sub-object into its own shape
    Promote {
        /// Selection document (JSON)
        selection: PathBuf,
    },
    /// Import an airfoil .dat file as a face
    Airfoil {
        /// Airfoil coordinate file
        file: PathBuf,
        /// Chord length after scaling
        #[arg(long, default_value_t = 260.0)]
        span: f64,
        /// X of the station plane
        #[arg(long, default_value_t = 0.0)]
        station: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let text = match cli.command {
        Commands::Unfold {
            selection,
            all,
            legacy,
        } => commands::unfold(&read(&selection)?, all, legacy)?,
        Commands::Gcode {
            selection,
            profile,
            config,
            sketch,
        } => {
            let config = config.as_deref().map(read).transpose()?;
            let preset = profile.map(|p| match p {
                Profile::Pocket => "pocket",
                Profile::Contour => "contour",
            });
            commands::gcode(&read(&selection)?, preset, config.as_deref(), sketch)?
        }
        Commands::Simplify { selection } => commands::simplify(&read(&selection)?)?,
        Commands::Merge { selection } => commands::merge(&read(&selection)?)?,
        Commands::Triangle { selection } => commands::triangle(&read(&selection)?)?,
        Commands::Solid { selection } => commands::solid(&read(&selection)?)?,
        Commands::Promote { selection } => commands::promote(&read(&selection)?)?,
        Commands::Airfoil {
            file,
            span,
            station,
        } => commands::airfoil(&read(&file)?, span, station)?,
    };

    write(cli.output.as_deref(), &text)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn write(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
