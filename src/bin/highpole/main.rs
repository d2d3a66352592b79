//! Highpole CLI - reduce high-valence vertices in mesh files.
//!
//! Usage: highpole <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `highpole --help` for available commands. Set `RUST_LOG` or pass `-v`
//! for log output.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use clap::{Parser, Subcommand};

use highpole::algo::highpole::{reduce_highpoles_with_progress, HighpoleOptions};
use highpole::algo::Progress;
use highpole::io;
use highpole::mesh::{MeshHost, PolyMesh};

#[derive(Parser)]
#[command(name = "highpole")]
#[command(author, version, about = "Reduce highpoles in polygon meshes by edge flips", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information and its valence histogram
    Info {
        /// Input mesh file
        input: PathBuf,

        /// Valence at or above which a vertex counts as a highpole
        #[arg(short = 'e', long, default_value = "12")]
        min_edges: usize,
    },

    /// Triangulate a mesh and flip edges to reduce highpoles
    Reduce {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Valence at or above which a vertex counts as a highpole (7 to 24)
        #[arg(short = 'e', long, default_value = "12")]
        min_edges: usize,

        /// Maximum angle in degrees between the faces of a flipped edge (0 to 90)
        #[arg(short = 'd', long, default_value = "1.0")]
        face_divergence: f64,

        /// Margin on where the new edge may cross the old one (-0.4 to 0.4)
        #[arg(short, long, default_value = "0.0", allow_negative_numbers = true)]
        padding: f64,

        /// Stop after this many flips
        #[arg(short = 'n', long)]
        max_iterations: Option<usize>,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize the stderr logger. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "highpole=info",
        2 => "highpole=debug",
        _ => "highpole=trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input, min_edges } => {
            cmd_info(&input, min_edges)?;
        }

        Commands::Reduce {
            input,
            output,
            min_edges,
            face_divergence,
            padding,
            max_iterations,
            sequential,
        } => {
            let mut options = HighpoleOptions::default()
                .with_min_edges(min_edges)
                .with_face_divergence_deg(face_divergence)
                .with_flip_padding(padding);
            options.max_iterations = max_iterations;
            cmd_reduce(&input, &output, &options, sequential)?;
        }
    }

    Ok(())
}

/// Create a progress reporter that draws a bar on stderr.
fn create_progress() -> Progress {
    let shown = AtomicUsize::new(0);

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }
        let percent = (current.min(total) * 100) / total;

        // Never move backwards; redraw only on change or completion.
        let previous = shown.fetch_max(percent, Ordering::Relaxed);
        if percent <= previous && percent != 100 {
            return;
        }

        let bar_width = 30;
        let filled = (percent * bar_width) / 100;
        eprint!(
            "\r[{}{}] {:3}% {:<48}",
            "=".repeat(filled),
            " ".repeat(bar_width - filled),
            percent,
            message
        );
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn valence_histogram(mesh: &PolyMesh) -> BTreeMap<usize, usize> {
    let mut histogram = BTreeMap::new();
    for valence in mesh.valences() {
        *histogram.entry(valence).or_insert(0) += 1;
    }
    histogram
}

fn cmd_info(input: &Path, min_edges: usize) -> Result<(), Box<dyn std::error::Error>> {
    let mut mesh = io::load(input)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Faces: {}", mesh.num_faces());
    println!("Edges: {}", mesh.raw_edges().len());

    if mesh.is_triangle_mesh() {
        println!("Mesh type: Triangle mesh");
    } else {
        println!("Mesh type: Polygon mesh (valences below are after triangulation)");
        mesh.triangulate_all_faces();
        println!("Triangles: {}", mesh.num_faces());
    }
    if !mesh.is_valid() {
        println!("Topology: Non-manifold or inconsistently oriented");
    }

    println!("\nValence histogram:");
    let histogram = valence_histogram(&mesh);
    for (valence, count) in &histogram {
        let marker = if *valence >= min_edges { "  <- highpole" } else { "" };
        println!("  {:>3}: {}{}", valence, count, marker);
    }

    let highpoles: usize = histogram.range(min_edges..).map(|(_, count)| count).sum();
    println!("Highpoles (valence >= {}): {}", min_edges, highpoles);

    Ok(())
}

fn cmd_reduce(
    input: &Path,
    output: &Path,
    options: &HighpoleOptions,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut mesh = io::load(input)?.with_parallel(!sequential);

    println!("Loaded: {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());
    println!(
        "Reducing highpoles (min edges {}, divergence {} deg, padding {})...",
        options.min_edges, options.face_divergence_deg, options.flip_padding
    );

    let progress = create_progress();
    let start = Instant::now();
    let report = reduce_highpoles_with_progress(&mut mesh, options, &progress)?;
    let elapsed = start.elapsed();

    println!(
        "Flips: {}, worst valence {} -> {} ({:?})",
        report.num_flips(),
        report.initial_worst_valence,
        report.final_worst_valence,
        report.termination
    );
    if !report.remaining_highpoles.is_empty() {
        println!("Remaining highpoles: {:?}", report.remaining_highpoles);
    }

    io::save(&mesh, output)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}
