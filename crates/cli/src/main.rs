//! Orthofoot CLI - building footprint orthogonalization

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use geo::{Area, Geometry};
use orthofoot_algorithms::footprint::{
    orthogonalize, AngleConvention, AngleParams, AngleUnits, OrthogonalizeParams,
};
use orthofoot_algorithms::vector::SimplifyParams;
use orthofoot_core::io::{read_feature_table, write_feature_table};
use orthofoot_core::FeatureTable;

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "orthofoot")]
#[command(author, version, about = "Building footprint orthogonalization", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a footprint dataset
    Info {
        /// Input GeoJSON file
        input: PathBuf,
    },
    /// Correct near-rectangular footprints to true rectangles
    Orthogonalize {
        /// Input GeoJSON file (polygon features, projected CRS)
        input: PathBuf,
        /// Output GeoJSON file for corrected rectangles
        output: PathBuf,
        /// Douglas-Peucker simplification tolerance in projected units
        #[arg(short, long, default_value = "1.0")]
        tolerance: f64,
        /// Also write the annotated split-segment table here
        #[arg(long)]
        segments_out: Option<PathBuf>,
        /// List every skipped footprint in the report
        #[arg(long)]
        list_skipped: bool,
    },
    /// Measure vertex angles and segment lengths (diagnostic path only)
    Angles {
        /// Input GeoJSON file (polygon features, projected CRS)
        input: PathBuf,
        /// Output GeoJSON file for the annotated segment table
        output: PathBuf,
        /// Output units: degrees, radians
        #[arg(short, long, default_value = "degrees")]
        units: String,
        /// Measure the complementary (exterior) convention
        #[arg(long)]
        exterior: bool,
        /// Douglas-Peucker simplification tolerance in projected units
        #[arg(short, long, default_value = "1.0")]
        tolerance: f64,
    },
}

// ─── Entry point ────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to initialize logging")?;

    let start = Instant::now();
    match cli.command {
        Commands::Info { input } => cmd_info(&input)?,
        Commands::Orthogonalize {
            input,
            output,
            tolerance,
            segments_out,
            list_skipped,
        } => cmd_orthogonalize(&input, &output, tolerance, segments_out.as_deref(), list_skipped)?,
        Commands::Angles {
            input,
            output,
            units,
            exterior,
            tolerance,
        } => cmd_angles(&input, &output, &units, exterior, tolerance)?,
    }
    info!("done in {:.2?}", start.elapsed());

    Ok(())
}

// ─── Commands ───────────────────────────────────────────────────────────

fn cmd_info(input: &std::path::Path) -> Result<()> {
    let table = load_input(input)?;

    println!("Dataset:          {}", table.name());
    println!("Features:         {}", table.len());
    println!("Geometry type:    {:?}", table.geometry_type());
    println!("Spatial ref:      {}", table.spatial_ref());
    println!(
        "Fields:           {}",
        table
            .fields()
            .iter()
            .map(|f| format!("{} ({:?})", f.name, f.ty))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut vertex_counts = Vec::new();
    let mut total_area = 0.0;
    for feature in table.iter() {
        if let Some(g) = &feature.geometry {
            total_area += area_of(g);
            if let Some(raw) = raw_vertex_count(g) {
                vertex_counts.push(raw);
            }
        }
    }

    if !vertex_counts.is_empty() {
        let min = vertex_counts.iter().min().unwrap();
        let max = vertex_counts.iter().max().unwrap();
        let mean = vertex_counts.iter().sum::<usize>() as f64 / vertex_counts.len() as f64;
        println!("Boundary vertices: min {}, mean {:.1}, max {}", min, mean, max);
        println!("Total area:        {:.1}", total_area);
    }

    Ok(())
}

fn cmd_orthogonalize(
    input: &std::path::Path,
    output: &std::path::Path,
    tolerance: f64,
    segments_out: Option<&std::path::Path>,
    list_skipped: bool,
) -> Result<()> {
    let table = load_input(input)?;
    info!(features = table.len(), "loaded footprints");

    let params = OrthogonalizeParams {
        simplify: SimplifyParams { tolerance },
        angles: AngleParams::default(),
    };

    let spinner = progress_spinner("orthogonalizing footprints");
    let result = orthogonalize(&table, &params)
        .with_context(|| format!("orthogonalization of {} failed", input.display()))?;
    spinner.finish_and_clear();

    info!("{}", result.report.summary());
    if list_skipped {
        for (id, reason) in &result.report.skipped {
            warn!(footprint = *id, "skipped: {}", reason);
        }
    } else if !result.report.skipped.is_empty() {
        warn!(
            skipped = result.report.skipped.len(),
            "some footprints were not corrected (--list-skipped for details)"
        );
    }

    write_feature_table(&result.rectangles, output)
        .with_context(|| format!("cannot write {}", output.display()))?;
    info!("corrected rectangles written to {}", output.display());

    if let Some(path) = segments_out {
        write_feature_table(&result.segments, path)
            .with_context(|| format!("cannot write {}", path.display()))?;
        info!("annotated segments written to {}", path.display());
    }

    Ok(())
}

fn cmd_angles(
    input: &std::path::Path,
    output: &std::path::Path,
    units: &str,
    exterior: bool,
    tolerance: f64,
) -> Result<()> {
    let units = match units {
        "degrees" => AngleUnits::Degrees,
        "radians" => AngleUnits::Radians,
        other => bail!("unknown units '{}', expected degrees or radians", other),
    };
    let convention = if exterior {
        AngleConvention::Exterior
    } else {
        AngleConvention::Interior
    };

    let table = load_input(input)?;
    let params = OrthogonalizeParams {
        simplify: SimplifyParams { tolerance },
        angles: AngleParams { convention, units },
    };

    let spinner = progress_spinner("measuring vertex angles");
    let result = orthogonalize(&table, &params)
        .with_context(|| format!("angle measurement of {} failed", input.display()))?;
    spinner.finish_and_clear();

    info!(
        segments = result.segments.len(),
        footprints = result.report.total(),
        "measured"
    );

    write_feature_table(&result.segments, output)
        .with_context(|| format!("cannot write {}", output.display()))?;
    info!("annotated segments written to {}", output.display());

    Ok(())
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn load_input(input: &std::path::Path) -> Result<FeatureTable> {
    let table = read_feature_table(input)
        .with_context(|| format!("cannot read {}", input.display()))?;

    if table.spatial_ref().looks_geographic() {
        warn!(
            "input CRS {} looks geographic; lengths and angles need projected coordinates",
            table.spatial_ref()
        );
    } else if !table.spatial_ref().is_known() {
        warn!("input has no declared CRS; assuming projected coordinates");
    }

    Ok(table)
}

fn progress_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner
}

fn area_of(geometry: &Geometry<f64>) -> f64 {
    match geometry {
        Geometry::Polygon(p) => p.unsigned_area(),
        Geometry::MultiPolygon(mp) => mp.unsigned_area(),
        _ => 0.0,
    }
}

fn raw_vertex_count(geometry: &Geometry<f64>) -> Option<usize> {
    match geometry {
        Geometry::Polygon(p) => Some(p.exterior().0.len()),
        Geometry::MultiPolygon(mp) => mp.0.first().map(|p| p.exterior().0.len()),
        _ => None,
    }
}
