use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polyfield::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod table;

use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Contour sampling and interior vertex recovery")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Draw one random contour and write it as an x,y table
    Sample(SampleArgs),
    /// Recover interior vertices of a contour from known targets
    Recover(RecoverArgs),
    /// Print a small provenance JSON block
    Report,
}

#[derive(clap::Args, Serialize)]
struct SampleArgs {
    #[arg(long, default_value_t = polyfield::cfg::CONTOUR_VERTICES)]
    vertices: usize,
    #[arg(long, default_value_t = polyfield::cfg::CONTOUR_R_MIN)]
    r_min: f64,
    #[arg(long, default_value_t = polyfield::cfg::CONTOUR_R_MAX)]
    r_max: f64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 0)]
    index: u64,
    #[arg(long)]
    out: PathBuf,
}

#[derive(clap::Args, Serialize)]
struct RecoverArgs {
    /// Contour vertices, columns x,y, in loop order
    #[arg(long)]
    contour: PathBuf,
    /// Known interior vertices, columns x,y
    #[arg(long)]
    targets: PathBuf,
    /// Characteristic edge length the contour was meshed with
    #[arg(long, default_value_t = 1.0)]
    ls: f64,
    /// Lattice spacing as a fraction of ls; the cell diagonal
    /// (scale_factor * ls * sqrt 2) must stay below the exclusion radius
    #[arg(long, default_value_t = polyfield::cfg::GRID_SCALE_FACTOR)]
    scale_factor: f64,
    /// Exclusion radius as a fraction of ls; must exceed the lattice cell
    /// diagonal or recovery fails with an invalid-scale error
    #[arg(long, default_value_t = polyfield::cfg::EXCLUSION_FACTOR)]
    exclusion_factor: f64,
    #[arg(long)]
    out: PathBuf,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Sample(args) => sample(&args),
        Action::Recover(args) => recover(&args).map(|_| ()),
        Action::Report => report(),
    }
}

fn sample(args: &SampleArgs) -> Result<()> {
    tracing::info!(
        vertices = args.vertices,
        seed = args.seed,
        index = args.index,
        out = %args.out.display(),
        "sample"
    );
    let cfg = ContourCfg {
        vertex_count: args.vertices,
        r_min: args.r_min,
        r_max: args.r_max,
    };
    let contour = draw_contour(cfg, ReplayToken::new(args.seed, args.index))
        .context("drawing contour")?;
    table::write_points(&args.out, contour.vertices())?;
    let payload = Payload::new("sample", serde_json::to_value(args)?).with_summary(
        serde_json::json!({
            "vertices": contour.len(),
            "area": contour.signed_area(),
        }),
    );
    write_sidecar(&args.out, payload)?;
    Ok(())
}

fn recover(args: &RecoverArgs) -> Result<Reconstruction> {
    tracing::info!(
        contour = %args.contour.display(),
        targets = %args.targets.display(),
        ls = args.ls,
        "recover"
    );
    let contour = Polygon::new(table::read_points(&args.contour)?)
        .with_context(|| format!("contour {}", args.contour.display()))?;
    let targets = TargetSet::new(table::read_points(&args.targets)?);
    let cfg = EngineCfg {
        grid: GridCfg {
            scale_factor: args.scale_factor,
            ..GridCfg::default()
        },
        recovery: RecoveryCfg {
            exclusion_factor: args.exclusion_factor,
        },
    };
    let rec = reconstruct(&contour, &targets, args.ls, cfg)
        .with_context(|| format!("recovering vertices of {}", args.contour.display()))?;
    let mean_error = rec.mean_error(&targets);
    tracing::info!(
        grid_nodes = rec.grid_nodes,
        remaining_nodes = rec.remaining_nodes,
        recovered = rec.vertices.len(),
        mean_error = ?mean_error,
        "recovered"
    );
    table::write_points(&args.out, &rec.vertices)?;
    let payload = Payload::new("recover", serde_json::to_value(args)?).with_summary(
        serde_json::json!({
            "grid_nodes": rec.grid_nodes,
            "remaining_nodes": rec.remaining_nodes,
            "recovered": rec.vertices.len(),
            "mean_error": mean_error,
        }),
    );
    write_sidecar(&args.out, payload)?;
    Ok(rec)
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "engine_version": polyfield::VERSION,
        "defaults": {
            "grid_scale_factor": polyfield::cfg::GRID_SCALE_FACTOR,
            "grid_window": polyfield::cfg::GRID_WINDOW,
            "exclusion_factor": polyfield::cfg::EXCLUSION_FACTOR,
        },
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
