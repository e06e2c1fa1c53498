//! Two-column `x,y` coordinate tables on disk (CSV via polars).

use anyhow::{anyhow, Context, Result};
use polars::prelude::*;
use polyfield::Vec2;
use std::fs::File;
use std::path::Path;

/// Read every row of the `x` and `y` columns as points.
pub fn read_points(path: &Path) -> Result<Vec<Vec2<f64>>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .and_then(|lf| lf.collect())
        .with_context(|| format!("reading {}", path.display()))?;
    let xs = float_column(&df, "x").with_context(|| format!("in {}", path.display()))?;
    let ys = float_column(&df, "y").with_context(|| format!("in {}", path.display()))?;
    tracing::debug!(path = %path.display(), rows = df.height(), "read points");
    Ok(xs.into_iter().zip(ys).map(|(x, y)| Vec2::new(x, y)).collect())
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let col = df.column(name)?.cast(&DataType::Float64)?;
    col.f64()?
        .into_iter()
        .enumerate()
        .map(|(i, v)| v.ok_or_else(|| anyhow!("null in column {name} at row {i}")))
        .collect()
}

/// Write points as a CSV with header `x,y`, creating parent directories.
pub fn write_points(path: &Path, points: &[Vec2<f64>]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let mut df = df!("x" => xs, "y" => ys)?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
