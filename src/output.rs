// src/output.rs

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

/// Serialize one finished report to pretty-printed JSON under `out_dir`,
/// creating the directory if needed. Returns the artifact path.
pub fn write_artifact<T: Serialize>(out_dir: &Path, file_name: &str, value: &T) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let path = out_dir.join(file_name);
    let file =
        File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
