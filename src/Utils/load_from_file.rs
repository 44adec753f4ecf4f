use crate::settings::ConfigError;
use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// equation and the 1-based number of the line it came from
pub type NumberedEquation = (usize, String);

/// Reads equations from a text file, one per line.
/// Trailing '\r' is removed, blank lines and lines starting with '#' are skipped.
pub fn load_equations_from_file(
    file_name: impl AsRef<Path>,
) -> Result<Vec<NumberedEquation>, ConfigError> {
    let path = file_name.as_ref();
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }
    let reader = BufReader::new(File::open(path)?);

    let mut equations = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim_end_matches('\r').trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        equations.push((i + 1, trimmed.to_string()));
    }

    if equations.is_empty() {
        warn!("File '{}' contains no equations", path.display());
    }
    info!(
        "Loaded {} equations from file '{}'",
        equations.len(),
        path.display()
    );
    Ok(equations)
}
