//! Feed and settings loaders.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use ladder_alm::liability::{LiabilityBook, LiabilityRecord};
use ladder_alm::types::ProjectionConfig;
use ladder_bonds::cashflows::{CouponDateBook, OverrideRecord};
use ladder_bonds::BondTerms;

use crate::error::{CliError, CliResult};

fn read_csv<T: DeserializeOwned>(path: &Path) -> CliResult<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| CliError::input(path, e))?;

    reader
        .deserialize()
        .enumerate()
        .map(|(i, record)| {
            // header is line 1
            record.map_err(|e| CliError::input(path, format!("line {}: {e}", i + 2)))
        })
        .collect()
}

/// Reads the position feed.
pub fn read_positions(path: &Path) -> CliResult<Vec<BondTerms>> {
    let positions: Vec<BondTerms> = read_csv(path)?;
    if positions.is_empty() {
        return Err(CliError::NoPositions(path.to_path_buf()));
    }
    tracing::debug!(path = %path.display(), count = positions.len(), "loaded positions");
    Ok(positions)
}

/// Reads the coupon-date override feed; no path means no overrides.
pub fn read_overrides(path: Option<&Path>) -> CliResult<CouponDateBook> {
    let Some(path) = path else {
        return Ok(CouponDateBook::new());
    };
    let records: Vec<OverrideRecord> = read_csv(path)?;
    Ok(CouponDateBook::from_records(&records))
}

/// Reads the liability feed.
pub fn read_liabilities(path: &Path) -> CliResult<LiabilityBook> {
    let records: Vec<LiabilityRecord> = read_csv(path)?;
    tracing::debug!(path = %path.display(), count = records.len(), "loaded liabilities");
    Ok(LiabilityBook::new(records))
}

/// Loads projection settings, falling back to defaults without a file.
pub fn load_config(path: Option<&Path>) -> CliResult<ProjectionConfig> {
    let Some(path) = path else {
        return Ok(ProjectionConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|e| CliError::input(path, e))?;
    toml::from_str(&text).map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
}
