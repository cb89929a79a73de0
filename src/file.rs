//! Reading element sets and horizon masks from disk.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::elements::Tle;
use crate::error::PredictError;
use crate::observer::HORIZON_SECTORS;

/// Reads every three-line element set in a file, in order.
pub fn read_tle_file(path: impl AsRef<Path>) -> Result<Vec<Tle>, PredictError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let sets = Tle::parse_many(&text)?;
    debug!(path = %path.display(), count = sets.len(), "read element sets");
    Ok(sets)
}

/// Reads a horizon mask: 36 whitespace-separated elevations in degrees,
/// one per 10 degrees of azimuth starting from north.
pub fn read_horizon_file(path: impl AsRef<Path>) -> Result<Vec<i32>, PredictError> {
    parse_horizon(&fs::read_to_string(path)?)
}

fn parse_horizon(text: &str) -> Result<Vec<i32>, PredictError> {
    let mask = text
        .split_ascii_whitespace()
        .map(|field| {
            field
                .parse::<i32>()
                .map_err(|_| PredictError::BadHorizonValue(field.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if mask.len() != HORIZON_SECTORS {
        return Err(PredictError::InvalidHorizonMask(mask.len()));
    }
    Ok(mask)
}
