//! Fragment migration model.
//!
//! Band positions come from piecewise-linear interpolation over a ladder's
//! calibration table. Sizes outside the calibrated domain clamp to the
//! nearest end, so every finite size maps to a drawable position.

use crate::GEL_LADDERS;
use crate::error::GelError;
use crate::ladder::{CalibrationPoint, Ladder};

/// Map fragment sizes to normalized gel positions using the named ladder.
pub fn migrate(sizes_bp: &[f64], ladder_name: &str) -> Result<Vec<f64>, GelError> {
    let ladder = GEL_LADDERS.resolve(ladder_name)?;
    migrate_with(ladder, sizes_bp)
}

/// Single-size convenience over [`migrate`].
pub fn migrate_one(size_bp: f64, ladder_name: &str) -> Result<f64, GelError> {
    let ladder = GEL_LADDERS.resolve(ladder_name)?;
    position_for(ladder, size_bp)
}

pub fn migrate_with(ladder: &Ladder, sizes_bp: &[f64]) -> Result<Vec<f64>, GelError> {
    sizes_bp
        .iter()
        .map(|&size_bp| position_for(ladder, size_bp))
        .collect()
}

pub fn position_for(ladder: &Ladder, size_bp: f64) -> Result<f64, GelError> {
    if !size_bp.is_finite() {
        return Err(GelError::InvalidSize {
            lane: None,
            value: size_bp,
        });
    }
    let (min_bp, max_bp) = ladder.domain();
    let clamped = size_bp.clamp(min_bp, max_bp);
    Ok(interpolate(ladder.points(), clamped))
}

/// Piecewise-linear interpolation over calibration points sorted by size.
/// Sizes hitting a knot return the tabulated position exactly; float lerp
/// is not trusted to reproduce the endpoints.
fn interpolate(points: &[CalibrationPoint], size_bp: f64) -> f64 {
    let idx = points.partition_point(|p| p.size_bp < size_bp);
    if idx == 0 {
        return points[0].position;
    }
    if idx < points.len() && points[idx].size_bp == size_bp {
        return points[idx].position;
    }
    if idx == points.len() {
        return points[points.len() - 1].position;
    }
    let lo = points[idx - 1];
    let hi = points[idx];
    let t = (size_bp - lo.size_bp) / (hi.size_bp - lo.size_bp);
    lo.position + t * (hi.position - lo.position)
}
