//! Curated example sample sheets.
//!
//! Small, known-good panels used by the docs generator and as quick CLI
//! input; band sizes are chosen to cover the interesting migration cases.

use crate::gel_layout::GelSample;

/// A 14-sample PCR check panel. With the default row length of 12 this
/// overflows into a second, padded row.
pub fn pcr_panel() -> Vec<GelSample> {
    vec![
        GelSample::new("Sample 1", &[200.0, 500.0, 1500.0]),
        GelSample::new("Sample 2", &[100.0, 400.0, 5000.0]),
        GelSample::new("Sample 3", &[300.0, 1000.0]),
        GelSample::new("Sample 4", &[600.0, 800.0, 1200.0]),
        GelSample::new("Sample 5", &[3000.0]),
        GelSample::new("Sample 6", &[700.0, 8000.0]),
        GelSample::new("Sample 7", &[900.0]),
        GelSample::new("Sample 8", &[4000.0]),
        GelSample::new("Sample 9", &[500.0]),
        GelSample::new("Sample 10", &[1500.0, 2000.0]),
        GelSample::new("Sample 11", &[600.0]),
        GelSample::new("Sample 12", &[10000.0]),
        GelSample::new("Sample 13", &[800.0]),
        GelSample::new("Sample 14", &[300.0, 400.0]),
    ]
}

/// The smallest interesting sheet: one empty lane, one lane whose bands
/// include a size below the calibrated domain.
pub fn minimal_pair() -> Vec<GelSample> {
    vec![
        GelSample::new("A", &[]),
        GelSample::new("B", &[100.0, 50.0, 500.0, 5000.0]),
    ]
}

/// Panel for the interactive renderer covering all clamping edges: a lane
/// with no product, a size above the ladder maximum and one below the
/// minimum.
pub fn interactive_demo() -> Vec<GelSample> {
    vec![
        GelSample::new("Sample A", &[500.0, 1000.0, 5000.0]),
        GelSample::new("Sample B", &[1500.0, 5000.0]),
        GelSample::new("Sample C", &[6500.0]),
        GelSample::new("Sample D", &[0.0]),
        GelSample::new("Sample E", &[15000.0]),
        GelSample::new("Sample F", &[50.0]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gel_layout::{build_paged_layout, build_scrollable_layout};

    #[test]
    fn test_panels_lay_out() {
        let paged = build_paged_layout(&pcr_panel(), "PCR", "1kb+", 12).unwrap();
        assert_eq!(paged.rows.len(), 2);
        assert_eq!(paged.sample_count, 14);

        let minimal = build_paged_layout(&minimal_pair(), "two example", "1kb+", 12).unwrap();
        assert_eq!(minimal.rows.len(), 1);

        let demo = build_scrollable_layout(&interactive_demo(), "Example gel", "1kb+", 20).unwrap();
        assert_eq!(demo.lane_count(), 6);
        // The no-product lane keeps its slot but shows nothing.
        assert!(demo.sample_lanes[3].bands.is_empty());
    }
}
