//! Lane layout engine.
//!
//! Turns named samples into renderer-neutral gel geometry. The paged layout
//! splits samples into ladder-flanked rows for static export; the scrollable
//! layout keeps one long row plus a separate ladder track for the
//! interactive figure.

use crate::GEL_LADDERS;
use crate::error::GelError;
use crate::ladder::{Ladder, LadderKind};
use crate::migrate::position_for;
use serde::{Deserialize, Serialize};

pub const LADDER_LANE_NAME: &str = "Ladder";
pub const EMPTY_LANE_NAME: &str = "Empty";

/// Bands below this size are dropped from scrollable layouts. The paged
/// layout has no such cutoff and draws them clamped to the domain edge;
/// the asymmetry is inherited behavior, see DESIGN.md.
pub const MIN_VISIBLE_BP: f64 = 1.0;

/// A named specimen and the fragment sizes it carries. An empty size list
/// is a valid sample (a reaction that produced no product).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GelSample {
    pub name: String,
    pub sizes_bp: Vec<f64>,
}

impl GelSample {
    pub fn new(name: &str, sizes_bp: &[f64]) -> Self {
        Self {
            name: name.to_string(),
            sizes_bp: sizes_bp.to_vec(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaneKind {
    Ladder,
    Sample,
    Padding,
}

impl LaneKind {
    pub fn is_ladder(self) -> bool {
        matches!(self, Self::Ladder)
    }
}

/// One resolved band: the fragment size it came from, its normalized
/// vertical position, and an optional in-lane label (ladder lanes label
/// every band with its size).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GelBand {
    pub size_bp: f64,
    pub position: f64,
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GelLane {
    pub name: String,
    pub kind: LaneKind,
    pub bands: Vec<GelBand>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GelRow {
    pub lanes: Vec<GelLane>,
}

/// Static layout: samples split into rows of `row_len`, each row padded to
/// full length with empty lanes and flanked by a ladder lane on both sides.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PagedGelLayout {
    pub title: String,
    pub ladder: LadderKind,
    pub row_len: usize,
    pub rows: Vec<GelRow>,
    pub sample_count: usize,
    pub band_count: usize,
}

/// Interactive layout: one ladder track beside a single scrollable row of
/// sample lanes. `color_domain` is the (min, max) of the ladder's
/// calibrated positions; hover colors normalize against it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScrollableGelLayout {
    pub title: String,
    pub ladder: LadderKind,
    pub ladder_lane: GelLane,
    pub sample_lanes: Vec<GelLane>,
    pub visible_lanes: usize,
    pub color_domain: (f64, f64),
}

impl ScrollableGelLayout {
    pub fn lane_count(&self) -> usize {
        self.sample_lanes.len()
    }
}

fn ladder_lane(ladder: &Ladder) -> GelLane {
    let bands = ladder
        .points()
        .iter()
        .map(|p| GelBand {
            size_bp: p.size_bp,
            position: p.position,
            label: Some(format!("{}", p.size_bp.round() as i64)),
        })
        .collect();
    GelLane {
        name: LADDER_LANE_NAME.to_string(),
        kind: LaneKind::Ladder,
        bands,
    }
}

fn padding_lane() -> GelLane {
    GelLane {
        name: EMPTY_LANE_NAME.to_string(),
        kind: LaneKind::Padding,
        bands: vec![],
    }
}

fn sample_lane(ladder: &Ladder, sample: &GelSample) -> Result<GelLane, GelError> {
    let bands = sample
        .sizes_bp
        .iter()
        .map(|&size_bp| {
            let position = position_for(ladder, size_bp).map_err(|e| match e {
                GelError::InvalidSize { value, .. } => GelError::InvalidSize {
                    lane: Some(sample.name.clone()),
                    value,
                },
                other => other,
            })?;
            Ok(GelBand {
                size_bp,
                position,
                label: None,
            })
        })
        .collect::<Result<Vec<_>, GelError>>()?;
    Ok(GelLane {
        name: sample.name.clone(),
        kind: LaneKind::Sample,
        bands,
    })
}

pub fn build_paged_layout(
    samples: &[GelSample],
    title: &str,
    ladder_name: &str,
    row_len: usize,
) -> Result<PagedGelLayout, GelError> {
    if row_len == 0 {
        return Err(GelError::String(
            "Paged gel layout needs a row length of at least 1".to_string(),
        ));
    }
    let ladder = GEL_LADDERS.resolve(ladder_name)?;

    let mut lanes = samples
        .iter()
        .map(|sample| sample_lane(ladder, sample))
        .collect::<Result<Vec<_>, GelError>>()?;
    let band_count = lanes.iter().map(|lane| lane.bands.len()).sum();

    // Pad the final row to full length so every row carries the same grid.
    let padding = (row_len - samples.len() % row_len) % row_len;
    for _ in 0..padding {
        lanes.push(padding_lane());
    }

    let reference = ladder_lane(ladder);
    let rows = lanes
        .chunks(row_len)
        .map(|chunk| {
            let mut row_lanes = Vec::with_capacity(chunk.len() + 2);
            row_lanes.push(reference.clone());
            row_lanes.extend(chunk.iter().cloned());
            row_lanes.push(reference.clone());
            GelRow { lanes: row_lanes }
        })
        .collect();

    Ok(PagedGelLayout {
        title: title.to_string(),
        ladder: ladder.kind(),
        row_len,
        rows,
        sample_count: samples.len(),
        band_count,
    })
}

pub fn build_scrollable_layout(
    samples: &[GelSample],
    title: &str,
    ladder_name: &str,
    visible_lanes: usize,
) -> Result<ScrollableGelLayout, GelError> {
    if visible_lanes == 0 {
        return Err(GelError::String(
            "Scrollable gel layout needs at least 1 visible lane".to_string(),
        ));
    }
    let ladder = GEL_LADDERS.resolve(ladder_name)?;

    let mut sample_lanes = samples
        .iter()
        .map(|sample| sample_lane(ladder, sample))
        .collect::<Result<Vec<_>, GelError>>()?;
    for lane in &mut sample_lanes {
        // Sub-bp sizes clamp to the domain minimum and would draw as a fake
        // full-length band; the paged renderer keeps them, this one hides.
        lane.bands.retain(|band| band.size_bp >= MIN_VISIBLE_BP);
    }

    Ok(ScrollableGelLayout {
        title: title.to_string(),
        ladder: ladder.kind(),
        ladder_lane: ladder_lane(ladder),
        sample_lanes,
        visible_lanes,
        color_domain: ladder.position_range(),
    })
}

/// Parse a sample sheet: a JSON array of `{"name", "sizes_bp"}` objects.
pub fn parse_sample_sheet(data: &str) -> Result<Vec<GelSample>, GelError> {
    Ok(serde_json::from_str(data)?)
}

pub fn load_sample_sheet(path: &str) -> Result<Vec<GelSample>, GelError> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| GelError::String(format!("Could not read sample sheet '{path}': {e}")))?;
    serde_json::from_str(&data)
        .map_err(|e| GelError::String(format!("Could not parse sample sheet '{path}': {e}")))
}

pub fn save_sample_sheet(path: &str, samples: &[GelSample]) -> Result<(), GelError> {
    let data = serde_json::to_string_pretty(samples)?;
    std::fs::write(path, data)
        .map_err(|e| GelError::String(format!("Could not write sample sheet '{path}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overflow_panel() -> Vec<GelSample> {
        (1..=14)
            .map(|i| GelSample::new(&format!("Sample {i}"), &[100.0 * i as f64]))
            .collect()
    }

    #[test]
    fn test_paged_rows_and_padding() {
        let layout = build_paged_layout(&overflow_panel(), "PCR", "1kb+", 12).unwrap();
        assert_eq!(layout.rows.len(), 2);
        assert_eq!(layout.sample_count, 14);
        assert_eq!(layout.band_count, 14);
        for row in &layout.rows {
            assert_eq!(row.lanes.len(), 14);
            assert!(row.lanes[0].kind.is_ladder());
            assert!(row.lanes[13].kind.is_ladder());
        }
        let tail = &layout.rows[1].lanes;
        assert_eq!(tail[1].name, "Sample 13");
        assert_eq!(tail[2].name, "Sample 14");
        for lane in &tail[3..13] {
            assert_eq!(lane.kind, LaneKind::Padding);
            assert_eq!(lane.name, EMPTY_LANE_NAME);
            assert!(lane.bands.is_empty());
        }
    }

    #[test]
    fn test_paged_exact_multiple_has_no_padding() {
        let samples = overflow_panel()[..12].to_vec();
        let layout = build_paged_layout(&samples, "PCR", "1kb+", 12).unwrap();
        assert_eq!(layout.rows.len(), 1);
        assert!(
            layout.rows[0]
                .lanes
                .iter()
                .all(|lane| lane.kind != LaneKind::Padding)
        );
    }

    #[test]
    fn test_paged_ladder_lanes_are_labeled() {
        let layout =
            build_paged_layout(&[GelSample::new("A", &[500.0])], "digest", "1kb+", 4).unwrap();
        let ladder = &layout.rows[0].lanes[0];
        assert_eq!(ladder.bands.len(), 19);
        assert_eq!(ladder.bands[0].label.as_deref(), Some("100"));
        assert_eq!(ladder.bands[18].label.as_deref(), Some("10000"));
    }

    #[test]
    fn test_paged_keeps_out_of_domain_bands() {
        let samples = [GelSample::new("A", &[0.0, 15000.0])];
        let layout = build_paged_layout(&samples, "PCR", "1kb+", 12).unwrap();
        let bands = &layout.rows[0].lanes[1].bands;
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].position, 0.934);
        assert_eq!(bands[1].position, 0.02);
    }

    #[test]
    fn test_scrollable_drops_subunit_bands() {
        let samples = [GelSample::new("A", &[0.0, 0.5, 1.0, 500.0])];
        let layout = build_scrollable_layout(&samples, "PCR", "1kb+", 20).unwrap();
        let sizes = layout.sample_lanes[0]
            .bands
            .iter()
            .map(|b| b.size_bp)
            .collect::<Vec<_>>();
        assert_eq!(sizes, vec![1.0, 500.0]);
        assert_eq!(layout.color_domain, (0.02, 0.934));
        assert_eq!(layout.lane_count(), 1);
    }

    #[test]
    fn test_scrollable_keeps_empty_lanes() {
        let samples = [GelSample::new("A", &[]), GelSample::new("B", &[500.0])];
        let layout = build_scrollable_layout(&samples, "PCR", "1kb+", 20).unwrap();
        assert_eq!(layout.lane_count(), 2);
        assert!(layout.sample_lanes[0].bands.is_empty());
    }

    #[test]
    fn test_zero_geometry_rejected() {
        let samples = [GelSample::new("A", &[500.0])];
        assert!(build_paged_layout(&samples, "PCR", "1kb+", 0).is_err());
        assert!(build_scrollable_layout(&samples, "PCR", "1kb+", 0).is_err());
    }

    #[test]
    fn test_invalid_size_names_lane() {
        let samples = [GelSample::new("S1", &[f64::NAN])];
        let err = build_paged_layout(&samples, "PCR", "1kb+", 12).unwrap_err();
        assert!(err.to_string().contains("S1"));
    }

    #[test]
    fn test_sample_sheet_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sheet.json");
        let path = path.to_str().unwrap();
        let samples = vec![
            GelSample::new("A", &[]),
            GelSample::new("B", &[100.0, 50.0, 500.0, 5000.0]),
        ];
        save_sample_sheet(path, &samples).unwrap();
        let loaded = load_sample_sheet(path).unwrap();
        assert_eq!(loaded, samples);
    }

    #[test]
    fn test_sample_sheet_parse_error() {
        assert!(parse_sample_sheet("not json").is_err());
        let err = load_sample_sheet("/nonexistent/sheet.json").unwrap_err();
        assert!(err.to_string().contains("Could not read sample sheet"));
    }
}
