//! Static SVG export of paged gel layouts.

use crate::gel_layout::PagedGelLayout;
use svg::Document;
use svg::node::element::{Line, Rectangle, Text};

const W: f32 = 1500.0;
const ROW_H: f32 = 500.0;
const TITLE_BAND: f32 = 60.0;
const LABEL_BAND: f32 = 40.0;
const ROW_PAD_BOTTOM: f32 = 24.0;
// Bands span this fraction of the lane pitch on each side of the center.
const BAND_HALF_WIDTH: f32 = 0.4;
const BACKGROUND_COLOR: &str = "#696969";
const BAND_COLOR: &str = "#ffffff";
const LANE_LABEL_COLOR: &str = "#ffffff";
const LADDER_LABEL_COLOR: &str = "#ff0000";

fn band_y(gel_top: f32, gel_bottom: f32, position: f64) -> f32 {
    gel_top + position as f32 * (gel_bottom - gel_top)
}

/// Render a paged layout as a self-contained SVG document. Position 0 maps
/// to the top of each row's gel area (the well side), 1 to the bottom.
pub fn export_paged_svg(layout: &PagedGelLayout) -> String {
    let h = TITLE_BAND + layout.rows.len() as f32 * ROW_H;

    let mut doc = Document::new()
        .set("viewBox", (0, 0, W, h))
        .set("width", W)
        .set("height", h)
        .add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", W)
                .set("height", h)
                .set("fill", BACKGROUND_COLOR),
        );

    doc = doc.add(
        Text::new(format!("{} in-silico gel", layout.title))
            .set("x", W / 2.0)
            .set("y", TITLE_BAND * 0.6)
            .set("text-anchor", "middle")
            .set("font-family", "monospace")
            .set("font-size", 18)
            .set("fill", "#ffffff"),
    );

    let mut labels: Vec<Text> = vec![];
    for (row_idx, row) in layout.rows.iter().enumerate() {
        let row_top = TITLE_BAND + row_idx as f32 * ROW_H;
        let gel_top = row_top + LABEL_BAND;
        let gel_bottom = row_top + ROW_H - ROW_PAD_BOTTOM;
        let pitch = W / row.lanes.len() as f32;

        for (lane_idx, lane) in row.lanes.iter().enumerate() {
            let cx = pitch * (lane_idx as f32 + 0.5);
            labels.push(
                Text::new(lane.name.clone())
                    .set("x", cx)
                    .set("y", gel_top - 10.0)
                    .set("text-anchor", "middle")
                    .set("font-family", "monospace")
                    .set("font-size", 12)
                    .set("fill", LANE_LABEL_COLOR),
            );

            for band in &lane.bands {
                let y = band_y(gel_top, gel_bottom, band.position);
                doc = doc.add(
                    Line::new()
                        .set("x1", cx - BAND_HALF_WIDTH * pitch)
                        .set("y1", y)
                        .set("x2", cx + BAND_HALF_WIDTH * pitch)
                        .set("y2", y)
                        .set("stroke", BAND_COLOR)
                        .set("stroke-width", 5),
                );
                if let Some(label) = &band.label {
                    labels.push(
                        Text::new(label.clone())
                            .set("x", cx)
                            .set("y", y)
                            .set("text-anchor", "middle")
                            .set("dominant-baseline", "middle")
                            .set("font-family", "monospace")
                            .set("font-size", 9)
                            .set("fill", LADDER_LABEL_COLOR),
                    );
                }
            }
        }
    }
    // Labels go on top of the band lines.
    for label in labels {
        doc = doc.add(label);
    }

    doc.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gel_layout::{GelSample, build_paged_layout};

    #[test]
    fn test_paged_svg_structure() {
        let samples = [
            GelSample::new("Sample 1", &[200.0, 500.0, 1500.0]),
            GelSample::new("Sample 2", &[100.0, 400.0, 5000.0]),
        ];
        let layout = build_paged_layout(&samples, "PCR", "1kb+", 4).unwrap();
        let svg = export_paged_svg(&layout);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("PCR in-silico gel"));
        assert!(svg.contains("Sample 1"));
        assert!(svg.contains("Sample 2"));
        assert!(svg.contains("Ladder"));
        assert!(svg.contains("Empty"));
        assert!(svg.contains(BACKGROUND_COLOR));
        assert!(svg.contains("10000"));
    }

    #[test]
    fn test_paged_svg_band_count() {
        let samples = [GelSample::new("A", &[500.0])];
        let layout = build_paged_layout(&samples, "digest", "1kb+", 1).unwrap();
        let svg = export_paged_svg(&layout);
        // Two flanking ladders of 19 bands plus the single sample band.
        assert_eq!(svg.matches("stroke-width=\"5\"").count(), 39);
    }

    #[test]
    fn test_paged_svg_row_height() {
        let samples = (1..=14)
            .map(|i| GelSample::new(&format!("S{i}"), &[1000.0]))
            .collect::<Vec<_>>();
        let layout = build_paged_layout(&samples, "PCR", "1kb+", 12).unwrap();
        let svg = export_paged_svg(&layout);
        let expected_height = TITLE_BAND + 2.0 * ROW_H;
        assert!(svg.contains(&format!("height=\"{expected_height}\"")));
    }
}
