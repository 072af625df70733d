//! Interactive figure export of scrollable gel layouts.
//!
//! Emits a plotly.js figure as typed JSON: one narrow ladder track beside a
//! wide scrollable sample area sharing a reversed y axis. Every band is a
//! visible line trace plus an invisible marker trace that carries hover
//! text tinted by migration distance.

use crate::error::GelError;
use crate::gel_layout::ScrollableGelLayout;
use serde::Serialize;

const LADDER_LANE_WIDTH: f64 = 0.4;
const SAMPLE_LANE_WIDTH: f64 = 0.8;
const BAND_LINE_WIDTH: f64 = 3.0;
// Invisible markers spread across the band so hover fires along its width.
const HOVER_SAMPLES: usize = 5;
const GEL_BACKGROUND: &str = "dimgrey";

/// Viridis anchors, matching the colormap the hover tints come from.
const VIRIDIS_ANCHORS: [(f64, [u8; 3]); 17] = [
    (0.0, [68, 1, 84]),
    (0.06274509803921569, [72, 24, 106]),
    (0.12549019607843137, [71, 45, 123]),
    (0.18823529411764706, [66, 64, 134]),
    (0.25098039215686274, [59, 82, 139]),
    (0.3137254901960784, [51, 99, 141]),
    (0.3764705882352941, [44, 114, 142]),
    (0.4392156862745098, [38, 130, 142]),
    (0.5019607843137255, [33, 145, 140]),
    (0.5647058823529412, [31, 160, 136]),
    (0.6274509803921569, [40, 174, 128]),
    (0.6901960784313725, [63, 188, 115]),
    (0.7529411764705882, [94, 201, 98]),
    (0.8156862745098039, [132, 212, 75]),
    (0.8784313725490196, [173, 220, 48]),
    (0.9411764705882353, [216, 226, 25]),
    (1.0, [253, 231, 37]),
];

#[derive(Debug, Clone, Serialize)]
pub struct ScatterTrace {
    #[serde(rename = "type")]
    trace_type: &'static str,
    x: Vec<f64>,
    y: Vec<f64>,
    mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    marker: Option<MarkerStyle>,
    text: Vec<String>,
    hoverinfo: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    showlegend: bool,
    xaxis: &'static str,
    yaxis: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct LineStyle {
    color: &'static str,
    width: f64,
}

#[derive(Debug, Clone, Serialize)]
struct MarkerStyle {
    size: f64,
    color: String,
    opacity: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    domain: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    anchor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    side: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tickmode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tickvals: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ticktext: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tickangle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ticks: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    autorange: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    showticklabels: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    showgrid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zeroline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rangeslider: Option<RangeSlider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<AxisTitle>,
}

#[derive(Debug, Clone, Serialize)]
struct RangeSlider {
    visible: bool,
}

#[derive(Debug, Clone, Serialize)]
struct AxisTitle {
    text: String,
}

#[derive(Debug, Clone, Serialize)]
struct FigureTitle {
    text: String,
    x: f64,
    y: f64,
    xanchor: &'static str,
    yanchor: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct Margin {
    t: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FigureLayout {
    title: FigureTitle,
    margin: Margin,
    plot_bgcolor: &'static str,
    xaxis: Axis,
    xaxis2: Axis,
    yaxis: Axis,
    height: f64,
    width: f64,
    showlegend: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlotlyFigure {
    pub data: Vec<ScatterTrace>,
    pub layout: FigureLayout,
}

fn rgb_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Viridis color for `t` in [0, 1]; values outside clamp to the ends.
/// Anchor stops return their tabulated color exactly.
pub fn viridis_hex(t: f64) -> String {
    let t = t.clamp(0.0, 1.0);
    let idx = VIRIDIS_ANCHORS.partition_point(|(stop, _)| *stop < t);
    if idx == 0 {
        return rgb_hex(VIRIDIS_ANCHORS[0].1);
    }
    if idx < VIRIDIS_ANCHORS.len() && VIRIDIS_ANCHORS[idx].0 == t {
        return rgb_hex(VIRIDIS_ANCHORS[idx].1);
    }
    if idx == VIRIDIS_ANCHORS.len() {
        return rgb_hex(VIRIDIS_ANCHORS[VIRIDIS_ANCHORS.len() - 1].1);
    }
    let (lo_stop, lo) = VIRIDIS_ANCHORS[idx - 1];
    let (hi_stop, hi) = VIRIDIS_ANCHORS[idx];
    let s = (t - lo_stop) / (hi_stop - lo_stop);
    let mut rgb = [0u8; 3];
    for (ch, slot) in rgb.iter_mut().enumerate() {
        let c = lo[ch] as f64 + s * (hi[ch] as f64 - lo[ch] as f64);
        *slot = c.round() as u8;
    }
    rgb_hex(rgb)
}

fn normalize(value: f64, domain: (f64, f64)) -> f64 {
    let (min, max) = domain;
    if max <= min {
        return 0.0;
    }
    (value - min) / (max - min)
}

fn linspace(from: f64, to: f64, count: usize) -> Vec<f64> {
    if count <= 1 {
        return vec![from];
    }
    let step = (to - from) / (count - 1) as f64;
    (0..count).map(|i| from + step * i as f64).collect()
}

/// Integral sizes print without the trailing `.0` the float type would add.
fn format_bp(size_bp: f64) -> String {
    if size_bp.fract() == 0.0 && size_bp.abs() < 1e15 {
        format!("{}", size_bp as i64)
    } else {
        format!("{size_bp}")
    }
}

fn band_line_trace(
    xaxis: &'static str,
    center: f64,
    lane_width: f64,
    position: f64,
    text: String,
    name: Option<String>,
) -> ScatterTrace {
    ScatterTrace {
        trace_type: "scatter",
        x: vec![center - lane_width / 2.0, center + lane_width / 2.0],
        y: vec![position, position],
        mode: "lines",
        line: Some(LineStyle {
            color: "white",
            width: BAND_LINE_WIDTH,
        }),
        marker: None,
        text: vec![text; 2],
        hoverinfo: "none",
        name,
        showlegend: false,
        xaxis,
        yaxis: "y",
    }
}

fn band_hover_trace(
    xaxis: &'static str,
    center: f64,
    lane_width: f64,
    position: f64,
    color: String,
    text: String,
) -> ScatterTrace {
    let x = linspace(
        center - lane_width / 2.0,
        center + lane_width / 2.0,
        HOVER_SAMPLES,
    );
    let y = vec![position; x.len()];
    let text = vec![text; x.len()];
    ScatterTrace {
        trace_type: "scatter",
        x,
        y,
        mode: "markers",
        line: None,
        marker: Some(MarkerStyle {
            size: 1.0,
            color,
            opacity: 0.0,
        }),
        text,
        hoverinfo: "text",
        name: None,
        showlegend: false,
        xaxis,
        yaxis: "y",
    }
}

/// Build the full figure for a scrollable layout. The ladder track sits on
/// axis `x`, samples on `x2`, both sharing the reversed `y`.
pub fn export_scrollable_figure(layout: &ScrollableGelLayout) -> PlotlyFigure {
    let ladder_name = layout.ladder.as_str();
    let mut data = vec![];

    for band in &layout.ladder_lane.bands {
        let size = format_bp(band.size_bp);
        data.push(band_line_trace(
            "x",
            0.0,
            LADDER_LANE_WIDTH,
            band.position,
            format!("Ladder {ladder_name}: {size} bp"),
            Some(ladder_name.to_string()),
        ));
        let color = viridis_hex(normalize(band.position, layout.color_domain));
        data.push(band_hover_trace(
            "x",
            0.0,
            LADDER_LANE_WIDTH,
            band.position,
            color,
            format!("{ladder_name}: {size} bp"),
        ));
    }

    for (lane_idx, lane) in layout.sample_lanes.iter().enumerate() {
        let center = lane_idx as f64;
        for band in &lane.bands {
            let size = format_bp(band.size_bp);
            data.push(band_line_trace(
                "x2",
                center,
                SAMPLE_LANE_WIDTH,
                band.position,
                format!("{size} bp"),
                None,
            ));
            let color = viridis_hex(normalize(band.position, layout.color_domain));
            data.push(band_hover_trace(
                "x2",
                center,
                SAMPLE_LANE_WIDTH,
                band.position,
                color,
                format!("{}: {size} bp", lane.name),
            ));
        }
    }

    let sample_names = layout
        .sample_lanes
        .iter()
        .map(|lane| lane.name.clone())
        .collect::<Vec<_>>();

    PlotlyFigure {
        data,
        layout: FigureLayout {
            title: FigureTitle {
                text: layout.title.clone(),
                x: 0.5,
                y: 0.95,
                xanchor: "left",
                yanchor: "top",
            },
            margin: Margin { t: 150.0 },
            plot_bgcolor: GEL_BACKGROUND,
            xaxis: Axis {
                domain: Some([0.0, 0.1]),
                range: Some([-0.5, 0.5]),
                anchor: Some("y"),
                side: Some("top"),
                tickmode: Some("array"),
                tickvals: Some(vec![0.0]),
                ticktext: Some(vec![format!("{ladder_name} ladder")]),
                showgrid: Some(false),
                zeroline: Some(false),
                ..Axis::default()
            },
            xaxis2: Axis {
                domain: Some([0.101, 1.0]),
                // One extra half lane of slack on the right, as rendered
                // upstream since the first release.
                range: Some([-0.5, layout.visible_lanes as f64 + 0.5]),
                anchor: Some("y"),
                side: Some("top"),
                tickmode: Some("array"),
                tickvals: Some((0..layout.lane_count()).map(|i| i as f64).collect()),
                ticktext: Some(sample_names),
                tickangle: Some(45.0),
                showgrid: Some(false),
                zeroline: Some(false),
                rangeslider: Some(RangeSlider { visible: true }),
                ..Axis::default()
            },
            yaxis: Axis {
                anchor: Some("x"),
                ticks: Some(""),
                autorange: Some("reversed"),
                showticklabels: Some(false),
                showgrid: Some(false),
                zeroline: Some(false),
                title: Some(AxisTitle {
                    text: "Migration distance".to_string(),
                }),
                ..Axis::default()
            },
            height: 800.0,
            width: 1200.0,
            showlegend: false,
        },
    }
}

pub fn figure_to_json(figure: &PlotlyFigure) -> Result<String, GelError> {
    Ok(serde_json::to_string_pretty(figure)?)
}

/// Wrap a figure in a standalone HTML page loading plotly.js from its CDN.
pub fn export_scrollable_html(figure: &PlotlyFigure) -> Result<String, GelError> {
    let data = serde_json::to_string(&figure.data)?;
    let layout = serde_json::to_string(&figure.layout)?;
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<script src="https://cdn.plot.ly/plotly-2.32.0.min.js"></script>
</head>
<body>
<div id="insilico-gel"></div>
<script>
Plotly.newPlot("insilico-gel", {data}, {layout}, {{"responsive": true}});
</script>
</body>
</html>
"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gel_layout::{GelSample, build_scrollable_layout};

    fn demo_layout() -> ScrollableGelLayout {
        let samples = [
            GelSample::new("Sample A", &[]),
            GelSample::new("Sample B", &[100.0, 50.0, 1500.0, 5000.0]),
        ];
        build_scrollable_layout(&samples, "Cloning check", "1kb+", 20).unwrap()
    }

    #[test]
    fn test_viridis_anchor_colors() {
        assert_eq!(viridis_hex(0.0), "#440154");
        assert_eq!(viridis_hex(1.0), "#fde725");
        assert_eq!(viridis_hex(0.5019607843137255), "#21918c");
        assert_eq!(viridis_hex(-1.0), "#440154");
        assert_eq!(viridis_hex(2.0), "#fde725");
    }

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize(0.02, (0.02, 0.934)), 0.0);
        assert_eq!(normalize(0.934, (0.02, 0.934)), 1.0);
        assert_eq!(normalize(0.5, (1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_format_bp() {
        assert_eq!(format_bp(100.0), "100");
        assert_eq!(format_bp(2.5), "2.5");
    }

    #[test]
    fn test_trace_count() {
        let figure = export_scrollable_figure(&demo_layout());
        // 19 ladder bands and 4 sample bands, each a line plus hover trace.
        assert_eq!(figure.data.len(), 2 * (19 + 4));
    }

    #[test]
    fn test_figure_json_content() {
        let json = figure_to_json(&export_scrollable_figure(&demo_layout())).unwrap();
        assert!(json.contains("rangeslider"));
        assert!(json.contains("\"autorange\": \"reversed\""));
        assert!(json.contains("Migration distance"));
        assert!(json.contains("1kb+ ladder"));
        assert!(json.contains("Ladder 1kb+: 100 bp"));
        assert!(json.contains("Sample B: 1500 bp"));
        assert!(json.contains("dimgrey"));
        assert!(json.contains("#fde725"));
        assert!(json.contains("Cloning check"));
    }

    #[test]
    fn test_hover_marker_shape() {
        let figure = export_scrollable_figure(&demo_layout());
        let hover = &figure.data[1];
        assert_eq!(hover.mode, "markers");
        assert_eq!(hover.x.len(), HOVER_SAMPLES);
        assert_eq!(hover.hoverinfo, "text");
    }

    #[test]
    fn test_html_wrapper() {
        let figure = export_scrollable_figure(&demo_layout());
        let html = export_scrollable_html(&figure).unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("https://cdn.plot.ly/plotly-2.32.0.min.js"));
        assert!(html.contains("Plotly.newPlot(\"insilico-gel\""));
    }
}
