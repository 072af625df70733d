use crate::error::GelError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// The closed set of reference ladders with embedded calibration tables.
///
/// Adding a ladder means adding a variant here and its calibration entry in
/// `assets/gel_ladders.json`; the catalog asserts both sides stay in sync.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum LadderKind {
    #[serde(rename = "1kb+")]
    OneKbPlus,
}

impl LadderKind {
    pub const ALL: [Self; 1] = [Self::OneKbPlus];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneKbPlus => "1kb+",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::OneKbPlus => "1 kb Plus DNA ladder",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        let norm = text.trim().to_ascii_lowercase();
        match norm.as_str() {
            // "1kb" is the historical alias; both names label the same table.
            "1kb+" | "1kb" | "1 kb+" | "1 kb" => Some(Self::OneKbPlus),
            _ => None,
        }
    }
}

/// One measured standard: a fragment size and the normalized vertical
/// position it settles at. Positions run 0 at the well side to 1 at the
/// far edge of the gel; larger standards migrate less and sit nearer 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPoint {
    pub size_bp: f64,
    pub position: f64,
}

#[derive(Clone, Debug)]
pub struct Ladder {
    kind: LadderKind,
    points: Vec<CalibrationPoint>,
}

impl Ladder {
    fn new(kind: LadderKind, parts: &Value) -> Self {
        let raw_parts = parts
            .as_array()
            .expect("Gel ladder entry is not an array")
            .iter()
            .map(|p| {
                p.as_array()
                    .expect("Gel ladder calibration pair is not an array")
            })
            .collect::<Vec<_>>();

        let mut points: Vec<CalibrationPoint> = raw_parts
            .into_iter()
            .filter_map(|p| {
                let size_bp = p.first()?.as_f64()?;
                let position = p.get(1)?.as_f64()?;
                if !size_bp.is_finite() || size_bp <= 0.0 || !position.is_finite() {
                    return None;
                }
                Some(CalibrationPoint { size_bp, position })
            })
            .collect();

        // Interpolation needs ascending sizes; the asset order is not trusted.
        points.sort_by(|a, b| a.size_bp.total_cmp(&b.size_bp));
        assert!(
            points.len() >= 2,
            "Gel ladder '{}' needs at least two calibration points",
            kind.as_str()
        );
        assert!(
            points.windows(2).all(|w| w[1].position <= w[0].position),
            "Gel ladder '{}' calibration positions must not increase with size",
            kind.as_str()
        );

        Self { kind, points }
    }

    pub fn kind(&self) -> LadderKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn points(&self) -> &[CalibrationPoint] {
        &self.points
    }

    pub fn sizes_bp(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.size_bp).collect()
    }

    pub fn min_bp(&self) -> f64 {
        self.points[0].size_bp
    }

    pub fn max_bp(&self) -> f64 {
        self.points[self.points.len() - 1].size_bp
    }

    /// Calibrated size domain; sizes outside it clamp to the nearest end.
    pub fn domain(&self) -> (f64, f64) {
        (self.min_bp(), self.max_bp())
    }

    /// (min, max) over the calibrated positions. Color normalization on the
    /// interactive renderer spans exactly this range for every track.
    pub fn position_range(&self) -> (f64, f64) {
        let min = self
            .points
            .iter()
            .map(|p| p.position)
            .fold(f64::INFINITY, f64::min);
        let max = self
            .points
            .iter()
            .map(|p| p.position)
            .fold(f64::NEG_INFINITY, f64::max);
        (min, max)
    }
}

#[derive(Clone, Debug)]
pub struct LadderCatalog {
    ladders: HashMap<LadderKind, Ladder>,
}

impl LadderCatalog {
    pub fn from_json_str(data: &str) -> Self {
        let mut ladders = HashMap::new();
        let res: Value = serde_json::from_str(data).expect("Invalid gel ladder JSON");
        let map = res.as_object().expect("Gel ladder JSON is not an object");
        for (name, parts) in map.iter() {
            let kind = LadderKind::parse(name).unwrap_or_else(|| {
                panic!("Embedded gel ladder '{name}' has no LadderKind variant")
            });
            ladders.insert(kind, Ladder::new(kind, parts));
        }
        for kind in LadderKind::ALL {
            assert!(
                ladders.contains_key(&kind),
                "Embedded gel ladder asset is missing calibration for '{}'",
                kind.as_str()
            );
        }
        Self { ladders }
    }

    pub fn get(&self, kind: LadderKind) -> &Ladder {
        // Every variant is asserted present when the catalog loads.
        &self.ladders[&kind]
    }

    /// Look a ladder up by user-supplied name. Unknown names are a fatal
    /// configuration error for the calling render; there is no default.
    pub fn resolve(&self, name: &str) -> Result<&Ladder, GelError> {
        match LadderKind::parse(name) {
            Some(kind) => Ok(self.get(kind)),
            None => Err(GelError::UnknownLadder {
                requested: name.to_string(),
                recognized: self.names_sorted(),
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ladder> {
        self.ladders.values()
    }

    pub fn names_sorted(&self) -> Vec<String> {
        let mut names = self
            .ladders
            .keys()
            .map(|kind| kind.as_str().to_string())
            .collect::<Vec<_>>();
        names.sort_unstable();
        names
    }
}

impl Default for LadderCatalog {
    fn default() -> Self {
        Self::from_json_str(include_str!("../assets/gel_ladders.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog() {
        let ladders = LadderCatalog::default();
        let ladder = ladders.get(LadderKind::OneKbPlus);
        assert_eq!(ladder.points().len(), 19);
        assert_eq!(ladder.points()[0].size_bp, 100.0);
        assert_eq!(ladder.points()[0].position, 0.934);
        assert_eq!(ladder.points()[18].size_bp, 10000.0);
        assert_eq!(ladder.points()[18].position, 0.02);
        assert_eq!(ladder.domain(), (100.0, 10000.0));
        assert_eq!(ladders.names_sorted(), vec!["1kb+".to_string()]);
    }

    #[test]
    fn test_points_sorted_and_monotone() {
        let ladders = LadderCatalog::default();
        let points = ladders.get(LadderKind::OneKbPlus).points();
        assert!(points.windows(2).all(|w| w[0].size_bp < w[1].size_bp));
        assert!(points.windows(2).all(|w| w[0].position >= w[1].position));
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(LadderKind::parse("1kb+"), Some(LadderKind::OneKbPlus));
        assert_eq!(LadderKind::parse("1kb"), Some(LadderKind::OneKbPlus));
        assert_eq!(LadderKind::parse(" 1KB+ "), Some(LadderKind::OneKbPlus));
        assert_eq!(LadderKind::parse("2-log"), None);
    }

    #[test]
    fn test_resolve_unknown_ladder() {
        let ladders = LadderCatalog::default();
        let err = ladders.resolve("2-log").unwrap_err();
        let text = err.to_string();
        assert!(text.contains("'2-log'"));
        assert!(text.contains("\"1kb+\""));
    }

    #[test]
    fn test_position_range() {
        let ladders = LadderCatalog::default();
        let (min, max) = ladders.get(LadderKind::OneKbPlus).position_range();
        assert_eq!(min, 0.02);
        assert_eq!(max, 0.934);
    }
}
