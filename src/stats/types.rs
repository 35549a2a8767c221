use serde::Serialize;

/// Averages over the choice records of a session. Passes are counted but do
/// not enter any average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub choices: usize,
    pub passes: usize,
    pub hits: u32,
    pub hit_rate: f64,
    pub avg_latency: f64,
    pub avg_confidence: f64,
    /// Mean distance between stated confidence and the outcome (1 hit, 0 miss).
    pub confidence_gap: f64,
    pub longest_streak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Archetype {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Rank {
    Novice,
    Solid,
    Elite,
}

impl Rank {
    pub fn for_hits(hits: u32) -> Self {
        if hits >= 12 {
            Rank::Elite
        } else if hits >= 8 {
            Rank::Solid
        } else {
            Rank::Novice
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Novice => "Novice",
            Rank::Solid => "Solid",
            Rank::Elite => "Elite",
        }
    }
}

/// Plot coordinate in a 100x100 box; `y` is inverted confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub x: f64,
    pub y: f64,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmFrame {
    pub label: &'static str,
    pub image_source: &'static str,
    pub correct: bool,
    /// Confidence on a 0..=10 scale.
    pub sense: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub stats: SessionStats,
    pub correlation: String,
    pub archetype: Archetype,
    pub mentor_insight: &'static str,
    pub rank: Rank,
    pub trend: Vec<TrendPoint>,
    pub trend_path: String,
    pub film_strip: Vec<FilmFrame>,
}
