use std::fmt;

use serde::Serialize;

/// Qualitative label of a 0-20 average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Band {
    #[serde(rename = "Excellent")]
    Excellent,
    #[serde(rename = "Très bien")]
    VeryGood,
    #[serde(rename = "Bien")]
    Good,
    #[serde(rename = "Passable")]
    Fair,
    #[serde(rename = "Insuffisant")]
    Insufficient,
}

/// Lower bounds, inclusive, from the highest band down.
const THRESHOLDS: [(f64, Band); 4] = [
    (16.0, Band::Excellent),
    (14.0, Band::VeryGood),
    (12.0, Band::Good),
    (10.0, Band::Fair),
];

impl Band {
    /// Total over every f64; anything below 10 (including NaN) is
    /// `Insufficient`.
    pub fn from_average(average: f64) -> Band {
        THRESHOLDS
            .iter()
            .find(|(floor, _)| average >= *floor)
            .map(|(_, band)| *band)
            .unwrap_or(Band::Insufficient)
    }

    pub fn label(self) -> &'static str {
        match self {
            Band::Excellent => "Excellent",
            Band::VeryGood => "Très bien",
            Band::Good => "Bien",
            Band::Fair => "Passable",
            Band::Insufficient => "Insuffisant",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
