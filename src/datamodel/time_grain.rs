use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, time::Duration};

use super::MetricOption;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeGrainUnit {
    Minute,
    #[default]
    Hour,
    Day,
}

impl TimeGrainUnit {
    pub const ALL: [TimeGrainUnit; 3] = [
        TimeGrainUnit::Minute,
        TimeGrainUnit::Hour,
        TimeGrainUnit::Day,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeGrainUnit::Minute => "minute",
            TimeGrainUnit::Hour => "hour",
            TimeGrainUnit::Day => "day",
        }
    }

    pub fn seconds(&self) -> u64 {
        match self {
            TimeGrainUnit::Minute => 60,
            TimeGrainUnit::Hour => 60 * 60,
            TimeGrainUnit::Day => 24 * 60 * 60,
        }
    }

    /// Entries of the time grain unit dropdown.
    pub fn options() -> Vec<MetricOption> {
        Self::ALL
            .iter()
            .map(|unit| MetricOption::named(unit.as_str()))
            .collect()
    }

    /// Grain of `count` units as an ISO-8601 duration (`PT5M`, `PT1H`, `P1D`).
    pub fn iso8601(&self, count: u32) -> String {
        match self {
            TimeGrainUnit::Minute => format!("PT{}M", count),
            TimeGrainUnit::Hour => format!("PT{}H", count),
            TimeGrainUnit::Day => format!("P{}D", count),
        }
    }
}

impl fmt::Display for TimeGrainUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimeGrainUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minute" => Ok(TimeGrainUnit::Minute),
            "hour" => Ok(TimeGrainUnit::Hour),
            "day" => Ok(TimeGrainUnit::Day),
            _ => Err(format!("Unknown time grain unit: {}", s)),
        }
    }
}

/// Grain of `count` units as a duration, saturating instead of overflowing.
pub fn time_grain_duration(count: u32, unit: TimeGrainUnit) -> Duration {
    Duration::from_secs(unit.seconds().saturating_mul(u64::from(count)))
}
