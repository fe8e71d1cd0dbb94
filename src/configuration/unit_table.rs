use std::fmt;
use std::str::FromStr;

use crate::configuration::error::ConfigurationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Speed,
    Size,
    Memory,
}

impl Kind {
    pub const ALL: [Kind; 3] = [Kind::Speed, Kind::Size, Kind::Memory];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Speed => "speed",
            Kind::Size => "size",
            Kind::Memory => "memory",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "speed" => Ok(Kind::Speed),
            "size" => Ok(Kind::Size),
            "memory" => Ok(Kind::Memory),
            kind => Err(ConfigurationError::UnknownUnitKind(kind.to_string())),
        }
    }
}

/// A base multiplier and the labels of its four magnitude tiers.
///
/// `labels[k]` names values in `[base^(k+1), base^(k+2))`; the top tier is
/// open ended. Anything below `base` is shown with `byte_label`.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitTable {
    base: u64,
    byte_label: String,
    labels: [String; 4],
}

impl UnitTable {
    pub fn new(
        base: u64,
        byte_label: impl Into<String>,
        labels: [&str; 4],
    ) -> Result<UnitTable, ConfigurationError> {
        if base <= 1 {
            return Err(ConfigurationError::InvalidBase(base));
        }

        Ok(UnitTable {
            base,
            byte_label: byte_label.into(),
            labels: labels.map(String::from),
        })
    }

    /// Builds a table from a label list of arbitrary length, as read from a
    /// settings file.
    pub fn from_labels(
        kind: Kind,
        base: u64,
        byte_label: impl Into<String>,
        labels: &[String],
    ) -> Result<UnitTable, ConfigurationError> {
        match labels {
            [k, m, g, t] => UnitTable::new(
                base,
                byte_label,
                [k.as_str(), m.as_str(), g.as_str(), t.as_str()],
            ),
            _ => Err(ConfigurationError::InvalidUnitCount {
                kind: kind.to_string(),
                count: labels.len(),
            }),
        }
    }

    pub fn default_speed() -> UnitTable {
        UnitTable::builtin(1000, ["kB/s", "MB/s", "GB/s", "TB/s"])
    }

    pub fn default_size() -> UnitTable {
        UnitTable::builtin(1000, ["kB", "MB", "GB", "TB"])
    }

    pub fn default_memory() -> UnitTable {
        UnitTable::builtin(1024, ["KiB", "MiB", "GiB", "TiB"])
    }

    fn builtin(base: u64, labels: [&str; 4]) -> UnitTable {
        UnitTable {
            base,
            byte_label: String::from("B"),
            labels: labels.map(String::from),
        }
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn byte_label(&self) -> &str {
        &self.byte_label
    }

    pub fn labels(&self) -> &[String; 4] {
        &self.labels
    }

    pub fn label(&self, tier: usize) -> &str {
        &self.labels[tier.min(3)]
    }

    /// `base^(tier + 1)` as a float divisor.
    pub fn divisor(&self, tier: usize) -> f64 {
        (self.base as f64).powi(tier.min(3) as i32 + 1)
    }

    /// Index of the tier `bytes` falls into, or `None` below `base`.
    pub fn tier_of(&self, bytes: f64) -> Option<usize> {
        if bytes < self.base as f64 {
            return None;
        }

        let mut tier = 0;
        while tier < 3 && bytes >= self.divisor(tier + 1) {
            tier += 1;
        }
        Some(tier)
    }
}
