//! Attribute measurement scales.

use super::names;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The five mutually exclusive children of `measurementScale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementScale {
    Nominal,
    Ordinal,
    Interval,
    Ratio,
    DateTime,
}

impl MeasurementScale {
    /// Element name of the scale node under `measurementScale`.
    pub fn element_name(self) -> &'static str {
        match self {
            Self::Nominal => names::NOMINAL,
            Self::Ordinal => names::ORDINAL,
            Self::Interval => names::INTERVAL,
            Self::Ratio => names::RATIO,
            Self::DateTime => names::DATE_TIME,
        }
    }

    /// Maps an element name back to its scale.
    pub fn from_element_name(name: &str) -> Option<Self> {
        match name {
            names::NOMINAL => Some(Self::Nominal),
            names::ORDINAL => Some(Self::Ordinal),
            names::INTERVAL => Some(Self::Interval),
            names::RATIO => Some(Self::Ratio),
            names::DATE_TIME => Some(Self::DateTime),
            _ => None,
        }
    }

    /// Parses the word used on "Add Attribute" buttons (case-insensitive).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().replace([' ', '-'], "").as_str() {
            "nominal" => Some(Self::Nominal),
            "ordinal" => Some(Self::Ordinal),
            "interval" => Some(Self::Interval),
            "ratio" => Some(Self::Ratio),
            "datetime" => Some(Self::DateTime),
            _ => None,
        }
    }

    pub fn is_categorical(self) -> bool {
        matches!(self, Self::Nominal | Self::Ordinal)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Interval | Self::Ratio)
    }
}

impl Display for MeasurementScale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.element_name())
    }
}

#[cfg(test)]
mod tests {
    use super::MeasurementScale;

    #[test]
    fn labels_parse_regardless_of_case_and_spacing() {
        assert_eq!(
            MeasurementScale::from_label("Date Time"),
            Some(MeasurementScale::DateTime)
        );
        assert_eq!(
            MeasurementScale::from_label(" NOMINAL "),
            Some(MeasurementScale::Nominal)
        );
        assert_eq!(MeasurementScale::from_label("text"), None);
    }

    #[test]
    fn element_names_round_trip() {
        for scale in [
            MeasurementScale::Nominal,
            MeasurementScale::Ordinal,
            MeasurementScale::Interval,
            MeasurementScale::Ratio,
            MeasurementScale::DateTime,
        ] {
            assert_eq!(
                MeasurementScale::from_element_name(scale.element_name()),
                Some(scale)
            );
        }
    }
}
