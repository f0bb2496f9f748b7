//! Core domain types for the BMI calculator.
//!
//! This module defines:
//! - Unit systems and the measurements entered in each
//! - BMI categories with their static display lookups
//! - Computed results and the persisted history record

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Units and Measurements
// ============================================================================

/// Measurement unit family
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UnitSystem {
    /// Kilograms and centimetres
    #[default]
    Metric,
    /// Pounds, feet and inches
    Imperial,
}

impl UnitSystem {
    pub fn weight_label(self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg",
            UnitSystem::Imperial => "lb",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "Metric"),
            UnitSystem::Imperial => write!(f, "Imperial"),
        }
    }
}

/// Raw inputs for one calculation, in the units of the chosen system
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Measurement {
    Metric {
        weight_kg: f64,
        height_cm: f64,
    },
    Imperial {
        weight_lb: f64,
        height_ft: f64,
        height_in: f64,
    },
}

impl Measurement {
    pub fn unit(&self) -> UnitSystem {
        match self {
            Measurement::Metric { .. } => UnitSystem::Metric,
            Measurement::Imperial { .. } => UnitSystem::Imperial,
        }
    }

    /// Weight as stored in a history record (kg or lb)
    pub fn recorded_weight(&self) -> f64 {
        match *self {
            Measurement::Metric { weight_kg, .. } => weight_kg,
            Measurement::Imperial { weight_lb, .. } => weight_lb,
        }
    }

    /// Height as stored in a history record: centimetres, or total inches
    pub fn recorded_height(&self) -> f64 {
        match *self {
            Measurement::Metric { height_cm, .. } => height_cm,
            Measurement::Imperial {
                height_ft,
                height_in,
                ..
            } => total_inches(height_ft, height_in),
        }
    }
}

/// Convert a feet + inches height into inches
pub fn total_inches(feet: f64, inches: f64) -> f64 {
    feet * 12.0 + inches
}

// ============================================================================
// Categories and Results
// ============================================================================

/// Health classification derived from a rounded BMI score
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Human-readable label of the numeric band this category covers
    pub fn range_label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "< 18.5",
            BmiCategory::Normal => "18.5 - 24.9",
            BmiCategory::Overweight => "25.0 - 29.9",
            BmiCategory::Obese => "≥ 30.0",
        }
    }

    /// Display color as a hex string
    pub fn color(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "#3498db",
            BmiCategory::Normal => "#13ec5b",
            BmiCategory::Overweight => "#f1c40f",
            BmiCategory::Obese => "#e74c3c",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        };
        f.pad(name)
    }
}

/// Outcome of a single calculation. Not persisted as-is.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BmiResult {
    /// BMI rounded to one decimal place
    pub score: f64,
    pub category: BmiCategory,
    pub color: &'static str,
    pub range: &'static str,
}

// ============================================================================
// History Records
// ============================================================================

/// A persisted calculation
///
/// Built only through [`BmiRecord::new`], so `category` always matches the
/// classification of `bmi`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BmiRecord {
    pub id: String,
    /// Creation time in milliseconds since the Unix epoch
    pub timestamp: i64,
    pub bmi: f64,
    pub category: BmiCategory,
    pub weight: f64,
    pub height: f64,
    pub unit: UnitSystem,
}

impl BmiRecord {
    /// Create a record for `result`, stamped with `now`
    pub fn new(measurement: &Measurement, result: &BmiResult, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: now.timestamp_millis(),
            bmi: result.score,
            category: result.category,
            weight: measurement.recorded_weight(),
            height: measurement.recorded_height(),
            unit: measurement.unit(),
        }
    }

    /// Whether the stored category agrees with the stored score
    pub fn is_consistent(&self) -> bool {
        crate::engine::classify(self.bmi) == self.category
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }

    /// Creation date in the local timezone, `YYYY-MM-DD`
    pub fn local_date(&self) -> String {
        match self.created_at() {
            Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d").to_string(),
            None => "unknown".into(),
        }
    }

    /// e.g. `70kg` or `154lb`
    pub fn weight_display(&self) -> String {
        format!("{}{}", self.weight, self.unit.weight_label())
    }

    /// e.g. `175cm` or `5ft 9in`
    pub fn height_display(&self) -> String {
        match self.unit {
            UnitSystem::Metric => format!("{}cm", self.height),
            UnitSystem::Imperial => {
                let feet = (self.height / 12.0).floor();
                let inches = self.height % 12.0;
                format!("{}ft {}in", feet, inches)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> BmiResult {
        BmiResult {
            score: 22.7,
            category: BmiCategory::Normal,
            color: BmiCategory::Normal.color(),
            range: BmiCategory::Normal.range_label(),
        }
    }

    #[test]
    fn test_imperial_record_stores_total_inches() {
        let m = Measurement::Imperial {
            weight_lb: 154.0,
            height_ft: 5.0,
            height_in: 9.0,
        };
        let record = BmiRecord::new(&m, &sample_result(), Utc::now());
        assert_eq!(record.unit, UnitSystem::Imperial);
        assert_eq!(record.weight, 154.0);
        assert_eq!(record.height, 69.0);
        assert_eq!(record.weight_display(), "154lb");
        assert_eq!(record.height_display(), "5ft 9in");
    }

    #[test]
    fn test_metric_display() {
        let m = Measurement::Metric {
            weight_kg: 70.0,
            height_cm: 175.0,
        };
        let record = BmiRecord::new(&m, &sample_result(), Utc::now());
        assert_eq!(record.weight_display(), "70kg");
        assert_eq!(record.height_display(), "175cm");
    }

    #[test]
    fn test_record_ids_are_unique() {
        let m = Measurement::Metric {
            weight_kg: 70.0,
            height_cm: 175.0,
        };
        let now = Utc::now();
        let a = BmiRecord::new(&m, &sample_result(), now);
        let b = BmiRecord::new(&m, &sample_result(), now);
        assert_eq!(a.timestamp, b.timestamp);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&UnitSystem::Imperial).unwrap();
        assert_eq!(json, "\"Imperial\"");
        let cat: BmiCategory = serde_json::from_str("\"Overweight\"").unwrap();
        assert_eq!(cat, BmiCategory::Overweight);
    }

    #[test]
    fn test_category_lookups() {
        assert_eq!(BmiCategory::Underweight.color(), "#3498db");
        assert_eq!(BmiCategory::Obese.range_label(), "≥ 30.0");
        assert_eq!(BmiCategory::Overweight.to_string(), "Overweight");
    }
}
